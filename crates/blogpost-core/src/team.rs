// crates/blogpost-core/src/team.rs - Team roster
//
// Each member of the team has a content file with a `name` attribute and an
// optional `retired` flag. Active members are the candidates offered when
// choosing the authors of a post.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::catalog::{CatalogResult, TagCatalog};
use crate::frontmatter::ContentFile;

/// Names of the members in `team_dir` that are not retired, sorted
pub fn active_members(team_dir: &Path) -> CatalogResult<Vec<String>> {
    let files = TagCatalog::new().scan(team_dir)?;
    let members = active_names(&files);
    debug!(dir = %team_dir.display(), members = members.len(), "loaded team roster");
    Ok(members)
}

/// Filter member files down to the names of active members
///
/// Files without a usable `name` are ignored.
pub fn active_names<'a>(files: impl IntoIterator<Item = &'a ContentFile>) -> Vec<String> {
    files
        .into_iter()
        .filter(|file| file.attributes.get_bool("retired") != Some(true))
        .filter_map(|file| file.attributes.get_str("name"))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
