// crates/blogpost-core/src/catalog.rs - Tag vocabulary
//
// The vocabulary is every tag ever used on the blog, lowercased, deduplicated
// and sorted. It feeds the tag suggestions shown while writing a new post.
//
// Only the top level of the content directory is scanned. Hidden entries and
// subdirectories are skipped; every other file is expected to be readable
// text. One unreadable or malformed file fails the whole scan: a partial
// vocabulary is never returned.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::frontmatter::{ContentFile, FrontMatterError, FrontMatterParser, FrontMatterReader, YamlParser};

/// Errors raised while scanning a content directory
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to list content directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    File(#[from] FrontMatterError),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Scans content directories through a front matter reader
#[derive(Debug, Clone, Default)]
pub struct TagCatalog<P = YamlParser> {
    reader: FrontMatterReader<P>,
}

impl TagCatalog<YamlParser> {
    pub fn new() -> Self {
        Self {
            reader: FrontMatterReader::new(),
        }
    }
}

impl<P: FrontMatterParser> TagCatalog<P> {
    pub fn with_reader(reader: FrontMatterReader<P>) -> Self {
        Self { reader }
    }

    /// Read the front matter of every file directly inside `dir`
    ///
    /// Files come back sorted by path so that the first failure reported is
    /// stable between runs.
    pub fn scan(&self, dir: &Path) -> CatalogResult<Vec<ContentFile>> {
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if entry.file_name().to_string_lossy().starts_with('.') {
                debug!(path = %path.display(), "skipping hidden entry");
                continue;
            }
            if !path.is_file() {
                debug!(path = %path.display(), "skipping non-file entry");
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            debug!(path = %path.display(), "reading front matter");
            files.push(self.reader.read(&path)?);
        }

        Ok(files)
    }

    /// Build the sorted, lowercase, duplicate-free tag vocabulary of `dir`
    pub fn build_vocabulary(&self, dir: &Path) -> CatalogResult<Vec<String>> {
        let files = self.scan(dir)?;
        let vocabulary = fold_tags(&files);
        debug!(
            dir = %dir.display(),
            files = files.len(),
            tags = vocabulary.len(),
            "built tag vocabulary"
        );
        Ok(vocabulary)
    }
}

/// Build the tag vocabulary of `dir` with the default YAML reader
///
/// SCANNING RULES:
/// - Only regular files directly inside `dir` are read
/// - Hidden entries (leading `.`) and subdirectories are skipped
/// - Files without front matter or without `tags` contribute nothing
///
/// RESULT:
/// Tags are trimmed and lowercased. The result is sorted and unique, so it
/// does not depend on the order in which files are listed.
///
/// ERROR HANDLING:
/// The first file with broken front matter aborts the build, and the error
/// names that file. A missing or unreadable `dir` is `CatalogError::ReadDir`.
pub fn build_vocabulary(dir: &Path) -> CatalogResult<Vec<String>> {
    TagCatalog::new().build_vocabulary(dir)
}

/// Fold the tags of all files into one vocabulary
///
/// The fold is order independent: tags are normalised first, then collected
/// into an ordered set.
pub fn fold_tags<'a>(files: impl IntoIterator<Item = &'a ContentFile>) -> Vec<String> {
    files
        .into_iter()
        .flat_map(ContentFile::tags)
        .map(|tag| normalize_tag(&tag))
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Canonical form of a tag: trimmed and lowercased
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
