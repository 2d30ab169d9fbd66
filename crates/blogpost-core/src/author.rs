// crates/blogpost-core/src/author.rs - Default author
//
// The last author who wrote a post on this machine is remembered in a small
// side file (`.authorrc` by default) holding just the name. It is read once
// when the tool starts and written at most once, the first time someone
// identifies themselves.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::prompt::{PromptError, Prompter, find_case_insensitive};

/// Errors raised while resolving the default author
#[derive(Error, Debug)]
pub enum AuthorError {
    #[error("failed to access author file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Result type for author operations
pub type AuthorResult<T> = Result<T, AuthorError>;

/// Reads and writes the default-author side file
#[derive(Debug, Clone)]
pub struct AuthorStore {
    path: PathBuf,
}

impl AuthorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The remembered author, if the file exists and isn't blank
    pub fn load(&self) -> AuthorResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let name = content.trim();
                Ok((!name.is_empty()).then(|| name.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AuthorError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    pub fn save(&self, name: &str) -> AuthorResult<()> {
        fs::write(&self.path, name).map_err(|source| AuthorError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Work out who is writing the post
///
/// A remembered author who is still an active member is used as is. Otherwise
/// the user is asked, with the active members as suggestions, and the answer
/// is remembered. When the roster is empty any non-blank name is accepted.
pub fn resolve_default_author<P: Prompter>(
    prompter: &mut P,
    store: &AuthorStore,
    members: &[String],
) -> AuthorResult<String> {
    if let Some(saved) = store.load()? {
        if let Some(member) = find_case_insensitive(members, &saved) {
            debug!(author = %member, "using remembered author");
            return Ok(member.clone());
        }
        prompter.warn(&format!("{saved} is not a valid author."));
    }

    let author = loop {
        let answer = prompter.suggest("Who are you?", members)?;
        let answer = answer.trim();
        if answer.is_empty() {
            prompter.warn("Please answer");
            continue;
        }
        if members.is_empty() {
            break answer.to_string();
        }
        match find_case_insensitive(members, answer) {
            Some(member) => break member.clone(),
            None => prompter.warn(&format!("{answer} is not a valid author.")),
        }
    };

    store.save(&author)?;
    debug!(author = %author, path = %store.path().display(), "remembered default author");
    Ok(author)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedPrompter;
    use tempfile::TempDir;

    fn members() -> Vec<String> {
        vec!["Alex".to_string(), "Zoé".to_string()]
    }

    #[test]
    fn test_remembered_author_is_used_without_asking() {
        let temp = TempDir::new().unwrap();
        let store = AuthorStore::new(temp.path().join(".authorrc"));
        store.save("Zoé\n").unwrap();

        let mut prompter = ScriptedPrompter::new(Vec::<&str>::new());
        let author = resolve_default_author(&mut prompter, &store, &members()).unwrap();

        assert_eq!(author, "Zoé");
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_missing_file_asks_and_remembers() {
        let temp = TempDir::new().unwrap();
        let store = AuthorStore::new(temp.path().join(".authorrc"));

        let mut prompter = ScriptedPrompter::new(["", "Nobody", "alex"]);
        let author = resolve_default_author(&mut prompter, &store, &members()).unwrap();

        assert_eq!(author, "Alex");
        assert_eq!(store.load().unwrap(), Some("Alex".to_string()));
        assert_eq!(
            prompter.warnings,
            vec!["Please answer", "Nobody is not a valid author."]
        );
        assert_eq!(prompter.suggestions[0], members());
    }

    #[test]
    fn test_stale_author_is_reported_then_replaced() {
        let temp = TempDir::new().unwrap();
        let store = AuthorStore::new(temp.path().join(".authorrc"));
        store.save("Bob").unwrap();

        let mut prompter = ScriptedPrompter::new(["Alex"]);
        let author = resolve_default_author(&mut prompter, &store, &members()).unwrap();

        assert_eq!(author, "Alex");
        assert_eq!(prompter.warnings, vec!["Bob is not a valid author."]);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "Alex");
    }

    #[test]
    fn test_empty_roster_accepts_any_name() {
        let temp = TempDir::new().unwrap();
        let store = AuthorStore::new(temp.path().join(".authorrc"));

        let mut prompter = ScriptedPrompter::new(["  Guest  "]);
        let author = resolve_default_author(&mut prompter, &store, &[]).unwrap();
        assert_eq!(author, "Guest");
    }
}
