// crates/blogpost-core/src/post.rs - Post rendering and persistence
//
// Turns the answers collected at the prompt into a markdown file:
//
// ```markdown
// ---
// title: "My Post"
// slug: "my-post"
// date: 2024-03-01
// description: "desc"
// tags:
// - go
// ---
//
// ```
//
// The file is named `{date}-{slug}.md` and created inside the posts
// directory. An existing file is never overwritten.

use chrono::{Local, NaiveDate};
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

use crate::frontmatter::MARKER;

/// Date format used in file names and front matter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

static PLAIN_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{L}[\p{L}\p{N} ._+/-]*$").expect("plain item pattern is valid")
});

/// Words YAML would not read back as strings when left unquoted
const RESERVED_WORDS: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "y", "n"];

/// Errors raised while writing a new post
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{path} already exists, refusing to overwrite it")]
    AlreadyExists { path: PathBuf },

    #[error("cannot derive a file name from title {title:?}")]
    EmptySlug { title: String },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render front matter: {0}")]
    Render(String),
}

/// Result type for write operations
pub type WriteResult<T> = Result<T, WriteError>;

/// Answers gathered from the author before the post is written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftAnswers {
    pub title: String,
    /// Slug chosen at the prompt; derived from the title when `None`
    pub slug: Option<String>,
    pub description: String,
    /// `None` when author collection is turned off
    pub authors: Option<Vec<String>>,
    /// Tags in selection order, without duplicates
    pub selected_tags: Vec<String>,
}

impl DraftAnswers {
    /// The slug the post will be written under
    pub fn effective_slug(&self) -> String {
        match &self.slug {
            Some(slug) => slugify(slug),
            None => slugify(&self.title),
        }
    }
}

/// Derive a URL-safe slug from free text
///
/// Lowercases the text, collapses every run of characters outside `[a-z0-9]`
/// into a single `-` and trims dashes from both ends.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// A fully rendered post, ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct PostDocument {
    pub slug: String,
    pub date: NaiveDate,
    pub path: PathBuf,
    pub body: String,
}

impl PostDocument {
    pub fn new(content_dir: &Path, answers: &DraftAnswers, date: NaiveDate) -> WriteResult<Self> {
        let slug = answers.effective_slug();
        if slug.is_empty() {
            return Err(WriteError::EmptySlug {
                title: answers.title.clone(),
            });
        }

        let path = content_dir.join(file_name(date, &slug));
        let body = render(answers, &slug, date)?;

        Ok(Self {
            slug,
            date,
            path,
            body,
        })
    }
}

/// `{date}-{slug}.md`
pub fn file_name(date: NaiveDate, slug: &str) -> String {
    format!("{}-{}.md", date.format(DATE_FORMAT), slug)
}

fn render(answers: &DraftAnswers, slug: &str, date: NaiveDate) -> WriteResult<String> {
    let mut out = String::new();
    out.push_str(MARKER);
    out.push('\n');
    out.push_str(&format!("title: {}\n", quoted(answers.title.trim())?));
    out.push_str(&format!("slug: {}\n", quoted(slug)?));
    out.push_str(&format!("date: {}\n", date.format(DATE_FORMAT)));
    out.push_str(&format!("description: {}\n", quoted(answers.description.trim())?));
    if let Some(authors) = &answers.authors {
        push_list(&mut out, "authors", authors)?;
    }
    push_list(&mut out, "tags", &answers.selected_tags)?;
    out.push_str(MARKER);
    out.push_str("\n\n");
    Ok(out)
}

fn push_list(out: &mut String, key: &str, items: &[String]) -> WriteResult<()> {
    if items.is_empty() {
        out.push_str(&format!("{key}: []\n"));
        return Ok(());
    }

    out.push_str(&format!("{key}:\n"));
    for item in items {
        out.push_str(&format!("- {}\n", list_item(item)?));
    }
    Ok(())
}

// A JSON string literal is a double-quoted YAML scalar once the characters
// YAML refuses to read raw are escaped as well.
fn quoted(value: &str) -> WriteResult<String> {
    let json = serde_json::to_string(value).map_err(|e| WriteError::Render(e.to_string()))?;
    if !json.chars().any(needs_yaml_escape) {
        return Ok(json);
    }

    let mut out = String::with_capacity(json.len() + 8);
    for c in json.chars() {
        if needs_yaml_escape(c) {
            out.push_str(&format!("\\u{:04X}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Characters outside YAML's printable set, plus the ones it reads as line breaks
fn needs_yaml_escape(c: char) -> bool {
    matches!(
        c,
        '\u{7f}'..='\u{9f}' | '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}'
    )
}

fn list_item(item: &str) -> WriteResult<String> {
    let item = item.trim();
    let reserved = RESERVED_WORDS.iter().any(|w| item.eq_ignore_ascii_case(w));
    if PLAIN_ITEM.is_match(item) && !reserved {
        Ok(item.to_string())
    } else {
        quoted(item)
    }
}

/// Writes new posts into a content directory
///
/// FILE LAYOUT:
/// - Path: `{content_dir}/{YYYY-MM-DD}-{slug}.md`
/// - Body: the front-matter block followed by an empty line
///
/// ERROR HANDLING:
/// - `EmptySlug` when neither the slug nor the title has a slug-safe character
/// - `AlreadyExists` when the target file is present; it is never touched
/// - `Io` when the directory is missing or the write fails, in which case
///   the partially written file is removed
///
/// EXAMPLES:
/// ```ignore
/// let writer = PostWriter::new("content/blog");
/// let path = writer.write(&answers)?;            // dated today
/// let path = writer.write_dated(&answers, date)?; // fixed date
/// ```
#[derive(Debug, Clone)]
pub struct PostWriter {
    content_dir: PathBuf,
}

impl PostWriter {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Write the post dated today and return its path
    pub fn write(&self, answers: &DraftAnswers) -> WriteResult<PathBuf> {
        self.write_dated(answers, Local::now().date_naive())
    }

    /// Write the post under an explicit date and return its path
    pub fn write_dated(&self, answers: &DraftAnswers, date: NaiveDate) -> WriteResult<PathBuf> {
        let document = PostDocument::new(&self.content_dir, answers, date)?;
        persist(&document)?;
        info!(path = %document.path.display(), "created post");
        Ok(document.path)
    }
}

fn persist(document: &PostDocument) -> WriteResult<()> {
    let path = &document.path;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => WriteError::AlreadyExists { path: path.clone() },
            _ => WriteError::Io {
                path: path.clone(),
                source,
            },
        })?;

    if let Err(source) = file.write_all(document.body.as_bytes()).and_then(|()| file.sync_all()) {
        drop(file);
        // The file was created by us a moment ago; leave nothing half written.
        if let Err(e) = fs::remove_file(path) {
            debug!(path = %path.display(), error = %e, "could not remove partial post");
        }
        return Err(WriteError::Io {
            path: path.clone(),
            source,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::FrontMatterReader;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("My Post"), "my-post");
        assert_eq!(slugify("  --Already--Sluggy--  "), "already-sluggy");
        assert_eq!(slugify("Rust 2024: what's new?"), "rust-2024-what-s-new");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_non_ascii_is_deterministic() {
        let slug = slugify("  Déjà Vu  ");
        assert_eq!(slug, slugify("  Déjà Vu  "));
        assert_eq!(slug, "d-j-vu");
        assert!(!slug.chars().any(|c| c.is_uppercase() || c.is_whitespace()));
    }

    #[test]
    fn test_render_front_matter() {
        let answers = DraftAnswers {
            title: "My Post".to_string(),
            description: "desc".to_string(),
            selected_tags: vec!["go".to_string()],
            ..DraftAnswers::default()
        };
        let document = PostDocument::new(Path::new("content/blog"), &answers, date()).unwrap();

        assert_eq!(document.slug, "my-post");
        assert_eq!(document.path, Path::new("content/blog/2024-03-01-my-post.md"));
        assert_eq!(
            document.body,
            "---\n\
             title: \"My Post\"\n\
             slug: \"my-post\"\n\
             date: 2024-03-01\n\
             description: \"desc\"\n\
             tags:\n\
             - go\n\
             ---\n\n"
        );
    }

    #[test]
    fn test_render_authors_and_empty_tags() {
        let answers = DraftAnswers {
            title: "Team work".to_string(),
            slug: Some("Custom Slug".to_string()),
            authors: Some(vec!["Alex".to_string(), "Zoé".to_string()]),
            ..DraftAnswers::default()
        };
        let document = PostDocument::new(Path::new("posts"), &answers, date()).unwrap();

        assert_eq!(document.slug, "custom-slug");
        assert!(document.body.contains("description: \"\"\nauthors:\n- Alex\n- Zoé\ntags: []\n---\n"));
    }

    #[test]
    fn test_titles_with_quotes_stay_valid_yaml() {
        let answers = DraftAnswers {
            title: r#"Say "hi" \ bye: now"#.to_string(),
            selected_tags: vec!["yes".to_string(), "#hash".to_string(), "a: b".to_string()],
            ..DraftAnswers::default()
        };
        let document = PostDocument::new(Path::new("."), &answers, date()).unwrap();

        let attrs = FrontMatterReader::new()
            .parse_str(&document.path, &document.body)
            .unwrap();
        assert_eq!(attrs.get_str("title"), Some(r#"Say "hi" \ bye: now"#));
        assert_eq!(attrs.string_list("tags"), vec!["yes", "#hash", "a: b"]);
    }

    #[test]
    fn test_unprintable_characters_are_escaped() {
        let title = "Hi\u{7f}there\u{85}again\u{feff}!";
        let answers = DraftAnswers {
            title: title.to_string(),
            description: "line\u{2028}sep".to_string(),
            selected_tags: vec!["odd\u{9f}tag".to_string()],
            ..DraftAnswers::default()
        };
        let document = PostDocument::new(Path::new("."), &answers, date()).unwrap();

        assert_eq!(document.slug, "hi-there-again");
        assert!(document.body.contains(r#"title: "Hi\u007Fthere\u0085again\uFEFF!""#));
        assert!(document.body.contains(r#"description: "line\u2028sep""#));
        assert!(document.body.contains(r#"- "odd\u009Ftag""#));

        let attrs = FrontMatterReader::new()
            .parse_str(&document.path, &document.body)
            .unwrap();
        assert_eq!(attrs.get_str("title"), Some(title));
        assert_eq!(attrs.get_str("description"), Some("line\u{2028}sep"));
        assert_eq!(attrs.string_list("tags"), vec!["odd\u{9f}tag"]);
    }

    #[test]
    fn test_empty_slug_is_rejected() {
        let answers = DraftAnswers {
            title: "???".to_string(),
            ..DraftAnswers::default()
        };
        let err = PostDocument::new(Path::new("."), &answers, date()).unwrap_err();
        assert!(matches!(err, WriteError::EmptySlug { .. }));
    }

    #[test]
    fn test_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let answers = DraftAnswers {
            title: "My Post".to_string(),
            description: "desc".to_string(),
            selected_tags: vec!["go".to_string()],
            ..DraftAnswers::default()
        };

        let path = PostWriter::new(temp.path()).write(&answers).unwrap();
        let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
        assert_eq!(path, temp.path().join(format!("{today}-my-post.md")));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("title: \"My Post\"\n"));
        assert!(content.contains("slug: \"my-post\"\n"));
        assert!(content.contains("description: \"desc\"\n"));
        assert!(content.contains("tags:\n- go\n"));
    }

    #[test]
    fn test_existing_file_is_left_untouched() {
        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("2024-03-01-my-post.md");
        fs::write(&existing, "hand written").unwrap();

        let answers = DraftAnswers {
            title: "My Post".to_string(),
            ..DraftAnswers::default()
        };
        let err = PostWriter::new(temp.path())
            .write_dated(&answers, date())
            .unwrap_err();

        assert!(matches!(err, WriteError::AlreadyExists { ref path } if *path == existing));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "hand written");
    }

    #[test]
    fn test_missing_directory_is_a_write_error() {
        let temp = TempDir::new().unwrap();
        let answers = DraftAnswers {
            title: "Nowhere".to_string(),
            ..DraftAnswers::default()
        };
        let err = PostWriter::new(temp.path().join("missing"))
            .write_dated(&answers, date())
            .unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
    }
}
