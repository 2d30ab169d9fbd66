// crates/blogpost-core/src/frontmatter.rs - Front matter extraction
//
// A content file may open with a metadata block fenced by `---` lines:
//
// ```markdown
// ---
// title: "Hello"
// tags:
//   - rust
// ---
// Body text
// ```
//
// The reader only knows about the fences. What sits between them is handed to
// a `FrontMatterParser`, YAML by default, which turns it into an ordered
// attribute mapping. Unknown keys are kept as opaque values.

use indexmap::IndexMap;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fence line opening and closing a metadata block
pub const MARKER: &str = "---";

/// Errors raised while reading a content file's front matter
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter in {path} is opened with '---' but never closed")]
    Unterminated { path: PathBuf },

    #[error("invalid front matter in {path}: {message}")]
    InvalidSyntax { path: PathBuf, message: String },

    #[error("front matter in {path} is not a key-value mapping")]
    NotAMapping { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FrontMatterError {
    /// The file the error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::Unterminated { path }
            | Self::InvalidSyntax { path, .. }
            | Self::NotAMapping { path }
            | Self::Io { path, .. } => path,
        }
    }
}

/// Result type for front matter operations
pub type FrontMatterResult<T> = Result<T, FrontMatterError>;

/// Why a parser rejected a metadata block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockError {
    Syntax(String),
    NotAMapping,
}

/// Turns the text between the fences into attributes
///
/// Implementations only see the block body, never the fences, so any
/// well-formed key-value syntax can be plugged in.
pub trait FrontMatterParser {
    fn parse(&self, block: &str) -> Result<Attributes, BlockError>;
}

/// YAML block parser
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl FrontMatterParser for YamlParser {
    fn parse(&self, block: &str) -> Result<Attributes, BlockError> {
        if block.trim().is_empty() {
            return Ok(Attributes::default());
        }

        let value: Value =
            serde_yaml::from_str(block).map_err(|e| BlockError::Syntax(e.to_string()))?;

        match value {
            Value::Null => Ok(Attributes::default()),
            Value::Mapping(mapping) => {
                let mut attributes = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let Some(key) = scalar_to_string(&key) else {
                        return Err(BlockError::NotAMapping);
                    };
                    attributes.insert(key, value);
                }
                Ok(Attributes(attributes))
            }
            _ => Err(BlockError::NotAMapping),
        }
    }
}

/// Front matter attributes in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Reads a list-valued attribute as strings
    ///
    /// A sequence yields its scalar elements, a lone scalar yields a single
    /// element, and a missing or null attribute yields an empty list.
    /// Nested mappings and sequences inside the list are ignored.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(other) => scalar_to_string(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A content file and its parsed attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFile {
    pub path: PathBuf,
    pub attributes: Attributes,
}

impl ContentFile {
    /// Tags declared by the file, empty when the attribute is absent
    pub fn tags(&self) -> Vec<String> {
        self.attributes.string_list("tags")
    }
}

/// Reads content files and extracts their front matter
///
/// RECOGNISED LAYOUT:
/// ```markdown
/// ---
/// title: "My Post"
/// tags: [go, testing]
/// ---
///
/// Body text
/// ```
///
/// The opening `---` must be the first line. A file that does not start with
/// one has no front matter and yields empty `Attributes`.
///
/// ERROR HANDLING:
/// - `Unterminated` when the closing `---` line is missing
/// - `InvalidSyntax` when the block is not valid YAML
/// - `NotAMapping` when the block parses to a list or a scalar
/// - `Io` when the file cannot be read at all
///
/// The parser is pluggable through `FrontMatterParser`; `YamlParser` is
/// the default.
#[derive(Debug, Clone, Default)]
pub struct FrontMatterReader<P = YamlParser> {
    parser: P,
}

impl FrontMatterReader<YamlParser> {
    pub fn new() -> Self {
        Self { parser: YamlParser }
    }
}

impl<P: FrontMatterParser> FrontMatterReader<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Read a file from disk and parse its front matter
    ///
    /// Bytes that are not valid UTF-8 are decoded lossily, so an image or
    /// other binary file simply has no front matter. Only failing to read
    /// the file is an I/O error.
    pub fn read(&self, path: &Path) -> FrontMatterResult<ContentFile> {
        let bytes = fs::read(path).map_err(|source| FrontMatterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let attributes = self.parse_str(path, &content)?;
        Ok(ContentFile {
            path: path.to_path_buf(),
            attributes,
        })
    }

    /// Parse front matter out of already loaded text
    ///
    /// `path` is only used for error reporting.
    pub fn parse_str(&self, path: &Path, content: &str) -> FrontMatterResult<Attributes> {
        let block = match extract_block(content) {
            Ok(Some(block)) => block,
            Ok(None) => return Ok(Attributes::default()),
            Err(Unterminated) => {
                return Err(FrontMatterError::Unterminated {
                    path: path.to_path_buf(),
                });
            }
        };

        self.parser.parse(block).map_err(|e| match e {
            BlockError::Syntax(message) => FrontMatterError::InvalidSyntax {
                path: path.to_path_buf(),
                message,
            },
            BlockError::NotAMapping => FrontMatterError::NotAMapping {
                path: path.to_path_buf(),
            },
        })
    }
}

struct Unterminated;

/// Locate the text between the opening and closing fences
///
/// The opening fence must be the very first line (a UTF-8 BOM is tolerated).
fn extract_block(content: &str) -> Result<Option<&str>, Unterminated> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != MARKER {
        return Ok(None);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == MARKER {
            return Ok(Some(&content[start..offset]));
        }
        offset += line.len();
    }

    Err(Unterminated)
}
