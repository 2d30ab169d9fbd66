// crates/blogpost-core/src/config.rs - Configuration System
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Environment variable BLOGPOST_CONTENT_DIR (posts directory only)
// 2. Config file: the one passed with --config, else ./.create-post.toml
// 3. Built-in defaults
//
// Every field has a default, so an empty or partial file is valid. Paths are
// relative to the directory the tool runs in, normally the site root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = ".create-post.toml";

/// Default directory holding blog posts
pub const DEFAULT_POSTS_DIR: &str = "content/blog";

/// Environment variable overriding the posts directory
pub const CONTENT_DIR_ENV: &str = "BLOGPOST_CONTENT_DIR";

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid TOML syntax in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("I/O error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete configuration for `create-post`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub authors: AuthorsConfig,

    #[serde(default)]
    pub post: PostConfig,
}

/// Where content lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory scanned for tags and receiving new posts
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,
}

/// Author collection
///
/// When enabled, the team directory provides the list of active members,
/// the default author is remembered in `default_author_file`, and posts get
/// an `authors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorsConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_team_dir")]
    pub team_dir: PathBuf,

    #[serde(default = "default_author_file")]
    pub default_author_file: PathBuf,
}

/// New post settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostConfig {
    /// Ask for the slug instead of always deriving it from the title
    #[serde(default = "default_true")]
    pub ask_slug: bool,

    /// Editor suggested (or launched with --open) once the post exists.
    /// Falls back to VISUAL, then EDITOR.
    #[serde(default)]
    pub editor: Option<String>,
}

/// Configuration loading and management
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from all sources
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    /// `content_dir_override` carries the value of `BLOGPOST_CONTENT_DIR`.
    ///
    /// PRECEDENCE (highest first):
    /// 1. `BLOGPOST_CONTENT_DIR` for `content.posts_dir`
    /// 2. `--config <file>`, or `./.create-post.toml` when present
    /// 3. Built-in defaults
    ///
    /// EXAMPLES:
    /// ```toml
    /// [content]
    /// posts_dir = "src/posts"
    ///
    /// [authors]
    /// enabled = true
    /// team_dir = "content/team"
    /// ```
    pub fn load_config(
        config_path: Option<&Path>,
        content_dir_override: Option<String>,
    ) -> ConfigResult<BlogConfig> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()));
                }
                Self::load_file(path)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_file(path)?
                } else {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    BlogConfig::default()
                }
            }
        };

        Self::apply_overrides(&mut config, content_dir_override);
        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Parse a config file
    pub fn load_file(path: &Path) -> ConfigResult<BlogConfig> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, &path.display().to_string())?;
        debug!(file = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse config text; `file` names the source in errors
    pub fn parse(content: &str, file: &str) -> ConfigResult<BlogConfig> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            file: file.to_string(),
            error: e.to_string(),
        })
    }

    fn apply_overrides(config: &mut BlogConfig, content_dir_override: Option<String>) {
        if let Some(dir) = content_dir_override.filter(|d| !d.trim().is_empty()) {
            debug!(posts_dir = %dir, "posts directory overridden from {}", CONTENT_DIR_ENV);
            config.content.posts_dir = PathBuf::from(dir);
        }
    }

    fn validate_config(config: &BlogConfig) -> ConfigResult<()> {
        if config.content.posts_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "content.posts_dir cannot be empty".to_string(),
            ));
        }

        if config.authors.enabled {
            if config.authors.team_dir.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "authors.team_dir cannot be empty when authors are enabled".to_string(),
                ));
            }
            if config.authors.default_author_file.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "authors.default_author_file cannot be empty when authors are enabled"
                        .to_string(),
                ));
            }
        }

        if matches!(&config.post.editor, Some(editor) if editor.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "post.editor cannot be blank; remove it to use VISUAL or EDITOR".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from(DEFAULT_POSTS_DIR)
}

fn default_team_dir() -> PathBuf {
    PathBuf::from("content/team")
}

fn default_author_file() -> PathBuf {
    PathBuf::from(".authorrc")
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
        }
    }
}

impl Default for AuthorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            team_dir: default_team_dir(),
            default_author_file: default_author_file(),
        }
    }
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            ask_slug: true,
            editor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = BlogConfig::default();
        assert!(ConfigManager::validate_config(&config).is_ok());
        assert_eq!(config.content.posts_dir, Path::new("content/blog"));
        assert!(!config.authors.enabled);
        assert!(config.post.ask_slug);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ConfigManager::parse(
            "[authors]\nenabled = true\n\n[post]\nask_slug = false\n",
            "test.toml",
        )
        .unwrap();

        assert!(config.authors.enabled);
        assert_eq!(config.authors.team_dir, Path::new("content/team"));
        assert_eq!(config.authors.default_author_file, Path::new(".authorrc"));
        assert!(!config.post.ask_slug);
        assert_eq!(config.content, ContentConfig::default());
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let err = ConfigManager::parse("[content\nposts_dir = 1", "broken.toml").unwrap_err();
        match err {
            ConfigError::ParseError { file, .. } => assert_eq!(file, "broken.toml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[content]\nposts_dir = \"posts\"\n").unwrap();

        let config = ConfigManager::load_config(Some(&path), None).unwrap();
        assert_eq!(config.content.posts_dir, Path::new("posts"));

        let config =
            ConfigManager::load_config(Some(&path), Some("elsewhere".to_string())).unwrap();
        assert_eq!(config.content.posts_dir, Path::new("elsewhere"));

        let config = ConfigManager::load_config(Some(&path), Some("  ".to_string())).unwrap();
        assert_eq!(config.content.posts_dir, Path::new("posts"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = ConfigManager::load_config(Some(&temp.path().join("nope.toml")), None);
        assert!(matches!(err, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_empty_posts_dir_is_rejected() {
        let mut config = BlogConfig::default();
        config.content.posts_dir = PathBuf::new();
        assert!(ConfigManager::validate_config(&config).is_err());
    }

    #[test]
    fn test_enabled_authors_need_a_team_dir() {
        let mut config = BlogConfig::default();
        config.authors.enabled = true;
        config.authors.team_dir = PathBuf::new();
        assert!(ConfigManager::validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_editor_is_rejected() {
        let mut config = BlogConfig::default();
        config.post.editor = Some(" ".to_string());
        assert!(ConfigManager::validate_config(&config).is_err());
    }
}
