use anyhow::{Context as AnyhowContext, Result};
use blogpost_core::author::AuthorStore;
use blogpost_core::config::{BlogConfig, CONTENT_DIR_ENV, ConfigManager};
use blogpost_core::prompt::PromptOptions;
use std::env;
use std::path::Path;
use tracing::debug;

/// Application context handed to the create command
///
/// Holds the merged configuration and answers the "where does X live"
/// questions for the rest of the CLI.
pub struct Context {
    config: BlogConfig,
}

impl Context {
    /// Load configuration: --config file or ./.create-post.toml, then env
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = ConfigManager::load_config(config_path, env::var(CONTENT_DIR_ENV).ok())
            .context("Failed to load configuration")?;
        debug!(?config, "configuration ready");

        Ok(Self { config })
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    /// Directory scanned for tags and receiving the new post
    pub fn posts_dir(&self) -> &Path {
        &self.config.content.posts_dir
    }

    pub fn authors_enabled(&self) -> bool {
        self.config.authors.enabled
    }

    pub fn team_dir(&self) -> &Path {
        &self.config.authors.team_dir
    }

    pub fn author_store(&self) -> AuthorStore {
        AuthorStore::new(&self.config.authors.default_author_file)
    }

    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            ask_slug: self.config.post.ask_slug,
        }
    }
}
