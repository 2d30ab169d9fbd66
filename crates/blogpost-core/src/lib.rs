// crates/blogpost-core/src/lib.rs - Blog post scaffolding core
//
// Everything the `create-post` tool knows about content lives here: reading
// front matter, building the tag vocabulary and team roster, driving the
// prompt sequence through the `Prompter` seam, and rendering the new post.
// Terminal I/O is left to the CLI crate.

pub mod author;
pub mod catalog;
pub mod config;
pub mod frontmatter;
pub mod fuzzy;
pub mod post;
pub mod prompt;
pub mod team;

pub use catalog::{CatalogError, TagCatalog, build_vocabulary};
pub use config::{BlogConfig, ConfigError, ConfigManager};
pub use frontmatter::{Attributes, ContentFile, FrontMatterError, FrontMatterReader};
pub use post::{DraftAnswers, PostDocument, PostWriter, WriteError, slugify};
pub use prompt::{PromptError, Prompter};
