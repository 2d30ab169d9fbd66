// crates/blogpost-cli/src/services/mod.rs - Service layer modules
pub mod editor;
pub mod terminal;

pub use editor::EditorService;
pub use terminal::TerminalPrompter;
