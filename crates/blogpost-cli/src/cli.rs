use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line arguments
///
/// The tool is interactive only; these flags tune how it runs but every
/// post detail is still asked for at the prompt.
#[derive(Parser, Debug)]
#[command(name = "create-post")]
#[command(about = "Scaffold a new blog post by answering a few questions")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./.create-post.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Open the new post in your editor once it is written
    #[arg(long)]
    pub open: bool,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
