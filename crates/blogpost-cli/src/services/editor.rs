// crates/blogpost-cli/src/services/editor.rs - Editor Integration Service
//
// EDITOR SELECTION HIERARCHY:
// 1. post.editor from the configuration file
// 2. VISUAL environment variable
// 3. EDITOR environment variable
//
// With none of them set there is no editor: the hint is left out and --open
// only prints a warning.

use anyhow::{Result, anyhow};
use console::style;
use std::env;
use std::path::Path;
use std::process::Command;

/// Handles text editor operations
///
/// Used after a post is written, both to print the "start editing with"
/// hint and to launch the editor when `--open` is given.
///
/// EDITOR SELECTION HIERARCHY:
/// 1. `post.editor` in the config file
/// 2. VISUAL environment variable
/// 3. EDITOR environment variable
///
/// There is no built-in fallback: without any of these the hint is skipped.
pub struct EditorService;

impl EditorService {
    /// The editor command to suggest or launch, if any
    ///
    /// Blank values count as unset and fall through to the next source.
    ///
    /// EXAMPLES:
    /// ```bash
    /// export VISUAL="code --wait"   # wins over EDITOR
    /// export EDITOR="vim"
    /// ```
    pub fn editor_command(configured: Option<&str>) -> Option<String> {
        Self::pick_editor(
            configured,
            env::var("VISUAL").ok().as_deref(),
            env::var("EDITOR").ok().as_deref(),
        )
    }

    fn pick_editor(
        configured: Option<&str>,
        visual: Option<&str>,
        editor: Option<&str>,
    ) -> Option<String> {
        [configured, visual, editor]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|command| !command.is_empty())
            .map(str::to_string)
    }

    /// Open a file in `editor` and wait for it to exit
    ///
    /// `editor` may carry arguments (`code --wait`). A non-zero exit is only
    /// reported: by then the post is already on disk.
    pub fn open_file(editor: &str, path: &Path) -> Result<()> {
        let (program, args) = split_command(editor)
            .ok_or_else(|| anyhow!("Editor command is empty"))?;

        let status = Command::new(program)
            .args(&args)
            .arg(path)
            .status()
            .map_err(|e| anyhow!(
                "Failed to launch editor '{}': {}\n\nTips:\n- Check that '{}' is installed and in PATH\n- Set post.editor in .create-post.toml, or VISUAL / EDITOR",
                editor, e, program
            ))?;

        if !status.success() {
            eprintln!(
                "{}",
                style(format!(
                    "⚠️ Editor '{}' exited with error code: {:?}",
                    editor,
                    status.code()
                ))
                .yellow()
            );
            eprintln!("The post was created successfully, but the editor had an issue.");
        }

        Ok(())
    }
}

/// Split an editor command line into program and arguments
fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}
