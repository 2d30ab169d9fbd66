// crates/blogpost-cli/src/commands/create.rs - Post creation flow
//
// Sequences the whole run:
// 1. Build the tag vocabulary from existing posts
// 2. When authors are enabled, load the team and settle the default author
// 3. Ask the post questions
// 4. Write the post and tell the user where it is

use anyhow::{Context as AnyhowContext, Result};
use blogpost_core::author::resolve_default_author;
use blogpost_core::catalog::build_vocabulary;
use blogpost_core::post::PostWriter;
use blogpost_core::prompt::{AuthorChoice, collect_draft};
use blogpost_core::team::active_members;
use console::style;
use tracing::{info, warn};

use crate::context::Context;
use crate::services::{EditorService, TerminalPrompter};

pub fn handle(ctx: &Context, open: bool) -> Result<()> {
    let posts_dir = ctx.posts_dir();
    let vocabulary = build_vocabulary(posts_dir).with_context(|| {
        format!(
            "Failed to build tag vocabulary from {}",
            posts_dir.display()
        )
    })?;
    info!(tags = vocabulary.len(), "tag vocabulary ready");

    let mut prompter = TerminalPrompter::new();

    let authors = if ctx.authors_enabled() {
        let team_dir = ctx.team_dir();
        let active_members = active_members(team_dir)
            .with_context(|| format!("Failed to load team members from {}", team_dir.display()))?;
        let store = ctx.author_store();
        let default_author = resolve_default_author(&mut prompter, &store, &active_members)
            .context("Failed to determine who is writing")?;
        Some(AuthorChoice {
            default_author,
            active_members,
        })
    } else {
        None
    };

    let answers = collect_draft(
        &mut prompter,
        &vocabulary,
        authors.as_ref(),
        ctx.prompt_options(),
    )
    .context("Failed to collect post details")?;

    let path = PostWriter::new(posts_dir)
        .write(&answers)
        .context("Failed to write the new post")?;

    println!(
        "Done! Go ahead and edit {} to complete the post.",
        style(path.display()).cyan()
    );

    match EditorService::editor_command(ctx.config().post.editor.as_deref()) {
        Some(editor) => {
            println!(
                "You can start editing with: {}",
                style(format!("{} {}", editor, path.display())).blue()
            );
            if open {
                // The post is on disk already; a broken editor doesn't undo that.
                if let Err(e) = EditorService::open_file(&editor, &path) {
                    eprintln!("{}", style(format!("{e:#}")).yellow());
                }
            }
        }
        None if open => {
            warn!("--open given but no editor is configured");
            eprintln!(
                "{}",
                style("No editor configured: set post.editor, VISUAL or EDITOR to use --open")
                    .yellow()
            );
        }
        None => {}
    }

    Ok(())
}
