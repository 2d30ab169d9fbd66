// crates/blogpost-core/src/prompt.rs - Interactive prompt sequence
//
// Drives the questions asked before a post is written:
//
//   title -> [slug] -> description -> [authors] -> tags
//
// Authors and tags share one shape, a repeatable pick: first "can we skip?",
// then pick one entry with suggestions, then "another one?" until the user
// declines. Entries already picked disappear from later suggestion lists.
//
// Terminal I/O sits behind the `Prompter` trait so the whole sequence can be
// replayed from a script in tests. Each call blocks on a single answer.

use thiserror::Error;
use tracing::debug;

use crate::catalog::normalize_tag;
use crate::post::{DraftAnswers, slugify};

/// Errors raised by a prompter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromptError {
    #[error("prompt cancelled by the user")]
    Cancelled,

    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Result type for prompt operations
pub type PromptResult<T> = Result<T, PromptError>;

/// One question at a time on some terminal-like device
///
/// Every question in the tool goes through this trait. The CLI implements it
/// on top of `inquire`, tests replay a fixed list of answers.
///
/// CONTRACT:
/// - Each call blocks until exactly one answer is given
/// - Answers come back untrimmed; callers normalise them
/// - Ctrl-C or Esc surfaces as `PromptError::Cancelled`
/// - `warn` never fails; it only informs the user before a question is repeated
///
/// IMPLEMENTING:
/// ```ignore
/// impl Prompter for MyPrompter {
///     fn text(&mut self, message: &str, default: Option<&str>) -> PromptResult<String> { ... }
///     fn confirm(&mut self, message: &str, default: bool) -> PromptResult<bool> { ... }
///     fn suggest(&mut self, message: &str, candidates: &[String]) -> PromptResult<String> { ... }
///     fn warn(&mut self, message: &str) { ... }
/// }
/// ```
pub trait Prompter {
    /// Ask for a line of free text; an empty answer yields `default` when set
    fn text(&mut self, message: &str, default: Option<&str>) -> PromptResult<String>;

    /// Ask a yes/no question; an empty answer yields `default`
    fn confirm(&mut self, message: &str, default: bool) -> PromptResult<bool>;

    /// Ask for free text while suggesting fuzzy-filtered `candidates`
    ///
    /// Suggestions never restrict the answer.
    fn suggest(&mut self, message: &str, candidates: &[String]) -> PromptResult<String>;

    /// Tell the user an answer was not accepted
    fn warn(&mut self, message: &str);
}

pub const TITLE_MESSAGE: &str = "What's your post title?";
pub const SLUG_MESSAGE: &str = "What's the post slug?";
pub const DESCRIPTION_MESSAGE: &str =
    "Write a short (usually 1-2 line) description of your post or press Enter to move on";
pub const REQUIRED_WARNING: &str = "This is required";

/// A repeatable, optional multi-entry question
#[derive(Debug, Clone, Copy)]
pub struct RepeatablePick {
    /// Singular noun, used in "Enter another {noun}?"
    pub noun: &'static str,
    /// Plural noun, used in "Current {plural}: ..."
    pub plural: &'static str,
    pub skip_question: &'static str,
    pub pick_question: &'static str,
    /// Canonical form of a committed entry
    pub normalize: fn(&str) -> String,
}

fn trimmed(entry: &str) -> String {
    entry.trim().to_string()
}

impl RepeatablePick {
    pub const TAGS: Self = Self {
        noun: "tag",
        plural: "tags",
        skip_question: "Can we skip adding tags? (Enter for yes)",
        pick_question: "What are the tags?",
        normalize: normalize_tag,
    };

    pub const AUTHORS: Self = Self {
        noun: "author",
        plural: "authors",
        skip_question: "Can we skip adding more authors? (Enter for yes)",
        pick_question: "Who are the authors?",
        normalize: trimmed,
    };

    /// Run the skip / pick / more loop
    ///
    /// `selected` is the starting selection (the default author, or nothing
    /// for tags). Candidates already in it are never suggested.
    ///
    /// QUESTION FLOW:
    /// 1. `skip_question`, defaulting to yes; yes returns `selected` untouched
    /// 2. `pick_question` with the remaining candidates as suggestions
    /// 3. "Enter another {noun}?", defaulting to yes only while suggestions remain
    ///
    /// ANSWER RULES:
    /// - Free text is accepted; suggestions only help typing
    /// - Answers pass through `normalize` before they are committed
    /// - Blank answers and entries already selected are refused with a warning
    ///   and the pick is asked again
    ///
    /// ERROR HANDLING:
    /// Any `PromptError` from the prompter ends the loop immediately and
    /// nothing picked so far is returned.
    pub fn collect<P: Prompter>(
        &self,
        prompter: &mut P,
        selected: Vec<String>,
        candidates: &[String],
    ) -> PromptResult<Vec<String>> {
        if prompter.confirm(self.skip_question, true)? {
            return Ok(selected);
        }

        let mut selected = selected;
        let mut remaining = without(candidates, &selected);
        loop {
            let entry = self.pick_one(prompter, &selected, &remaining)?;
            debug!(noun = self.noun, entry = %entry, "picked entry");
            selected.push(entry);
            remaining = without(&remaining, &selected);

            let more = format!(
                "Enter another {}? Current {}: {}",
                self.noun,
                self.plural,
                selected.join(", ")
            );
            if !prompter.confirm(&more, !remaining.is_empty())? {
                return Ok(selected);
            }
        }
    }

    fn pick_one<P: Prompter>(
        &self,
        prompter: &mut P,
        selected: &[String],
        remaining: &[String],
    ) -> PromptResult<String> {
        let current = if selected.is_empty() {
            "none".to_string()
        } else {
            selected.join(", ")
        };
        let message = format!("{} Current {}: {}", self.pick_question, self.plural, current);

        loop {
            let entry = (self.normalize)(&prompter.suggest(&message, remaining)?);
            if entry.is_empty() {
                prompter.warn(&format!("Please enter a {}", self.noun));
                continue;
            }
            if find_case_insensitive(selected, &entry).is_some() {
                prompter.warn(&format!("{entry} is already selected"));
                continue;
            }
            return Ok(entry);
        }
    }
}

/// `candidates` minus anything already in `selected`, order preserved
fn without(candidates: &[String], selected: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| find_case_insensitive(selected, c).is_none())
        .cloned()
        .collect()
}

/// First entry of `list` equal to `needle`, ignoring case
pub fn find_case_insensitive<'a>(list: &'a [String], needle: &str) -> Option<&'a String> {
    let needle = needle.to_lowercase();
    list.iter().find(|item| item.to_lowercase() == needle)
}

/// Author information needed when posts carry an `authors` list
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorChoice {
    pub default_author: String,
    pub active_members: Vec<String>,
}

/// Which optional questions to ask
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptOptions {
    pub ask_slug: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self { ask_slug: true }
    }
}

/// Ask every question and gather the answers for a new post
///
/// QUESTION ORDER:
/// 1. Title (required, re-asked with "This is required" while blank)
/// 2. Slug, when `options.ask_slug` is set, prefilled from the title
/// 3. Description (optional)
/// 4. Authors, when `authors` is given, starting from the default author
/// 5. Tags, suggested from `vocabulary`
///
/// Nothing is written here; hand the result to `PostWriter`.
///
/// EXAMPLES:
/// ```ignore
/// let draft = collect_draft(&mut prompter, &vocabulary, None, PromptOptions::default())?;
/// let path = PostWriter::new("content/blog").write(&draft)?;
/// ```
pub fn collect_draft<P: Prompter>(
    prompter: &mut P,
    vocabulary: &[String],
    authors: Option<&AuthorChoice>,
    options: PromptOptions,
) -> PromptResult<DraftAnswers> {
    let title_message = match authors {
        Some(choice) => format!("Hey {}! {}", choice.default_author, TITLE_MESSAGE),
        None => TITLE_MESSAGE.to_string(),
    };
    let title = ask_title(prompter, &title_message)?;

    let slug = if options.ask_slug {
        Some(ask_slug(prompter, &title)?)
    } else {
        None
    };

    let description = prompter.text(DESCRIPTION_MESSAGE, None)?.trim().to_string();

    let authors = match authors {
        Some(choice) => {
            let others: Vec<String> = choice
                .active_members
                .iter()
                .filter(|m| **m != choice.default_author)
                .cloned()
                .collect();
            Some(RepeatablePick::AUTHORS.collect(
                prompter,
                vec![choice.default_author.clone()],
                &others,
            )?)
        }
        None => None,
    };

    let selected_tags = RepeatablePick::TAGS.collect(prompter, Vec::new(), vocabulary)?;

    Ok(DraftAnswers {
        title,
        slug,
        description,
        authors,
        selected_tags,
    })
}

/// Ask for the title until a non-blank answer is given
fn ask_title<P: Prompter>(prompter: &mut P, message: &str) -> PromptResult<String> {
    loop {
        let title = prompter.text(message, None)?;
        let title = title.trim();
        if !title.is_empty() {
            return Ok(title.to_string());
        }
        prompter.warn(REQUIRED_WARNING);
    }
}

/// Ask for the slug, offering the one derived from the title
fn ask_slug<P: Prompter>(prompter: &mut P, title: &str) -> PromptResult<String> {
    let derived = slugify(title);
    let default = (!derived.is_empty()).then_some(derived.as_str());
    loop {
        let answer = prompter.text(SLUG_MESSAGE, default)?;
        let slug = slugify(&answer);
        if !slug.is_empty() {
            return Ok(slug);
        }
        prompter.warn(REQUIRED_WARNING);
    }
}
