// crates/blogpost-cli/src/services/terminal.rs - Terminal prompts
//
// The `Prompter` used on a real terminal. Free text and confirmations map
// straight onto `inquire` prompts; suggestions are an autocomplete source
// that re-filters the candidates on every keystroke.

use blogpost_core::fuzzy;
use blogpost_core::prompt::{PromptError, PromptResult, Prompter};
use console::style;
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::{Confirm, CustomUserError, InquireError, Text};

/// Suggestions shown at once
const PAGE_SIZE: usize = 10;

/// Prompts on the controlling terminal through `inquire`
///
/// QUESTION TYPES:
/// - `text`: `inquire::Text`, with the default shown and used on Enter
/// - `confirm`: `inquire::Confirm`
/// - `suggest`: `inquire::Text` with a fuzzy autocompleter over the candidates
///
/// ERROR HANDLING:
/// Esc and Ctrl-C become `PromptError::Cancelled`. Anything else `inquire`
/// reports, such as a missing terminal, becomes `PromptError::Terminal`.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, message: &str, default: Option<&str>) -> PromptResult<String> {
        let mut prompt = Text::new(message);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        prompt.prompt().map_err(into_prompt_error)
    }

    fn confirm(&mut self, message: &str, default: bool) -> PromptResult<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(into_prompt_error)
    }

    fn suggest(&mut self, message: &str, candidates: &[String]) -> PromptResult<String> {
        Text::new(message)
            .with_autocomplete(FuzzySuggester::new(candidates))
            .with_page_size(PAGE_SIZE)
            .prompt()
            .map_err(into_prompt_error)
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{}", style(message).red());
    }
}

fn into_prompt_error(error: InquireError) -> PromptError {
    match error {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            PromptError::Cancelled
        }
        other => PromptError::Terminal(other.to_string()),
    }
}

/// Autocomplete source backed by the fuzzy filter
///
/// Only suggests; whatever the user typed is accepted on Enter.
#[derive(Debug, Clone)]
struct FuzzySuggester {
    candidates: Vec<String>,
}

impl FuzzySuggester {
    fn new(candidates: &[String]) -> Self {
        Self {
            candidates: candidates.to_vec(),
        }
    }
}

impl Autocomplete for FuzzySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(fuzzy::filter(input, &self.candidates))
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}
