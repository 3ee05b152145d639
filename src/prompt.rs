use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

/// Abstraction over a string input prompt.
///
/// Implementors define how string input is collected from the user,
/// including any styling or interactivity. This trait enables testability
/// by decoupling user input from the logic that consumes it.
pub trait StringPrompter {
    /// Prompt the user for a string input.
    ///
    /// # Parameters
    /// - `prompt`: The message shown to the user.
    /// - `default`: Default value if the user presses Enter without input.
    ///
    /// # Returns
    /// `Ok(String)` if input is successfully collected, or an `Err(String)` describing the failure.
    fn prompt(&mut self, prompt: &str, default: &str) -> Result<String, String>;
}

/// Abstraction over a boolean (yes/no) confirmation prompt.
pub trait ConfirmPrompter {
    /// Prompt the user for a yes/no confirmation.
    ///
    /// # Parameters
    /// - `prompt`: The confirmation message.
    /// - `default`: The default answer if the user presses Enter.
    ///
    /// # Returns
    /// `Ok(true)` if confirmed, `Ok(false)` if declined, or `Err(String)` on input failure.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String>;
}

/// Default implementation of `StringPrompter` using `dialoguer::Input`.
pub struct DialoguerStringPrompter;

impl StringPrompter for DialoguerStringPrompter {
    fn prompt(&mut self, prompt: &str, default: &str) -> Result<String, String> {
        let theme = ColorfulTheme::default();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .default(default.to_string());
        match input.interact_text() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Default implementation of `ConfirmPrompter` using `dialoguer::Confirm`.
pub struct DialoguerConfirmPrompter;

impl ConfirmPrompter for DialoguerConfirmPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String> {
        let theme = ColorfulTheme::default();
        let confirm = Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(default);
        match confirm.interact() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Validates a commit-count answer: a whole number of at least 1.
pub(crate) fn parse_commit_count(input: &str) -> Result<usize, String> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(0) => Err(String::from("You must rebase at least one commit.")),
        Ok(n) => Ok(n),
        Err(_) => Err(String::from("You must enter a number.")),
    }
}

/// Asks how many commits to rebase, re-prompting until the answer is a whole
/// number of at least 1.
///
/// # Returns
/// - `Ok(usize)` with the validated count.
/// - `Err(String)` only if collecting input itself fails.
pub fn ask_commit_count<P: StringPrompter>(prompter: &mut P) -> Result<usize, String> {
    loop {
        let raw = prompter.prompt(
            "How many commits do you want to rebase (not including an initial commit)?",
            "",
        )?;
        match parse_commit_count(&raw) {
            Ok(n) => return Ok(n),
            Err(msg) => eprintln!("{}", style(msg).yellow()),
        }
    }
}

/// Asks for a date bound of the new history, falling back to `default_value`
/// on a blank answer.
pub fn ask_date<P: StringPrompter>(
    prompter: &mut P,
    label: &str,
    default_value: &str,
) -> Result<String, String> {
    let raw = prompter.prompt(&format!("{} (YYYY-MM-DDTHH:MM:SS)", label), default_value)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(default_value.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Asks for the path of the repository to rebase; blank means the current
/// directory.
pub fn ask_repo_path<P: StringPrompter>(prompter: &mut P) -> Result<String, String> {
    let raw = prompter.prompt(
        "Path to the git repo to rebase (leave blank for current directory)",
        "",
    )?;
    Ok(raw.trim().to_string())
}

/// Asks the user to confirm the repository shown by the log listing.
pub fn confirm_repo<P: ConfirmPrompter>(prompter: &mut P) -> Result<bool, String> {
    prompter.confirm("Is this the correct repo?", true)
}

/// Asks the user to confirm starting the rebase.
pub fn confirm_start<P: ConfirmPrompter>(prompter: &mut P) -> Result<bool, String> {
    let prompt = "Start now? (will amend each stop with a new random date)";
    prompter.confirm(prompt, true)
}
