//! Utility functions
use crate::errors::GitBackupError;

/// Check if the string looks like an http(s) URL
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Extract the account name from a profile URL
///
/// The owner is the second-to-last `/` separated segment, so
/// `https://github.com/alice/` and `https://github.com/alice/extra` both give `alice`.
/// A URL without a trailing slash such as `https://github.com/alice` gives `github.com`.
pub fn owner_from_url(url: &str) -> &str {
    let mut segments = url.rsplit('/');
    segments.next();
    segments.next().unwrap_or(url)
}

/// Resolve the source account from a username or a profile URL
pub fn resolve_owner(input: &str) -> &str {
    if is_url(input) {
        owner_from_url(input)
    } else {
        input
    }
}

/// Interactive questions asked while running
pub trait Prompter {
    /// Ask for a line of text
    /// # Errors
    /// Error if the input can't be read
    fn input(&mut self, message: &str) -> Result<String, GitBackupError>;

    /// Ask for a secret without echoing it
    /// # Errors
    /// Error if the input can't be read
    fn password(&mut self, message: &str) -> Result<String, GitBackupError>;

    /// Ask a yes/no question, defaulting to no
    /// # Errors
    /// Error if the input can't be read
    fn confirm(&mut self, message: &str) -> Result<bool, GitBackupError>;
}

/// Prompter reading from the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str) -> Result<String, GitBackupError> {
        print!("{message}");
        input()
    }

    fn password(&mut self, message: &str) -> Result<String, GitBackupError> {
        print!("{message}");
        get_password()
    }

    fn confirm(&mut self, message: &str) -> Result<bool, GitBackupError> {
        yes_no_input(message)
    }
}

/// Get input from the user
pub(crate) fn input() -> Result<String, GitBackupError> {
    use std::io::{stdin, stdout, Write};
    let mut s = String::new();
    let _ = stdout().flush();
    stdin()
        .read_line(&mut s)
        .map_err(|e| GitBackupError::new_with_source("Did not enter a correct string", e))?;
    if let Some('\n') = s.chars().next_back() {
        s.pop();
    }
    if let Some('\r') = s.chars().next_back() {
        s.pop();
    }
    Ok(s)
}

/// Get a yes/no input from the user, anything but yes is a no
pub(crate) fn yes_no_input<S: AsRef<str>>(msg: S) -> Result<bool, GitBackupError> {
    print!("{} [y/N] ", msg.as_ref());
    Ok(is_yes(&input()?))
}

/// Interpret an answer to a yes/no question
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Get password from the user
pub(crate) fn get_password() -> Result<String, GitBackupError> {
    use std::io::{stdout, Write};
    let _ = stdout().flush();
    rpassword::read_password()
        .map_err(|e| GitBackupError::new_with_source("Error reading password", e))
}
