//! Confirmation prompt abstraction
//!
//! The delete action asks the user before doing anything. The question is
//! answered through [`ConfirmPrompt`], so CLI prompts (dialoguer), in-TUI
//! dialogs and scripted answers for tests are interchangeable.

use async_trait::async_trait;
use log::warn;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

/// Asynchronous yes/no confirmation
///
/// # Examples
///
/// ```
/// use futures::executor::block_on;
/// use selection_ui::ui::{ConfirmPrompt, ScriptedConfirm};
///
/// let confirm = ScriptedConfirm::decline();
/// assert!(!block_on(confirm.confirm("Delete 2 items?")));
/// ```
#[async_trait(?Send)]
pub trait ConfirmPrompt {
    /// Ask `message`; `true` means the user agreed
    async fn confirm(&self, message: &str) -> bool;
}

#[async_trait(?Send)]
impl<T: ConfirmPrompt + ?Sized> ConfirmPrompt for Box<T> {
    async fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message).await
    }
}

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// IO error during input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input cancelled by user
    #[error("Input cancelled by user")]
    Cancelled,
}

/// CLI confirmation using dialoguer
///
/// Prompt failures count as a refusal.
pub struct DialoguerConfirm {
    theme: dialoguer::theme::ColorfulTheme,
    default: bool,
}

impl DialoguerConfirm {
    /// Create a prompt that defaults to "no"
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
            default: false,
        }
    }

    /// Ask the question on the terminal
    ///
    /// # Errors
    ///
    /// Returns `InputError::Cancelled` if the prompt was dismissed and
    /// `InputError::Io` if the terminal could not be read.
    pub fn prompt(&self, message: &str) -> Result<bool> {
        dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(self.default)
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))?
            .ok_or(InputError::Cancelled)
    }
}

impl Default for DialoguerConfirm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ConfirmPrompt for DialoguerConfirm {
    async fn confirm(&self, message: &str) -> bool {
        match self.prompt(message) {
            Ok(answer) => answer,
            Err(e) => {
                warn!("confirmation prompt failed: {e}");
                false
            }
        }
    }
}

/// Confirmation with predetermined answers
///
/// Answers are consumed in order; once exhausted the fallback answer is
/// used. Every asked message is recorded. Clones share the same script.
#[derive(Debug, Clone)]
pub struct ScriptedConfirm {
    answers: Rc<RefCell<VecDeque<bool>>>,
    fallback: bool,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedConfirm {
    /// Always answer yes
    #[must_use]
    pub fn accept() -> Self {
        Self::with_answers([], true)
    }

    /// Always answer no
    #[must_use]
    pub fn decline() -> Self {
        Self::with_answers([], false)
    }

    /// Answer from `answers` first, then `fallback`
    #[must_use]
    pub fn with_answers(answers: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            answers: Rc::new(RefCell::new(answers.into_iter().collect())),
            fallback,
            prompts: Rc::default(),
        }
    }

    /// Messages asked so far
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ConfirmPrompt for ScriptedConfirm {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_input_error_from_io() {
        let io_err = io::Error::other("test error");
        let input_err: InputError = io_err.into();
        assert!(matches!(input_err, InputError::Io(_)));
    }

    #[test]
    fn test_dialoguer_confirm_creation() {
        let _confirm = DialoguerConfirm::new();
        let _confirm2 = DialoguerConfirm::default();
    }

    #[test]
    fn test_scripted_answers_then_fallback() {
        let confirm = ScriptedConfirm::with_answers([false, true], false);
        assert!(!block_on(confirm.confirm("one")));
        assert!(block_on(confirm.confirm("two")));
        assert!(!block_on(confirm.confirm("three")));
        assert_eq!(confirm.prompts(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_boxed_prompt() {
        let confirm: Box<dyn ConfirmPrompt> = Box::new(ScriptedConfirm::accept());
        assert!(block_on(confirm.confirm("ok?")));
    }
}
