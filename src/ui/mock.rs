//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use webview2_runtime::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Checking runtime");
//! ui.success("Installed");
//!
//! assert!(ui.has_message("Checking"));
//! assert!(ui.successes().contains(&"Installed".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    results: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    spinners: Vec<String>,
    spinner_updates: Rc<RefCell<Vec<String>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured results.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Every message a spinner was updated or finished with.
    pub fn spinner_updates(&self) -> Vec<String> {
        self.spinner_updates.borrow().clone()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific result was shown.
    pub fn has_result(&self, msg: &str) -> bool {
        self.results.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.messages.push(msg.to_string());
        }
    }

    fn result(&mut self, msg: &str) {
        self.results.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.successes.push(msg.to_string());
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.warnings.push(msg.to_string());
        }
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            updates: Rc::clone(&self.spinner_updates),
        })
    }
}

/// Spinner that records into its parent [`MockUI`].
pub struct MockSpinner {
    updates: Rc<RefCell<Vec<String>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.updates.borrow_mut().push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.updates.borrow_mut().push(format!("success: {}", msg));
    }

    fn finish_error(&mut self, msg: &str) {
        self.updates.borrow_mut().push(format!("error: {}", msg));
    }

    fn clear(&mut self) {}
}
