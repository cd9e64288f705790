//! Recording dialog for tests.
//!
//! `MockDialog` implements [`MessageBox`] without showing anything. It
//! records every dialog and answers from a queue of button codes, falling
//! back to a default (OK unless changed).

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::Result;

use super::{prepare, ButtonCode, MessageBox, StyleFlags, IDOK};

/// A dialog that was shown to the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownDialog {
    pub message: String,
    pub title: String,
    pub style: StyleFlags,
}

/// Mock dialog implementation for testing.
#[derive(Debug)]
pub struct MockDialog {
    responses: RefCell<VecDeque<ButtonCode>>,
    default_response: ButtonCode,
    shown: RefCell<Vec<ShownDialog>>,
}

impl Default for MockDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDialog {
    /// Create a mock that answers OK to everything.
    pub fn new() -> Self {
        Self::answering(IDOK)
    }

    /// Create a mock that answers `button` when its queue is empty.
    pub fn answering(button: ButtonCode) -> Self {
        Self {
            responses: RefCell::new(VecDeque::new()),
            default_response: button,
            shown: RefCell::new(Vec::new()),
        }
    }

    /// Queue a response for the next dialog.
    pub fn queue_response(&self, button: ButtonCode) {
        self.responses.borrow_mut().push_back(button);
    }

    /// All dialogs shown so far, oldest first.
    pub fn shown(&self) -> Vec<ShownDialog> {
        self.shown.borrow().clone()
    }

    /// Whether any shown dialog's message contains `needle`.
    pub fn has_message(&self, needle: &str) -> bool {
        self.shown.borrow().iter().any(|d| d.message.contains(needle))
    }

    /// Dialogs shown with the given style.
    pub fn shown_with_style(&self, style: StyleFlags) -> Vec<ShownDialog> {
        self.shown
            .borrow()
            .iter()
            .filter(|d| d.style == style)
            .cloned()
            .collect()
    }
}

impl MessageBox for MockDialog {
    fn show_message_box(
        &self,
        message: &str,
        title: &str,
        style: StyleFlags,
    ) -> Result<ButtonCode> {
        prepare(message, title)?;
        self.shown.borrow_mut().push(ShownDialog {
            message: message.to_string(),
            title: title.to_string(),
            style,
        });
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.default_response))
    }
}
