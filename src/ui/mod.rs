//! Terminal output for the CLI.
//!
//! - [`UserInterface`] trait so commands can be tested with [`MockUI`]
//! - [`TerminalUI`] for real terminals
//! - [`ProgressSpinner`] for the download and install wait
//!
//! Dialogs shown by the install workflow live in [`crate::dialog`]; this
//! module only reports.

pub mod mock;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use spinner::ProgressSpinner;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Output verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Status messages and spinners.
    #[default]
    Normal,
    /// Errors and command results only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows status messages and spinners.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Trait for user interface interactions.
pub trait UserInterface {
    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a command result. Shown in every mode.
    fn result(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Remove the spinner without a final message.
    fn clear(&mut self);
}
