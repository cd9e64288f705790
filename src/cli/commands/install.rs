//! Install command implementation.
//!
//! Runs the bootstrapper unconditionally. Exit code 0 when it succeeds,
//! 1 when it ran and failed. Errors propagate to `main`.

use crate::error::Result;
use crate::installer::{Bootstrapper, InstallState};
use crate::ui::{SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    bootstrapper: Bootstrapper,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(bootstrapper: Bootstrapper) -> Self {
        Self { bootstrapper }
    }
}

/// Spinner text for an installer state.
pub(crate) fn describe(state: InstallState) -> Option<&'static str> {
    match state {
        InstallState::Downloading => Some("Downloading WebView2 bootstrapper..."),
        InstallState::Launching => Some("Starting installer..."),
        InstallState::Running => Some("Waiting for installer to finish..."),
        _ => None,
    }
}

/// Run the bootstrapper behind a spinner and report its outcome.
pub(crate) fn run_with_spinner(
    bootstrapper: &Bootstrapper,
    spinner: &mut dyn SpinnerHandle,
) -> Result<bool> {
    let outcome = bootstrapper.install_with(&mut |state| {
        if let Some(text) = describe(state) {
            spinner.set_message(text);
        }
    });

    match &outcome {
        Ok(true) => spinner.finish_success("WebView2 runtime installed"),
        Ok(false) => spinner.finish_error("Installer reported failure"),
        Err(_) => spinner.clear(),
    }
    outcome
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(&format!("Fetching {}", self.bootstrapper.url()));

        let mut spinner = ui.start_spinner("Preparing download...");
        if run_with_spinner(&self.bootstrapper, spinner.as_mut())? {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
