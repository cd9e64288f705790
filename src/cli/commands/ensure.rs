//! Ensure command implementation.
//!
//! The `webview2-runtime ensure` command runs the full workflow: query,
//! compare, confirm, install.

use crate::error::Result;
use crate::installer::Bootstrapper;
use crate::platform::Host;
use crate::settings::Settings;
use crate::ui::UserInterface;
use crate::workflow::{ensure_runtime_with, EnsureOutcome};

use super::dispatcher::{Command, CommandResult};
use super::install::describe;

/// The ensure command implementation.
pub struct EnsureCommand<'a> {
    host: &'a Host,
    settings: Settings,
    bootstrapper: Bootstrapper,
}

impl<'a> EnsureCommand<'a> {
    /// Create a new ensure command.
    pub fn new(host: &'a Host, settings: Settings, bootstrapper: Bootstrapper) -> Self {
        Self {
            host,
            settings,
            bootstrapper,
        }
    }
}

impl Command for EnsureCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = ensure_runtime_with(
            self.host,
            &self.settings,
            &self.bootstrapper,
            &mut |state| {
                if let Some(text) = describe(state) {
                    ui.message(text);
                }
            },
        )?;

        match &outcome {
            EnsureOutcome::AlreadyInstalled(info) => {
                ui.success(&format!("WebView2 runtime {} is installed", info.version));
            }
            EnsureOutcome::Installed => ui.success("WebView2 runtime installed"),
            EnsureOutcome::Declined => ui.warning("Installation cancelled"),
            EnsureOutcome::InstallFailed => ui.error("Installer reported failure"),
        }

        Ok(if outcome.is_satisfied() {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}
