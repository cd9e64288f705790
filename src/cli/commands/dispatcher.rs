//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::platform::Host;
use crate::settings::Settings;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings: Settings,
    host: Host,
}

impl CommandDispatcher {
    /// Create a dispatcher over the given settings and host.
    pub fn new(settings: Settings, host: Host) -> Self {
        Self { settings, host }
    }

    /// Get the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Status(args) => {
                let cmd = super::status::StatusCommand::new(&self.host, args.clone());
                cmd.execute(ui)
            }
            Commands::Compare(args) => {
                let cmd = super::compare::CompareCommand::new(&self.host, args.clone());
                cmd.execute(ui)
            }
            Commands::Install(args) => {
                let mut settings = self.settings.clone();
                if let Some(url) = &args.url {
                    settings.bootstrapper_url = url.clone();
                }
                let cmd = super::install::InstallCommand::new(settings.bootstrapper()?);
                cmd.execute(ui)
            }
            Commands::Ensure(args) => {
                let mut settings = self.settings.clone();
                if let Some(required) = &args.required {
                    settings.required_version = Some(required.clone());
                }
                let bootstrapper = settings.bootstrapper()?;
                let cmd = super::ensure::EnsureCommand::new(&self.host, settings, bootstrapper);
                cmd.execute(ui)
            }
        }
    }
}
