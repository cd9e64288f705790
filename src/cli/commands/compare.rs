//! Compare command implementation.

use crate::cli::args::CompareArgs;
use crate::error::Result;
use crate::platform::Host;
use crate::ui::UserInterface;
use crate::version::is_older_than;

use super::dispatcher::{Command, CommandResult};

/// Prints whether `installed` is older than `required`.
pub struct CompareCommand<'a> {
    host: &'a Host,
    args: CompareArgs,
}

impl<'a> CompareCommand<'a> {
    /// Create a new compare command.
    pub fn new(host: &'a Host, args: CompareArgs) -> Self {
        Self { host, args }
    }
}

impl Command for CompareCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match is_older_than(
            self.host.comparator(),
            &self.args.installed,
            &self.args.required,
        ) {
            Ok(true) => ui.result("older"),
            Ok(false) => ui.result("not older"),
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
        }
        Ok(CommandResult::success())
    }
}
