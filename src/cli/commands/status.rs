//! Status command implementation.
//!
//! The `webview2-runtime status` command shows the installed runtime.

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::platform::Host;
use crate::runtime::query_installed_runtime;
use crate::ui::{Theme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand<'a> {
    host: &'a Host,
    args: StatusArgs,
}

impl<'a> StatusCommand<'a> {
    /// Create a new status command.
    pub fn new(host: &'a Host, args: StatusArgs) -> Self {
        Self { host, args }
    }
}

impl Command for StatusCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let info = query_installed_runtime(self.host.store());

        if self.args.json {
            let json = serde_json::json!({
                "installed": info.is_some(),
                "runtime": info,
            });
            let text = serde_json::to_string_pretty(&json).map_err(anyhow::Error::from)?;
            ui.result(&text);
        } else {
            match &info {
                Some(info) => {
                    let theme = Theme::plain();
                    ui.result(&theme.format_field("Name", &info.name));
                    ui.result(&theme.format_field("Version", &info.version));
                    ui.result(&theme.format_field("Location", &info.location));
                    ui.result(&theme.format_field("Silent uninstall", &info.silent_uninstall));
                }
                None => ui.result("WebView2 runtime is not installed"),
            }
        }

        Ok(if info.is_some() {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}
