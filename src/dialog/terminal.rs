//! Terminal dialog for hosts without a native message box.

use console::{style, Style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use std::io::Write;

use crate::error::Result;

use super::{prepare, ButtonCode, MessageBox, StyleFlags, IDCANCEL, IDNO, IDOK, IDYES};

/// Renders dialogs on stderr and reads the answer from the terminal.
///
/// When stderr is not a terminal, question dialogs resolve to their
/// negative button and acknowledgement dialogs return immediately.
pub struct TerminalDialog {
    term: Term,
}

impl Default for TerminalDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDialog {
    /// Create a dialog bound to stderr.
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn icon_style(flags: StyleFlags) -> Style {
        match flags.icon() {
            StyleFlags::ICON_ERROR => Style::new().red().bold(),
            StyleFlags::ICON_WARNING => Style::new().color256(208),
            _ => Style::new().bold(),
        }
    }

    fn ask(&self, question: &str, yes: ButtonCode, no: ButtonCode) -> ButtonCode {
        if !self.term.is_term() {
            tracing::debug!("no terminal attached, answering dialog negatively");
            return no;
        }

        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(true)
            .interact_on_opt(&self.term);

        match answer {
            Ok(Some(true)) => yes,
            Ok(Some(false)) | Ok(None) => no,
            Err(e) => {
                tracing::warn!("dialog prompt failed: {}", e);
                no
            }
        }
    }
}

impl MessageBox for TerminalDialog {
    fn show_message_box(
        &self,
        message: &str,
        title: &str,
        flags: StyleFlags,
    ) -> Result<ButtonCode> {
        prepare(message, title)?;

        let heading = Self::icon_style(flags).apply_to(title);
        let mut term = &self.term;
        writeln!(term, "{}", heading).ok();

        match flags.buttons() {
            StyleFlags::OK_CANCEL => Ok(self.ask(message, IDOK, IDCANCEL)),
            StyleFlags::YES_NO => Ok(self.ask(message, IDYES, IDNO)),
            _ => {
                writeln!(term, "{}", message).ok();
                if self.term.is_term() {
                    write!(term, "{}", style("Press Enter to continue").dim()).ok();
                    self.term.read_line().ok();
                }
                Ok(IDOK)
            }
        }
    }
}
