//! Blocking user dialogs.
//!
//! Everything is built on one primitive, [`MessageBox::show_message_box`],
//! which takes an opaque style bitmask and returns the identifier of the
//! button the user pressed. [`confirm`] and [`show_error`] are the two
//! fixed-style call sites the install workflow needs.
//!
//! # Example
//!
//! ```
//! use webview2_runtime::dialog::{confirm, MockDialog, IDCANCEL};
//!
//! let dialog = MockDialog::new();
//! dialog.queue_response(IDCANCEL);
//!
//! assert!(!confirm(&dialog, "Install now?", "Setup").unwrap());
//! assert_eq!(dialog.shown()[0].title, "Setup");
//! ```

pub mod mock;
pub mod terminal;

pub use mock::{MockDialog, ShownDialog};
pub use terminal::TerminalDialog;

use std::ops::BitOr;

use crate::error::Result;
use crate::wide::encode_wide;

/// Identifier of the button that dismissed a dialog.
pub type ButtonCode = i32;

/// The OK button.
pub const IDOK: ButtonCode = 1;
/// The Cancel button.
pub const IDCANCEL: ButtonCode = 2;
/// The Yes button.
pub const IDYES: ButtonCode = 6;
/// The No button.
pub const IDNO: ButtonCode = 7;

/// Message box style bitmask: a button set combined with an icon.
///
/// Values match the Win32 `MB_*` constants so they pass straight through
/// to the native dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleFlags(u32);

impl StyleFlags {
    /// Single OK button.
    pub const OK: Self = Self(0x0000_0000);
    /// OK and Cancel buttons.
    pub const OK_CANCEL: Self = Self(0x0000_0001);
    /// Yes and No buttons.
    pub const YES_NO: Self = Self(0x0000_0004);
    /// Stop-sign error icon.
    pub const ICON_ERROR: Self = Self(0x0000_0010);
    /// Warning icon.
    pub const ICON_WARNING: Self = Self(0x0000_0030);

    const BUTTON_MASK: u32 = 0x0000_000F;
    const ICON_MASK: u32 = 0x0000_00F0;

    /// The raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The button-set part of the mask.
    pub const fn buttons(self) -> Self {
        Self(self.0 & Self::BUTTON_MASK)
    }

    /// The icon part of the mask.
    pub const fn icon(self) -> Self {
        Self(self.0 & Self::ICON_MASK)
    }
}

impl BitOr for StyleFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A modal dialog primitive.
pub trait MessageBox {
    /// Show a modal dialog and block until it is dismissed.
    ///
    /// Fails only when `message` or `title` cannot be prepared for display.
    fn show_message_box(&self, message: &str, title: &str, style: StyleFlags)
        -> Result<ButtonCode>;
}

/// Encode message and title for a native dialog call.
pub(crate) fn prepare(message: &str, title: &str) -> Result<(Vec<u16>, Vec<u16>)> {
    Ok((
        encode_wide(message, "dialog message")?,
        encode_wide(title, "dialog title")?,
    ))
}

/// Ask the user to confirm with OK / Cancel.
///
/// Returns true only if OK was chosen.
pub fn confirm(dialog: &dyn MessageBox, message: &str, title: &str) -> Result<bool> {
    let button = dialog.show_message_box(message, title, StyleFlags::OK_CANCEL)?;
    Ok(button == IDOK)
}

/// Show an error message with a single acknowledgement button.
pub fn show_error(dialog: &dyn MessageBox, message: &str, title: &str) -> Result<()> {
    dialog.show_message_box(message, title, StyleFlags::ICON_ERROR)?;
    Ok(())
}
