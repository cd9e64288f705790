//! Host capabilities.
//!
//! The workflow touches the host through three capabilities: reading a
//! configuration record ([`ConfigStore`]), comparing versions
//! ([`VersionComparator`]) and showing a modal dialog ([`MessageBox`]).
//! [`Host`] bundles one implementation of each so the workflow is
//! platform independent and can be driven by fakes in tests.
//!
//! - On Windows, [`Host::system`] reads the registry, calls
//!   `CompareBrowserVersions` from `WebView2Loader.dll` and shows
//!   `MessageBoxW` dialogs.
//! - Elsewhere it has no record, compares with [`DottedComparator`] and
//!   renders dialogs in the terminal.

#[cfg(windows)]
pub mod windows;

use crate::dialog::{ButtonCode, MessageBox, StyleFlags, TerminalDialog};
use crate::error::Result;
use crate::runtime::{ConfigRecord, ConfigStore, EmptyStore};
use crate::version::{DottedComparator, VersionComparator};

/// One implementation of each host capability.
pub struct Host {
    store: Box<dyn ConfigStore>,
    comparator: Box<dyn VersionComparator>,
    dialog: Box<dyn MessageBox>,
}

impl Host {
    /// Assemble a host from explicit capabilities.
    pub fn new(
        store: Box<dyn ConfigStore>,
        comparator: Box<dyn VersionComparator>,
        dialog: Box<dyn MessageBox>,
    ) -> Self {
        Self {
            store,
            comparator,
            dialog,
        }
    }

    /// The capabilities of the machine this process runs on.
    #[cfg(windows)]
    pub fn system() -> Self {
        Self::new(
            Box::new(windows::RegistryStore),
            Box::new(windows::LoaderComparator),
            Box::new(windows::NativeDialog),
        )
    }

    /// The capabilities of the machine this process runs on.
    #[cfg(not(windows))]
    pub fn system() -> Self {
        Self::new(
            Box::new(EmptyStore),
            Box::new(DottedComparator),
            Box::new(TerminalDialog::new()),
        )
    }

    /// Replace the dialog capability, keeping the rest.
    pub fn with_dialog(mut self, dialog: Box<dyn MessageBox>) -> Self {
        self.dialog = dialog;
        self
    }

    /// System capabilities with dialogs rendered in the terminal.
    pub fn system_with_terminal_dialogs() -> Self {
        Self::system().with_dialog(Box::new(TerminalDialog::new()))
    }

    /// A host with no record, dotted comparison and the given dialog.
    pub fn detached(dialog: Box<dyn MessageBox>) -> Self {
        Self::new(Box::new(EmptyStore), Box::new(DottedComparator), dialog)
    }

    /// Configuration read capability.
    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    /// Version comparison capability.
    pub fn comparator(&self) -> &dyn VersionComparator {
        self.comparator.as_ref()
    }

    /// Dialog capability.
    pub fn dialog(&self) -> &dyn MessageBox {
        self.dialog.as_ref()
    }
}

impl ConfigStore for Host {
    fn open_record(&self, path: &str) -> Option<Box<dyn ConfigRecord + '_>> {
        self.store.open_record(path)
    }
}

impl VersionComparator for Host {
    fn compare(&self, a: &str, b: &str) -> Result<i32> {
        self.comparator.compare(a, b)
    }
}

impl MessageBox for Host {
    fn show_message_box(
        &self,
        message: &str,
        title: &str,
        style: StyleFlags,
    ) -> Result<ButtonCode> {
        self.dialog.show_message_box(message, title, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{confirm, MockDialog, IDCANCEL};
    use crate::runtime::{query_installed_runtime, runtime_key_path, MemoryStore};
    use crate::version::is_older_than;

    #[test]
    fn host_delegates_every_capability() {
        let mut store = MemoryStore::new();
        store.insert(&runtime_key_path(), "pv", "89.0.0.1");
        let host = Host::new(
            Box::new(store),
            Box::new(DottedComparator),
            Box::new(MockDialog::answering(IDCANCEL)),
        );

        let info = query_installed_runtime(&host).unwrap();
        assert_eq!(info.version, "89.0.0.1");
        assert!(is_older_than(&host, &info.version, "90.0.818.66").unwrap());
        assert!(!confirm(&host, "Install?", "Setup").unwrap());
    }

    #[test]
    fn detached_host_has_no_runtime() {
        let host = Host::detached(Box::new(MockDialog::new()));
        assert!(query_installed_runtime(host.store()).is_none());
        assert_eq!(host.comparator().compare("1.0", "1.0").unwrap(), 0);
    }
}
