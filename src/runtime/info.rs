//! Snapshot of an installed runtime.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::version::{is_older_than, VersionComparator};

/// Registry-derived metadata for an installed WebView2 runtime.
///
/// Fields missing from the record are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    /// Install directory.
    pub location: String,
    /// Display name.
    pub name: String,
    /// Installed version (`pv` in the registry).
    pub version: String,
    /// Command that removes the runtime without UI.
    pub silent_uninstall: String,
}

impl RuntimeInfo {
    /// Returns true if this installation is older than `required`.
    pub fn is_older_than(
        &self,
        required: &str,
        comparator: &dyn VersionComparator,
    ) -> Result<bool> {
        is_older_than(comparator, &self.version, required)
    }
}
