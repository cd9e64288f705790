//! Registry lookup for the installed runtime.
//!
//! The runtime registers itself under the EdgeUpdate client key. A 32-bit
//! process sees that key directly; anything wider reads it through the
//! `WOW6432Node` redirection.

use std::collections::HashMap;

use super::RuntimeInfo;

/// EdgeUpdate client GUID of the WebView2 Evergreen runtime.
pub const RUNTIME_CLIENT_GUID: &str = "{F3017226-FE2A-4295-8BDF-00C3A9A7E4C5}";

/// A single opened configuration record.
pub trait ConfigRecord {
    /// Read a string value. `None` if the value is missing or not a string.
    fn get_string(&self, name: &str) -> Option<String>;
}

/// Read access to host configuration storage.
pub trait ConfigStore {
    /// Open the record at `path`. `None` if it cannot be opened.
    fn open_record(&self, path: &str) -> Option<Box<dyn ConfigRecord + '_>>;
}

/// Registry key path for the current process width.
pub fn runtime_key_path() -> String {
    key_path_for(cfg!(target_pointer_width = "32"))
}

fn key_path_for(is_32_bit: bool) -> String {
    if is_32_bit {
        format!(r"SOFTWARE\Microsoft\EdgeUpdate\Clients\{}", RUNTIME_CLIENT_GUID)
    } else {
        format!(
            r"SOFTWARE\WOW6432Node\Microsoft\EdgeUpdate\Clients\{}",
            RUNTIME_CLIENT_GUID
        )
    }
}

/// Query the installed runtime.
///
/// Returns `None` when the record cannot be opened, which means the
/// runtime is not installed. A single failed read is definitive.
pub fn query_installed_runtime(store: &dyn ConfigStore) -> Option<RuntimeInfo> {
    let path = runtime_key_path();
    let Some(record) = store.open_record(&path) else {
        tracing::debug!(%path, "runtime record not found");
        return None;
    };

    let value = |name: &str| record.get_string(name).unwrap_or_default();
    let info = RuntimeInfo {
        location: value("location"),
        name: value("name"),
        version: value("pv"),
        silent_uninstall: value("SilentUninstall"),
    };
    tracing::debug!(%path, version = %info.version, "runtime record found");
    Some(info)
}

/// A store that never has any record.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStore;

impl ConfigStore for EmptyStore {
    fn open_record(&self, _path: &str) -> Option<Box<dyn ConfigRecord + '_>> {
        None
    }
}

/// In-memory store keyed by record path.
///
/// # Example
///
/// ```
/// use webview2_runtime::runtime::{query_installed_runtime, runtime_key_path, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.insert(&runtime_key_path(), "pv", "90.0.818.66");
///
/// let info = query_installed_runtime(&store).unwrap();
/// assert_eq!(info.version, "90.0.818.66");
/// assert_eq!(info.name, "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record at `path` with no values.
    pub fn create_record(&mut self, path: &str) {
        self.records.entry(path.to_string()).or_default();
    }

    /// Set a value, creating the record if needed.
    pub fn insert(&mut self, path: &str, name: &str, value: &str) {
        self.records
            .entry(path.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }
}

struct MemoryRecord<'a>(&'a HashMap<String, String>);

impl ConfigRecord for MemoryRecord<'_> {
    fn get_string(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

impl ConfigStore for MemoryStore {
    fn open_record(&self, path: &str) -> Option<Box<dyn ConfigRecord + '_>> {
        self.records
            .get(path)
            .map(|values| Box::new(MemoryRecord(values)) as Box<dyn ConfigRecord + '_>)
    }
}
