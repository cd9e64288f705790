//! Installed runtime discovery.
//!
//! - [`info`] - The [`RuntimeInfo`] snapshot
//! - [`query`] - Registry lookup behind the [`ConfigStore`] capability

pub mod info;
pub mod query;

pub use info::RuntimeInfo;
pub use query::{
    query_installed_runtime, runtime_key_path, ConfigRecord, ConfigStore, EmptyStore, MemoryStore,
    RUNTIME_CLIENT_GUID,
};
