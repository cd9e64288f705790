//! webview2-runtime - detect, version-check and install the WebView2 runtime.
//!
//! The install workflow is four blocking steps: read the installed runtime
//! record, compare its version against a requirement, ask the user, and
//! download and run the bootstrapper.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`dialog`] - Modal confirm/error dialogs over a message box primitive
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Bootstrapper download and execution
//! - [`platform`] - Host capabilities (registry, comparator, dialogs)
//! - [`runtime`] - Installed runtime query and [`RuntimeInfo`]
//! - [`settings`] - YAML settings with environment overrides
//! - [`ui`] - Terminal output for the CLI
//! - [`version`] - Version comparison
//! - [`workflow`] - The ensure-runtime workflow
//!
//! # Example
//!
//! ```
//! use webview2_runtime::version::{is_older_than, DottedComparator};
//!
//! assert!(is_older_than(&DottedComparator, "89.0.0.1", "90.0.818.66").unwrap());
//! assert!(!is_older_than(&DottedComparator, "90.0.818.66", "90.0.818.66").unwrap());
//! ```

pub mod cli;
pub mod dialog;
pub mod error;
pub mod installer;
pub mod platform;
pub mod runtime;
pub mod settings;
pub mod ui;
pub mod version;
pub mod wide;
pub mod workflow;

pub use error::{Result, RuntimeError};
pub use installer::{install_using_bootstrapper, Bootstrapper, InstallState};
pub use platform::Host;
pub use runtime::{query_installed_runtime, RuntimeInfo};
pub use version::is_older_than;
pub use workflow::{ensure_runtime, EnsureOutcome};
