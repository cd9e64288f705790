//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`].

pub mod compare;
pub mod dispatcher;
pub mod ensure;
pub mod install;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
