//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Detect, version-check and install the WebView2 runtime.
#[derive(Debug, Parser)]
#[command(name = "webview2-runtime")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides the default location)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Render dialogs in the terminal instead of native message boxes
    #[arg(long, global = true)]
    pub no_dialog: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the installed runtime
    Status(StatusArgs),

    /// Check whether one version is older than another
    Compare(CompareArgs),

    /// Download and run the bootstrapper
    Install(InstallArgs),

    /// Install the runtime if missing or outdated, asking first
    Ensure(EnsureArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `compare` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompareArgs {
    /// Installed version
    pub installed: String,

    /// Required version
    pub required: String,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Download from this URL instead of the configured one
    #[arg(long)]
    pub url: Option<String>,
}

/// Arguments for the `ensure` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnsureArgs {
    /// Minimum acceptable version (overrides settings)
    #[arg(short, long)]
    pub required: Option<String>,
}
