//! Installer process launch.

use std::path::Path;
use std::process::{Child, Command};

/// Starts the downloaded installer.
pub trait Launcher {
    /// Spawn `program` without waiting for it.
    fn spawn(&self, program: &Path) -> std::io::Result<Child>;
}

/// Runs the program directly with no arguments and inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn spawn(&self, program: &Path) -> std::io::Result<Child> {
        Command::new(program).spawn()
    }
}
