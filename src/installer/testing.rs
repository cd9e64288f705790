//! Download and launch fakes shared by installer and workflow tests.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, Command};

use crate::error::{Result, RuntimeError};

use super::{Downloader, Launcher};

/// Writes a fixed shell script instead of downloading.
pub struct ScriptDownloader(pub &'static str);

impl Downloader for ScriptDownloader {
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        dest.write_all(self.0.as_bytes())
            .map_err(|e| RuntimeError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(self.0.len() as u64)
    }
}

/// Fails every download.
pub struct FailingDownloader;

impl Downloader for FailingDownloader {
    fn download(&self, url: &str, _dest: &mut dyn Write) -> Result<u64> {
        Err(RuntimeError::Network {
            url: url.to_string(),
            message: "connection reset".into(),
        })
    }
}

/// Runs the payload through `sh` so tests never exec a file that was
/// just written.
pub struct ShellLauncher;

impl Launcher for ShellLauncher {
    fn spawn(&self, program: &Path) -> io::Result<Child> {
        Command::new("sh").arg(program).spawn()
    }
}

/// Always fails to start.
pub struct MissingLauncher;

impl Launcher for MissingLauncher {
    fn spawn(&self, _program: &Path) -> io::Result<Child> {
        Command::new("webview2-runtime-test-no-such-program").spawn()
    }
}
