//! Bootstrapper download and execution.
//!
//! [`Bootstrapper::install`] walks a fixed sequence: create the temp file,
//! stream the bootstrapper into it, close it, run it and wait. The outcome
//! has two distinct failure channels that callers branch on:
//!
//! - `Ok(false)`: the installer ran and exited non-zero
//! - `Err(_)`: a step failed before the installer could report anything,
//!   including [`RuntimeError::Launch`] when it could not be started
//!
//! # Modules
//!
//! - [`fetch`] - [`Downloader`] seam and the `reqwest` implementation
//! - [`launch`] - [`Launcher`] seam and the `std::process` implementation

pub mod fetch;
pub mod launch;
#[cfg(test)]
pub(crate) mod testing;

pub use fetch::{Downloader, HttpDownloader};
pub use launch::{Launcher, ProcessLauncher};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

use crate::error::{Result, RuntimeError};

/// Evergreen bootstrapper download link.
pub const BOOTSTRAPPER_URL: &str = "https://go.microsoft.com/fwlink/p/?LinkId=2124703";

/// File name used for the downloaded bootstrapper.
pub const BOOTSTRAPPER_FILE_NAME: &str = "MicrosoftEdgeWebview2Setup.exe";

/// Where the downloaded payload is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempFilePolicy {
    /// A fresh file per run, removed when the run ends.
    #[default]
    Unique,
    /// The well-known `MicrosoftEdgeWebview2Setup.exe` in the temp
    /// directory, left in place afterwards. Concurrent runs share it.
    Fixed,
}

/// Installer progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Idle,
    Downloading,
    Downloaded,
    Launching,
    Running,
    Succeeded,
    FailedExitCode,
    Error,
}

impl InstallState {
    /// Whether no further transition follows.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::FailedExitCode | Self::Error)
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Downloading => "downloading",
            Self::Downloaded => "downloaded",
            Self::Launching => "launching",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::FailedExitCode => "failed",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Downloads and runs the runtime bootstrapper.
pub struct Bootstrapper {
    url: String,
    temp_policy: TempFilePolicy,
    temp_dir: Option<PathBuf>,
    expected_sha256: Option<String>,
    downloader: Box<dyn Downloader>,
    launcher: Box<dyn Launcher>,
}

impl Bootstrapper {
    /// Create a bootstrapper for the given URL using HTTP and direct launch.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_parts(
            url,
            Box::new(HttpDownloader::new()?),
            Box::new(ProcessLauncher),
        ))
    }

    /// Create a bootstrapper with explicit download and launch strategies.
    pub fn with_parts(
        url: impl Into<String>,
        downloader: Box<dyn Downloader>,
        launcher: Box<dyn Launcher>,
    ) -> Self {
        Self {
            url: url.into(),
            temp_policy: TempFilePolicy::default(),
            temp_dir: None,
            expected_sha256: None,
            downloader,
            launcher,
        }
    }

    /// Set the temp file policy.
    pub fn temp_policy(mut self, policy: TempFilePolicy) -> Self {
        self.temp_policy = policy;
        self
    }

    /// Write the payload under `dir` instead of the system temp directory.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Require the payload to hash to this SHA-256 hex digest.
    pub fn expected_sha256(mut self, digest: Option<String>) -> Self {
        self.expected_sha256 = digest
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty());
        self
    }

    /// The URL the bootstrapper is fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and run the bootstrapper.
    pub fn install(&self) -> Result<bool> {
        self.install_with(&mut |_| {})
    }

    /// Like [`install`](Self::install), reporting every state to `observer`.
    pub fn install_with(&self, observer: &mut dyn FnMut(InstallState)) -> Result<bool> {
        let mut transition = |state: InstallState| {
            tracing::debug!(%state, "installer state");
            observer(state);
        };

        transition(InstallState::Idle);
        let outcome = self.run(&mut transition);
        match &outcome {
            Ok(true) => transition(InstallState::Succeeded),
            Ok(false) => transition(InstallState::FailedExitCode),
            Err(_) => transition(InstallState::Error),
        }
        outcome
    }

    fn run(&self, transition: &mut dyn FnMut(InstallState)) -> Result<bool> {
        let dir = self.temp_dir.clone().unwrap_or_else(std::env::temp_dir);

        transition(InstallState::Downloading);
        let payload = match self.temp_policy {
            TempFilePolicy::Unique => {
                let file = tempfile::Builder::new()
                    .prefix("MicrosoftEdgeWebview2Setup")
                    .suffix(".exe")
                    .tempfile_in(&dir)
                    .map_err(|e| RuntimeError::filesystem(&dir, e))?;
                let path = file.path().to_path_buf();
                let (file, temp_path) = file.into_parts();
                self.fill(file, &path)?;
                Payload::Unique(temp_path)
            }
            TempFilePolicy::Fixed => {
                let path = dir.join(BOOTSTRAPPER_FILE_NAME);
                let file = File::create(&path).map_err(|e| RuntimeError::filesystem(&path, e))?;
                self.fill(file, &path)?;
                Payload::Fixed(path)
            }
        };
        transition(InstallState::Downloaded);

        let path = payload.path();
        mark_executable(path)?;

        transition(InstallState::Launching);
        let mut child = self
            .launcher
            .spawn(path)
            .map_err(|source| RuntimeError::Launch {
                path: path.to_path_buf(),
                source,
            })?;

        transition(InstallState::Running);
        let status = child.wait().map_err(|source| RuntimeError::Launch {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(code = ?status.code(), "bootstrapper exited");

        Ok(status.success())
    }

    /// Stream the download into `file`, verify it and close it.
    fn fill(&self, file: File, path: &Path) -> Result<()> {
        let mut writer = HashingWriter::new(file);
        if let Err(err) = self.downloader.download(&self.url, &mut writer) {
            return Err(match writer.io_error.take() {
                Some(io) => RuntimeError::filesystem(path, io),
                None => err,
            });
        }

        let (file, digest) = writer.finish();
        file.sync_all()
            .map_err(|e| RuntimeError::filesystem(path, e))?;
        drop(file);

        if let Some(expected) = &self.expected_sha256 {
            if *expected != digest {
                return Err(RuntimeError::IntegrityMismatch {
                    expected: expected.clone(),
                    actual: digest,
                });
            }
        }
        Ok(())
    }
}

/// Download and run the bootstrapper from the default URL.
pub fn install_using_bootstrapper() -> Result<bool> {
    Bootstrapper::new(BOOTSTRAPPER_URL)?.install()
}

enum Payload {
    Unique(TempPath),
    Fixed(PathBuf),
}

impl Payload {
    fn path(&self) -> &Path {
        match self {
            Self::Unique(temp) => temp,
            Self::Fixed(path) => path,
        }
    }
}

/// Writer that hashes what passes through and keeps the first I/O error.
struct HashingWriter {
    file: File,
    hasher: Sha256,
    io_error: Option<io::Error>,
}

impl HashingWriter {
    fn new(file: File) -> Self {
        Self {
            file,
            hasher: Sha256::new(),
            io_error: None,
        }
    }

    fn finish(self) -> (File, String) {
        (self.file, hex::encode(self.hasher.finalize()))
    }

    fn record(&mut self, err: io::Error) -> io::Error {
        let copy = io::Error::new(err.kind(), err.to_string());
        self.io_error.get_or_insert(err);
        copy
    }
}

impl Write for HashingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.write(buf) {
            Ok(n) => {
                self.hasher.update(&buf[..n]);
                Ok(n)
            }
            Err(e) => Err(self.record(e)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush().map_err(|e| self.record(e))
    }
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| RuntimeError::filesystem(path, e))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::testing::{FailingDownloader, MissingLauncher, ScriptDownloader, ShellLauncher};
    use super::*;
    use tempfile::TempDir;

    fn bootstrapper(
        dir: &TempDir,
        downloader: impl Downloader + 'static,
        launcher: impl Launcher + 'static,
    ) -> Bootstrapper {
        Bootstrapper::with_parts(
            "https://example.invalid/setup",
            Box::new(downloader),
            Box::new(launcher),
        )
        .temp_dir(dir.path())
    }

    fn record(b: &Bootstrapper) -> (Result<bool>, Vec<InstallState>) {
        let mut states = Vec::new();
        let result = b.install_with(&mut |s| states.push(s));
        (result, states)
    }

    #[test]
    fn exit_zero_is_success() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher);

        let (result, states) = record(&b);
        assert!(result.unwrap());
        assert_eq!(
            states,
            vec![
                InstallState::Idle,
                InstallState::Downloading,
                InstallState::Downloaded,
                InstallState::Launching,
                InstallState::Running,
                InstallState::Succeeded,
            ]
        );
    }

    #[test]
    fn exit_one_is_false_not_error() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, ScriptDownloader("exit 1\n"), ShellLauncher);

        let (result, states) = record(&b);
        assert!(!result.unwrap());
        assert_eq!(states.last(), Some(&InstallState::FailedExitCode));
    }

    #[test]
    fn spawn_failure_is_launch_error() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, ScriptDownloader("exit 0\n"), MissingLauncher);

        let (result, states) = record(&b);
        assert!(matches!(result, Err(RuntimeError::Launch { .. })));
        assert_eq!(states.last(), Some(&InstallState::Error));
        assert!(!states.contains(&InstallState::Running));
    }

    #[test]
    fn download_failure_stops_before_launch() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, FailingDownloader, ShellLauncher);

        let (result, states) = record(&b);
        assert!(matches!(result, Err(RuntimeError::Network { .. })));
        assert_eq!(
            states,
            vec![
                InstallState::Idle,
                InstallState::Downloading,
                InstallState::Error
            ]
        );
    }

    #[test]
    fn unique_payload_is_removed_afterwards() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher);

        assert!(b.install().unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn fixed_payload_uses_well_known_name_and_stays() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher)
            .temp_policy(TempFilePolicy::Fixed);

        assert!(b.install().unwrap());
        let payload = dir.path().join(BOOTSTRAPPER_FILE_NAME);
        assert_eq!(std::fs::read_to_string(payload).unwrap(), "exit 0\n");
    }

    #[test]
    fn missing_temp_dir_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let b = Bootstrapper::with_parts(
            "https://example.invalid/setup",
            Box::new(ScriptDownloader("exit 0\n")),
            Box::new(ShellLauncher),
        )
        .temp_dir(dir.path().join("does-not-exist"));

        assert!(matches!(
            b.install(),
            Err(RuntimeError::Filesystem { .. })
        ));
    }

    #[test]
    fn matching_digest_passes() {
        let dir = TempDir::new().unwrap();
        let script = "exit 0\n";
        let digest = hex::encode(Sha256::digest(script.as_bytes()));
        let b = bootstrapper(&dir, ScriptDownloader(script), ShellLauncher)
            .expected_sha256(Some(digest.to_uppercase()));

        assert!(b.install().unwrap());
    }

    #[test]
    fn blank_digest_skips_check() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher)
            .expected_sha256(Some("  ".to_string()));

        assert!(b.install().unwrap());
    }

    #[test]
    fn digest_mismatch_blocks_launch() {
        let dir = TempDir::new().unwrap();
        let b = bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher)
            .expected_sha256(Some("00".repeat(32)));

        let (result, states) = record(&b);
        assert!(matches!(result, Err(RuntimeError::IntegrityMismatch { .. })));
        assert!(!states.contains(&InstallState::Launching));
    }

    #[test]
    fn terminal_states() {
        assert!(InstallState::Succeeded.is_terminal());
        assert!(InstallState::FailedExitCode.is_terminal());
        assert!(InstallState::Error.is_terminal());
        assert!(!InstallState::Running.is_terminal());
        assert_eq!(InstallState::FailedExitCode.to_string(), "failed");
    }

    #[test]
    fn temp_policy_deserializes_from_snake_case() {
        let policy: TempFilePolicy = serde_yaml::from_str("fixed").unwrap();
        assert_eq!(policy, TempFilePolicy::Fixed);
        assert_eq!(TempFilePolicy::default(), TempFilePolicy::Unique);
    }
}
