//! Settings loading.
//!
//! Settings come from a YAML file and are then overridden by environment
//! variables:
//!
//! 1. Built-in defaults
//! 2. The file given with `--config`, else `<config dir>/webview2-runtime/config.yml`
//! 3. `WEBVIEW2_REQUIRED_VERSION` and `WEBVIEW2_BOOTSTRAPPER_URL`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, RuntimeError};
use crate::installer::{
    Bootstrapper, HttpDownloader, ProcessLauncher, TempFilePolicy, BOOTSTRAPPER_URL,
};

/// Overrides `required_version`.
pub const ENV_REQUIRED_VERSION: &str = "WEBVIEW2_REQUIRED_VERSION";
/// Overrides `bootstrapper_url`.
pub const ENV_BOOTSTRAPPER_URL: &str = "WEBVIEW2_BOOTSTRAPPER_URL";

/// Dialog text used by the install workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptText {
    pub title: String,
    pub confirm_message: String,
    pub failure_message: String,
}

impl Default for PromptText {
    fn default() -> Self {
        Self {
            title: "Missing Requirements".to_string(),
            confirm_message: "This application requires the WebView2 runtime. \
                Press OK to download and install it now."
                .to_string(),
            failure_message: "The WebView2 runtime could not be installed.".to_string(),
        }
    }
}

/// Workflow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum runtime version. `None` accepts any installed version.
    pub required_version: Option<String>,
    pub bootstrapper_url: String,
    pub temp_file: TempFilePolicy,
    /// SHA-256 hex digest the downloaded bootstrapper must match.
    pub expected_sha256: Option<String>,
    pub download_timeout_secs: Option<u64>,
    pub prompt: PromptText,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required_version: None,
            bootstrapper_url: BOOTSTRAPPER_URL.to_string(),
            temp_file: TempFilePolicy::default(),
            expected_sha256: None,
            download_timeout_secs: None,
            prompt: PromptText::default(),
        }
    }
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("webview2-runtime").join("config.yml"))
    }

    /// Load settings and apply environment overrides.
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Parse a settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| RuntimeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::parse(&content).map_err(|message| RuntimeError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings from YAML text. An empty document yields defaults.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        settings.validated()
    }

    /// Normalize and check values serde accepts but the installer cannot use.
    ///
    /// A blank digest means no integrity check.
    fn validated(mut self) -> std::result::Result<Self, String> {
        self.expected_sha256 = self
            .expected_sha256
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if let Some(digest) = &self.expected_sha256 {
            let is_sha256 = hex::decode(digest).is_ok_and(|bytes| bytes.len() == 32);
            if !is_sha256 {
                return Err(format!(
                    "expected_sha256 must be 64 hex characters, got {:?}",
                    digest
                ));
            }
        }
        if self.download_timeout_secs == Some(0) {
            return Err("download_timeout_secs must be greater than zero".to_string());
        }
        Ok(self)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(version) = lookup(ENV_REQUIRED_VERSION).filter(|v| !v.is_empty()) {
            self.required_version = Some(version);
        }
        if let Some(url) = lookup(ENV_BOOTSTRAPPER_URL).filter(|v| !v.is_empty()) {
            self.bootstrapper_url = url;
        }
    }

    /// Configured download timeout.
    pub fn download_timeout(&self) -> Option<Duration> {
        self.download_timeout_secs.map(Duration::from_secs)
    }

    /// Build the bootstrapper these settings describe.
    pub fn bootstrapper(&self) -> Result<Bootstrapper> {
        let downloader = HttpDownloader::with_timeout(self.download_timeout())?;
        Ok(Bootstrapper::with_parts(
            self.bootstrapper_url.clone(),
            Box::new(downloader),
            Box::new(ProcessLauncher),
        )
        .temp_policy(self.temp_file)
        .expected_sha256(self.expected_sha256.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_evergreen_bootstrapper() {
        let settings = Settings::default();
        assert_eq!(settings.bootstrapper_url, BOOTSTRAPPER_URL);
        assert_eq!(settings.temp_file, TempFilePolicy::Unique);
        assert!(settings.required_version.is_none());
        assert!(settings.expected_sha256.is_none());
        assert!(settings.download_timeout().is_none());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
        assert_eq!(Settings::parse("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let yaml = r#"
required_version: "90.0.818.66"
temp_file: fixed
prompt:
  title: "My App"
"#;
        let settings = Settings::parse(yaml).unwrap();
        assert_eq!(settings.required_version.as_deref(), Some("90.0.818.66"));
        assert_eq!(settings.temp_file, TempFilePolicy::Fixed);
        assert_eq!(settings.prompt.title, "My App");
        assert_eq!(
            settings.prompt.failure_message,
            PromptText::default().failure_message
        );
        assert_eq!(settings.bootstrapper_url, BOOTSTRAPPER_URL);
    }

    #[test]
    fn invalid_document_reports_message() {
        let err = Settings::parse("temp_file: sometimes").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn from_file_reads_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "download_timeout_secs: 45\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.download_timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn blank_digest_disables_integrity_check() {
        let settings = Settings::parse("expected_sha256: \"\"\n").unwrap();
        assert!(settings.expected_sha256.is_none());

        let settings = Settings::parse("expected_sha256: \"   \"\n").unwrap();
        assert!(settings.expected_sha256.is_none());
    }

    #[test]
    fn well_formed_digest_is_kept() {
        let digest = "ab".repeat(32);
        let settings = Settings::parse(&format!("expected_sha256: \"{}\"\n", digest)).unwrap();
        assert_eq!(settings.expected_sha256.as_deref(), Some(digest.as_str()));
    }

    #[test]
    fn malformed_digest_is_rejected() {
        let err = Settings::parse("expected_sha256: \"abc123\"\n").unwrap_err();
        assert!(err.contains("expected_sha256"));

        let not_hex = "zz".repeat(32);
        assert!(Settings::parse(&format!("expected_sha256: \"{}\"\n", not_hex)).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Settings::parse("download_timeout_secs: 0\n").unwrap_err();
        assert!(err.contains("download_timeout_secs"));
    }

    #[test]
    fn invalid_values_in_file_are_config_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "download_timeout_secs: 0\n").unwrap();

        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, RuntimeError::Config { .. }));
    }

    #[test]
    fn from_file_missing_is_config_error() {
        let temp = TempDir::new().unwrap();
        let err = Settings::from_file(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, RuntimeError::Config { .. }));
    }

    #[test]
    fn explicit_invalid_file_fails_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "required_version: [1, 2]\n").unwrap();

        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::parse("required_version: \"89.0\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_REQUIRED_VERSION, "91.0"),
            (ENV_BOOTSTRAPPER_URL, "http://localhost/setup"),
        ]
        .into_iter()
        .collect();

        settings.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.required_version.as_deref(), Some("91.0"));
        assert_eq!(settings.bootstrapper_url, "http://localhost/setup");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(|_| Some(String::new()));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn bootstrapper_uses_configured_url() {
        let settings = Settings {
            bootstrapper_url: "http://localhost/setup".into(),
            ..Default::default()
        };
        let bootstrapper = settings.bootstrapper().unwrap();
        assert_eq!(bootstrapper.url(), "http://localhost/setup");
    }

    #[test]
    fn default_path_ends_with_config_file() {
        if let Some(path) = Settings::default_path() {
            assert!(path.ends_with("webview2-runtime/config.yml"));
        }
    }
}
