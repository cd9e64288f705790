//! The ensure-runtime workflow.
//!
//! Query → compare → confirm → install → report. Each step blocks; the
//! only branching is on the query result, the comparison and the user's
//! answer.

use crate::dialog::{confirm, show_error};
use crate::error::Result;
use crate::installer::{Bootstrapper, InstallState};
use crate::platform::Host;
use crate::runtime::{query_installed_runtime, RuntimeInfo};
use crate::settings::Settings;
use crate::version::is_older_than;

/// Whether the installed runtime satisfies the requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Installed and not older than required.
    UpToDate(RuntimeInfo),
    /// No runtime record.
    Missing,
    /// Installed but older than required.
    Outdated(RuntimeInfo),
}

impl Decision {
    /// Whether the bootstrapper should run.
    pub fn should_install(&self) -> bool {
        !matches!(self, Self::UpToDate(_))
    }
}

/// Result of [`ensure_runtime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// Nothing to do.
    AlreadyInstalled(RuntimeInfo),
    /// The bootstrapper ran and succeeded.
    Installed,
    /// The user cancelled the install prompt.
    Declined,
    /// The bootstrapper ran and exited non-zero. The user has been told.
    InstallFailed,
}

impl EnsureOutcome {
    /// Whether the runtime is usable afterwards.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::AlreadyInstalled(_) | Self::Installed)
    }
}

/// Decide whether the runtime needs installing.
///
/// With no `required` version any installed runtime is up to date. A
/// record whose `pv` is blank or `0.0.0.0` counts as missing.
pub fn decide(host: &Host, required: Option<&str>) -> Result<Decision> {
    let Some(info) = query_installed_runtime(host.store()) else {
        return Ok(Decision::Missing);
    };
    if !has_version(&info) {
        tracing::debug!(version = %info.version, "runtime record has no usable version");
        return Ok(Decision::Missing);
    }
    let Some(required) = required else {
        return Ok(Decision::UpToDate(info));
    };

    if is_older_than(host.comparator(), &info.version, required)? {
        tracing::info!(installed = %info.version, required, "runtime is outdated");
        Ok(Decision::Outdated(info))
    } else {
        Ok(Decision::UpToDate(info))
    }
}

fn has_version(info: &RuntimeInfo) -> bool {
    let version = info.version.trim();
    !version.is_empty() && version != "0.0.0.0"
}

/// Make sure the runtime is installed, prompting before installing.
pub fn ensure_runtime(
    host: &Host,
    settings: &Settings,
    bootstrapper: &Bootstrapper,
) -> Result<EnsureOutcome> {
    ensure_runtime_with(host, settings, bootstrapper, &mut |_| {})
}

/// Like [`ensure_runtime`], reporting installer states to `observer`.
pub fn ensure_runtime_with(
    host: &Host,
    settings: &Settings,
    bootstrapper: &Bootstrapper,
    observer: &mut dyn FnMut(InstallState),
) -> Result<EnsureOutcome> {
    let prompt = &settings.prompt;

    let decision = match decide(host, settings.required_version.as_deref()) {
        Ok(decision) => decision,
        Err(err) => {
            if err.is_encoding() {
                report(host, &err.to_string(), &prompt.title);
            }
            return Err(err);
        }
    };

    if let Decision::UpToDate(info) = decision {
        tracing::debug!(version = %info.version, "runtime already installed");
        return Ok(EnsureOutcome::AlreadyInstalled(info));
    }

    if !confirm(host.dialog(), &prompt.confirm_message, &prompt.title)? {
        tracing::info!("runtime install declined");
        return Ok(EnsureOutcome::Declined);
    }

    match bootstrapper.install_with(observer) {
        Ok(true) => Ok(EnsureOutcome::Installed),
        Ok(false) => {
            show_error(host.dialog(), &prompt.failure_message, &prompt.title)?;
            Ok(EnsureOutcome::InstallFailed)
        }
        Err(err) => {
            let message = format!("{}\n\n{}", prompt.failure_message, err);
            report(host, &message, &prompt.title);
            Err(err)
        }
    }
}

/// Show an error dialog on the way out of a failed step. A failure to show
/// it must not mask the original error.
fn report(host: &Host, message: &str, title: &str) {
    if let Err(e) = show_error(host.dialog(), message, title) {
        tracing::warn!("could not show error dialog: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{MockDialog, StyleFlags, IDCANCEL, IDOK};
    use crate::error::RuntimeError;
    use crate::installer::testing::{
        FailingDownloader, MissingLauncher, ScriptDownloader, ShellLauncher,
    };
    use crate::installer::{Downloader, Launcher};
    use crate::runtime::{runtime_key_path, MemoryStore};
    use crate::version::DottedComparator;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Dialog shared between the host and the test body.
    struct SharedDialog(Rc<MockDialog>);

    impl crate::dialog::MessageBox for SharedDialog {
        fn show_message_box(
            &self,
            message: &str,
            title: &str,
            style: StyleFlags,
        ) -> Result<crate::dialog::ButtonCode> {
            self.0.show_message_box(message, title, style)
        }
    }

    fn host(installed: Option<&str>, dialog: &Rc<MockDialog>) -> Host {
        let mut store = MemoryStore::new();
        if let Some(version) = installed {
            store.insert(&runtime_key_path(), "pv", version);
            store.insert(&runtime_key_path(), "name", "Microsoft Edge WebView2 Runtime");
        }
        Host::new(
            Box::new(store),
            Box::new(DottedComparator),
            Box::new(SharedDialog(Rc::clone(dialog))),
        )
    }

    fn settings(required: Option<&str>) -> Settings {
        Settings {
            required_version: required.map(String::from),
            ..Default::default()
        }
    }

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

    #[test]
    fn missing_runtime_should_install() {
        let dialog = Rc::new(MockDialog::new());
        let decision = decide(&host(None, &dialog), Some("90.0")).unwrap();
        assert_eq!(decision, Decision::Missing);
        assert!(decision.should_install());
    }

    #[test]
    fn older_runtime_is_outdated() {
        let dialog = Rc::new(MockDialog::new());
        let decision = decide(&host(Some("89.0.0.1"), &dialog), Some("90.0.818.66")).unwrap();
        assert!(matches!(decision, Decision::Outdated(ref info) if info.version == "89.0.0.1"));
        assert!(decision.should_install());
    }

    #[test]
    fn record_without_version_is_missing() {
        let dialog = Rc::new(MockDialog::new());
        for pv in ["", "  ", "0.0.0.0"] {
            let decision = decide(&host(Some(pv), &dialog), Some("90.0")).unwrap();
            assert_eq!(decision, Decision::Missing, "pv = {:?}", pv);
            assert_eq!(decide(&host(Some(pv), &dialog), None).unwrap(), Decision::Missing);
        }
    }

    #[test]
    fn blank_version_prompts_for_install() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::answering(IDOK));
        let outcome = ensure_runtime(
            &host(Some(""), &dialog),
            &settings(Some("90.0.818.66")),
            &bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher),
        )
        .unwrap();

        assert_eq!(outcome, EnsureOutcome::Installed);
        assert_eq!(dialog.shown_with_style(StyleFlags::OK_CANCEL).len(), 1);
    }

    #[test]
    fn any_version_satisfies_no_requirement() {
        let dialog = Rc::new(MockDialog::new());
        let decision = decide(&host(Some("1.0"), &dialog), None).unwrap();
        assert!(!decision.should_install());
    }

    #[test]
    fn up_to_date_runtime_skips_prompt() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::new());
        let outcome = ensure_runtime(
            &host(Some("91.0.864.41"), &dialog),
            &settings(Some("90.0.818.66")),
            &bootstrapper(&dir, ScriptDownloader("exit 1\n"), ShellLauncher),
        )
        .unwrap();

        assert!(matches!(outcome, EnsureOutcome::AlreadyInstalled(_)));
        assert!(outcome.is_satisfied());
        assert!(dialog.shown().is_empty());
    }

    #[test]
    fn declined_prompt_does_not_install() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::answering(IDCANCEL));
        let mut states = Vec::new();
        let outcome = ensure_runtime_with(
            &host(None, &dialog),
            &settings(None),
            &bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher),
            &mut |s| states.push(s),
        )
        .unwrap();

        assert_eq!(outcome, EnsureOutcome::Declined);
        assert!(!outcome.is_satisfied());
        assert!(states.is_empty());
        assert_eq!(dialog.shown_with_style(StyleFlags::OK_CANCEL).len(), 1);
    }

    #[test]
    fn confirmed_install_succeeds() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::answering(IDOK));
        let outcome = ensure_runtime(
            &host(Some("89.0.0.1"), &dialog),
            &settings(Some("90.0.818.66")),
            &bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher),
        )
        .unwrap();

        assert_eq!(outcome, EnsureOutcome::Installed);
        assert!(dialog.shown_with_style(StyleFlags::ICON_ERROR).is_empty());
    }

    #[test]
    fn failed_installer_shows_error_and_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::new());
        let settings = settings(None);
        let outcome = ensure_runtime(
            &host(None, &dialog),
            &settings,
            &bootstrapper(&dir, ScriptDownloader("exit 1\n"), ShellLauncher),
        )
        .unwrap();

        assert_eq!(outcome, EnsureOutcome::InstallFailed);
        let errors = dialog.shown_with_style(StyleFlags::ICON_ERROR);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, settings.prompt.failure_message);
    }

    #[test]
    fn launch_failure_is_reported_and_returned() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::new());
        let err = ensure_runtime(
            &host(None, &dialog),
            &settings(None),
            &bootstrapper(&dir, ScriptDownloader("exit 0\n"), MissingLauncher),
        )
        .unwrap_err();

        assert!(matches!(err, RuntimeError::Launch { .. }));
        assert!(dialog.has_message("Failed to launch"));
    }

    #[test]
    fn download_failure_is_returned() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::new());
        let err = ensure_runtime(
            &host(None, &dialog),
            &settings(None),
            &bootstrapper(&dir, FailingDownloader, ShellLauncher),
        )
        .unwrap_err();

        assert!(matches!(err, RuntimeError::Network { .. }));
    }

    #[test]
    fn unencodable_required_version_is_shown_to_user() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::new());
        let err = ensure_runtime(
            &host(Some("89.0"), &dialog),
            &settings(Some("90\0.1")),
            &bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher),
        )
        .unwrap_err();

        assert!(err.is_encoding());
        assert_eq!(dialog.shown_with_style(StyleFlags::ICON_ERROR).len(), 1);
        assert!(dialog.shown_with_style(StyleFlags::OK_CANCEL).is_empty());
    }

    #[test]
    fn comparison_fault_is_returned_without_dialog() {
        let dir = TempDir::new().unwrap();
        let dialog = Rc::new(MockDialog::new());
        let err = ensure_runtime(
            &host(Some("not-a-version"), &dialog),
            &settings(Some("90.0")),
            &bootstrapper(&dir, ScriptDownloader("exit 0\n"), ShellLauncher),
        )
        .unwrap_err();

        assert!(matches!(err, RuntimeError::ComparisonFault { .. }));
        assert!(dialog.shown().is_empty());
    }
}
