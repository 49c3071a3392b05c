//! Host adapters driven through the `CommandRunner` seam.

#![allow(clippy::expect_used)]

use tester_unit::application::ports::{PackageManager, RuntimePackageManager, ServiceManager};
use tester_unit::application::services::package_installer::ensure_packages;
use tester_unit::domain::{InstallError, InstallationSpec, PackageError};
use tester_unit::infra::apt::AptPackageManager;
use tester_unit::infra::pip::PipRuntimeManager;
use tester_unit::infra::systemd::SystemctlServiceManager;

use crate::fakes::CapturingReporter;
use crate::helpers::{RecordingRunner, err_output, ok_output};

fn packages(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn apt_refresh_then_batch_install() {
    let runner = RecordingRunner::default();
    let apt = AptPackageManager::new(&runner);
    apt.refresh_index().await.expect("refresh");
    apt.install_packages(&packages(&["python3", "python3-pip"]))
        .await
        .expect("install");
    assert_eq!(
        runner.calls(),
        vec!["apt-get update", "apt-get install -y python3 python3-pip"]
    );
}

#[tokio::test]
async fn apt_not_found_maps_through_installer_to_package_not_found() {
    let runner = RecordingRunner::replying(vec![
        ok_output(b""),
        err_output(100, b"E: Unable to locate package python3-pipx\n"),
    ]);
    let apt = AptPackageManager::new(runner);
    let pip = PipRuntimeManager::new(RecordingRunner::default());
    let spec = InstallationSpec::new(
        packages(&["python3", "python3-pipx"]),
        "pip3",
        "prometheus-client",
        "src/tester.py",
    );

    let err = ensure_packages(&apt, &pip, &spec, &CapturingReporter::default())
        .await
        .expect_err("expected Err");

    assert!(matches!(err, InstallError::PackageNotFound(ref n) if n == "python3-pipx"));
    assert_eq!(err.blocked_reason(), "could not find package");
}

#[tokio::test]
async fn apt_rejects_option_like_names() {
    let apt = AptPackageManager::new(RecordingRunner::default());
    let err = apt
        .install_packages(&packages(&["-o=Dpkg::Options::=--force-all"]))
        .await
        .expect_err("expected Err");
    assert!(matches!(
        err.downcast_ref::<PackageError>(),
        Some(PackageError::Other(_))
    ));
}

#[tokio::test]
async fn pip_failure_is_reported_as_warning_only() {
    let apt = AptPackageManager::new(RecordingRunner::default());
    let pip = PipRuntimeManager::new(RecordingRunner::replying(vec![err_output(
        1,
        b"ERROR: Could not find a version that satisfies the requirement",
    )]));
    let spec = InstallationSpec::new(packages(&["python3"]), "pip3", "prometheus-client", "x");
    let reporter = CapturingReporter::default();

    let report = ensure_packages(&apt, &pip, &spec, &reporter)
        .await
        .expect("best-effort failure must not fail the stage");

    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].contains("pip3"), "{:?}", report.skipped);
    assert_eq!(reporter.warnings.borrow().len(), 1);
}

#[tokio::test]
async fn pip_success_is_silent() {
    let pip = PipRuntimeManager::new(RecordingRunner::default());
    pip.install_package("pip3", "prometheus-client")
        .await
        .expect("install");
}

#[tokio::test]
async fn systemctl_is_active_exit_codes() {
    let runner = RecordingRunner::replying(vec![
        ok_output(b""),
        err_output(3, b""),
        err_output(4, b""),
    ]);
    let svc = SystemctlServiceManager::new(&runner);
    assert!(svc.is_running("prometheus-tester").await.expect("active"));
    assert!(!svc.is_running("prometheus-tester").await.expect("inactive"));
    assert!(!svc.is_running("prometheus-tester").await.expect("unknown unit"));
    assert_eq!(
        runner.calls()[0],
        "systemctl is-active --quiet prometheus-tester"
    );
}

#[tokio::test]
async fn systemctl_restart_failure_surfaces_stderr() {
    let svc = SystemctlServiceManager::new(RecordingRunner::replying(vec![err_output(
        1,
        b"Job for prometheus-tester.service failed because the control process exited with error code.",
    )]));
    let err = svc
        .restart("prometheus-tester.service")
        .await
        .expect_err("expected Err");
    assert!(err.to_string().contains("control process exited"), "{err}");
}
