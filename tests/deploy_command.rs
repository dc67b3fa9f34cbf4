#![cfg(unix)]
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `deploy` flow.
//!
//! These run [`Deployer::execute`] against a fake `ojdeploy` shell script to
//! cover the real launch path (log capture, exit code check, watchdog) and
//! use [`RecordingExecutor`] where only the launch count matters.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::*;
use ojdeploy_runner::cli::DeployOpts;
use ojdeploy_runner::commands::deploy::resolve_configuration;
use ojdeploy_runner::config::Configuration;
use ojdeploy_runner::deploy::ExecutionResult;
use ojdeploy_runner::error::{ExecError, OjdeployError};
use ojdeploy_runner::exec::SystemExecutor;

// ---------------------------------------------------------------------------
// Real process execution
// ---------------------------------------------------------------------------

/// Arguments reach the process in canonical order and its output lands in
/// the log file.
#[test]
fn fake_ojdeploy_receives_arguments_and_output_is_logged() {
    let _guard = script_lock();
    let jdev = FakeJdev::with_script("echo \"args: $*\"\necho warning >&2\nexit 0");

    let mut config = Configuration::default();
    config
        .set_jdev_bin_path(jdev.bin_dir())
        .set_profile("webapp")
        .set_workspace_file("/x/ws.jws")
        .set_clean(true)
        .set_defines(["a=1", "b=2"])
        .set_log_file(jdev.path("logs/build.log"));

    let result = linux_deployer(Arc::new(SystemExecutor))
        .execute(&config)
        .expect("deploy succeeds");

    assert_eq!(result.exit_code(), Some(0));
    let log = jdev.read("logs/build.log");
    assert!(
        log.contains("args: -profile webapp -workspace /x/ws.jws -clean -define a=1,b=2"),
        "{log}"
    );
    assert!(log.contains("warning"), "stderr is captured too: {log}");
}

#[test]
fn unexpected_exit_code_is_an_error() {
    let _guard = script_lock();
    let jdev = FakeJdev::with_script("exit 7");

    let mut config = Configuration::default();
    config
        .set_jdev_bin_path(jdev.bin_dir())
        .set_profile("webapp")
        .set_log_file(jdev.path("build.log"));

    let err = linux_deployer(Arc::new(SystemExecutor))
        .execute(&config)
        .unwrap_err();
    assert!(
        matches!(
            err,
            OjdeployError::Exec(ExecError::UnexpectedExitCode {
                expected: 0,
                actual: Some(7),
                ..
            })
        ),
        "{err}"
    );
    assert!(jdev.exists("build.log"));
}

#[test]
fn hung_ojdeploy_is_killed_by_watchdog() {
    let _guard = script_lock();
    let jdev = FakeJdev::with_script("exec sleep 30");

    let mut config = Configuration::default();
    config
        .set_jdev_bin_path(jdev.bin_dir())
        .set_timeout(1)
        .set_log_file(jdev.path("build.log"));

    let started = Instant::now();
    let err = linux_deployer(Arc::new(SystemExecutor))
        .execute(&config)
        .unwrap_err();
    assert!(
        matches!(err, OjdeployError::Exec(ExecError::Timeout { .. })),
        "{err}"
    );
    assert!(started.elapsed() < Duration::from_secs(20));
}

#[test]
fn missing_binary_is_a_launch_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Configuration::default();
    config
        .set_jdev_bin_path(dir.path().join("no-such-jdev"))
        .set_log_file(dir.path().join("build.log"));

    let err = linux_deployer(Arc::new(SystemExecutor))
        .execute(&config)
        .unwrap_err();
    assert!(
        matches!(err, OjdeployError::Exec(ExecError::Launch { .. })),
        "{err}"
    );
}

// ---------------------------------------------------------------------------
// Dry run and launch count
// ---------------------------------------------------------------------------

#[test]
fn dry_run_never_launches_or_writes_log() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Arc::new(RecordingExecutor::new(0));

    let mut config = Configuration::default();
    config
        .set_build_file("/x/build.file")
        .set_log_file(dir.path().join("build.log"))
        .set_dry_run(true);

    let result = linux_deployer(executor.clone()).execute(&config).unwrap();
    assert!(matches!(result, ExecutionResult::DryRun { .. }));
    assert_eq!(executor.call_count(), 0);
    assert!(!dir.path().join("build.log").exists());
}

#[test]
fn real_run_launches_exactly_once() {
    let executor = Arc::new(RecordingExecutor::new(0));
    let mut config = Configuration::default();
    config.set_build_file("/x/build.file").set_timeout(300);

    linux_deployer(executor.clone()).execute(&config).unwrap();
    assert_eq!(executor.call_count(), 1);

    let request = executor.last_request().unwrap();
    assert_eq!(request.program, "ojdeploy");
    assert_eq!(
        request.args,
        ["-buildfile", "/x/build.file", "-timeout", "300"]
    );
    assert_eq!(request.timeout, Some(Duration::from_secs(300)));
}

#[test]
fn failing_run_still_launches_only_once() {
    let executor = Arc::new(RecordingExecutor::new(1));
    let result = linux_deployer(executor.clone()).execute(&Configuration::default());
    assert!(result.is_err());
    assert_eq!(executor.call_count(), 1);
}

// ---------------------------------------------------------------------------
// Front-end configuration
// ---------------------------------------------------------------------------

/// A config file plus command-line overrides produce the expected command,
/// with the default timeout filled in.
#[test]
fn config_file_and_cli_merge_into_command() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("deploy.toml");
    std::fs::write(
        &file,
        r#"
jdevBinPath = "/opt/jdev/bin"
workspaceFile = "/src/app.jws"
profile = "webapp"
nocompile = true
defines = ["env=ci"]
"#,
    )
    .unwrap();

    let opts = DeployOpts {
        config: Some(file),
        project: Some("Model.jpr".into()),
        clean: true,
        dry_run: true,
        ..DeployOpts::default()
    };
    let config = resolve_configuration(&opts, dir.path()).unwrap();

    let executor = Arc::new(RecordingExecutor::new(0));
    let result = linux_deployer(executor.clone()).execute(&config).unwrap();
    assert_eq!(
        result.command().to_string(),
        "/opt/jdev/bin/ojdeploy -profile webapp -workspace /src/app.jws -project Model.jpr -nocompile -clean -timeout 30000 -define env=ci"
    );
    assert_eq!(executor.call_count(), 0);
}
