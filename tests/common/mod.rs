// Shared helpers for integration tests.
//
// Provides a recording executor for dry-run/launch-count assertions and a
// fake `ojdeploy` shell script so the real process path can be exercised
// without JDeveloper installed.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use ojdeploy_runner::deploy::Deployer;
use ojdeploy_runner::error::ExecError;
use ojdeploy_runner::exec::{Executor, RunRequest, RunStatus};
use ojdeploy_runner::logging::Logger;

/// Writing an executable and running it from parallel tests can fail with
/// `ETXTBSY`; tests that launch scripts hold this lock.
static SCRIPT_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that write and launch scripts.
pub fn script_lock() -> MutexGuard<'static, ()> {
    SCRIPT_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Executor that records every request and answers with a fixed exit code.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub requests: Mutex<Vec<RunRequest>>,
    pub exit_code: i32,
}

impl RecordingExecutor {
    pub fn new(exit_code: i32) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            exit_code,
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    pub fn last_request(&self) -> Option<RunRequest> {
        self.requests.lock().expect("requests lock").last().cloned()
    }
}

impl Executor for RecordingExecutor {
    fn run_logged(&self, request: &RunRequest) -> Result<RunStatus, ExecError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        Ok(RunStatus {
            code: Some(self.exit_code),
        })
    }
}

/// Deployer for a Linux host backed by `executor`.
pub fn linux_deployer(executor: Arc<dyn Executor>) -> Deployer {
    Deployer::new(executor, Arc::new(Logger::new()))
        .expect("bundled flag table")
        .with_os_name("Linux")
}

/// A temporary JDeveloper `bin` directory holding a fake `ojdeploy`.
pub struct FakeJdev {
    pub root: tempfile::TempDir,
}

impl FakeJdev {
    /// Create a `bin/ojdeploy` script with the given shell `body`.
    #[cfg(unix)]
    pub fn with_script(body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt as _;

        let root = tempfile::tempdir().expect("create temp dir");
        let bin = root.path().join("bin");
        std::fs::create_dir_all(&bin).expect("create bin dir");
        let script = bin.join("ojdeploy");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).expect("write script");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
        Self { root }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).unwrap_or_default()
    }

    pub fn exists(&self, name: &str) -> bool {
        Path::exists(&self.path(name))
    }
}
