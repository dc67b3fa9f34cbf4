//! Process launch with output captured to a log file.
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ExecError;

/// How often the watchdog checks whether the child has exited.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One process launch: program, arguments, where its output goes and how
/// long it may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Program to launch, a path or a name looked up on `PATH`.
    pub program: String,
    /// Arguments, passed as-is.
    pub args: Vec<String>,
    /// File receiving both stdout and stderr; truncated on launch.
    pub log_file: PathBuf,
    /// Watchdog; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Result of a process that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Abstraction over process execution (mockable for testing).
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run a process to completion with stdout and stderr written to
    /// `request.log_file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created, the process
    /// cannot be started or waited on, or the timeout expires.
    fn run_logged(&self, request: &RunRequest) -> Result<RunStatus, ExecError>;
}

/// Production executor backed by [`std::process::Command`].
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_logged(&self, request: &RunRequest) -> Result<RunStatus, ExecError> {
        let stdout = open_log_file(&request.log_file)?;
        let stderr = stdout.try_clone().map_err(|source| ExecError::LogFile {
            path: request.log_file.clone(),
            source,
        })?;

        let mut child = Command::new(&request.program)
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|source| ExecError::Launch {
                program: request.program.clone(),
                source,
            })?;

        let status = match request.timeout {
            Some(timeout) => wait_with_timeout(&mut child, &request.program, timeout)?,
            None => child.wait().map_err(|source| ExecError::Wait {
                program: request.program.clone(),
                source,
            })?,
        };
        Ok(status.into())
    }
}

/// Create (or truncate) the log file, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File, ExecError> {
    let to_err = |source| ExecError::LogFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    File::create(path).map_err(to_err)
}

/// Wait for `child`, killing it once `timeout` has elapsed.
fn wait_with_timeout(
    child: &mut Child,
    program: &str,
    timeout: Duration,
) -> Result<ExitStatus, ExecError> {
    let wait_err = |source| ExecError::Wait {
        program: program.to_string(),
        source,
    };
    // A timeout too large to represent as an instant never expires.
    let Some(deadline) = Instant::now().checked_add(timeout) else {
        return child.wait().map_err(wait_err);
    };
    loop {
        if let Some(status) = child.try_wait().map_err(wait_err)? {
            return Ok(status);
        }
        let now = Instant::now();
        if now >= deadline {
            // The child may exit between try_wait and kill; either way it is gone.
            let _ = child.kill();
            child.wait().map_err(wait_err)?;
            return Err(ExecError::Timeout {
                program: program.to_string(),
                timeout,
            });
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}
