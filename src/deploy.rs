//! Turn a [`Configuration`] into an ojdeploy run.
//!
//! [`Deployer::execute`] validates the configuration, resolves the ojdeploy
//! binary for the host platform, renders the canonical argument list and
//! then either reports the command (dry run) or runs it once, checking the
//! exit code against the flag table's expected value.
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::command::CommandLine;
use crate::config::Configuration;
use crate::config::flags::FlagTable;
use crate::error::{ConfigError, ExecError, OjdeployError};
use crate::exec::{Executor, RunRequest};
use crate::logging::Log;
use crate::params;
use crate::platform::Platform;

/// Outcome of a successful [`Deployer::execute`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The command was assembled but not run.
    DryRun {
        /// The command that would have run.
        command: CommandLine,
    },
    /// ojdeploy ran and returned the expected exit code.
    Executed {
        /// The command that ran.
        command: CommandLine,
        /// Exit code returned by ojdeploy.
        exit_code: i32,
        /// File holding ojdeploy's stdout and stderr.
        log_file: PathBuf,
    },
}

impl ExecutionResult {
    /// The assembled command line.
    #[must_use]
    pub const fn command(&self) -> &CommandLine {
        match self {
            Self::DryRun { command } | Self::Executed { command, .. } => command,
        }
    }

    /// Exit code of the run, `None` for a dry run.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::DryRun { .. } => None,
            Self::Executed { exit_code, .. } => Some(*exit_code),
        }
    }
}

/// Builds and runs ojdeploy commands.
///
/// Holds no per-run state: one `Deployer` may serve any number of
/// [`execute`](Self::execute) calls.
pub struct Deployer {
    os_name: String,
    flags: &'static FlagTable,
    executor: Arc<dyn Executor>,
    log: Arc<dyn Log>,
}

impl std::fmt::Debug for Deployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployer")
            .field("os_name", &self.os_name)
            .field("flags", &self.flags)
            .field("executor", &"<dyn Executor>")
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl Deployer {
    /// Create a deployer for the host OS using the bundled flag table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlagTable`] if the bundled table is invalid.
    pub fn new(executor: Arc<dyn Executor>, log: Arc<dyn Log>) -> Result<Self, ConfigError> {
        Ok(Self {
            os_name: std::env::consts::OS.to_string(),
            flags: FlagTable::bundled()?,
            executor,
            log,
        })
    }

    /// Resolve the binary as if running on `os_name` (e.g. `"Windows 10"`).
    #[must_use]
    pub fn with_os_name(mut self, os_name: impl Into<String>) -> Self {
        self.os_name = os_name.into();
        self
    }

    /// Run ojdeploy as described by `config`, or report the command when
    /// `config.dry_run()` is set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MutuallyExclusive`] if more than one of `buildFile`,
    ///   `buildFileSchema` and `profile` is set
    /// - [`PlatformError::Unsupported`](crate::error::PlatformError::Unsupported)
    ///   if the OS is neither Windows nor Linux
    /// - [`ExecError`] if the run fails, times out or returns an unexpected
    ///   exit code (never in dry-run mode)
    pub fn execute(&self, config: &Configuration) -> Result<ExecutionResult, OjdeployError> {
        config.check_mutual_exclusives()?;
        let platform = Platform::from_os_name(&self.os_name)?;
        self.log.debug(&format!(
            "{} classified as {}, ojdeploy binary is {}",
            self.os_name,
            platform.os,
            platform.ojdeploy_binary()
        ));

        let command = self.prepare_command_line(&platform, config)?;

        if config.dry_run() {
            self.log.dry_run("would execute:");
            self.log.dry_run(&command.to_string());
            return Ok(ExecutionResult::DryRun { command });
        }

        self.run(command, config)
    }

    /// Assemble the command line for `config` without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlagTable`] if a parameter has no switch.
    pub fn prepare_command_line(
        &self,
        platform: &Platform,
        config: &Configuration,
    ) -> Result<CommandLine, ConfigError> {
        let binary = platform.ojdeploy_binary();
        let program = match config.jdev_bin_path() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                dir.join(binary).to_string_lossy().into_owned()
            }
            _ => binary.to_string(),
        };
        self.log.debug(&format!("base command: {program}"));

        let parameters = params::enumerate(config);
        for param in &parameters {
            self.log
                .debug(&format!("parameter {} = {:?}", param.name, param.value));
        }

        let command = CommandLine::build(program, &parameters, self.flags)?;
        self.log.debug(&format!("command line: {command}"));
        Ok(command)
    }

    fn run(
        &self,
        command: CommandLine,
        config: &Configuration,
    ) -> Result<ExecutionResult, OjdeployError> {
        let log_file = config
            .log_file()
            .unwrap_or_else(|| self.flags.build_log_file())
            .to_path_buf();
        let request = RunRequest {
            program: command.program().to_string(),
            args: command.args().to_vec(),
            log_file: log_file.clone(),
            timeout: config
                .timeout()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        };

        self.log.stage("Running ojdeploy");
        self.log.info(&command.to_string());
        self.log
            .info(&format!("output is written to {}", log_file.display()));

        let status = self.executor.run_logged(&request)?;
        let expected = self.flags.exit_value();
        if status.code != Some(expected) {
            self.log.error(&format!(
                "ojdeploy failed, see {} for details",
                log_file.display()
            ));
            return Err(ExecError::UnexpectedExitCode {
                program: request.program,
                expected,
                actual: status.code,
            }
            .into());
        }

        self.log
            .info(&format!("ojdeploy finished with exit code {expected}"));
        Ok(ExecutionResult::Executed {
            command,
            exit_code: expected,
            log_file,
        })
    }
}
