//! Command: build the effective configuration and run ojdeploy.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::DeployOpts;
use crate::config::toml_loader::load_config;
use crate::config::{Configuration, DEFAULT_TIMEOUT_SECS};
use crate::deploy::{Deployer, ExecutionResult};
use crate::exec::SystemExecutor;
use crate::logging::Logger;

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid, or
/// if ojdeploy fails, times out or returns an unexpected exit code.
pub fn run(opts: &DeployOpts, log: &Logger) -> Result<()> {
    let cwd = std::env::current_dir().context("determining current directory")?;
    let config = resolve_configuration(opts, &cwd)?;

    let deployer = Deployer::new(Arc::new(SystemExecutor), Arc::new(*log))?;
    let result = deployer
        .execute(&config)
        .context("ojdeploy deployment failed")?;

    match result {
        ExecutionResult::DryRun { .. } => log.info("dry run complete, nothing executed"),
        ExecutionResult::Executed { log_file, .. } => {
            log.info(&format!("deployment succeeded, log: {}", log_file.display()));
        }
    }
    Ok(())
}

/// Build the effective configuration for `opts`.
///
/// Values from `--config` form the base and command-line values override
/// them. Relative paths in the file resolve against the file's directory,
/// relative paths on the command line against `cwd`. The default timeout
/// applies when neither side sets one.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn resolve_configuration(opts: &DeployOpts, cwd: &Path) -> Result<Configuration> {
    let mut config = match &opts.config {
        Some(path) => {
            let path = cwd.join(path);
            let mut file: Configuration = load_config(&path)?;
            let dir = path.parent().unwrap_or(cwd);
            let dir = dunce::canonicalize(dir)
                .with_context(|| format!("resolving {}", dir.display()))?;
            file.absolutize(&dir);
            file
        }
        None => Configuration::default(),
    };

    let mut cli = opts.to_configuration();
    cli.absolutize(cwd);
    config.merge(cli);

    if config.timeout().is_none() {
        config.set_timeout(DEFAULT_TIMEOUT_SECS);
    }
    Ok(config)
}
