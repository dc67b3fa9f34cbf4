//! Typed front end for Oracle JDeveloper's `ojdeploy` tool.
//!
//! A [`config::Configuration`] describes one deployment. [`deploy::Deployer`]
//! validates it, resolves the ojdeploy binary for the host, renders the
//! parameters in canonical order through the bundled flag table and either
//! reports the command (dry run) or runs it with output captured to a log
//! file and a watchdog timeout.
//!
//! - **[`config`]**: parameters, config file loading and the flag table
//! - **[`params`]** / **[`command`]**: canonical ordering and argument rendering
//! - **[`exec`]**: process launch behind the mockable [`exec::Executor`] trait
//! - **[`commands`]**: `deploy`, `flags` and `version` subcommands
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod command;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod exec;
pub mod logging;
pub mod params;
pub mod platform;
