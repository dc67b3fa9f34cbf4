//! Subcommand implementations, one module per `ojdeploy-runner` subcommand.

pub mod deploy;
pub mod flags;
pub mod version;
