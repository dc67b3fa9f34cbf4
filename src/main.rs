//! `ojdeploy-runner` binary: parse arguments, set up logging and dispatch.
use anyhow::Result;
use clap::Parser;

use ojdeploy_runner::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.debug);
    let log = logging::Logger::new();

    match args.command {
        cli::Command::Deploy(opts) => commands::deploy::run(&opts, &log),
        cli::Command::Flags => commands::flags::run(),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
