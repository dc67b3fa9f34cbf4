//! Command-line definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Configuration;

/// Top-level CLI entry point for the ojdeploy runner.
#[derive(Parser, Debug)]
#[command(
    name = "ojdeploy-runner",
    about = "Drive Oracle ojdeploy from a build pipeline with typed parameters",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and run an ojdeploy command
    Deploy(Box<DeployOpts>),
    /// Print the parameter to ojdeploy switch mapping
    Flags,
    /// Print version information
    Version,
}

/// Options for the `deploy` subcommand.
///
/// Switches are only recorded when given; leaving both `--x` and `--no-x`
/// out defers to the config file (or leaves the switch unset). When both
/// are given the last one wins.
#[derive(Parser, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DeployOpts {
    /// TOML file with deploy parameters (command-line values win)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the command instead of running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Directory containing the ojdeploy binary
    #[arg(long, value_name = "DIR")]
    pub jdev_bin_path: Option<PathBuf>,

    /// JDeveloper workspace file (.jws)
    #[arg(long, value_name = "FILE")]
    pub workspace_file: Option<PathBuf>,

    /// Build file for batch deployment
    #[arg(long, value_name = "FILE", conflicts_with_all = ["build_file_schema", "profile"])]
    pub build_file: Option<PathBuf>,

    /// Print the build file XML schema
    #[arg(long, conflicts_with = "profile")]
    pub build_file_schema: bool,

    /// Deployment profile to run
    #[arg(long)]
    pub profile: Option<String>,

    /// Report file written by ojdeploy
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Project that holds the deployment profile
    #[arg(long)]
    pub project: Option<String>,

    /// Base directory for the workspace
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Skip compilation
    #[arg(long = "nocompile", overrides_with = "no_nocompile")]
    pub nocompile: bool,

    /// Turn off `--nocompile` (overrides a config file value)
    #[arg(long = "no-nocompile", overrides_with = "nocompile")]
    pub no_nocompile: bool,

    /// Do not deploy dependent profiles
    #[arg(long = "nodependents", overrides_with = "no_nodependents")]
    pub nodependents: bool,

    /// Turn off `--nodependents` (overrides a config file value)
    #[arg(long = "no-nodependents", overrides_with = "nodependents")]
    pub no_nodependents: bool,

    /// Clean output directories before compiling
    #[arg(long = "clean", overrides_with = "no_clean")]
    pub clean: bool,

    /// Turn off `--clean` (overrides a config file value)
    #[arg(long = "no-clean", overrides_with = "clean")]
    pub no_clean: bool,

    /// Do not include IDE datasources
    #[arg(long = "nodatasources", overrides_with = "no_nodatasources")]
    pub nodatasources: bool,

    /// Turn off `--nodatasources` (overrides a config file value)
    #[arg(long = "no-nodatasources", overrides_with = "nodatasources")]
    pub no_nodatasources: bool,

    /// Rewrite the output even if unchanged
    #[arg(long = "force-rewrite", overrides_with = "no_force_rewrite")]
    pub force_rewrite: bool,

    /// Turn off `--force-rewrite` (overrides a config file value)
    #[arg(long = "no-force-rewrite", overrides_with = "force_rewrite")]
    pub no_force_rewrite: bool,

    /// Update EJB references in web.xml
    #[arg(long = "update-webxml-ejb-refs", overrides_with = "no_update_webxml_ejb_refs")]
    pub update_webxml_ejb_refs: bool,

    /// Turn off `--update-webxml-ejb-refs` (overrides a config file value)
    #[arg(long = "no-update-webxml-ejb-refs", overrides_with = "update_webxml_ejb_refs")]
    pub no_update_webxml_ejb_refs: bool,

    /// Ask ojdeploy for verbose output
    #[arg(long = "verbose", overrides_with = "no_verbose")]
    pub verbose: bool,

    /// Turn off `--verbose` (overrides a config file value)
    #[arg(long = "no-verbose", overrides_with = "verbose")]
    pub no_verbose: bool,

    /// KEY=VALUE definition (repeatable)
    #[arg(long = "define", value_name = "KEY=VALUE")]
    pub defines: Vec<String>,

    /// Status summary file written by ojdeploy
    #[arg(long, value_name = "FILE")]
    pub status_log_file: Option<PathBuf>,

    /// Seconds before ojdeploy is killed (0 disables the watchdog)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Where ojdeploy's output is written
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

type Setter = fn(&mut Configuration, bool) -> &mut Configuration;

impl DeployOpts {
    /// Collect the parameters given on the command line.
    ///
    /// Paths are kept as typed; the `deploy` command resolves them.
    #[must_use]
    pub fn to_configuration(&self) -> Configuration {
        let mut c = Configuration::default();
        if let Some(p) = &self.jdev_bin_path {
            c.set_jdev_bin_path(p);
        }
        if let Some(p) = &self.workspace_file {
            c.set_workspace_file(p);
        }
        if let Some(p) = &self.build_file {
            c.set_build_file(p);
        }
        if let Some(p) = &self.profile {
            c.set_profile(p);
        }
        if let Some(p) = &self.output_file {
            c.set_output_file(p);
        }
        if let Some(p) = &self.project {
            c.set_project(p);
        }
        if let Some(p) = &self.base_dir {
            c.set_base_dir(p);
        }
        if let Some(p) = &self.status_log_file {
            c.set_status_log_file(p);
        }
        if let Some(p) = &self.log_file {
            c.set_log_file(p);
        }
        if let Some(secs) = self.timeout {
            c.set_timeout(secs);
        }
        if !self.defines.is_empty() {
            c.set_defines(self.defines.iter().map(String::as_str));
        }

        if self.build_file_schema {
            c.set_build_file_schema(true);
        }

        let switches: [(bool, bool, Setter); 7] = [
            (self.nocompile, self.no_nocompile, Configuration::set_nocompile),
            (
                self.nodependents,
                self.no_nodependents,
                Configuration::set_nodependents,
            ),
            (self.clean, self.no_clean, Configuration::set_clean),
            (
                self.nodatasources,
                self.no_nodatasources,
                Configuration::set_nodatasources,
            ),
            (
                self.force_rewrite,
                self.no_force_rewrite,
                Configuration::set_force_rewrite,
            ),
            (
                self.update_webxml_ejb_refs,
                self.no_update_webxml_ejb_refs,
                Configuration::set_update_webxml_ejb_refs,
            ),
            (self.verbose, self.no_verbose, Configuration::set_verbose),
        ];
        for (on, off, set) in switches {
            if on {
                set(&mut c, true);
            } else if off {
                set(&mut c, false);
            }
        }

        c.set_dry_run(self.dry_run);
        c
    }
}
