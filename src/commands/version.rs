//! Command: print version information.

/// Version string baked in by `build.rs`, falling back to the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("OJDEPLOY_RUNNER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the runner version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("ojdeploy-runner {}", version());
}
