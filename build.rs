//! Build script: embeds version information into the binary.

use std::process::Command;

fn main() {
    // Prefer OJDEPLOY_RUNNER_VERSION if set (release builds), otherwise
    // git describe for local builds.
    if let Ok(version) = std::env::var("OJDEPLOY_RUNNER_VERSION") {
        println!("cargo:rustc-env=OJDEPLOY_RUNNER_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=OJDEPLOY_RUNNER_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-changed=resources/flags.toml");
    println!("cargo:rerun-if-env-changed=OJDEPLOY_RUNNER_VERSION");
}
