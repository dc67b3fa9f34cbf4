//! Host operating system and the matching ojdeploy binary name.
use std::fmt;

use crate::error::PlatformError;

const OJDEPLOY_BIN_LINUX: &str = "ojdeploy";
const OJDEPLOY_BIN_WINDOWS: &str = "ojdeploy.exe";

/// Operating system family ojdeploy ships for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Any Linux distribution.
    Linux,
    /// Any Windows version.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the host running ojdeploy.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Classify an OS name such as `"Linux"` or `"Windows 10"`.
    ///
    /// Matching is a case-insensitive substring test: `win` selects
    /// Windows, `linux` selects Linux.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] naming `os_name` when neither matches.
    pub fn from_os_name(os_name: &str) -> Result<Self, PlatformError> {
        let lower = os_name.to_lowercase();
        let os = if lower.contains("win") {
            Os::Windows
        } else if lower.contains("linux") {
            Os::Linux
        } else {
            return Err(PlatformError::Unsupported {
                os: os_name.to_string(),
            });
        };
        Ok(Self { os })
    }

    /// File name of the ojdeploy binary on this platform.
    #[must_use]
    pub const fn ojdeploy_binary(&self) -> &'static str {
        match self.os {
            Os::Linux => OJDEPLOY_BIN_LINUX,
            Os::Windows => OJDEPLOY_BIN_WINDOWS,
        }
    }
}
