//! Bundled mapping from parameter names to ojdeploy switches.
//!
//! The table lives in `resources/flags.toml`, is compiled into the binary and
//! parsed once per process on first access.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::params::PARAMETER_NAMES;

const BUNDLED_SOURCE: &str = include_str!("../../resources/flags.toml");

static BUNDLED: LazyLock<Result<FlagTable, String>> =
    LazyLock::new(|| FlagTable::parse(BUNDLED_SOURCE).map_err(|e| e.to_string()));

/// Parameter name → ojdeploy switch, plus execution control values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FlagTable {
    exit_value: i32,
    build_log_file: PathBuf,
    flags: BTreeMap<String, String>,
}

impl FlagTable {
    /// The table shipped with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlagTable`] if the bundled resource is invalid.
    pub fn bundled() -> Result<&'static Self, ConfigError> {
        BUNDLED
            .as_ref()
            .map_err(|msg| ConfigError::FlagTable(msg.clone()))
    }

    /// Parse a table and verify it covers every known parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlagTable`] on malformed TOML or when an entry
    /// is missing.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: Self =
            toml::from_str(content).map_err(|e| ConfigError::FlagTable(e.to_string()))?;

        let missing: Vec<&str> = PARAMETER_NAMES
            .iter()
            .copied()
            .filter(|name| !table.flags.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::FlagTable(format!(
                "no flag for {}",
                missing.join(", ")
            )));
        }
        Ok(table)
    }

    /// Switch for `name`, e.g. `"-buildfile"` for `"buildFile"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlagTable`] if `name` has no entry.
    pub fn flag(&self, name: &str) -> Result<&str, ConfigError> {
        self.flags
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::FlagTable(format!("no flag for {name}")))
    }

    /// Exit code ojdeploy must return for a run to count as successful.
    #[must_use]
    pub const fn exit_value(&self) -> i32 {
        self.exit_value
    }

    /// Default build log location, relative to the working directory.
    #[must_use]
    pub fn build_log_file(&self) -> &Path {
        &self.build_log_file
    }
}
