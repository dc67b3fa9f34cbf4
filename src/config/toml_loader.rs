//! TOML configuration file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Read and deserialize a TOML file.
///
/// Unlike the bundled flag table, configuration files are user input: a
/// missing file is an error rather than an empty configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::InvalidSyntax`] if it does not deserialize into `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::InvalidSyntax {
        path: path.display().to_string(),
        message: e.message().to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    #[test]
    fn loads_configuration_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ojdeploy.toml");
        std::fs::write(
            &path,
            "profile = \"webapp\"\nworkspaceFile = \"/ws/app.jws\"\nclean = true\n",
        )
        .unwrap();

        let config: Configuration = load_config(&path).expect("load config");
        assert_eq!(config.profile(), Some("webapp"));
        assert_eq!(config.clean(), Some(true));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<Configuration>(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_key_is_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ojdeploy.toml");
        std::fs::write(&path, "nocompiel = true\n").unwrap();

        let err = load_config::<Configuration>(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidSyntax { ref message, .. } if message.contains("nocompiel")),
            "{err}"
        );
    }
}
