//! Configuration loading for the shell
//!
//! Shell configuration lives in plain files next to the executable. Both
//! TOML and RON are accepted; the format is picked from the file extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// File-backed configuration trait
///
/// Implemented by every serde-derived configuration struct in the crate.
/// `Default` doubles as the fallback when no file is present.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    ///
    /// The format is decided from the extension before the file is touched,
    /// so a misnamed path is rejected as unsupported rather than surfacing
    /// as an I/O error.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match extension(path) {
            Some("toml") => {
                let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => {
                let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent
    /// or malformed
    ///
    /// The failure is logged rather than propagated; a shell that cannot read
    /// its config file still starts with the built-in geometry.
    fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default config, could not load {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ShellConfig;

    #[test]
    fn test_unsupported_extension_rejected() {
        // Rejected on the extension alone; the file is never read, so a
        // nonexistent path must not surface as an I/O error.
        let result = ShellConfig::load_from_file("shell.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        // Same outcome when a file with that extension actually exists.
        let dir = std::env::temp_dir().join("shell_engine_format_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shell.yaml");
        std::fs::write(&path, "browser: {}\n").unwrap();
        let result = ShellConfig::load_from_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = ShellConfig::load_or_default("does/not/exist.toml");
        assert_eq!(config.browser.width, ShellConfig::default().browser.width);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = std::env::temp_dir().join("shell_engine_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shell.toml");

        let mut config = ShellConfig::default();
        config.browser.width = 1280;
        config.save_to_file(&path).unwrap();

        let loaded = ShellConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.browser.width, 1280);
        assert_eq!(loaded.browser.height, config.browser.height);
    }
}
