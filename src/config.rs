//! Configuration management for filterfs
//!
//! Hidden paths come from a TOML file; scalar settings can be overridden
//! from the environment.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::path;

/// Default configuration file, looked up without extension
pub const DEFAULT_CONFIG_NAME: &str = "filterfs";

/// Exclusion settings
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Directory to expose when none is given on the command line
    /// Environment: FILTERFS_ROOT
    #[serde(default)]
    pub root: Option<String>,

    /// Paths to hide, relative to the root
    #[serde(default)]
    pub hidden_paths: Vec<String>,
}

impl FilterConfig {
    /// Load configuration from `path`, or from `filterfs.toml` if present
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::with_name(path),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("FILTERFS").separator("__"))
            .build()?;
        Self::from_settings(settings)
    }

    /// Build configuration from TOML text
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, config::ConfigError> {
        let config: FilterConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject hidden paths that name the root or leave it
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        for hidden in &self.hidden_paths {
            let cleaned = path::clean(hidden);
            if cleaned == path::ROOT {
                return Err(config::ConfigError::Message(
                    "hidden_paths cannot contain the root path \".\"".into(),
                ));
            }
            if path::escapes_root(&cleaned) {
                return Err(config::ConfigError::Message(format!(
                    "hidden path {:?} points outside the root",
                    hidden
                )));
            }
        }

        if self.root.as_deref().is_some_and(str::is_empty) {
            return Err(config::ConfigError::Message("root cannot be empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hidden_paths() {
        let config = FilterConfig::from_toml_str(
            r#"
            root = "/srv/data"
            hidden_paths = ["b", "f", "g/h"]
            "#,
        )
        .unwrap();
        assert_eq!(config.root.as_deref(), Some("/srv/data"));
        assert_eq!(config.hidden_paths, vec!["b", "f", "g/h"]);
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = FilterConfig::from_toml_str("").unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_rejects_root() {
        let err = FilterConfig::from_toml_str(r#"hidden_paths = ["a", "./"]"#).unwrap_err();
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn test_rejects_escaping_path() {
        assert!(FilterConfig::from_toml_str(r#"hidden_paths = ["../etc"]"#).is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(FilterConfig::load(Some("/nonexistent/filterfs-config")).is_err());
    }
}
