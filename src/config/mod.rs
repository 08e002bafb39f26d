//! Route table configuration for `traject.toml`.
//!
//! # Example
//!
//! ```toml
//! converters = ["float"]
//!
//! [[route]]
//! pattern = "departments/$department_id"
//! kind = "department"
//!
//! [[route]]
//! pattern = "departments/$department_id/employees/$employee_id:int"
//! kind = "employee"
//!
//! [[route]]
//! pattern = "models/$name"
//! kind = "model"
//! locate = false
//! ```
//!
//! Every `[[route]]` registers a pattern whose objects are records of `kind`.
//! Unless `locate = false`, the same pattern also becomes the inverse for
//! that kind, so records can be turned back into paths.

mod error;
mod util;

pub use error::{ConfigError, RouteDiagnostic, RouteDiagnostics};
pub use util::{CONFIG_FILE, find_config_file};

use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// One `[[route]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path pattern, e.g. `departments/$id:int`.
    pub pattern: String,
    /// Kind of the records this pattern produces.
    pub kind: String,
    /// Register the pattern as the inverse for `kind`.
    #[serde(default = "default_locate")]
    pub locate: bool,
}

fn default_locate() -> bool {
    true
}

impl RouteEntry {
    pub fn new(pattern: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: kind.into(),
            locate: true,
        }
    }
}

/// Root configuration structure for `traject.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Path of the file this config was read from.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Optional builtin converters to enable (`int` is always available).
    pub converters: Vec<String>,

    /// Route entries, in registration order.
    #[serde(rename = "route")]
    pub routes: Vec<RouteEntry>,
}

impl RouteConfig {
    /// Load configuration from file, warning about unknown fields.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Structural checks that need no registry.
    fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.routes.iter().enumerate() {
            if entry.kind.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "route[{index}] `{}` has an empty kind",
                    entry.pattern
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str() {
        let config = RouteConfig::from_str(
            r#"
            converters = ["float"]

            [[route]]
            pattern = "a/$x"
            kind = "a"

            [[route]]
            pattern = "a/$x/b"
            kind = "b"
            locate = false
            "#,
        )
        .unwrap();

        assert_eq!(config.converters, vec!["float"]);
        assert_eq!(
            config.routes,
            vec![
                RouteEntry::new("a/$x", "a"),
                RouteEntry {
                    pattern: "a/$x/b".into(),
                    kind: "b".into(),
                    locate: false,
                },
            ]
        );
    }

    #[test]
    fn test_empty_config() {
        let config = RouteConfig::from_str("").unwrap();
        assert!(config.routes.is_empty());
        assert!(config.converters.is_empty());
    }

    #[test]
    fn test_empty_kind_rejected() {
        let err = RouteConfig::from_str(
            r#"
            [[route]]
            pattern = "a"
            kind = " "
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("route[0]")));
    }

    #[test]
    fn test_invalid_toml() {
        let err = RouteConfig::from_str("[[route]\npattern = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) = RouteConfig::parse_with_ignored(
            r#"
            colour = "red"

            [[route]]
            pattern = "a"
            kind = "a"
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.len(), 1);
        assert_eq!(ignored, vec!["colour"]);
    }

    #[test]
    fn test_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[[route]]\npattern = \"a/$x\"\nkind = \"a\"\n").unwrap();

        let config = RouteConfig::load(&path).unwrap();
        assert_eq!(config.config_path, path);
        assert_eq!(config.routes, vec![RouteEntry::new("a/$x", "a")]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = RouteConfig::load(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }
}
