//! Configuration error types.

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(RouteDiagnostics),
}

// ============================================================================
// RouteDiagnostic
// ============================================================================

/// A single route table diagnostic
#[derive(Debug, Clone)]
pub struct RouteDiagnostic {
    /// Where the problem is (e.g., "route[2] `a/$y`", "converters")
    pub field: String,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl RouteDiagnostic {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for RouteDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}{}", "[".dimmed(), self.field.cyan(), "]".dimmed())?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// RouteDiagnostics
// ============================================================================

/// Errors and warnings collected while installing a route table.
#[derive(Debug, Clone, Default)]
pub struct RouteDiagnostics {
    errors: Vec<RouteDiagnostic>,
    warnings: Vec<RouteDiagnostic>,
}

impl RouteDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, diagnostic: RouteDiagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(RouteDiagnostic::new(field, message));
    }

    /// Add a warning (the table still installs).
    pub fn warn(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(RouteDiagnostic::new(field, message));
    }

    /// Print collected warnings.
    pub fn print_warnings(&self) {
        for warning in &self.warnings {
            crate::log!("warning"; "[{}] {}", warning.field, warning.message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[RouteDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[RouteDiagnostic] {
        &self.warnings
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for RouteDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "route table validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for RouteDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("traject.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("traject.toml"));

        let validation_err = ConfigError::Validation("Test validation error".to_string());
        assert!(format!("{validation_err}").contains("Test validation error"));
    }

    #[test]
    fn test_diagnostics_collect() {
        let mut diagnostics = RouteDiagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.warn("route[0]", "kind `a` is located twice");
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.warnings().len(), 1);

        diagnostics.push_error(
            RouteDiagnostic::new("route[1] `a/$y`", "conflicts with `$x`").with_hint("rename"),
        );
        diagnostics.error("converters", "unknown converter `uuid`");
        assert_eq!(diagnostics.len(), 2);

        let display = diagnostics.to_string();
        assert!(display.contains("route[1] `a/$y`"));
        assert!(display.contains("conflicts with `$x`"));
        assert!(display.contains("rename"));
        assert!(display.contains("unknown converter `uuid`"));

        assert!(diagnostics.into_result().is_err());
        assert!(RouteDiagnostics::new().into_result().is_ok());
    }
}
