//! Path tokenizer.
//!
//! Paths and patterns are both slash-separated. A pattern segment written as
//! `$name` is a variable, and `$name:conv` additionally names the converter
//! applied to the matched segment.
//!
//! ```text
//! departments/$departmentId/employees/$employeeId:int
//! ^^^^^^^^^^^ ^^^^^^^^^^^^^ ^^^^^^^^^ ^^^^^^^^^^^^^^^
//! literal     variable      literal   variable + converter
//! ```

use std::fmt;

use rustc_hash::FxHashSet;

use super::convert::Variables;
use crate::error::ParseError;

/// Marker that starts a variable segment.
pub const VARIABLE_MARKER: char = '$';

/// Separator between a variable name and its converter.
pub const CONVERTER_SEPARATOR: char = ':';

/// One parsed pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Matches exactly this segment.
    Literal(String),
    /// Matches any segment and binds it to `name`.
    Variable {
        name: String,
        converter: Option<String>,
    },
}

impl Step {
    /// Parse a single pattern segment (no slashes).
    fn parse(segment: &str) -> Option<Self> {
        let Some(spec) = segment.strip_prefix(VARIABLE_MARKER) else {
            return Some(Self::Literal(segment.to_string()));
        };

        let (name, converter) = match spec.split_once(CONVERTER_SEPARATOR) {
            Some((name, conv)) => (name, Some(conv)),
            None => (spec, None),
        };

        if name.is_empty() || converter.is_some_and(str::is_empty) {
            return None;
        }

        Some(Self::Variable {
            name: name.to_string(),
            converter: converter.map(str::to_string),
        })
    }

    /// Variable name, if this is a variable step.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable { name, .. } => Some(name),
            Self::Literal(_) => None,
        }
    }

    #[inline]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Variable { .. })
    }

    /// Build the concrete path segment for this step.
    ///
    /// Literals are returned as-is; variables are looked up in `vars` and
    /// stringified. Returns `None` if a variable is missing.
    pub fn interpolate(&self, vars: &Variables) -> Option<String> {
        match self {
            Self::Literal(text) => Some(text.clone()),
            Self::Variable { name, .. } => vars.get(name).map(ToString::to_string),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Variable {
                name,
                converter: Some(conv),
            } => write!(f, "{VARIABLE_MARKER}{name}{CONVERTER_SEPARATOR}{conv}"),
            Self::Variable {
                name,
                converter: None,
            } => write!(f, "{VARIABLE_MARKER}{name}"),
        }
    }
}

/// Split a path into its non-empty segments.
///
/// A leading `/` is ignored, as are empty segments from doubled or trailing
/// slashes. No `$` interpretation happens here.
///
/// # Examples
///
/// - `"a/b/c"` -> `["a", "b", "c"]`
/// - `"/a/b/"` -> `["a", "b"]`
/// - `""` -> `[]`
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join segments back into a path (no leading slash).
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse a pattern string into steps.
///
/// Fails if a variable name repeats or a variable segment is malformed
/// (`$`, `$:int`, `$name:`).
pub fn parse_pattern(pattern: &str) -> Result<Vec<Step>, ParseError> {
    let mut seen = FxHashSet::default();
    let mut steps = Vec::new();

    for segment in split_path(pattern) {
        let step = Step::parse(&segment).ok_or_else(|| ParseError::MalformedVariable {
            pattern: pattern.to_string(),
            segment: segment.clone(),
        })?;

        if let Some(name) = step.variable_name()
            && !seen.insert(name.to_string())
        {
            return Err(ParseError::DuplicateVariable {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }

        steps.push(step);
    }

    Ok(steps)
}

/// Render steps as a canonical pattern string.
pub fn render_pattern(steps: &[Step]) -> String {
    join_path(&steps.iter().map(ToString::to_string).collect::<Vec<_>>())
}

/// All non-empty prefixes of `steps`, shortest first.
///
/// `[a, $b, c]` yields `[a]`, `[a, $b]`, `[a, $b, c]`.
pub fn subpatterns(steps: &[Step]) -> impl Iterator<Item = &[Step]> {
    (1..=steps.len()).map(move |len| &steps[..len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    fn lit(s: &str) -> Step {
        Step::Literal(s.to_string())
    }

    fn var(name: &str, converter: Option<&str>) -> Step {
        Step::Variable {
            name: name.to_string(),
            converter: converter.map(str::to_string),
        }
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("a/b/c"), ["a", "b", "c"]);
        assert_eq!(split_path("/a/b"), ["a", "b"]);
        assert_eq!(split_path("a//b/"), ["a", "b"]);
        assert!(split_path("").is_empty());
        assert!(split_path("/").is_empty());
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(&["a", "b", "c"]), "a/b/c");
        assert_eq!(join_path::<&str>(&[]), "");
    }

    #[test]
    fn test_parse_pattern() {
        let steps = parse_pattern("departments/$departmentId/employees/$employeeId:int").unwrap();
        assert_eq!(
            steps,
            vec![
                lit("departments"),
                var("departmentId", None),
                lit("employees"),
                var("employeeId", Some("int")),
            ]
        );
    }

    #[test]
    fn test_parse_pattern_leading_slash() {
        assert_eq!(parse_pattern("/a/$b").unwrap(), vec![lit("a"), var("b", None)]);
    }

    #[test]
    fn test_parse_pattern_duplicate_variable() {
        let err = parse_pattern("a/$x/b/$x").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateVariable { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_parse_pattern_duplicate_variable_different_converter() {
        assert!(parse_pattern("a/$x/b/$x:int").is_err());
    }

    #[test]
    fn test_parse_pattern_malformed() {
        assert!(matches!(
            parse_pattern("a/$"),
            Err(ParseError::MalformedVariable { .. })
        ));
        assert!(parse_pattern("a/$:int").is_err());
        assert!(parse_pattern("a/$x:").is_err());
    }

    #[test]
    fn test_render_pattern_roundtrip() {
        let pattern = "a/$b:int/c/$d";
        assert_eq!(render_pattern(&parse_pattern(pattern).unwrap()), pattern);
        assert_eq!(render_pattern(&parse_pattern("/a/$b/").unwrap()), "a/$b");
    }

    #[test]
    fn test_subpatterns() {
        let steps = parse_pattern("a/$b/c").unwrap();
        let prefixes: Vec<String> = subpatterns(&steps).map(render_pattern).collect();
        assert_eq!(prefixes, ["a", "a/$b", "a/$b/c"]);
        assert_eq!(subpatterns(&[]).count(), 0);
    }

    #[test]
    fn test_interpolate() {
        let mut vars = Variables::new();
        vars.insert("id".to_string(), Value::Int(7));

        assert_eq!(lit("a").interpolate(&vars).as_deref(), Some("a"));
        assert_eq!(var("id", Some("int")).interpolate(&vars).as_deref(), Some("7"));
        assert_eq!(var("missing", None).interpolate(&vars), None);
    }
}
