//! Error types for pattern registration, resolution and location.

use thiserror::Error;

/// A pattern string could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("variable `${name}` appears more than once in pattern `{pattern}`")]
    DuplicateVariable { pattern: String, name: String },

    #[error("malformed variable segment `{segment}` in pattern `{pattern}`")]
    MalformedVariable { pattern: String, segment: String },
}

/// A pattern could not be added to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Another pattern already binds a different variable at this position.
    #[error("pattern `{pattern}` conflicts with `{existing}` at `{prefix}`")]
    VariableConflict {
        pattern: String,
        /// Prefix of `pattern` where the conflict occurs.
        prefix: String,
        /// The variable step already registered at that position.
        existing: String,
    },

    #[error("pattern `{pattern}` uses unknown converter `{converter}`")]
    UnknownConverter { pattern: String, converter: String },

    #[error("pattern has no segments")]
    EmptyPattern,
}

/// A path could not be fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot resolve `{path}`: stopped at `{}` after `{}`", .unconsumed.join("/"), .consumed.join("/"))]
pub struct ResolutionError {
    pub path: String,
    pub consumed: Vec<String>,
    pub unconsumed: Vec<String>,
}

/// A path could not be reconstructed for an object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("no inverse registered for kind `{kind}`")]
    NoInverse { kind: String },

    #[error("inverse for kind `{kind}` returned no variables")]
    InverseFailed { kind: String },

    #[error("variable `${variable}` missing while locating pattern `{pattern}`")]
    MissingVariable { pattern: String, variable: String },

    #[error("lookup for `{pattern}` returned nothing while locating an ancestor")]
    AncestorNotFound { pattern: String },

    #[error("`{value}` is not a valid `{converter}` for `${variable}` in `{pattern}`")]
    InvalidVariable {
        pattern: String,
        variable: String,
        value: String,
        converter: String,
    },

    #[error("object is not reachable from the root")]
    Unreachable,
}

/// A record could not be built from raw `name=value` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("no route locates kind `{kind}`")]
    UnknownKind { kind: String },

    #[error("missing value for `${variable}` in `{pattern}`")]
    MissingVariable { pattern: String, variable: String },

    #[error("`{variable}` is not used by `{pattern}`")]
    UnknownVariable { pattern: String, variable: String },

    #[error("`{value}` is not a valid `{converter}` for `${variable}`")]
    Conversion {
        variable: String,
        value: String,
        converter: String,
    },
}

/// Any registry error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Location(#[from] LocationError),
}
