//! Core types - path segments, pattern steps and typed variables.

mod convert;
mod segment;

pub use convert::{Converter, Converters, FLOAT, INT, Value, Variables, builtin, float, int};
pub use segment::{
    CONVERTER_SEPARATOR, Step, VARIABLE_MARKER, join_path, parse_pattern, render_pattern,
    split_path, subpatterns,
};
