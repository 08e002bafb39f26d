//! Two-way mapping between URL-style paths and objects.
//!
//! A [`Patterns`] registry holds path patterns such as
//! `departments/$department_id/employees/$employee_id:int`. Resolving a path
//! walks the patterns segment by segment and calls the registered lookups to
//! build the chain of objects; locating an object runs the inverse for its
//! kind and rebuilds the ancestors, so [`Patterns::path`] can render the path
//! back.
//!
//! ```ignore
//! let mut patterns: Patterns<Record> = Patterns::new();
//! patterns.pattern("employee", "departments/$d/employees/$e:int", lookup, inverse)?;
//!
//! let employee = patterns.resolve(&root, "departments/1/employees/10")?;
//! assert_eq!(patterns.path(&root, &employee)?, "departments/1/employees/10");
//! ```
//!
//! The [`route`] module builds a registry from a `traject.toml` route table.

pub mod address;
pub mod config;
pub mod core;
pub mod error;
pub mod logger;
pub mod route;

pub use crate::address::{Addressable, Consumed, Patterns};
pub use crate::core::{Value, Variables};
pub use crate::error::{
    Error, LocationError, ParseError, RecordError, RegistrationError, ResolutionError,
};
