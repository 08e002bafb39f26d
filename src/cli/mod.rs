//! Command-line interface module.

mod args;
pub mod check;
pub mod path;
pub mod resolve;
pub mod routes;

pub use args::{Cli, Commands, ResolveArgs};
