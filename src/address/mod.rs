//! Address space - bidirectional mapping between paths and objects.
//!
//! This module provides [`Patterns`], a registry of path patterns that maps
//! slash-separated paths to application objects and back.
//!
//! # Architecture
//!
//! ```text
//! Path                              Objects
//! ====                              =======
//! departments/1/employees/10  ->    root
//!                                    └─ departments   (placeholder)
//!                                        └─ 1         (department lookup)
//!                                            └─ employees (placeholder)
//!                                                └─ 10    (employee lookup)
//! ```
//!
//! Each resolved object gets a name (the segment that produced it) and a
//! parent (the object one level up), kept in a side-table. [`Patterns::path`]
//! walks those records back to the root, locating objects through their
//! registered inverse first when needed.
//!
//! # Module Structure
//!
//! - `conflict`: registration-time variable/converter conflict detection
//! - `resource`: callback contracts ([`Addressable`], lookup, inverse)
//! - `resolve`: path -> object ([`Patterns::resolve`], [`Patterns::consume`])
//! - `locate`: object -> path ([`Patterns::locate`], [`Patterns::path`])
//! - `patterns`: the registry itself
//!
//! # Usage
//!
//! ```ignore
//! let mut patterns = Patterns::<Model>::new();
//! patterns.pattern("department", "departments/$id", lookup, inverse)?;
//!
//! let department = patterns.resolve(&root, "departments/1")?;
//! assert_eq!(patterns.path(&root, &department)?, "departments/1");
//! ```

mod conflict;
mod locate;
mod location;
mod patterns;
mod resolve;
mod resource;
mod trie;


pub use patterns::Patterns;
pub use resolve::Consumed;
pub use resource::{Addressable, DefaultLookup, Inverse, Lookup};
