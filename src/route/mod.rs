//! Route tables - patterns installed from configuration.
//!
//! A [`RouteTable`] turns the `[[route]]` entries of a [`RouteConfig`] into a
//! [`Patterns`] registry over [`Record`]s. Lookups are memoized per route, so
//! resolving the same path twice, or locating a record whose ancestors were
//! already resolved, yields the same objects.
//!
//! [`RouteConfig`]: crate::config::RouteConfig
//! [`Patterns`]: crate::address::Patterns

mod record;
mod table;

pub use record::{ROOT_KIND, Record};
pub use table::{InstalledRoute, RouteTable};
