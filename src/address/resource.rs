//! Callback contracts between the registry and the application.

use std::rc::Rc;

use crate::core::Variables;

/// An object that can be placed in the address space.
///
/// The registry never creates application objects itself; it only calls the
/// lookup functions it was given. `kind` is the discriminant used to pick an
/// inverse function when a path has to be rebuilt for an object that was not
/// reached by resolving.
pub trait Addressable {
    fn kind(&self) -> &str;
}

/// Variables -> object. `None` means "no such object".
pub type Lookup<T> = Box<dyn Fn(&Variables) -> Option<Rc<T>>>;

/// Object -> variables, used to rebuild the path of an object.
pub type Inverse<T> = Box<dyn Fn(&T) -> Option<Variables>>;

/// Builds placeholder objects for segments without a lookup of their own.
pub type DefaultLookup<T> = Box<dyn Fn() -> Rc<T>>;
