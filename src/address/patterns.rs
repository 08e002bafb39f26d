//! Patterns - the registry of path patterns, converters and inverses.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::conflict::check_pattern;
use super::location::Locations;
use super::resource::{Addressable, DefaultLookup, Inverse, Lookup};
use super::trie::Node;
use crate::core::{Converter, Converters, Step, Variables, parse_pattern, render_pattern};
use crate::debug;
use crate::error::{Error, RegistrationError};

/// Inverse function registered for one object kind.
pub(super) struct InverseEntry<T> {
    pub steps: Vec<Step>,
    pub func: Inverse<T>,
}

/// Registry of path patterns.
///
/// Register patterns (with their lookups), inverses and converters first,
/// then resolve paths to objects and objects back to paths. Construct one per
/// use; there is no global instance.
///
/// Name/parent metadata for resolved and located objects is kept in a
/// side-table inside the registry, see [`Patterns::name_of`] and
/// [`Patterns::parent_of`].
pub struct Patterns<T> {
    pub(super) root: Node<T>,
    pub(super) converters: Converters,
    pub(super) inverses: FxHashMap<String, InverseEntry<T>>,
    pub(super) default_lookup: DefaultLookup<T>,
    pub(super) locations: Locations<T>,
}

impl<T: Addressable + Default + 'static> Patterns<T> {
    /// Create a registry whose placeholder objects are `T::default()`.
    pub fn new() -> Self {
        Self::with_default_lookup(|| Rc::new(T::default()))
    }
}

impl<T: Addressable + Default + 'static> Default for Patterns<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Addressable + 'static> Patterns<T> {
    /// Create a registry with a custom placeholder constructor.
    pub fn with_default_lookup<F>(default_lookup: F) -> Self
    where
        F: Fn() -> Rc<T> + 'static,
    {
        Self {
            root: Node::root(),
            converters: Converters::new(),
            inverses: FxHashMap::default(),
            default_lookup: Box::new(default_lookup),
            locations: Locations::new(),
        }
    }

    /// Register `lookup` for `pattern`.
    ///
    /// Every prefix of the pattern is checked against the patterns already
    /// registered before anything changes, so a failed registration leaves
    /// the registry untouched. Registering the same pattern twice replaces
    /// the earlier lookup.
    pub fn register<F>(&mut self, pattern: &str, lookup: F) -> Result<(), Error>
    where
        F: Fn(&Variables) -> Option<Rc<T>> + 'static,
    {
        let steps = self.validate(pattern)?;

        let node = self.root.insert(&steps);
        if node.lookup.is_some() {
            debug!("register"; "replacing lookup for `{}`", node.path);
        } else {
            debug!("register"; "`{}`", node.path);
        }
        node.lookup = Some(Box::new(lookup) as Lookup<T>);
        Ok(())
    }

    /// Register both directions for objects of `kind` in one call.
    pub fn pattern<F, I>(
        &mut self,
        kind: &str,
        pattern: &str,
        lookup: F,
        inverse: I,
    ) -> Result<(), Error>
    where
        F: Fn(&Variables) -> Option<Rc<T>> + 'static,
        I: Fn(&T) -> Option<Variables> + 'static,
    {
        self.register(pattern, lookup)?;
        self.register_inverse(kind, pattern, inverse)
    }

    /// Register the inverse function for objects of `kind`.
    ///
    /// `pattern` is the template used to rebuild the object's path from the
    /// variables the inverse returns. A later registration for the same kind
    /// replaces the earlier one.
    pub fn register_inverse<I>(&mut self, kind: &str, pattern: &str, inverse: I) -> Result<(), Error>
    where
        I: Fn(&T) -> Option<Variables> + 'static,
    {
        // The template must agree with the trie, or locating would walk
        // prefixes that have no lookups.
        let steps = self.validate(pattern)?;

        debug!("register"; "inverse `{}` -> `{}`", kind, render_pattern(&steps));
        self.inverses.insert(
            kind.to_string(),
            InverseEntry {
                steps,
                func: Box::new(inverse),
            },
        );
        Ok(())
    }

    /// Add or replace a named converter.
    pub fn register_converter<F>(&mut self, name: &str, converter: F)
    where
        F: Fn(&str) -> Option<crate::core::Value> + 'static,
    {
        self.converters.register(name, Rc::new(converter) as Converter);
    }

    /// Add a converter that is already shared.
    pub fn register_shared_converter(&mut self, name: &str, converter: Converter) {
        self.converters.register(name, converter);
    }

    /// Replace the placeholder constructor.
    pub fn set_default_lookup<F>(&mut self, default_lookup: F)
    where
        F: Fn() -> Rc<T> + 'static,
    {
        self.default_lookup = Box::new(default_lookup);
    }

    /// Parse and check a pattern without registering it.
    pub fn validate(&self, pattern: &str) -> Result<Vec<Step>, Error> {
        let steps = parse_pattern(pattern)?;
        if steps.is_empty() {
            return Err(RegistrationError::EmptyPattern.into());
        }
        if let Err(err) = check_pattern(&self.root, &steps, pattern, &self.converters) {
            debug!("conflict"; "{}", err);
            return Err(err.into());
        }
        Ok(steps)
    }

    pub(super) fn default_object(&self) -> Rc<T> {
        (self.default_lookup)()
    }
}

impl<T> Patterns<T> {
    /// Canonical text of every pattern that has a lookup, sorted.
    pub fn registered(&self) -> Vec<String> {
        let mut patterns = Vec::new();
        self.root.walk(&mut |node| {
            if node.lookup.is_some() {
                patterns.push(node.path.clone());
            }
        });
        patterns.sort_unstable();
        patterns
    }

    /// Whether `pattern` (in any spelling) has a lookup.
    pub fn is_registered(&self, pattern: &str) -> bool {
        parse_pattern(pattern)
            .ok()
            .and_then(|steps| self.root.find(&steps))
            .is_some_and(|node| node.lookup.is_some())
    }

    /// Kinds that have an inverse, sorted.
    pub fn inverse_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.inverses.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Pattern used to locate objects of `kind`.
    pub fn inverse_pattern(&self, kind: &str) -> Option<String> {
        self.inverses
            .get(kind)
            .map(|entry| render_pattern(&entry.steps))
    }

    pub fn converters(&self) -> &Converters {
        &self.converters
    }

    /// Segment name recorded for `obj`, if it has been resolved or located.
    pub fn name_of(&self, obj: &Rc<T>) -> Option<String> {
        self.locations.name_of(obj)
    }

    /// Parent recorded for `obj`, if it has been resolved or located.
    pub fn parent_of(&self, obj: &Rc<T>) -> Option<Rc<T>> {
        self.locations.parent_of(obj)
    }

    pub fn is_located(&self, obj: &Rc<T>) -> bool {
        self.locations.contains(obj)
    }

    /// `obj` followed by its recorded ancestors, nearest first.
    ///
    /// Ends with the first object that has no record, normally the root.
    pub fn lineage(&self, obj: &Rc<T>) -> Vec<Rc<T>> {
        let limit = self.locations.len() + 1;
        let mut chain = vec![Rc::clone(obj)];
        while chain.len() <= limit {
            let Some(parent) = chain.last().and_then(|last| self.locations.parent_of(last)) else {
                break;
            };
            chain.push(parent);
        }
        chain
    }

    /// Drop all recorded names and parents.
    pub fn clear_locations(&self) {
        self.locations.clear();
    }

    /// Dump the registry for debugging.
    pub fn dump(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let patterns = self.registered();
        let _ = writeln!(output, "=== Patterns ({}) ===", patterns.len());
        for pattern in &patterns {
            let _ = writeln!(output, "  {pattern}");
        }

        let kinds = self.inverse_kinds();
        let _ = writeln!(output, "\n=== Inverses ({}) ===", kinds.len());
        for kind in kinds {
            if let Some(entry) = self.inverses.get(kind) {
                let _ = writeln!(output, "  {} ← {}", kind, render_pattern(&entry.steps));
            }
        }

        let _ = writeln!(output, "\n=== Converters ===");
        for name in self.converters.names() {
            let _ = writeln!(output, "  {name}");
        }

        output
    }
}

impl<T> fmt::Debug for Patterns<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patterns")
            .field("patterns", &self.registered())
            .field("inverses", &self.inverse_kinds())
            .field("converters", &self.converters)
            .field("locations", &self.locations.len())
            .finish()
    }
}
