//! Reverse resolution: object -> path.
//!
//! An object that was not reached by resolving gets its name and parent from
//! the inverse registered for its kind. The inverse yields variables, the
//! inverse's pattern turns them into the object's segment, and the parent is
//! produced by the same lookup forward resolution would use for the pattern
//! one step shorter. Ancestors that are not located yet are placed the same
//! way, stopping at the first one that already is.

use std::rc::Rc;

use super::Patterns;
use super::resource::Addressable;
use crate::core::{Step, Variables, join_path, render_pattern};
use crate::debug;
use crate::error::LocationError;

impl<T: Addressable + 'static> Patterns<T> {
    /// Make sure `obj` has a recorded name and parent.
    ///
    /// Does nothing if `obj` is the root or is already located, so repeated
    /// calls never invoke a lookup twice.
    pub fn locate(&self, root: &Rc<T>, obj: &Rc<T>) -> Result<(), LocationError> {
        if Rc::ptr_eq(root, obj) || self.locations.contains(obj) {
            return Ok(());
        }

        let kind = obj.kind();
        let entry = self
            .inverses
            .get(kind)
            .ok_or_else(|| LocationError::NoInverse {
                kind: kind.to_string(),
            })?;
        let vars = (entry.func)(obj).ok_or_else(|| LocationError::InverseFailed {
            kind: kind.to_string(),
        })?;

        debug!("locate"; "`{}` via `{}`", kind, render_pattern(&entry.steps));
        self.place(root, obj, &entry.steps, &vars)
    }

    /// Build the path from `root` to `obj`.
    pub fn path(&self, root: &Rc<T>, obj: &Rc<T>) -> Result<String, LocationError> {
        self.locate(root, obj)?;

        let limit = self.locations.len();
        let mut names = Vec::new();
        let mut current = Rc::clone(obj);

        while !Rc::ptr_eq(&current, root) {
            // A chain longer than the table means a cycle.
            if names.len() >= limit {
                return Err(LocationError::Unreachable);
            }
            let (name, parent) = self
                .locations
                .get(&current)
                .ok_or(LocationError::Unreachable)?;
            names.push(name);
            current = parent;
        }

        names.reverse();
        Ok(join_path(&names))
    }

    /// Record `obj` at the position described by `steps` and `vars`.
    fn place(
        &self,
        root: &Rc<T>,
        obj: &Rc<T>,
        steps: &[Step],
        vars: &Variables,
    ) -> Result<(), LocationError> {
        let Some((last, parent_steps)) = steps.split_last() else {
            return Err(LocationError::Unreachable);
        };

        let name = last
            .interpolate(vars)
            .ok_or_else(|| LocationError::MissingVariable {
                pattern: render_pattern(steps),
                variable: last.variable_name().unwrap_or_default().to_string(),
            })?;

        let parent = if parent_steps.is_empty() {
            Rc::clone(root)
        } else {
            let parent = self.ancestor(parent_steps, vars)?;
            if !Rc::ptr_eq(&parent, root) && !self.locations.contains(&parent) {
                self.place(root, &parent, parent_steps, vars)?;
            }
            parent
        };

        self.locations.record(obj, &name, &parent);
        Ok(())
    }

    /// The object forward resolution would produce for `steps`.
    fn ancestor(&self, steps: &[Step], vars: &Variables) -> Result<Rc<T>, LocationError> {
        let Some(lookup) = self.root.find(steps).and_then(|node| node.lookup.as_ref()) else {
            return Ok(self.default_object());
        };

        let bound = self.bind(steps, vars)?;
        lookup(&bound).ok_or_else(|| LocationError::AncestorNotFound {
            pattern: render_pattern(steps),
        })
    }

    /// The variables forward resolution binds along `steps`.
    ///
    /// Only the variables named by `steps` are kept, and each value goes
    /// through its step's converter again, so `$id:int` yields `Int` here
    /// exactly as it does when the path is resolved.
    fn bind(&self, steps: &[Step], vars: &Variables) -> Result<Variables, LocationError> {
        let mut bound = Variables::new();
        for step in steps {
            let Step::Variable { name, converter } = step else {
                continue;
            };
            let text = step
                .interpolate(vars)
                .ok_or_else(|| LocationError::MissingVariable {
                    pattern: render_pattern(steps),
                    variable: name.clone(),
                })?;
            let value = self
                .converters
                .apply(converter.as_deref(), &text)
                .ok_or_else(|| LocationError::InvalidVariable {
                    pattern: render_pattern(steps),
                    variable: name.clone(),
                    value: text.clone(),
                    converter: converter.clone().unwrap_or_default(),
                })?;
            bound.insert(name.clone(), value);
        }
        Ok(bound)
    }
}
