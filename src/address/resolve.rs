//! Forward resolution: path -> object.
//!
//! The trie is walked in lockstep with the path. At every step the node's
//! lookup (or the default lookup for pass-through nodes) produces the next
//! object, which is recorded with the segment name and the previous object as
//! its parent. Walking stops at the first segment that matches no edge, is
//! rejected by a converter, or whose lookup returns `None`.

use std::rc::Rc;

use super::Patterns;
use super::resource::Addressable;
use crate::core::{Variables, join_path, split_path};
use crate::debug;
use crate::error::ResolutionError;

/// Outcome of [`Patterns::consume`].
#[derive(Debug, Clone)]
pub struct Consumed<T> {
    /// Deepest object reached (the root if nothing matched).
    pub obj: Rc<T>,
    /// Segments that produced `obj`, in path order.
    pub consumed: Vec<String>,
    /// Segments left over, in path order.
    pub unconsumed: Vec<String>,
}

impl<T> Consumed<T> {
    /// Whether the whole path was consumed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unconsumed.is_empty()
    }

    fn into_resolved(self, path: String) -> Result<Rc<T>, ResolutionError> {
        if self.is_complete() {
            Ok(self.obj)
        } else {
            Err(ResolutionError {
                path,
                consumed: self.consumed,
                unconsumed: self.unconsumed,
            })
        }
    }
}

impl<T: Addressable + 'static> Patterns<T> {
    /// Resolve `path` completely, starting at `root`.
    pub fn resolve(&self, root: &Rc<T>, path: &str) -> Result<Rc<T>, ResolutionError> {
        self.consume(root, path).into_resolved(path.to_string())
    }

    /// Like [`Patterns::resolve`], but the segments come as a stack whose
    /// last element is the first segment of the path.
    pub fn resolve_stack(&self, root: &Rc<T>, stack: Vec<String>) -> Result<Rc<T>, ResolutionError> {
        let path = join_path(&stack.iter().rev().collect::<Vec<_>>());
        self.consume_stack(root, stack).into_resolved(path)
    }

    /// Resolve as much of `path` as possible.
    ///
    /// Never fails; whatever could not be matched is returned in
    /// [`Consumed::unconsumed`].
    pub fn consume(&self, root: &Rc<T>, path: &str) -> Consumed<T> {
        self.consume_segments(root, split_path(path))
    }

    /// Like [`Patterns::consume`], but with a reversed segment stack.
    pub fn consume_stack(&self, root: &Rc<T>, mut stack: Vec<String>) -> Consumed<T> {
        stack.reverse();
        self.consume_segments(root, stack)
    }

    fn consume_segments(&self, root: &Rc<T>, mut segments: Vec<String>) -> Consumed<T> {
        let mut vars = Variables::new();
        let mut node = &self.root;
        let mut obj = Rc::clone(root);
        let mut consumed = Vec::with_capacity(segments.len());

        for segment in &segments {
            let Some((next, binding)) = node.step(segment, &self.converters) else {
                debug!("resolve"; "no match for `{}` after `{}`", segment, join_path(&consumed));
                break;
            };

            if let Some((name, value)) = binding {
                vars.insert(name.to_string(), value);
            }

            let found = match &next.lookup {
                Some(lookup) => lookup(&vars),
                None => Some(self.default_object()),
            };
            let Some(found) = found else {
                debug!("resolve"; "lookup for `{}` returned nothing at `{}`", next.path, segment);
                break;
            };

            self.locations.record(&found, segment, &obj);
            obj = found;
            node = next;
            consumed.push(segment.clone());
        }

        let unconsumed = segments.split_off(consumed.len());
        Consumed {
            obj,
            consumed,
            unconsumed,
        }
    }
}
