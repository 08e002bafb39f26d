//! Resolution metadata side-table.
//!
//! Records, per object, the segment name that produced it and the parent it
//! was reached from. Application objects are never mutated; identity is the
//! `Rc` allocation.
//!
//! The table does not own the objects it describes. An entry holds the object
//! weakly and its parent strongly, so a live object keeps its chain up to the
//! root alive, and an entry dies with its object. Dead entries are pruned
//! whenever the table has doubled since the last sweep.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

/// Entry count below which the table is never swept.
const MIN_SWEEP: usize = 64;

struct Location<T> {
    object: Weak<T>,
    name: String,
    parent: Rc<T>,
}

impl<T> Location<T> {
    #[inline]
    fn is_live(&self) -> bool {
        self.object.strong_count() > 0
    }
}

pub(super) struct Locations<T> {
    entries: RefCell<FxHashMap<usize, Location<T>>>,
    sweep_at: Cell<usize>,
}

/// Identity key of an object.
///
/// A `Weak` keeps the allocation (not the value) around, so the address of
/// an object with an entry is never handed to another object.
#[inline]
fn identity<T>(obj: &Rc<T>) -> usize {
    Rc::as_ptr(obj) as usize
}

impl<T> Locations<T> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(FxHashMap::default()),
            sweep_at: Cell::new(MIN_SWEEP),
        }
    }

    /// Set (or overwrite) the name and parent of `obj`.
    pub fn record(&self, obj: &Rc<T>, name: &str, parent: &Rc<T>) {
        let replaced = self.entries.borrow_mut().insert(
            identity(obj),
            Location {
                object: Rc::downgrade(obj),
                name: name.to_string(),
                parent: Rc::clone(parent),
            },
        );
        // Dropping the old parent may drop objects; do it outside the borrow.
        drop(replaced);

        if self.len() >= self.sweep_at.get() {
            self.sweep();
        }
    }

    /// Drop the entries of objects that no longer exist.
    pub fn sweep(&self) {
        let dead: Vec<Location<T>> = {
            let mut entries = self.entries.borrow_mut();
            let keys: Vec<usize> = entries
                .iter()
                .filter(|(_, loc)| !loc.is_live())
                .map(|(key, _)| *key)
                .collect();
            keys.into_iter()
                .filter_map(|key| entries.remove(&key))
                .collect()
        };
        drop(dead);

        self.sweep_at.set((self.len() * 2).max(MIN_SWEEP));
    }

    fn with_entry<R>(&self, obj: &Rc<T>, f: impl FnOnce(&Location<T>) -> R) -> Option<R> {
        self.entries
            .borrow()
            .get(&identity(obj))
            .filter(|loc| loc.is_live())
            .map(f)
    }

    pub fn contains(&self, obj: &Rc<T>) -> bool {
        self.with_entry(obj, |_| ()).is_some()
    }

    pub fn name_of(&self, obj: &Rc<T>) -> Option<String> {
        self.with_entry(obj, |loc| loc.name.clone())
    }

    pub fn parent_of(&self, obj: &Rc<T>) -> Option<Rc<T>> {
        self.with_entry(obj, |loc| Rc::clone(&loc.parent))
    }

    /// Name and parent together.
    pub fn get(&self, obj: &Rc<T>) -> Option<(String, Rc<T>)> {
        self.with_entry(obj, |loc| (loc.name.clone(), Rc::clone(&loc.parent)))
    }

    /// Number of entries, including dead ones not swept yet.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn clear(&self) {
        let entries = std::mem::take(&mut *self.entries.borrow_mut());
        drop(entries);
        self.sweep_at.set(MIN_SWEEP);
    }
}
