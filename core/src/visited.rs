use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Identity set shared by every iterator of one logical traversal.
///
/// Cloning a `Visited` clones the handle, not the set: all clones observe and
/// grow the same set. Entries are never removed. Not thread-safe; concurrent
/// traversals each need their own set.
pub struct Visited<K> {
    inner: Rc<RefCell<HashSet<K>>>,
}

impl<K: Hash + Eq> Visited<K> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HashSet::with_capacity(capacity))),
        }
    }

    /// Record `key`. Returns false if it was already present.
    pub fn insert(&self, key: K) -> bool {
        self.inner.borrow_mut().insert(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.borrow().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// True if both handles refer to the same underlying set.
    pub fn shares_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K> Clone for Visited<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: Hash + Eq> Default for Visited<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Visited<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visited")
            .field("len", &self.inner.borrow().len())
            .finish()
    }
}
