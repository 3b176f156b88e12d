//! Scope guards over manager state.
//!
//! - [`Protected`]: keeps intermediate results alive across calls that may
//!   trigger garbage collection.
//! - [`Root`]: an external reference, released on drop.
//! - [`MarkScope`]: a traversal that leaves no mark bits behind.

use std::cell::RefCell;
use std::fmt;

use crate::reference::ZddId;
use crate::zdd::ZddManager;

/// Entries pushed onto the protection stack, popped on drop.
///
/// Guards must be dropped in reverse order of creation, which scoping
/// gives for free.
#[must_use = "the handles are unprotected as soon as the guard is dropped"]
pub struct Protected<'a> {
    mgr: &'a ZddManager,
    depth: usize,
}

impl<'a> Protected<'a> {
    pub(crate) fn new(mgr: &'a ZddManager, depth: usize) -> Self {
        Self { mgr, depth }
    }
}

impl Drop for Protected<'_> {
    fn drop(&mut self) {
        self.mgr.unprotect_to(self.depth);
    }
}

/// A referenced handle: `ref` on creation, `deref` on drop.
#[must_use = "the reference is released as soon as the root is dropped"]
pub struct Root<'a> {
    mgr: &'a ZddManager,
    id: ZddId,
}

impl<'a> Root<'a> {
    pub(crate) fn new(mgr: &'a ZddManager, id: ZddId) -> Self {
        mgr.ref_node(id);
        Self { mgr, id }
    }

    pub fn id(&self) -> ZddId {
        self.id
    }

    /// Give up the guard but keep the reference; the caller now owns one `deref`.
    pub fn into_raw(self) -> ZddId {
        let id = self.id;
        std::mem::forget(self);
        id
    }
}

impl Clone for Root<'_> {
    fn clone(&self) -> Self {
        Root::new(self.mgr, self.id)
    }
}

impl Drop for Root<'_> {
    fn drop(&mut self) {
        self.mgr.deref_node(self.id);
    }
}

impl fmt::Debug for Root<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Root").field(&self.id).finish()
    }
}

/// Mark bits set through this scope are cleared on drop.
///
/// Every id marked through [`mark_once`](Self::mark_once) is recorded, so the
/// marks are cleared no matter which nodes were visited or in which order.
pub struct MarkScope<'a> {
    mgr: &'a ZddManager,
    marked: RefCell<Vec<ZddId>>,
}

impl<'a> MarkScope<'a> {
    pub(crate) fn new(mgr: &'a ZddManager) -> Self {
        Self {
            mgr,
            marked: RefCell::new(Vec::new()),
        }
    }

    /// Mark `id`; returns false if it was already marked.
    pub fn mark_once(&self, id: ZddId) -> bool {
        let fresh = self.mgr.mark_once(id);
        if fresh {
            self.marked.borrow_mut().push(id);
        }
        fresh
    }
}

impl Drop for MarkScope<'_> {
    fn drop(&mut self) {
        for &id in self.marked.get_mut().iter() {
            self.mgr.unmark(id);
        }
    }
}
