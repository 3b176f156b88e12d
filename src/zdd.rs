//! Zero-Suppressed Decision Diagram (ZDD) manager.
//!
//! The manager owns the node arena, the operation caches and the protection
//! stack. The algorithm families are implemented on it in separate modules:
//!
//! - [`algebra`](crate::algebra): construction, `union`, `intersect`, `diff`, `subset0/1`, `change`
//! - [`unate`](crate::unate): `mul`, `div`, `modulo`
//! - [`constraint`](crate::constraint): `restrict`, `no_supset`, `no_subset`, `exclude`
//! - [`graph`](crate::graph): `max_set`, `min_set`, `all_edge`
//! - [`count`](crate::count): `count`, `node_count`, `sat_one`
//!
//! # Quick Start
//!
//! ```
//! use zdd_rs::zdd::ZddManager;
//!
//! let mgr = ZddManager::new();
//! let a = mgr.new_var();
//! let b = mgr.new_var();
//!
//! let fa = mgr.single(a)?; // {{a}}
//! let fb = mgr.single(b)?; // {{b}}
//! let f = mgr.union(fa, fb); // {{a}, {b}}
//!
//! assert_eq!(mgr.count(f), 2);
//! assert_eq!(mgr.node_count(f), 2);
//! # Ok::<(), zdd_rs::error::ZddError>(())
//! ```
//!
//! # Memory management
//!
//! Nodes are reclaimed by a mark-sweep collection that runs when the arena is
//! full. A handle survives a collection only if it is referenced
//! ([`ZddManager::root`] or [`ZddManager::ref_node`]) or reachable from a
//! referenced node. Handles returned by an operation and not yet referenced
//! are safe until the next operation that allocates.

use std::cell::RefCell;
use std::fmt::{Debug, Formatter};

use log::debug;

use crate::cache::{CacheStats, Caches};
use crate::config::ZddConfig;
use crate::error::{Result, ZddError};
use crate::guard::{MarkScope, Protected, Root};
use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::storage::{ArenaStats, Storage};
use crate::types::Var;

/// Snapshot of the manager's memory and cache state.
#[derive(Debug, Clone)]
pub struct ZddStats {
    pub num_vars: usize,
    pub capacity: usize,
    pub live_nodes: usize,
    pub arena: ArenaStats,
    pub caches: Vec<CacheStats>,
}

/// The ZDD manager: owns all nodes and handles operations.
pub struct ZddManager {
    storage: RefCell<Storage>,
    caches: Caches,
    /// Intermediate results that must survive a collection.
    protected: RefCell<Vec<ZddId>>,
}

impl Default for ZddManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ZddManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("ZddManager")
            .field("num_vars", &storage.num_vars())
            .field("capacity", &storage.capacity())
            .field("size", &storage.size())
            .field("collections", &storage.stats().collections)
            .field("cache_bits", &self.caches.bits())
            .finish()
    }
}

impl ZddManager {
    // ===== Construction =====

    pub fn new() -> Self {
        Self::with_config(ZddConfig::default())
    }

    pub fn with_config(config: ZddConfig) -> Self {
        let storage = Storage::new(config);
        let config = storage.config();
        let bits = config.cache_bits_for(storage.capacity());
        debug!(
            "new manager: {} slots (max {}), caches of 2^{} slots",
            storage.capacity(),
            config.max_nodes,
            bits
        );
        Self {
            caches: Caches::new(bits),
            storage: RefCell::new(storage),
            protected: RefCell::new(Vec::new()),
        }
    }

    pub fn config(&self) -> ZddConfig {
        self.storage.borrow().config().clone()
    }

    // ===== Variables =====

    /// Creates the next variable. It sits above every existing variable.
    pub fn new_var(&self) -> Var {
        self.storage.borrow_mut().add_variable()
    }

    /// Creates `n` variables in order.
    pub fn new_vars(&self, n: usize) -> Vec<Var> {
        (0..n).map(|_| self.new_var()).collect()
    }

    pub fn num_vars(&self) -> usize {
        self.storage.borrow().num_vars()
    }

    /// Validate a variable at the API boundary.
    pub fn check_var(&self, var: Var) -> Result<Var> {
        let num_vars = self.num_vars();
        if usize::from(var) < num_vars {
            Ok(var)
        } else {
            Err(ZddError::InvalidVariable {
                var: var.index(),
                num_vars,
            })
        }
    }

    // ===== Node access =====

    pub(crate) fn caches(&self) -> &Caches {
        &self.caches
    }

    /// Copy of the node behind a non-terminal handle.
    pub fn node(&self, id: ZddId) -> ZddNode {
        *self.storage.borrow().node(id)
    }

    /// Decision variable of a non-terminal node.
    pub fn var(&self, id: ZddId) -> Var {
        debug_assert!(!id.is_terminal(), "terminal {} has no variable", id);
        self.storage.borrow().var(id)
    }

    /// Sub-family of sets without the top variable.
    pub fn low(&self, id: ZddId) -> ZddId {
        debug_assert!(!id.is_terminal(), "terminal {} has no children", id);
        self.storage.borrow().lo(id)
    }

    /// Sub-family of sets with the top variable (which is removed).
    pub fn high(&self, id: ZddId) -> ZddId {
        debug_assert!(!id.is_terminal(), "terminal {} has no children", id);
        self.storage.borrow().hi(id)
    }

    /// Position in the variable order: 0 for terminals, `var + 1` otherwise.
    pub(crate) fn height(&self, id: ZddId) -> u32 {
        self.storage.borrow().height(id)
    }

    /// Returns true if `id` still names a live node.
    pub fn is_valid(&self, id: ZddId) -> bool {
        id.is_terminal() || self.storage.borrow().is_valid(id)
    }

    /// Number of decision nodes allocated in the arena.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().size()
    }

    // ===== Canonical constructor =====

    /// Returns the node `(var, lo, hi)`, creating it if needed.
    ///
    /// Both children must sit strictly below `var` in the variable order.
    ///
    /// # Panics
    ///
    /// Panics if the arena is exhausted.
    pub fn make(&self, var: Var, lo: ZddId, hi: ZddId) -> Result<ZddId> {
        self.check_var(var)?;
        for child in [lo, hi] {
            if self.height(child) >= var.height() {
                return Err(ZddError::MisorderedChildren {
                    var: var.index(),
                    child_var: self.var(child).index(),
                });
            }
        }
        Ok(self.mk(var, lo, hi))
    }

    /// Canonical constructor with the zero-suppression rule.
    ///
    /// May run a collection; `lo` and `hi` survive it.
    pub(crate) fn mk(&self, var: Var, lo: ZddId, hi: ZddId) -> ZddId {
        if hi.is_empty() {
            return lo;
        }
        if let Some(id) = self.storage.borrow_mut().find_or_insert(var, lo, hi) {
            return id;
        }

        self.reclaim(&[lo, hi]);

        let id = self.storage.borrow_mut().find_or_insert(var, lo, hi);
        match id {
            Some(id) => id,
            None => {
                let storage = self.storage.borrow();
                let error = ZddError::ArenaExhausted {
                    capacity: storage.capacity(),
                    max_nodes: storage.config().max_nodes,
                };
                panic!("{}", error);
            }
        }
    }

    /// Obtain free slots. Caches are purged (and resized) whenever the arena changed.
    fn reclaim(&self, extra: &[ZddId]) {
        let mut roots = self.protected.borrow().clone();
        roots.extend_from_slice(extra);

        let outcome = self.storage.borrow_mut().reclaim(&roots);
        if outcome.changed() {
            self.after_collect();
        }
    }

    fn after_collect(&self) {
        let bits = {
            let storage = self.storage.borrow();
            storage.config().cache_bits_for(storage.capacity())
        };
        self.caches.on_collect(bits);
    }

    // ===== Memory management =====

    /// Increments the reference count of `id`. No-op on terminals.
    pub fn ref_node(&self, id: ZddId) {
        self.storage.borrow_mut().ref_node(id);
    }

    /// Decrements the reference count of `id`. The node is reclaimed by a
    /// later collection, never immediately.
    pub fn deref_node(&self, id: ZddId) {
        self.storage.borrow_mut().deref_node(id);
    }

    pub fn refs(&self, id: ZddId) -> u32 {
        if id.is_terminal() {
            u32::MAX
        } else {
            self.storage.borrow().refs(id)
        }
    }

    /// Takes an external reference released when the guard drops.
    pub fn root(&self, id: ZddId) -> Root<'_> {
        Root::new(self, id)
    }

    /// Keeps `id` alive across collections until the guard drops.
    pub fn protect(&self, id: ZddId) -> Protected<'_> {
        self.protect_all(&[id])
    }

    pub fn protect_all(&self, ids: &[ZddId]) -> Protected<'_> {
        let mut stack = self.protected.borrow_mut();
        let depth = stack.len();
        stack.extend_from_slice(ids);
        Protected::new(self, depth)
    }

    pub(crate) fn unprotect_to(&self, depth: usize) {
        self.protected.borrow_mut().truncate(depth);
    }

    pub(crate) fn protected_len(&self) -> usize {
        self.protected.borrow().len()
    }

    /// Runs a collection now. Only referenced and protected nodes survive.
    ///
    /// Returns the number of reclaimed nodes.
    pub fn collect(&self) -> usize {
        let roots = self.protected.borrow().clone();
        let freed = self.storage.borrow_mut().collect(&roots);
        self.after_collect();
        freed
    }

    /// Invalidates every operation cache entry.
    pub fn clear_caches(&self) {
        self.caches.clear();
    }

    pub fn stats(&self) -> ZddStats {
        let storage = self.storage.borrow();
        ZddStats {
            num_vars: storage.num_vars(),
            capacity: storage.capacity(),
            live_nodes: storage.size(),
            arena: storage.stats().clone(),
            caches: self.caches.stats(),
        }
    }

    // ===== Traversal marks =====

    /// Marks `id`. Returns false if it was already marked.
    pub fn mark_once(&self, id: ZddId) -> bool {
        self.storage.borrow_mut().mark_once(id)
    }

    /// Clears the marks of `id` and of every marked node below it.
    pub fn unmark_all(&self, id: ZddId) {
        self.storage.borrow_mut().unmark_all(id);
    }

    /// Clears the mark of `id` alone.
    pub fn unmark(&self, id: ZddId) {
        self.storage.borrow_mut().unmark(id);
    }

    /// A marking traversal whose marks are cleared on drop.
    pub fn mark_scope(&self) -> MarkScope<'_> {
        MarkScope::new(self)
    }
}
