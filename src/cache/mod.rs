//! Operation caches for ZDD memoization.
//!
//! Every operation family owns one direct-mapped, lossy cache:
//!
//! | Cache | Key | Operations |
//! |-------|-----|------------|
//! | `unary` | [`UnaryKey`] | `subset0`, `subset1`, `change` |
//! | `binary` | [`BinaryKey<BinaryOp>`] | `union`, `intersect`, `diff` |
//! | `unate` | [`BinaryKey<UnateOp>`] | `mul`, `div` |
//! | `constraint` | [`BinaryKey<ConstraintOp>`] | `restrict`, `no_supset`, `no_subset` |
//! | `graph` | [`BinaryKey<GraphOp>`] | `max_set`, `min_set` |
//!
//! Entries are never roots. After every garbage collection all caches are
//! purged, and resized when the arena has grown, so no stale handle survives.

mod direct_mapped;
mod key;

use std::cell::{Cell, RefCell};

use log::debug;

pub use direct_mapped::DirectMappedCache;
pub use key::{BinaryKey, BinaryOp, ConstraintOp, GraphOp, OpCode, UnaryKey, UnaryOp, UnateOp};

use crate::reference::ZddId;

/// Memoization table mapping an operation key to its result.
pub type OpCache<K> = DirectMappedCache<K, ZddId>;

/// Hit/miss counters of one cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub name: &'static str,
    pub capacity: usize,
    pub hits: usize,
    pub misses: usize,
    pub faults: usize,
}

impl CacheStats {
    fn of<K>(name: &'static str, cache: &OpCache<K>) -> Self {
        Self {
            name,
            capacity: cache.capacity(),
            hits: cache.hits(),
            misses: cache.misses(),
            faults: cache.faults(),
        }
    }

    /// Share of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// The full set of operation caches owned by a manager.
pub struct Caches {
    pub unary: RefCell<OpCache<UnaryKey>>,
    pub binary: RefCell<OpCache<BinaryKey<BinaryOp>>>,
    pub unate: RefCell<OpCache<BinaryKey<UnateOp>>>,
    pub constraint: RefCell<OpCache<BinaryKey<ConstraintOp>>>,
    pub graph: RefCell<OpCache<BinaryKey<GraphOp>>>,
    bits: Cell<usize>,
}

impl Caches {
    pub fn new(bits: usize) -> Self {
        Self {
            unary: RefCell::new(OpCache::new(bits)),
            binary: RefCell::new(OpCache::new(bits)),
            unate: RefCell::new(OpCache::new(bits)),
            constraint: RefCell::new(OpCache::new(bits)),
            graph: RefCell::new(OpCache::new(bits)),
            bits: Cell::new(bits),
        }
    }

    /// Current size of every cache, in bits.
    pub fn bits(&self) -> usize {
        self.bits.get()
    }

    /// Invalidate every entry of every cache.
    pub fn clear(&self) {
        self.unary.borrow_mut().clear();
        self.binary.borrow_mut().clear();
        self.unate.borrow_mut().clear();
        self.constraint.borrow_mut().clear();
        self.graph.borrow_mut().clear();
    }

    /// Post-collection hook: purge everything, and resize to `bits` when it
    /// differs from the current size.
    pub fn on_collect(&self, bits: usize) {
        if bits == self.bits.get() {
            self.clear();
            return;
        }
        debug!("caches: resize from 2^{} to 2^{} slots", self.bits.get(), bits);
        self.unary.borrow_mut().resize(bits);
        self.binary.borrow_mut().resize(bits);
        self.unate.borrow_mut().resize(bits);
        self.constraint.borrow_mut().resize(bits);
        self.graph.borrow_mut().resize(bits);
        self.bits.set(bits);
    }

    pub fn stats(&self) -> Vec<CacheStats> {
        vec![
            CacheStats::of("unary", &*self.unary.borrow()),
            CacheStats::of("binary", &*self.binary.borrow()),
            CacheStats::of("unate", &*self.unate.borrow()),
            CacheStats::of("constraint", &*self.constraint.borrow()),
            CacheStats::of("graph", &*self.graph.borrow()),
        ]
    }
}
