//! Care-set restriction and dominance filters.
//!
//! For a family `F` and a constraint family `C`:
//!
//! ```text
//! restrict(F, C)  = { f ∈ F | ∃c ∈ C. c ⊆ f }
//! no_supset(F, C) = { f ∈ F | ¬∃c ∈ C. c ⊆ f }
//! no_subset(F, C) = { f ∈ F | ¬∃c ∈ C. f ⊆ c }
//! exclude(F, C)   = F \ restrict(F, C)
//! ```

use std::cmp::Ordering;

use log::debug;

use crate::cache::{BinaryKey, ConstraintOp};
use crate::reference::ZddId;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Members of `f` that contain at least one member of `c`.
    pub fn restrict(&self, f: ZddId, c: ZddId) -> ZddId {
        debug!("restrict({}, {})", f, c);
        let _guard = self.protect_all(&[f, c]);
        self.restrict_rec(f, c)
    }

    /// Members of `f` that contain no member of `c`.
    pub fn no_supset(&self, f: ZddId, c: ZddId) -> ZddId {
        debug!("no_supset({}, {})", f, c);
        let _guard = self.protect_all(&[f, c]);
        self.no_supset_rec(f, c)
    }

    /// Members of `f` that are contained in no member of `c`.
    pub fn no_subset(&self, f: ZddId, c: ZddId) -> ZddId {
        debug!("no_subset({}, {})", f, c);
        let _guard = self.protect_all(&[f, c]);
        self.no_subset_rec(f, c)
    }

    /// `f` minus its restriction to `c`; the same family as [`no_supset`](Self::no_supset).
    pub fn exclude(&self, f: ZddId, c: ZddId) -> ZddId {
        debug!("exclude({}, {})", f, c);
        let _guard = self.protect_all(&[f, c]);
        let r = self.restrict_rec(f, c);
        let _r = self.protect(r);
        self.diff_rec(f, r)
    }

    pub(crate) fn restrict_rec(&self, f: ZddId, c: ZddId) -> ZddId {
        if f.is_empty() || c.is_empty() {
            return ZddId::EMPTY;
        }
        if f == c || self.contains_empty(c) {
            return f;
        }
        if f.is_base() {
            return ZddId::EMPTY;
        }

        let key = BinaryKey::new(ConstraintOp::Restrict, f, c);
        if let Some(result) = self.caches().constraint.borrow_mut().get(&key) {
            return result;
        }

        let result = match self.height(f).cmp(&self.height(c)) {
            Ordering::Greater => {
                let n = self.node(f);
                let lo = self.restrict_rec(n.lo, c);
                let _lo = self.protect(lo);
                let hi = self.restrict_rec(n.hi, c);
                self.mk(n.var, lo, hi)
            }
            // Members of `c` holding its top variable cannot fit in `f`.
            Ordering::Less => self.restrict_rec(f, self.low(c)),
            Ordering::Equal => {
                let nf = self.node(f);
                let nc = self.node(c);
                let lo = self.restrict_rec(nf.lo, nc.lo);
                let _lo = self.protect(lo);
                let cc = self.union_rec(nc.lo, nc.hi);
                let _cc = self.protect(cc);
                let hi = self.restrict_rec(nf.hi, cc);
                self.mk(nf.var, lo, hi)
            }
        };

        self.caches().constraint.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn no_supset_rec(&self, f: ZddId, c: ZddId) -> ZddId {
        if f.is_empty() || f == c {
            return ZddId::EMPTY;
        }
        if c.is_empty() {
            return f;
        }
        // Every set is a superset of ∅.
        if self.contains_empty(c) {
            return ZddId::EMPTY;
        }
        if f.is_base() {
            return ZddId::BASE;
        }

        let key = BinaryKey::new(ConstraintOp::NoSupset, f, c);
        if let Some(result) = self.caches().constraint.borrow_mut().get(&key) {
            return result;
        }

        let result = match self.height(f).cmp(&self.height(c)) {
            Ordering::Greater => {
                let n = self.node(f);
                let lo = self.no_supset_rec(n.lo, c);
                let _lo = self.protect(lo);
                let hi = self.no_supset_rec(n.hi, c);
                self.mk(n.var, lo, hi)
            }
            Ordering::Less => self.no_supset_rec(f, self.low(c)),
            Ordering::Equal => {
                let nf = self.node(f);
                let nc = self.node(c);
                let lo = self.no_supset_rec(nf.lo, nc.lo);
                let _lo = self.protect(lo);
                let cc = self.union_rec(nc.lo, nc.hi);
                let _cc = self.protect(cc);
                let hi = self.no_supset_rec(nf.hi, cc);
                self.mk(nf.var, lo, hi)
            }
        };

        self.caches().constraint.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn no_subset_rec(&self, f: ZddId, c: ZddId) -> ZddId {
        if f.is_empty() || f == c {
            return ZddId::EMPTY;
        }
        if c.is_empty() {
            return f;
        }
        // ∅ is a subset of every member of a non-empty `c`.
        if f.is_base() {
            return ZddId::EMPTY;
        }

        let key = BinaryKey::new(ConstraintOp::NoSubset, f, c);
        if let Some(result) = self.caches().constraint.borrow_mut().get(&key) {
            return result;
        }

        let result = match self.height(f).cmp(&self.height(c)) {
            Ordering::Greater => {
                // No member of `c` holds the top variable of `f`.
                let n = self.node(f);
                let lo = self.no_subset_rec(n.lo, c);
                self.mk(n.var, lo, n.hi)
            }
            Ordering::Less => {
                let nc = self.node(c);
                let cc = self.union_rec(nc.lo, nc.hi);
                let _cc = self.protect(cc);
                self.no_subset_rec(f, cc)
            }
            Ordering::Equal => {
                let nf = self.node(f);
                let nc = self.node(c);
                let cc = self.union_rec(nc.lo, nc.hi);
                let _cc = self.protect(cc);
                let lo = self.no_subset_rec(nf.lo, cc);
                let _lo = self.protect(lo);
                let hi = self.no_subset_rec(nf.hi, nc.hi);
                self.mk(nf.var, lo, hi)
            }
        };

        self.caches().constraint.borrow_mut().insert(key, result);
        result
    }
}
