//! Unate cube algebra: product, quotient and remainder of set families.

use std::cmp::Ordering;

use log::debug;

use crate::cache::{BinaryKey, UnateOp};
use crate::reference::ZddId;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Product `{a ∪ b | a ∈ f, b ∈ g}`.
    pub fn mul(&self, f: ZddId, g: ZddId) -> ZddId {
        debug!("mul({}, {})", f, g);
        let _guard = self.protect_all(&[f, g]);
        self.mul_rec(f, g)
    }

    /// Quotient: the largest `r` with `mul(r, g) ⊆ f` obtained by
    /// Minato's weak division.
    pub fn div(&self, f: ZddId, g: ZddId) -> ZddId {
        debug!("div({}, {})", f, g);
        let _guard = self.protect_all(&[f, g]);
        self.div_rec(f, g)
    }

    /// Remainder `f \ mul(g, div(f, g))`.
    pub fn modulo(&self, f: ZddId, g: ZddId) -> ZddId {
        debug!("modulo({}, {})", f, g);
        let _guard = self.protect_all(&[f, g]);
        let q = self.div_rec(f, g);
        let _q = self.protect(q);
        let m = self.mul_rec(g, q);
        let _m = self.protect(m);
        self.diff_rec(f, m)
    }

    pub(crate) fn mul_rec(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_empty() || g.is_empty() {
            return ZddId::EMPTY;
        }
        if f.is_base() {
            return g;
        }
        if g.is_base() {
            return f;
        }

        let key = BinaryKey::symmetric(UnateOp::Mul, f, g);
        if let Some(result) = self.caches().unate.borrow_mut().get(&key) {
            return result;
        }

        let result = match self.height(f).cmp(&self.height(g)) {
            Ordering::Greater => {
                let n = self.node(f);
                let lo = self.mul_rec(n.lo, g);
                let _lo = self.protect(lo);
                let hi = self.mul_rec(n.hi, g);
                self.mk(n.var, lo, hi)
            }
            Ordering::Less => {
                let n = self.node(g);
                let lo = self.mul_rec(f, n.lo);
                let _lo = self.protect(lo);
                let hi = self.mul_rec(f, n.hi);
                self.mk(n.var, lo, hi)
            }
            Ordering::Equal => {
                // f = f0 ∪ v·f1, g = g0 ∪ v·g1
                // f·g = f0·g0 ∪ v·(f1·g1 ∪ f1·g0 ∪ f0·g1)
                let nf = self.node(f);
                let ng = self.node(g);
                let lo = self.mul_rec(nf.lo, ng.lo);
                let _lo = self.protect(lo);
                let a = self.mul_rec(nf.hi, ng.hi);
                let _a = self.protect(a);
                let b = self.mul_rec(nf.hi, ng.lo);
                let _b = self.protect(b);
                let c = self.mul_rec(nf.lo, ng.hi);
                let _c = self.protect(c);
                let bc = self.union_rec(b, c);
                let _bc = self.protect(bc);
                let hi = self.union_rec(a, bc);
                self.mk(nf.var, lo, hi)
            }
        };

        self.caches().unate.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn div_rec(&self, f: ZddId, g: ZddId) -> ZddId {
        if g.is_base() {
            return f;
        }
        if g.is_empty() || f.is_terminal() {
            return ZddId::EMPTY;
        }
        if f == g {
            return ZddId::BASE;
        }

        let key = BinaryKey::new(UnateOp::Div, f, g);
        if let Some(result) = self.caches().unate.borrow_mut().get(&key) {
            return result;
        }

        let ng = self.node(g);
        let s1 = self.subset1_rec(f, ng.var);
        let _s1 = self.protect(s1);
        let r1 = self.div_rec(s1, ng.hi);

        let result = if r1.is_empty() || ng.lo.is_empty() {
            r1
        } else {
            let _r1 = self.protect(r1);
            let s0 = self.subset0_rec(f, ng.var);
            let _s0 = self.protect(s0);
            let r0 = self.div_rec(s0, ng.lo);
            let _r0 = self.protect(r0);
            self.intersect_rec(r1, r0)
        };

        self.caches().unate.borrow_mut().insert(key, result);
        result
    }
}
