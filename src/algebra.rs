//! Construction and core set algebra.

use std::cmp::Ordering;

use log::debug;

use crate::cache::{BinaryKey, BinaryOp, UnaryKey, UnaryOp};
use crate::error::{Result, ZddError};
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

impl ZddManager {
    // ===== Terminals and construction =====

    /// The empty family `{}`.
    pub fn empty(&self) -> ZddId {
        ZddId::EMPTY
    }

    /// The family `{∅}`.
    pub fn base(&self) -> ZddId {
        ZddId::BASE
    }

    /// The family `{{var}}`.
    pub fn single(&self, var: Var) -> Result<ZddId> {
        let var = self.check_var(var)?;
        Ok(self.mk(var, ZddId::EMPTY, ZddId::BASE))
    }

    /// The family holding exactly one set: `vars`. Duplicates are ignored.
    pub fn cube_vars(&self, vars: &[Var]) -> Result<ZddId> {
        let mut vars = vars.to_vec();
        for &v in &vars {
            self.check_var(v)?;
        }
        vars.sort_unstable();
        vars.dedup();

        // Bottom-up: each node becomes the hi child of the next one.
        let mut acc = ZddId::BASE;
        for v in vars {
            acc = self.mk(v, ZddId::EMPTY, acc);
        }
        Ok(acc)
    }

    /// Alias of [`cube_vars`](Self::cube_vars).
    pub fn single_vars(&self, vars: &[Var]) -> Result<ZddId> {
        self.cube_vars(vars)
    }

    /// Builds a one-set family from a bit mask written most significant first.
    ///
    /// Character `k` of an `L`-character mask stands for variable `L - 1 - k`,
    /// so `"1010"` selects `v3` and `v1`.
    pub fn cube(&self, bits: &str) -> Result<ZddId> {
        let len = bits.chars().count();
        if len > self.num_vars() {
            return Err(ZddError::InvalidVariable {
                var: (len - 1) as u32,
                num_vars: self.num_vars(),
            });
        }

        let mut vars = Vec::new();
        for (k, c) in bits.chars().enumerate() {
            match c {
                '1' => vars.push(Var::new((len - 1 - k) as u32)),
                '0' => {}
                _ => {
                    return Err(ZddError::InvalidCube {
                        input: bits.to_string(),
                        reason: format!("unexpected character {:?} at position {}", c, k),
                    })
                }
            }
        }
        self.cube_vars(&vars)
    }

    /// All subsets of the first `n` variables.
    pub fn universe(&self, n: usize) -> Result<ZddId> {
        if n > self.num_vars() {
            return Err(ZddError::InvalidVariable {
                var: (n - 1) as u32,
                num_vars: self.num_vars(),
            });
        }
        let mut acc = ZddId::BASE;
        for i in 0..n {
            acc = self.mk(Var::new(i as u32), acc, acc);
        }
        Ok(acc)
    }

    // ===== Membership =====

    /// Returns true if `∅ ∈ f`.
    pub fn contains_empty(&self, f: ZddId) -> bool {
        let mut current = f;
        while !current.is_terminal() {
            current = self.low(current);
        }
        current.is_base()
    }

    /// Returns true if the set `set` is a member of `f`.
    pub fn contains(&self, f: ZddId, set: &[Var]) -> bool {
        let mut set = set.to_vec();
        set.sort_unstable_by(|a, b| b.cmp(a));
        set.dedup();

        let mut remaining = set.into_iter().peekable();
        let mut current = f;
        while !current.is_terminal() {
            let node = self.node(current);
            match remaining.peek() {
                Some(&want) if want == node.var => {
                    remaining.next();
                    current = node.hi;
                }
                Some(&want) if want > node.var => return false,
                _ => current = node.lo,
            }
        }
        current.is_base() && remaining.next().is_none()
    }

    // ===== Unary operations =====

    /// Sets of `f` without `var`.
    pub fn subset0(&self, f: ZddId, var: Var) -> Result<ZddId> {
        let var = self.check_var(var)?;
        let _guard = self.protect(f);
        Ok(self.subset0_rec(f, var))
    }

    /// Sets of `f` containing `var`, with `var` removed.
    pub fn subset1(&self, f: ZddId, var: Var) -> Result<ZddId> {
        let var = self.check_var(var)?;
        let _guard = self.protect(f);
        Ok(self.subset1_rec(f, var))
    }

    /// Toggles `var` in every set of `f`.
    pub fn change(&self, f: ZddId, var: Var) -> Result<ZddId> {
        let var = self.check_var(var)?;
        let _guard = self.protect(f);
        Ok(self.change_rec(f, var))
    }

    pub(crate) fn subset0_rec(&self, f: ZddId, var: Var) -> ZddId {
        let h = self.height(f);
        if h < var.height() {
            return f;
        }
        let node = self.node(f);
        if h == var.height() {
            return node.lo;
        }

        let key = UnaryKey::new(UnaryOp::Subset0, f, var);
        if let Some(result) = self.caches().unary.borrow_mut().get(&key) {
            return result;
        }

        let lo = self.subset0_rec(node.lo, var);
        let _guard = self.protect(lo);
        let hi = self.subset0_rec(node.hi, var);
        let result = self.mk(node.var, lo, hi);

        self.caches().unary.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn subset1_rec(&self, f: ZddId, var: Var) -> ZddId {
        let h = self.height(f);
        if h < var.height() {
            return ZddId::EMPTY;
        }
        let node = self.node(f);
        if h == var.height() {
            return node.hi;
        }

        let key = UnaryKey::new(UnaryOp::Subset1, f, var);
        if let Some(result) = self.caches().unary.borrow_mut().get(&key) {
            return result;
        }

        let lo = self.subset1_rec(node.lo, var);
        let _guard = self.protect(lo);
        let hi = self.subset1_rec(node.hi, var);
        let result = self.mk(node.var, lo, hi);

        self.caches().unary.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn change_rec(&self, f: ZddId, var: Var) -> ZddId {
        if f.is_empty() {
            return ZddId::EMPTY;
        }
        let h = self.height(f);
        if h < var.height() {
            // `var` appears nowhere below: add it to every set.
            return self.mk(var, ZddId::EMPTY, f);
        }

        let key = UnaryKey::new(UnaryOp::Change, f, var);
        if let Some(result) = self.caches().unary.borrow_mut().get(&key) {
            return result;
        }

        let node = self.node(f);
        let result = if h == var.height() {
            self.mk(var, node.hi, node.lo)
        } else {
            let lo = self.change_rec(node.lo, var);
            let _guard = self.protect(lo);
            let hi = self.change_rec(node.hi, var);
            self.mk(node.var, lo, hi)
        };

        self.caches().unary.borrow_mut().insert(key, result);
        result
    }

    // ===== Binary operations =====

    /// `f ∪ g`.
    pub fn union(&self, f: ZddId, g: ZddId) -> ZddId {
        debug!("union({}, {})", f, g);
        let _guard = self.protect_all(&[f, g]);
        self.union_rec(f, g)
    }

    /// `f ∩ g`.
    pub fn intersect(&self, f: ZddId, g: ZddId) -> ZddId {
        debug!("intersect({}, {})", f, g);
        let _guard = self.protect_all(&[f, g]);
        self.intersect_rec(f, g)
    }

    /// `f \ g`.
    pub fn diff(&self, f: ZddId, g: ZddId) -> ZddId {
        debug!("diff({}, {})", f, g);
        let _guard = self.protect_all(&[f, g]);
        self.diff_rec(f, g)
    }

    pub(crate) fn union_rec(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_empty() {
            return g;
        }
        if g.is_empty() || f == g {
            return f;
        }

        let key = BinaryKey::algebra(BinaryOp::Union, f, g);
        if let Some(result) = self.caches().binary.borrow_mut().get(&key) {
            return result;
        }

        let result = match self.height(f).cmp(&self.height(g)) {
            Ordering::Greater => {
                let n = self.node(f);
                let lo = self.union_rec(n.lo, g);
                self.mk(n.var, lo, n.hi)
            }
            Ordering::Less => {
                let n = self.node(g);
                let lo = self.union_rec(f, n.lo);
                self.mk(n.var, lo, n.hi)
            }
            Ordering::Equal => {
                let nf = self.node(f);
                let ng = self.node(g);
                let lo = self.union_rec(nf.lo, ng.lo);
                let _guard = self.protect(lo);
                let hi = self.union_rec(nf.hi, ng.hi);
                self.mk(nf.var, lo, hi)
            }
        };

        self.caches().binary.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn intersect_rec(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_empty() || g.is_empty() {
            return ZddId::EMPTY;
        }
        if f == g {
            return f;
        }

        let key = BinaryKey::algebra(BinaryOp::Intersect, f, g);
        if let Some(result) = self.caches().binary.borrow_mut().get(&key) {
            return result;
        }

        let result = match self.height(f).cmp(&self.height(g)) {
            Ordering::Greater => self.intersect_rec(self.low(f), g),
            Ordering::Less => self.intersect_rec(f, self.low(g)),
            Ordering::Equal => {
                let nf = self.node(f);
                let ng = self.node(g);
                let lo = self.intersect_rec(nf.lo, ng.lo);
                let _guard = self.protect(lo);
                let hi = self.intersect_rec(nf.hi, ng.hi);
                self.mk(nf.var, lo, hi)
            }
        };

        self.caches().binary.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn diff_rec(&self, f: ZddId, g: ZddId) -> ZddId {
        if f.is_empty() || f == g {
            return ZddId::EMPTY;
        }
        if g.is_empty() {
            return f;
        }

        let key = BinaryKey::algebra(BinaryOp::Diff, f, g);
        if let Some(result) = self.caches().binary.borrow_mut().get(&key) {
            return result;
        }

        let result = match self.height(f).cmp(&self.height(g)) {
            Ordering::Greater => {
                let n = self.node(f);
                let lo = self.diff_rec(n.lo, g);
                self.mk(n.var, lo, n.hi)
            }
            Ordering::Less => self.diff_rec(f, self.low(g)),
            Ordering::Equal => {
                let nf = self.node(f);
                let ng = self.node(g);
                let lo = self.diff_rec(nf.lo, ng.lo);
                let _guard = self.protect(lo);
                let hi = self.diff_rec(nf.hi, ng.hi);
                self.mk(nf.var, lo, hi)
            }
        };

        self.caches().binary.borrow_mut().insert(key, result);
        result
    }
}
