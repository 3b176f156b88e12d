//! Antichains and pair families.

use log::debug;

use crate::cache::{BinaryKey, GraphOp};
use crate::error::Result;
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Maximal members of `x` under inclusion.
    pub fn max_set(&self, x: ZddId) -> ZddId {
        debug!("max_set({})", x);
        let _guard = self.protect(x);
        self.max_set_rec(x)
    }

    /// Minimal members of `x` under inclusion.
    pub fn min_set(&self, x: ZddId) -> ZddId {
        debug!("min_set({})", x);
        let _guard = self.protect(x);
        self.min_set_rec(x)
    }

    /// All 2-element subsets of the variables `from..=to`.
    ///
    /// An empty or single-variable range gives the empty family.
    pub fn all_edge(&self, from: Var, to: Var) -> Result<ZddId> {
        self.check_var(from)?;
        self.check_var(to)?;

        let mut singles = ZddId::EMPTY;
        let mut pairs = ZddId::EMPTY;
        for index in from.index()..=to.index() {
            let v = Var::new(index);
            pairs = self.mk(v, pairs, singles);
            let _pairs = self.protect(pairs);
            singles = self.mk(v, singles, ZddId::BASE);
        }
        Ok(pairs)
    }

    pub(crate) fn max_set_rec(&self, x: ZddId) -> ZddId {
        if x.is_terminal() {
            return x;
        }

        let key = BinaryKey::new(GraphOp::MaxSet, x, ZddId::EMPTY);
        if let Some(result) = self.caches().graph.borrow_mut().get(&key) {
            return result;
        }

        let n = self.node(x);
        let hi = self.max_set_rec(n.hi);
        let _hi = self.protect(hi);
        let lo = self.max_set_rec(n.lo);
        let _lo = self.protect(lo);
        let lo = self.no_subset_rec(lo, hi);
        let result = self.mk(n.var, lo, hi);

        self.caches().graph.borrow_mut().insert(key, result);
        result
    }

    pub(crate) fn min_set_rec(&self, x: ZddId) -> ZddId {
        if x.is_terminal() {
            return x;
        }

        let key = BinaryKey::new(GraphOp::MinSet, x, ZddId::EMPTY);
        if let Some(result) = self.caches().graph.borrow_mut().get(&key) {
            return result;
        }

        let n = self.node(x);
        let lo = self.min_set_rec(n.lo);
        let _lo = self.protect(lo);
        let hi = self.min_set_rec(n.hi);
        let _hi = self.protect(hi);
        let hi = self.no_supset_rec(hi, lo);
        let result = self.mk(n.var, lo, hi);

        self.caches().graph.borrow_mut().insert(key, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn family(mgr: &ZddManager, sets: &[&[Var]]) -> ZddId {
        sets.iter().fold(ZddId::EMPTY, |acc, set| {
            let cube = mgr.cube_vars(set).unwrap();
            mgr.union(acc, cube)
        })
    }

    #[test]
    fn test_max_set() {
        let mgr = ZddManager::new();
        let v = mgr.new_vars(3);
        let x = family(&mgr, &[&[v[0]], &[v[0], v[1]], &[v[1]]]);
        let m = mgr.max_set(x);
        assert_eq!(m, family(&mgr, &[&[v[0], v[1]]]));
        assert_eq!(mgr.max_set(m), m);

        let y = family(&mgr, &[&[v[0], v[1]], &[v[2]], &[], &[v[1]]]);
        assert_eq!(mgr.max_set(y), family(&mgr, &[&[v[0], v[1]], &[v[2]]]));
        assert_eq!(mgr.max_set(ZddId::BASE), ZddId::BASE);
    }

    #[test]
    fn test_min_set() {
        let mgr = ZddManager::new();
        let v = mgr.new_vars(3);
        let x = family(&mgr, &[&[v[0]], &[v[0], v[1]], &[v[1], v[2]], &[v[2]]]);
        assert_eq!(mgr.min_set(x), family(&mgr, &[&[v[0]], &[v[2]]]));

        let with_empty = mgr.union(x, ZddId::BASE);
        assert_eq!(mgr.min_set(with_empty), ZddId::BASE);
    }

    #[test]
    fn test_all_edge() {
        let mgr = ZddManager::new();
        let v = mgr.new_vars(4);
        let e = mgr.all_edge(v[0], v[2]).unwrap();
        let expected = family(&mgr, &[&[v[0], v[1]], &[v[0], v[2]], &[v[1], v[2]]]);
        assert_eq!(e, expected);

        assert_eq!(mgr.all_edge(v[1], v[1]).unwrap(), ZddId::EMPTY);
        assert_eq!(mgr.all_edge(v[3], v[1]).unwrap(), ZddId::EMPTY);
        assert!(mgr.all_edge(v[0], Var::from_index(4)).is_err());
    }
}
