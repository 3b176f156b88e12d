use std::collections::HashMap;

use num_bigint::BigUint;

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Number of sets in `f`, saturating at `u64::MAX`.
    ///
    /// Use [`count_exact`](Self::count_exact) for families that may be larger.
    pub fn count(&self, f: ZddId) -> u64 {
        let mut cache = HashMap::new();
        self._count(f, &mut cache)
    }

    fn _count(&self, f: ZddId, cache: &mut HashMap<ZddId, u64>) -> u64 {
        if f.is_empty() {
            return 0;
        } else if f.is_base() {
            return 1;
        }

        if let Some(&count) = cache.get(&f) {
            return count;
        }

        let node = self.node(f);
        let count = self._count(node.lo, cache).saturating_add(self._count(node.hi, cache));

        cache.insert(f, count);
        count
    }

    /// Exact number of sets in `f`.
    pub fn count_exact(&self, f: ZddId) -> BigUint {
        let mut cache = HashMap::new();
        self._count_exact(f, &mut cache)
    }

    fn _count_exact(&self, f: ZddId, cache: &mut HashMap<ZddId, BigUint>) -> BigUint {
        if f.is_empty() {
            return BigUint::ZERO;
        } else if f.is_base() {
            return BigUint::from(1u32);
        }

        if let Some(count) = cache.get(&f) {
            return count.clone();
        }

        let node = self.node(f);
        let count = self._count_exact(node.lo, cache) + self._count_exact(node.hi, cache);

        cache.insert(f, count.clone());
        count
    }

    /// Number of decision nodes in the DAG of `f` (terminals excluded).
    ///
    /// Uses the arena's mark bits, which are clean again on return.
    pub fn node_count(&self, f: ZddId) -> usize {
        let scope = self.mark_scope();
        let mut count = 0;
        let mut stack = vec![f];
        while let Some(id) = stack.pop() {
            if id.is_terminal() || !scope.mark_once(id) {
                continue;
            }
            count += 1;
            let node = self.node(id);
            stack.push(node.lo);
            stack.push(node.hi);
        }
        count
    }

    /// One member of `f`, or `None` if `f` is empty.
    ///
    /// Low edges are preferred, so the result is a minimal-looking witness:
    /// `∅` whenever `∅ ∈ f`. Variables are listed from the root down.
    pub fn sat_one(&self, f: ZddId) -> Option<Vec<Var>> {
        if f.is_empty() {
            return None;
        }

        let mut set = Vec::new();
        let mut current = f;
        while !current.is_terminal() {
            let node = self.node(current);
            if !node.lo.is_empty() {
                current = node.lo;
            } else {
                set.push(node.var);
                current = node.hi;
            }
        }

        debug_assert!(current.is_base());
        Some(set)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_count() {
        let mgr = ZddManager::new();
        let v = mgr.new_vars(4);
        assert_eq!(mgr.count(ZddId::EMPTY), 0);
        assert_eq!(mgr.count(ZddId::BASE), 1);

        let u = mgr.universe(4).unwrap();
        assert_eq!(mgr.count(u), 16);
        assert_eq!(mgr.count_exact(u), BigUint::from(16u32));

        let f = mgr.union(mgr.single(v[0]).unwrap(), mgr.single(v[3]).unwrap());
        assert_eq!(mgr.count(f), 2);
    }

    #[test]
    fn test_count_exact_beyond_u64() {
        let mgr = ZddManager::new();
        mgr.new_vars(70);
        let u = mgr.universe(70).unwrap();
        assert_eq!(mgr.count(u), u64::MAX);
        assert_eq!(mgr.count_exact(u), BigUint::from(1u32) << 70);
        assert_eq!(mgr.node_count(u), 70);
    }

    #[test]
    fn test_node_count_leaves_marks_clean() {
        let mgr = ZddManager::new();
        let v = mgr.new_vars(3);
        let f = mgr.union(
            mgr.cube_vars(&[v[0], v[2]]).unwrap(),
            mgr.cube_vars(&[v[1], v[2]]).unwrap(),
        );
        assert_eq!(mgr.node_count(f), 3);
        assert_eq!(mgr.node_count(f), 3);
        assert!(mgr.mark_once(f));
        mgr.unmark_all(f);
        assert_eq!(mgr.node_count(ZddId::BASE), 0);
    }

    #[test]
    fn test_sat_one() {
        let mgr = ZddManager::new();
        let v = mgr.new_vars(3);
        assert_eq!(mgr.sat_one(ZddId::EMPTY), None);
        assert_eq!(mgr.sat_one(ZddId::BASE), Some(vec![]));

        let f = mgr.union(
            mgr.cube_vars(&[v[0], v[2]]).unwrap(),
            mgr.cube_vars(&[v[1], v[2]]).unwrap(),
        );
        let set = mgr.sat_one(f).unwrap();
        assert!(mgr.contains(f, &set));
        assert_eq!(set.len(), 2);

        let g = mgr.union(f, ZddId::BASE);
        assert_eq!(mgr.sat_one(g), Some(vec![]));
    }
}
