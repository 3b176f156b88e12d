//! Enumeration of the members of a family.

use crate::guard::Root;
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Iterator over the sets of a family, each in increasing variable order.
///
/// The family is referenced for the iterator's lifetime, so other operations
/// may run (and collect) while it is alive.
pub struct SetIterator<'a> {
    mgr: &'a ZddManager,
    _root: Root<'a>,
    /// Pending sub-families with the variables chosen on the way down.
    stack: Vec<(ZddId, Vec<Var>)>,
}

impl<'a> SetIterator<'a> {
    pub fn new(mgr: &'a ZddManager, root: ZddId) -> Self {
        let mut stack = Vec::new();
        if !root.is_empty() {
            stack.push((root, Vec::new()));
        }
        Self {
            mgr,
            _root: mgr.root(root),
            stack,
        }
    }
}

impl Iterator for SetIterator<'_> {
    type Item = Vec<Var>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, mut path)) = self.stack.pop() {
            if id.is_base() {
                path.reverse();
                return Some(path);
            }

            // Zero-suppression: `hi` is never EMPTY.
            let node = self.mgr.node(id);
            let mut hi_path = path.clone();
            hi_path.push(node.var);
            self.stack.push((node.hi, hi_path));
            if !node.lo.is_empty() {
                self.stack.push((node.lo, path));
            }
        }
        None
    }
}

impl ZddManager {
    /// Iterates over the sets of `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use zdd_rs::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// mgr.new_vars(2);
    /// let u = mgr.universe(2)?;
    ///
    /// let sets: Vec<_> = mgr.iter_sets(u).collect();
    /// assert_eq!(sets.len(), 4);
    /// # Ok::<(), zdd_rs::error::ZddError>(())
    /// ```
    pub fn iter_sets(&self, f: ZddId) -> SetIterator<'_> {
        SetIterator::new(self, f)
    }

    /// All sets of `f`, each sorted by variable index.
    pub fn collect_sets(&self, f: ZddId) -> Vec<Vec<Var>> {
        self.iter_sets(f).collect()
    }
}
