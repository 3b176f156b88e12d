//! Node arena: slots, unique tables, reference counts and mark-sweep collection.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::ZddConfig;
use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::subtable::Subtable;
use crate::types::Var;

/// Counters describing the arena's history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArenaStats {
    pub collections: usize,
    pub growths: usize,
    pub nodes_freed: usize,
    pub gc_time: Duration,
    pub peak_live: usize,
}

/// What [`Storage::reclaim`] did to obtain free slots.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Reclaim {
    pub collected: bool,
    pub grown: bool,
}

impl Reclaim {
    /// Returns true if handles held by caches may have been invalidated.
    pub fn changed(self) -> bool {
        self.collected || self.grown
    }
}

pub struct Storage {
    nodes: Vec<ZddNode>,
    /// Head of the free list threaded through `ZddNode::next`.
    free_head: u32,
    free_count: usize,
    subtables: Vec<Subtable>,
    /// Number of 1 -> 0 reference count transitions since the last collection.
    dead_candidates: usize,
    config: ZddConfig,
    stats: ArenaStats,
}

impl Storage {
    pub fn new(config: ZddConfig) -> Self {
        let config = config.normalized();
        let mut storage = Self {
            nodes: vec![ZddNode::terminal(), ZddNode::terminal()],
            free_head: ZddNode::NO_NEXT,
            free_count: 0,
            subtables: Vec::new(),
            dead_candidates: 0,
            config,
            stats: ArenaStats::default(),
        };
        storage.extend_to(storage.config.initial_nodes);
        storage.stats.peak_live = storage.live_count();
        storage
    }

    pub fn config(&self) -> &ZddConfig {
        &self.config
    }

    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }

    /// Total number of slots, terminals included.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn free_count(&self) -> usize {
        self.free_count
    }

    /// Number of occupied slots, terminals included.
    pub fn live_count(&self) -> usize {
        self.nodes.len() - self.free_count
    }

    /// Number of decision nodes currently allocated (dead or not).
    pub fn size(&self) -> usize {
        self.live_count() - 2
    }

    pub fn num_vars(&self) -> usize {
        self.subtables.len()
    }

    pub fn add_variable(&mut self) -> Var {
        let var = Var::new(self.subtables.len() as u32);
        self.subtables.push(Subtable::new(var));
        var
    }

    pub fn subtable(&self, var: Var) -> &Subtable {
        &self.subtables[usize::from(var)]
    }

    // ===== Access =====

    #[inline]
    pub fn node(&self, id: ZddId) -> &ZddNode {
        let node = &self.nodes[id.index()];
        debug_assert!(node.live, "handle {} refers to a reclaimed slot", id);
        debug_assert_eq!(
            node.generation,
            id.generation(),
            "stale handle {} (slot generation is {})",
            id,
            node.generation
        );
        node
    }

    #[inline]
    pub fn var(&self, id: ZddId) -> Var {
        self.node(id).var
    }

    #[inline]
    pub fn lo(&self, id: ZddId) -> ZddId {
        self.node(id).lo
    }

    #[inline]
    pub fn hi(&self, id: ZddId) -> ZddId {
        self.node(id).hi
    }

    /// Position in the variable order: 0 for terminals, `var + 1` otherwise.
    #[inline]
    pub fn height(&self, id: ZddId) -> u32 {
        if id.is_terminal() {
            0
        } else {
            self.var(id).height()
        }
    }

    /// Returns true if `id` names a slot that is currently allocated to it.
    pub fn is_valid(&self, id: ZddId) -> bool {
        self.nodes
            .get(id.index())
            .is_some_and(|node| node.live && node.generation == id.generation())
    }

    // ===== Allocation =====

    /// Find the node `(var, lo, hi)` or allocate it.
    ///
    /// Returns `None` when the node is missing and no slot is free. The
    /// zero-suppression rule is applied by the caller.
    pub fn find_or_insert(&mut self, var: Var, lo: ZddId, hi: ZddId) -> Option<ZddId> {
        debug_assert!(!hi.is_empty());
        let subtable = &self.subtables[usize::from(var)];
        if let Some(index) = subtable.find(lo, hi, &self.nodes) {
            return Some(ZddId::new(index, self.nodes[index as usize].generation));
        }

        if self.free_head == ZddNode::NO_NEXT {
            return None;
        }
        let index = self.free_head;
        let slot = &mut self.nodes[index as usize];
        self.free_head = slot.next;
        self.free_count -= 1;

        slot.var = var;
        slot.lo = lo;
        slot.hi = hi;
        slot.refs = 0;
        slot.marked = false;
        slot.live = true;
        let generation = slot.generation;

        self.subtables[usize::from(var)].insert(index, &mut self.nodes);

        let live = self.live_count();
        if live > self.stats.peak_live {
            self.stats.peak_live = live;
        }
        Some(ZddId::new(index, generation))
    }

    /// Append free slots until the arena holds `capacity` slots.
    fn extend_to(&mut self, capacity: usize) {
        let old = self.nodes.len();
        if capacity <= old {
            return;
        }
        self.nodes.resize(capacity, ZddNode::free(ZddNode::NO_NEXT, 0));
        // Link new slots so that the lowest index is handed out first.
        for index in (old..capacity).rev() {
            self.nodes[index].next = self.free_head;
            self.free_head = index as u32;
        }
        self.free_count += capacity - old;
    }

    /// Grow the arena by the configured factor. Returns false at the ceiling.
    pub fn grow(&mut self) -> bool {
        let old = self.capacity();
        if old >= self.config.max_nodes {
            return false;
        }
        let wanted = (old as f64 * self.config.grow_factor) as usize;
        let new = wanted.max(old + 1).min(self.config.max_nodes);
        debug!("arena: grow from {} to {} slots", old, new);
        self.extend_to(new);
        self.stats.growths += 1;
        true
    }

    /// Make free slots available, collecting and/or growing.
    ///
    /// `roots` are handles that must survive in addition to the referenced
    /// nodes. Afterwards the free list may still be empty if the arena is at
    /// its ceiling and nothing could be reclaimed.
    pub fn reclaim(&mut self, roots: &[ZddId]) -> Reclaim {
        let mut outcome = Reclaim::default();

        if self.dead_candidates > 0 || self.capacity() > self.config.simple_deadcount_threshold {
            self.collect(roots);
            outcome.collected = true;
        }

        if self.free_count < self.config.min_free_nodes(self.capacity()) {
            outcome.grown = self.grow();
        }

        if self.free_count == 0 && !outcome.collected {
            self.collect(roots);
            outcome.collected = true;
        }

        outcome
    }

    // ===== Reference counting =====

    pub fn ref_node(&mut self, id: ZddId) {
        if id.is_terminal() {
            return;
        }
        let index = id.index();
        debug_assert!(self.is_valid(id), "ref of invalid handle {}", id);
        let node = &mut self.nodes[index];
        node.refs = node.refs.saturating_add(1);
    }

    pub fn deref_node(&mut self, id: ZddId) {
        if id.is_terminal() {
            return;
        }
        let index = id.index();
        debug_assert!(self.is_valid(id), "deref of invalid handle {}", id);
        let node = &mut self.nodes[index];
        match node.refs {
            0 => warn!("deref of unreferenced node {}", id),
            u32::MAX => {}
            _ => {
                node.refs -= 1;
                if node.refs == 0 {
                    self.dead_candidates += 1;
                }
            }
        }
    }

    pub fn refs(&self, id: ZddId) -> u32 {
        self.node(id).refs
    }

    // ===== Garbage collection =====

    /// Mark-sweep collection. Returns the number of reclaimed slots.
    ///
    /// Roots are every node with a positive reference count plus `roots`.
    pub fn collect(&mut self, roots: &[ZddId]) -> usize {
        let start = Instant::now();
        let before = self.live_count();

        let reached = self.mark_reachable(roots);

        let mut freed = 0;
        for index in (2..self.nodes.len()).rev() {
            let node = &mut self.nodes[index];
            if node.live && !reached[index] {
                let generation = node.generation.wrapping_add(1);
                *node = ZddNode::free(self.free_head, generation);
                self.free_head = index as u32;
                freed += 1;
            }
        }
        self.free_count += freed;
        self.dead_candidates = 0;

        self.rehash();

        let elapsed = start.elapsed();
        self.stats.collections += 1;
        self.stats.nodes_freed += freed;
        self.stats.gc_time += elapsed;
        info!(
            "gc #{}: {} -> {} live slots, freed {} of {} in {:?}",
            self.stats.collections,
            before,
            self.live_count(),
            freed,
            self.capacity(),
            elapsed
        );
        freed
    }

    fn mark_reachable(&self, roots: &[ZddId]) -> Vec<bool> {
        let mut reached = vec![false; self.nodes.len()];
        reached[0] = true;
        reached[1] = true;

        let mut stack: Vec<u32> = roots.iter().map(|id| id.raw()).collect();
        stack.extend(
            self.nodes
                .iter()
                .enumerate()
                .skip(2)
                .filter(|(_, node)| node.live && node.refs > 0)
                .map(|(index, _)| index as u32),
        );

        while let Some(index) = stack.pop() {
            let index = index as usize;
            if reached[index] {
                continue;
            }
            reached[index] = true;
            let node = &self.nodes[index];
            debug_assert!(node.live, "root or child #{} is not live", index);
            stack.push(node.lo.raw());
            stack.push(node.hi.raw());
        }

        reached
    }

    /// Rebuild every unique table from the live slots.
    fn rehash(&mut self) {
        for subtable in self.subtables.iter_mut() {
            subtable.clear();
        }
        for index in 2..self.nodes.len() {
            if self.nodes[index].live {
                let var = self.nodes[index].var;
                self.subtables[usize::from(var)].insert(index as u32, &mut self.nodes);
            }
        }
    }

    // ===== Traversal marks =====

    /// Set the mark bit of `id`. Returns false if it was already set.
    pub fn mark_once(&mut self, id: ZddId) -> bool {
        let node = &mut self.nodes[id.index()];
        if node.marked {
            false
        } else {
            node.marked = true;
            true
        }
    }

    pub fn is_marked(&self, id: ZddId) -> bool {
        self.nodes[id.index()].marked
    }

    pub fn unmark(&mut self, id: ZddId) {
        self.nodes[id.index()].marked = false;
    }

    /// Clear mark bits of `id` and every marked node below it.
    ///
    /// The walk stops at unmarked nodes, so marks below an unmarked node stay set.
    pub fn unmark_all(&mut self, id: ZddId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            if !node.marked {
                continue;
            }
            node.marked = false;
            if !id.is_terminal() {
                stack.push(node.lo);
                stack.push(node.hi);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn tiny() -> Storage {
        Storage::new(ZddConfig::default().with_initial_nodes(8).with_max_nodes(16))
    }

    #[test]
    fn test_find_or_insert_is_canonical() {
        let mut storage = tiny();
        let v = storage.add_variable();
        let a = storage.find_or_insert(v, ZddId::EMPTY, ZddId::BASE).unwrap();
        let b = storage.find_or_insert(v, ZddId::EMPTY, ZddId::BASE).unwrap();
        assert_eq!(a, b);
        assert_eq!(storage.size(), 1);

        let c = storage.find_or_insert(v, ZddId::BASE, ZddId::BASE).unwrap();
        assert_ne!(a, c);
        assert_eq!(storage.size(), 2);
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let mut storage = tiny();
        let vars: Vec<Var> = (0..7).map(|_| storage.add_variable()).collect();
        for &v in &vars[..6] {
            assert!(storage.find_or_insert(v, ZddId::EMPTY, ZddId::BASE).is_some());
        }
        assert_eq!(storage.free_count(), 0);
        assert!(storage.find_or_insert(vars[6], ZddId::EMPTY, ZddId::BASE).is_none());
    }

    #[test]
    fn test_collect_keeps_referenced_and_roots() {
        let mut storage = tiny();
        let v0 = storage.add_variable();
        let v1 = storage.add_variable();
        let a = storage.find_or_insert(v0, ZddId::EMPTY, ZddId::BASE).unwrap();
        let b = storage.find_or_insert(v1, a, ZddId::BASE).unwrap();
        let c = storage.find_or_insert(v1, ZddId::EMPTY, a).unwrap();
        let garbage = storage.find_or_insert(v0, ZddId::BASE, ZddId::BASE).unwrap();

        storage.ref_node(b);
        let freed = storage.collect(&[c]);
        assert_eq!(freed, 1);
        assert!(storage.is_valid(a));
        assert!(storage.is_valid(b));
        assert!(storage.is_valid(c));
        assert!(!storage.is_valid(garbage));

        // The unique table still finds survivors after the rehash.
        assert_eq!(storage.find_or_insert(v1, a, ZddId::BASE), Some(b));
    }

    #[test]
    fn test_reused_slot_gets_new_generation() {
        let mut storage = tiny();
        let v = storage.add_variable();
        let a = storage.find_or_insert(v, ZddId::EMPTY, ZddId::BASE).unwrap();
        storage.collect(&[]);
        let b = storage.find_or_insert(v, ZddId::BASE, ZddId::BASE).unwrap();
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(!storage.is_valid(a));
    }

    #[test]
    fn test_deref_counts_dead_candidates() {
        let mut storage = tiny();
        let v = storage.add_variable();
        let a = storage.find_or_insert(v, ZddId::EMPTY, ZddId::BASE).unwrap();
        storage.ref_node(a);
        storage.ref_node(a);
        storage.deref_node(a);
        assert_eq!(storage.dead_candidates, 0);
        storage.deref_node(a);
        assert_eq!(storage.dead_candidates, 1);
        // Tolerated misuse: logged, no underflow.
        storage.deref_node(a);
        assert_eq!(storage.refs(a), 0);
    }

    #[test]
    fn test_reclaim_grows_when_nothing_dies() {
        let mut storage = tiny();
        let vars: Vec<Var> = (0..6).map(|_| storage.add_variable()).collect();
        let mut roots = Vec::new();
        for &v in &vars {
            roots.push(storage.find_or_insert(v, ZddId::EMPTY, ZddId::BASE).unwrap());
        }
        let outcome = storage.reclaim(&roots);
        assert!(outcome.grown);
        assert_eq!(storage.capacity(), 16);
        assert!(storage.free_count() > 0);
        assert!(roots.iter().all(|&id| storage.is_valid(id)));
    }

    #[test]
    fn test_marks() {
        let mut storage = tiny();
        let v0 = storage.add_variable();
        let v1 = storage.add_variable();
        let a = storage.find_or_insert(v0, ZddId::EMPTY, ZddId::BASE).unwrap();
        let b = storage.find_or_insert(v1, a, a).unwrap();
        assert!(storage.mark_once(b));
        assert!(!storage.mark_once(b));
        assert!(storage.mark_once(a));
        storage.unmark_all(b);
        assert!(!storage.is_marked(a));
        assert!(!storage.is_marked(b));
    }
}
