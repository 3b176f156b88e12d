//! Per-variable unique table with intrusive hashing.
//!
//! Each variable owns one subtable keyed by `(lo, hi)`; the variable itself is
//! implicit. Collision chains are threaded through [`ZddNode::next`], and the
//! `buckets` array holds the head of each chain.

use log::debug;

use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::types::Var;

/// Initial number of bucket bits (2^6 = 64 buckets per variable).
pub const DEFAULT_BUCKET_BITS: usize = 6;

/// Chains are allowed to average this many nodes before the bucket array doubles.
const MAX_LOAD: usize = 2;

/// A subtable storing the nodes of a single variable.
#[derive(Debug, Clone)]
pub struct Subtable {
    /// The variable for all nodes in this subtable.
    pub variable: Var,

    /// Bucket array: each entry is the head of a collision chain,
    /// `ZddNode::NO_NEXT` for an empty bucket.
    buckets: Vec<u32>,

    /// `bucket_index = hash & bitmask`.
    bitmask: u64,

    /// Number of nodes in this subtable.
    count: usize,
}

impl Subtable {
    /// Create a new empty subtable for the given variable.
    pub fn new(variable: Var) -> Self {
        Self::with_bucket_bits(variable, DEFAULT_BUCKET_BITS)
    }

    /// Create a new subtable with `2^bits` buckets.
    pub fn with_bucket_bits(variable: Var, bits: usize) -> Self {
        let num_buckets = 1 << bits;
        Self {
            variable,
            buckets: vec![ZddNode::NO_NEXT; num_buckets],
            bitmask: (num_buckets - 1) as u64,
            count: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, lo: ZddId, hi: ZddId) -> usize {
        (hash_children(lo, hi) & self.bitmask) as usize
    }

    /// Look up a node by its children.
    pub fn find(&self, lo: ZddId, hi: ZddId, nodes: &[ZddNode]) -> Option<u32> {
        let mut current = self.buckets[self.bucket_index(lo, hi)];
        while current != ZddNode::NO_NEXT {
            let node = &nodes[current as usize];
            if node.lo == lo && node.hi == hi {
                return Some(current);
            }
            current = node.next;
        }
        None
    }

    /// Link the node stored at `index` into its chain.
    ///
    /// The node's `lo`/`hi` must already be written to the slot.
    pub fn insert(&mut self, index: u32, nodes: &mut [ZddNode]) {
        let node = nodes[index as usize];
        let bucket = self.bucket_index(node.lo, node.hi);
        nodes[index as usize].next = self.buckets[bucket];
        self.buckets[bucket] = index;
        self.count += 1;

        if self.count > MAX_LOAD * self.buckets.len() {
            self.resize(nodes);
        }
    }

    /// Double the bucket array and relink every chain.
    fn resize(&mut self, nodes: &mut [ZddNode]) {
        let mut members = Vec::with_capacity(self.count);
        for &head in &self.buckets {
            let mut current = head;
            while current != ZddNode::NO_NEXT {
                members.push(current);
                current = nodes[current as usize].next;
            }
        }

        let num_buckets = self.buckets.len() * 2;
        debug!(
            "subtable {}: resize to {} buckets ({} nodes)",
            self.variable, num_buckets, self.count
        );
        self.buckets = vec![ZddNode::NO_NEXT; num_buckets];
        self.bitmask = (num_buckets - 1) as u64;
        self.count = 0;
        for index in members {
            let node = nodes[index as usize];
            let bucket = self.bucket_index(node.lo, node.hi);
            nodes[index as usize].next = self.buckets[bucket];
            self.buckets[bucket] = index;
            self.count += 1;
        }
    }

    /// Number of nodes in this subtable.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the subtable is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Drop all chains; used before the post-sweep rehash.
    pub fn clear(&mut self) {
        self.buckets.fill(ZddNode::NO_NEXT);
        self.count = 0;
    }
}

/// Hash function for (lo, hi) children.
#[inline]
fn hash_children(lo: ZddId, hi: ZddId) -> u64 {
    // FNV-1a inspired mixing
    let mut h = 14695981039346656037u64;
    h ^= lo.packed();
    h = h.wrapping_mul(1099511628211);
    h ^= hi.packed();
    h = h.wrapping_mul(1099511628211);
    h ^ (h >> 29)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(var: Var, lo: ZddId, hi: ZddId) -> ZddNode {
        let mut node = ZddNode::free(ZddNode::NO_NEXT, 0);
        node.var = var;
        node.lo = lo;
        node.hi = hi;
        node.live = true;
        node
    }

    #[test]
    fn test_subtable_basic() {
        let v = Var::new(0);
        let mut nodes = vec![ZddNode::terminal(), ZddNode::terminal()];
        nodes.push(slot(v, ZddId::EMPTY, ZddId::BASE));
        let mut subtable = Subtable::new(v);

        subtable.insert(2, &mut nodes);
        assert_eq!(subtable.len(), 1);
        assert_eq!(subtable.find(ZddId::EMPTY, ZddId::BASE, &nodes), Some(2));
        assert_eq!(subtable.find(ZddId::BASE, ZddId::BASE, &nodes), None);

        subtable.clear();
        assert!(subtable.is_empty());
        assert_eq!(subtable.find(ZddId::EMPTY, ZddId::BASE, &nodes), None);
    }

    #[test]
    fn test_subtable_resize_keeps_members() {
        let v = Var::new(5);
        let mut subtable = Subtable::with_bucket_bits(v, 1);
        let mut nodes = vec![ZddNode::terminal(), ZddNode::terminal()];

        // Distinct (lo, hi) pairs: lo ranges over fake handles.
        for i in 0..40u32 {
            nodes.push(slot(v, ZddId::new(100 + i, 0), ZddId::BASE));
            subtable.insert(i + 2, &mut nodes);
        }
        assert_eq!(subtable.len(), 40);
        assert!(subtable.num_buckets() > 2);
        for i in 0..40u32 {
            let found = subtable.find(ZddId::new(100 + i, 0), ZddId::BASE, &nodes);
            assert_eq!(found, Some(i + 2));
        }
    }
}
