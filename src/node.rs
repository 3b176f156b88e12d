use crate::reference::ZddId;
use crate::types::Var;

/// A slot of the node arena.
///
/// # Fields
///
/// - `var`: decision variable
/// - `lo`: sets NOT containing `var`
/// - `hi`: sets containing `var` (stored without `var`)
/// - `next`: next node in the unique-table chain, or next free slot
///
/// # Invariant
///
/// **Zero-suppression rule**: `hi` of a live node is NEVER `ZddId::EMPTY`.
///
/// # Semantics
///
/// ```text
/// F(node) = F(lo) ∪ {S ∪ {var} | S ∈ F(hi)}
/// ```
#[derive(Debug, Copy, Clone)]
pub struct ZddNode {
    pub var: Var,
    pub lo: ZddId,
    pub hi: ZddId,
    pub(crate) next: u32,
    pub(crate) refs: u32,
    pub(crate) generation: u32,
    pub(crate) marked: bool,
    pub(crate) live: bool,
}

impl ZddNode {
    /// End of a unique-table chain or of the free list.
    pub const NO_NEXT: u32 = u32::MAX;

    /// Variable stored in the terminal slots.
    pub const TERMINAL_VAR: Var = Var::new(u32::MAX);

    /// A reclaimed slot.
    pub(crate) const fn free(next: u32, generation: u32) -> Self {
        Self {
            var: Self::TERMINAL_VAR,
            lo: ZddId::EMPTY,
            hi: ZddId::EMPTY,
            next,
            refs: 0,
            generation,
            marked: false,
            live: false,
        }
    }

    /// One of the two terminal slots: permanently live, never collected.
    pub(crate) const fn terminal() -> Self {
        Self {
            var: Self::TERMINAL_VAR,
            lo: ZddId::EMPTY,
            hi: ZddId::EMPTY,
            next: Self::NO_NEXT,
            refs: u32::MAX,
            generation: 0,
            marked: false,
            live: true,
        }
    }

    /// Returns true if the slot holds `(var, lo, hi)`.
    #[inline]
    pub fn matches(&self, var: Var, lo: ZddId, hi: ZddId) -> bool {
        self.var == var && self.lo == lo && self.hi == hi
    }

    /// Number of external references held on this node.
    pub fn refs(&self) -> u32 {
        self.refs
    }
}
