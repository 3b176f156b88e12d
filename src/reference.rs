use std::fmt::{Display, Formatter};

/// A handle to a ZDD node.
///
/// A handle is a slot index in the node arena plus the generation of that
/// slot at the time the node was created. Slots are reused after garbage
/// collection; the generation lets debug builds detect a handle that
/// outlived its node.
///
/// # Terminal Values
///
/// - `ZddId::EMPTY` (⊥): the empty family, with no sets
/// - `ZddId::BASE` (⊤): the family {∅} holding only the empty set
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ZddId {
    index: u32,
    generation: u32,
}

impl ZddId {
    /// Empty family (⊥): contains no sets.
    pub const EMPTY: ZddId = ZddId::new(0, 0);

    /// Family containing only the empty set (⊤): {∅}.
    pub const BASE: ZddId = ZddId::new(1, 0);

    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        ZddId { index, generation }
    }

    /// Returns the raw slot index.
    pub const fn raw(self) -> u32 {
        self.index
    }

    /// Returns the slot index for array access.
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the generation of the slot this handle was issued for.
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Returns true if this is a terminal (EMPTY or BASE).
    pub const fn is_terminal(self) -> bool {
        self.index <= 1
    }

    /// Returns true if this is the empty family.
    pub const fn is_empty(self) -> bool {
        self.index == 0
    }

    /// Returns true if this is the {∅} family.
    pub const fn is_base(self) -> bool {
        self.index == 1
    }

    /// Packs the handle into a single word, used for hashing.
    pub(crate) const fn packed(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }
}

impl Display for ZddId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.index {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "#{}", self.index),
        }
    }
}
