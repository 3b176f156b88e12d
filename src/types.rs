//! Type-safe wrapper for ZDD variables.
//!
//! Variables are densely numbered from 0 in creation order. The most
//! recently created variable sits closest to the root, so a larger index
//! means a position *higher* in every diagram.
use std::fmt;

/// A variable identifier (0-indexed).
///
/// Obtained from [`ZddManager::new_var`](crate::zdd::ZddManager::new_var).
/// A `Var` built with [`Var::from_index`] is validated by every public
/// operation that accepts it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    pub(crate) const fn new(index: u32) -> Self {
        Var(index)
    }

    /// Names a variable by its raw index.
    ///
    /// The index is not checked here: operations taking a `Var` report
    /// [`ZddError::InvalidVariable`](crate::error::ZddError::InvalidVariable)
    /// when it does not name a created variable.
    pub const fn from_index(index: u32) -> Self {
        Var(index)
    }

    /// Returns the raw variable index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Height of nodes labelled with this variable (terminals have height 0).
    pub(crate) const fn height(self) -> u32 {
        self.0 + 1
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

impl From<Var> for usize {
    fn from(var: Var) -> Self {
        var.0 as usize
    }
}
