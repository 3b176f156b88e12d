//! Typed cache keys, one op-code enum per operation family.

use crate::reference::ZddId;
use crate::types::Var;
use crate::utils::{mix64, pairing3, MyHash};

/// Numeric tag folded into the key hash.
pub trait OpCode: Copy + Eq {
    fn code(self) -> u64;
}

/// Operations with one family operand and one variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    Subset0,
    Subset1,
    Change,
}

/// Core binary set algebra.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Union,
    Intersect,
    Diff,
}

impl BinaryOp {
    fn is_commutative(self) -> bool {
        matches!(self, BinaryOp::Union | BinaryOp::Intersect)
    }
}

/// Cube algebra: product and quotient.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnateOp {
    Mul,
    Div,
}

/// Care-set and dominance filters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ConstraintOp {
    Restrict,
    NoSupset,
    NoSubset,
}

/// Antichain extraction. Both are unary; the second operand is always `EMPTY`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GraphOp {
    MaxSet,
    MinSet,
}

impl OpCode for UnaryOp {
    fn code(self) -> u64 {
        self as u64
    }
}

impl OpCode for BinaryOp {
    fn code(self) -> u64 {
        self as u64
    }
}

impl OpCode for UnateOp {
    fn code(self) -> u64 {
        self as u64
    }
}

impl OpCode for ConstraintOp {
    fn code(self) -> u64 {
        self as u64
    }
}

impl OpCode for GraphOp {
    fn code(self) -> u64 {
        self as u64
    }
}

/// Key of the unary cache: `(op, f, var)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnaryKey {
    pub op: UnaryOp,
    pub f: ZddId,
    pub var: Var,
}

impl UnaryKey {
    pub fn new(op: UnaryOp, f: ZddId, var: Var) -> Self {
        Self { op, f, var }
    }
}

impl MyHash for UnaryKey {
    fn hash(&self) -> u64 {
        mix64(pairing3(self.f.packed(), self.var.index() as u64, self.op.code()))
    }
}

/// Key of a two-operand cache: `(op, f, g)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BinaryKey<O> {
    pub op: O,
    pub f: ZddId,
    pub g: ZddId,
}

impl<O: OpCode> BinaryKey<O> {
    pub fn new(op: O, f: ZddId, g: ZddId) -> Self {
        Self { op, f, g }
    }

    /// Key with operands put in canonical order, for operations that commute.
    pub fn symmetric(op: O, f: ZddId, g: ZddId) -> Self {
        if f.packed() <= g.packed() {
            Self::new(op, f, g)
        } else {
            Self::new(op, g, f)
        }
    }
}

impl BinaryKey<BinaryOp> {
    /// Key for a core binary operation, normalized when the operation commutes.
    pub fn algebra(op: BinaryOp, f: ZddId, g: ZddId) -> Self {
        if op.is_commutative() {
            Self::symmetric(op, f, g)
        } else {
            Self::new(op, f, g)
        }
    }
}

impl<O: OpCode> MyHash for BinaryKey<O> {
    fn hash(&self) -> u64 {
        mix64(pairing3(self.f.packed(), self.g.packed(), self.op.code()))
    }
}
