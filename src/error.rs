//! Error type for ZDD operations.

use thiserror::Error;

/// Errors reported at the public API boundary.
///
/// Recursive internals never fail: arguments are validated once on entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZddError {
    /// A variable index that does not name a created variable.
    #[error("invalid variable v{var}: manager has {num_vars} variables")]
    InvalidVariable { var: u32, num_vars: usize },

    /// A malformed cube description.
    #[error("invalid cube {input:?}: {reason}")]
    InvalidCube { input: String, reason: String },

    /// A child passed to `make` does not sit strictly below the new node.
    #[error("child labelled v{child_var} cannot sit below a v{var} node")]
    MisorderedChildren { var: u32, child_var: u32 },

    /// The node arena reached its configured ceiling.
    ///
    /// Raised as a panic: no operation can make progress without arena capacity.
    #[error("node arena exhausted: {capacity} slots in use, limit is {max_nodes}")]
    ArenaExhausted { capacity: usize, max_nodes: usize },
}

/// Result type for ZDD operations.
pub type Result<T> = std::result::Result<T, ZddError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ZddError::InvalidVariable { var: 7, num_vars: 4 };
        assert_eq!(e.to_string(), "invalid variable v7: manager has 4 variables");

        let e = ZddError::InvalidCube {
            input: "10x".to_string(),
            reason: "unexpected character 'x'".to_string(),
        };
        assert_eq!(e.to_string(), "invalid cube \"10x\": unexpected character 'x'");

        let e = ZddError::MisorderedChildren { var: 0, child_var: 1 };
        assert_eq!(e.to_string(), "child labelled v1 cannot sit below a v0 node");

        let e = ZddError::ArenaExhausted { capacity: 64, max_nodes: 64 };
        assert_eq!(e.to_string(), "node arena exhausted: 64 slots in use, limit is 64");
    }
}
