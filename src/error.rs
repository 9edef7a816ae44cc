//! Error types for the harness and the scheme boundary.

use thiserror::Error;

/// Failure reported by a scheme context.
///
/// Everything behind the [`crate::scheme::SchemeContext`] boundary is opaque
/// to the harness, so scheme failures surface through this one type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// The scheme rejected its configuration parameters.
    #[error("scheme rejected parameters: {0}")]
    BadParams(String),

    /// Two ciphertexts with different slot counts were combined.
    #[error("slot count mismatch: {left} vs {right}")]
    SlotCountMismatch {
        /// Slot count of the left operand.
        left: usize,
        /// Slot count of the right operand.
        right: usize,
    },

    /// The multiplicative depth budget was exhausted.
    #[error("depth budget exhausted: level {level} exceeds budget {budget}")]
    DepthExceeded {
        /// Depth level the operation would have reached.
        level: u32,
        /// Configured budget.
        budget: u32,
    },

    /// Decryption produced no slots.
    #[error("decryption produced an empty vector")]
    EmptyDecryption,
}

/// Run-level harness failure.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Both or neither of the exclusive fixture-mode flags were given.
    #[error("exactly one of the fixed/random fixture modes must be selected")]
    InvalidMode,

    /// The oracle was handed vectors of unequal length.
    #[error("operand length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// A scheme failure that corrupted shared fixtures and aborted the run.
    #[error("scheme failure aborted the run: {0}")]
    Scheme(#[from] SchemeError),
}
