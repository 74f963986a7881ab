//! Error types for generator operations

use seedweave_crypto::CryptoError;
use thiserror::Error;

/// Errors from generator operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// Seed or key setup failed
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A zero-length sequence was asked to sum to a nonzero target
    #[error("cannot sample zero variables summing to {sum}")]
    EmptyDistribution {
        /// Requested target sum
        sum: usize,
    },

    /// Table is not a bijection on the shuffle domain
    #[error("invalid shuffle: {reason}")]
    InvalidShuffle {
        /// Why the table was rejected
        reason: String,
    },

    /// Row data does not describe a square matrix of the stated size
    #[error("invalid matrix: {reason}")]
    InvalidMatrix {
        /// Why the rows were rejected
        reason: String,
    },

    /// Operand length does not match the matrix dimension
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Length the matrix requires
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
}

impl RandomError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Fatal errors are configuration mistakes or violated preconditions in
    /// the calling code. The rest reject malformed caller input and succeed
    /// once the input is corrected.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Crypto(err) => err.is_fatal(),
            Self::EmptyDistribution { .. } => true,

            Self::InvalidShuffle { .. } => false,
            Self::InvalidMatrix { .. } => false,
            Self::DimensionMismatch { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_distribution_is_fatal() {
        let err = RandomError::EmptyDistribution { sum: 3 };
        assert!(err.is_fatal());
    }

    #[test]
    fn key_length_is_fatal() {
        let err: RandomError = CryptoError::InvalidKeyLength { expected: 16, actual: 8 }.into();
        assert!(err.is_fatal());
    }

    #[test]
    fn malformed_input_is_not_fatal() {
        assert!(!RandomError::InvalidShuffle { reason: "dup".to_string() }.is_fatal());
        assert!(!RandomError::DimensionMismatch { expected: 2, actual: 1 }.is_fatal());
    }

    #[test]
    fn error_display() {
        let err = RandomError::EmptyDistribution { sum: 7 };
        assert_eq!(err.to_string(), "cannot sample zero variables summing to 7");

        let err: RandomError = CryptoError::InvalidKeyLength { expected: 16, actual: 3 }.into();
        assert_eq!(err.to_string(), "invalid key length: expected 16, got 3");
    }
}
