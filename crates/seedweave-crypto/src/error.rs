//! Error types for seed handling

use thiserror::Error;

/// Errors from cryptographic setup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Seed material is not exactly one AES-128 key long
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required key length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
}

impl CryptoError {
    /// Returns true if this error is fatal (unrecoverable)
    ///
    /// Configuration errors are detected before any derivation happens and
    /// retrying with the same input can never succeed.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidKeyLength { .. } => true,
        }
    }
}
