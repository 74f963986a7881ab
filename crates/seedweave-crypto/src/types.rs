//! Seed and label types

use std::fmt;

use zeroize::Zeroize;

use crate::error::CryptoError;

/// AES block and key size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Secret 128-bit seed parameterizing every derivation of a generator.
///
/// Zeroized on drop. `Debug` never prints the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; BLOCK_SIZE]);

impl Seed {
    /// Wrap a fixed-size seed.
    pub fn new(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a seed from arbitrary key material.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` if `bytes` is not exactly 16 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let Ok(array) = <[u8; BLOCK_SIZE]>::try_from(bytes) else {
            return Err(CryptoError::InvalidKeyLength { expected: BLOCK_SIZE, actual: bytes.len() });
        };

        Ok(Self(array))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A caller-supplied label reduced to exactly one AES block.
///
/// Longer inputs are truncated and shorter inputs are zero padded, so two
/// labels that agree on their first 16 bytes are the same `Label`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Label([u8; BLOCK_SIZE]);

impl Label {
    /// Truncate or zero-pad `bytes` to a single block.
    pub fn new(bytes: &[u8]) -> Self {
        let mut block = [0u8; BLOCK_SIZE];
        let len = bytes.len().min(BLOCK_SIZE);
        block[..len].copy_from_slice(&bytes[..len]);
        Self(block)
    }

    /// The 16-byte block.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

impl From<[u8; BLOCK_SIZE]> for Label {
    fn from(block: [u8; BLOCK_SIZE]) -> Self {
        Self(block)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({self})")
    }
}
