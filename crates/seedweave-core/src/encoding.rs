//! Nibble shuffles: bijections on {0, ..., 15}.
//!
//! Generated with a Fisher-Yates shuffle driven by stream bytes. Each swap
//! index is drawn by rejection sampling so every one of the 16! permutations
//! is equally likely.

use crate::{error::RandomError, source::ByteStream};

/// Size of the shuffle domain.
pub const SHUFFLE_SIZE: usize = 16;

/// A permutation of `{0, ..., 15}` with its inverse precomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shuffle {
    forward: [u8; SHUFFLE_SIZE],
    inverse: [u8; SHUFFLE_SIZE],
}

impl Shuffle {
    /// The identity permutation.
    pub fn identity() -> Self {
        let mut table = [0u8; SHUFFLE_SIZE];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { forward: table, inverse: table }
    }

    /// Build a shuffle from its forward table.
    ///
    /// # Errors
    ///
    /// - `InvalidShuffle` if `table` is not a bijection on `{0, ..., 15}`
    pub fn from_array(table: [u8; SHUFFLE_SIZE]) -> Result<Self, RandomError> {
        let mut inverse = [0u8; SHUFFLE_SIZE];
        let mut seen = [false; SHUFFLE_SIZE];

        for (i, &value) in table.iter().enumerate() {
            let index = usize::from(value);
            if index >= SHUFFLE_SIZE {
                return Err(RandomError::InvalidShuffle {
                    reason: format!("value {value} at position {i} is out of range"),
                });
            }
            if seen[index] {
                return Err(RandomError::InvalidShuffle {
                    reason: format!("value {value} appears more than once"),
                });
            }
            seen[index] = true;
            inverse[index] = i as u8;
        }

        Ok(Self { forward: table, inverse })
    }

    /// Draw a uniformly random shuffle from `stream`.
    pub fn generate<B: ByteStream>(stream: &mut B) -> Self {
        let mut table = Self::identity().forward;

        for i in (1..SHUFFLE_SIZE).rev() {
            let j = next_index(stream, i + 1);
            table.swap(i, j);
        }

        let mut inverse = [0u8; SHUFFLE_SIZE];
        for (i, &value) in table.iter().enumerate() {
            inverse[usize::from(value)] = i as u8;
        }

        Self { forward: table, inverse }
    }

    /// Image of `i` under the permutation. Only the low nibble of `i` is used.
    pub fn encode(&self, i: u8) -> u8 {
        self.forward[usize::from(i & 0x0F)]
    }

    /// Preimage of `i` under the permutation. Only the low nibble of `i` is
    /// used.
    pub fn decode(&self, i: u8) -> u8 {
        self.inverse[usize::from(i & 0x0F)]
    }

    /// The inverse permutation.
    pub fn inverse(&self) -> Self {
        Self { forward: self.inverse, inverse: self.forward }
    }

    /// Forward table: position `i` holds the image of `i`.
    pub fn as_array(&self) -> &[u8; SHUFFLE_SIZE] {
        &self.forward
    }
}

impl Default for Shuffle {
    fn default() -> Self {
        Self::identity()
    }
}

/// Uniform index in `[0, n)` for `n <= 256`, rejecting bytes that would bias
/// the modulo.
fn next_index<B: ByteStream>(stream: &mut B, n: usize) -> usize {
    debug_assert!(n > 0 && n <= 256, "n must be in range (0, 256]");

    let limit = 256 - 256 % n;
    loop {
        let byte = usize::from(stream.next_byte());
        if byte < limit {
            return byte % n;
        }
    }
}
