//! Counter-mode keystream over an all-zero input
//!
//! The keystream is the AES-CTR encryption of an unbounded run of zero bytes,
//! which is exactly the raw CTR keystream. Using an off-the-shelf CTR
//! implementation keeps the byte source a standard construction instead of a
//! bespoke CSPRNG.

use std::{fmt, io};

use aes::{
    Aes128,
    cipher::{KeyIvInit, StreamCipher, generic_array::GenericArray},
};
use rand_core::{CryptoRng, RngCore};

use crate::{
    subkey::derive_subkey,
    types::{Label, Seed},
};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Plaintext source for the keystream: an endless supply of zero bytes.
///
/// Encrypting its output under CTR mode leaves the pure keystream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroSource;

impl ZeroSource {
    /// Overwrite `dest` with zeros.
    pub fn fill(self, dest: &mut [u8]) {
        dest.fill(0);
    }
}

/// Lazily produced, effectively unbounded pseudorandom byte sequence.
///
/// Each call to [`keystream`] yields a fresh stream positioned at its start;
/// a stream cannot be rewound.
pub struct Keystream {
    cipher: Aes128Ctr,
    input: ZeroSource,
    position: u64,
}

impl Keystream {
    /// Fill `dest` with the next `dest.len()` keystream bytes.
    pub fn fill(&mut self, dest: &mut [u8]) {
        self.input.fill(dest);
        self.cipher.apply_keystream(dest);
        self.position += dest.len() as u64;
    }

    /// Next single keystream byte.
    pub fn next_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.fill(&mut byte);
        byte[0]
    }

    /// Next `len` keystream bytes as a vector.
    pub fn take_bytes(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.fill(&mut out);
        out
    }

    /// Number of bytes produced so far.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl fmt::Debug for Keystream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keystream").field("position", &self.position).finish_non_exhaustive()
    }
}

impl io::Read for Keystream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fill(buf);
        Ok(buf.len())
    }
}

impl RngCore for Keystream {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest);
        Ok(())
    }
}

impl CryptoRng for Keystream {}

/// Open the keystream for `(name, label)` under `seed`.
///
/// The subkey for `(name, label)` keys AES-CTR and the label itself is the
/// initial counter block.
pub fn keystream(seed: &Seed, name: &[u8], label: &Label) -> Keystream {
    let subkey = derive_subkey(seed, name, label);
    let cipher = Aes128Ctr::new(
        GenericArray::from_slice(subkey.as_bytes()),
        GenericArray::from_slice(label.as_bytes()),
    );

    Keystream { cipher, input: ZeroSource, position: 0 }
}
