//! Per-label subkey derivation

use aes::{
    Aes128,
    cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray},
};
use zeroize::Zeroize;

use crate::types::{BLOCK_SIZE, Label, Seed};

/// Ephemeral 128-bit key for a single keystream.
///
/// Never exposed outside this crate and zeroized on drop.
pub(crate) struct Subkey([u8; BLOCK_SIZE]);

impl Subkey {
    pub(crate) fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

impl Drop for Subkey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Derive the subkey for `(name, label)` under `seed`.
///
/// `AES(seed, AES(seed, label) ⊕ name)`. Only the first 16 bytes of `name`
/// take part; a shorter name leaves the trailing block bytes untouched.
pub(crate) fn derive_subkey(seed: &Seed, name: &[u8], label: &Label) -> Subkey {
    let cipher = Aes128::new(GenericArray::from_slice(seed.as_bytes()));

    let mut block = GenericArray::clone_from_slice(label.as_bytes());
    cipher.encrypt_block(&mut block);

    for (byte, mask) in block.iter_mut().zip(name) {
        *byte ^= mask;
    }

    cipher.encrypt_block(&mut block);

    let mut subkey = [0u8; BLOCK_SIZE];
    subkey.copy_from_slice(&block);
    block.as_mut_slice().zeroize();

    Subkey(subkey)
}
