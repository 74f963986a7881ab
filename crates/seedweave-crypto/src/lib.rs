//! Seedweave Cryptographic Primitives
//!
//! Deterministic byte sources keyed by a single secret seed. Every value a
//! construction needs (permutations, matrices, integer sequences) is drawn
//! from a keystream that is a pure function of `(seed, name, label)`, so a
//! construction can be regenerated byte-for-byte from the seed alone.
//!
//! # Derivation
//!
//! ```text
//! Seed (16 bytes)          Label (16 bytes)
//!        │                        │
//!        ▼                        │
//! AES(seed, label) ⊕ name         │
//!        │                        │
//!        ▼                        │
//! AES(seed, ·) → Subkey           │
//!        │                        ▼
//!        └──────► AES-CTR(subkey, iv = label)
//!                         │
//!                         ▼
//!              encrypt(ZeroSource) → Keystream
//! ```
//!
//! # Security
//!
//! Stream Independence:
//! - The two-pass subkey derivation acts as a keyed PRF over `(name, label)`
//! - Distinct labels (in their first 16 bytes) yield unrelated subkeys
//! - Distinct generator names sharing a seed yield unrelated subkeys
//!
//! Key Handling:
//! - The seed and every subkey are zeroized on drop
//! - Subkeys never leave this crate
//!
//! Limitations:
//! - Labels are truncated to one AES block; labels agreeing on their first 16
//!   bytes derive the same stream
//! - Names longer than 16 bytes only contribute their first 16 bytes

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod keystream;
mod subkey;
mod types;

pub use error::CryptoError;
pub use keystream::{Keystream, ZeroSource, keystream};
pub use types::{BLOCK_SIZE, Label, Seed};
