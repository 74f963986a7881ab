//! Seedweave Deterministic Generator
//!
//! A [`RandomSource`] turns one secret seed into every random parameter a
//! construction needs: byte permutations, invertible GF(2) matrices, and
//! integer sequences with an exact sum. Each value is a pure function of
//! `(seed, name, label, parameters)`, so a construction can be regenerated
//! without storing anything but the seed.
//!
//! # Architecture
//!
//! ```text
//! seedweave_crypto::keystream
//!        │
//!        ▼
//! StreamSource (AesCtrSource in production)
//!        │
//!        ├──► shuffle(label)            ─► LabelCache<Shuffle>
//!        ├──► matrix(label, size)       ─► LabelCache<Matrix>
//!        └──► dirichlet(label, n, sum)  ─► monotone(label, n, max)
//! ```
//!
//! # Caching
//!
//! Shuffles and matrices are cached per 16-byte [`Label`] for the lifetime of
//! the generator. The cache only affects performance, never the value
//! returned. Sequences are recomputed on every call.
//!
//! # Concurrency
//!
//! Generators are plain owned values with no internal locking. Callers sharing
//! one across threads wrap it in a `Mutex` so the cache check and insert for a
//! label happen under one guard.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cache;
pub mod encoding;
pub mod error;
pub mod generator;
pub mod matrix;
pub mod sampler;
pub mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cache::LabelCache;
pub use encoding::{SHUFFLE_SIZE, Shuffle};
pub use error::RandomError;
pub use generator::RandomSource;
pub use matrix::Matrix;
pub use seedweave_crypto::{Label, Seed};
pub use source::{AesCtrSource, ByteStream, StreamSource};
