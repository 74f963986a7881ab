//! The seed-keyed generator and its cached derivations.

use seedweave_crypto::{Label, Seed};

use crate::{
    cache::LabelCache,
    encoding::Shuffle,
    error::RandomError,
    matrix::Matrix,
    source::{AesCtrSource, StreamSource},
};

/// Deterministic generator of construction parameters.
///
/// For a fixed source (seed and name), every value returned is a pure
/// function of the label and the requested shape. Shuffles and matrices are
/// cached per 16-byte [`Label`]; the caches change cost, never results.
///
/// # Invariants
///
/// - The first call for a label derives from a fresh stream; later calls
///   return the cached value without touching the stream source
/// - Labels agreeing on their first 16 bytes share cache entries
/// - The matrix cache is keyed by label only: asking for a different size
///   under a cached label returns the cached matrix unchanged
#[derive(Debug)]
pub struct RandomSource<S = AesCtrSource> {
    source: S,
    shuffles: LabelCache<Shuffle>,
    matrices: LabelCache<Matrix>,
}

impl RandomSource<AesCtrSource> {
    /// Create a generator from a name and 16 bytes of seed material.
    ///
    /// # Errors
    ///
    /// - `Crypto(InvalidKeyLength)` if `seed` is not exactly 16 bytes
    pub fn new(name: impl Into<Vec<u8>>, seed: &[u8]) -> Result<Self, RandomError> {
        Ok(Self::with_source(AesCtrSource::new(name, seed)?))
    }

    /// Create a generator from an already validated seed.
    pub fn from_seed(name: impl Into<Vec<u8>>, seed: Seed) -> Self {
        Self::with_source(AesCtrSource::from_seed(name, seed))
    }

    /// Name bound into every derivation.
    pub fn name(&self) -> &[u8] {
        self.source.name()
    }
}

impl<S: StreamSource> RandomSource<S> {
    /// Create a generator over an arbitrary stream source.
    pub fn with_source(source: S) -> Self {
        Self { source, shuffles: LabelCache::new(), matrices: LabelCache::new() }
    }

    /// The underlying stream source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fresh stream for `label`, positioned at its start.
    ///
    /// Never cached: every call opens a new stream.
    pub fn stream(&self, label: &[u8]) -> S::Stream {
        self.source.stream(&Label::new(label))
    }

    /// Uniformly random permutation of `{0, ..., 15}` for `label`.
    pub fn shuffle(&mut self, label: &[u8]) -> Shuffle {
        let key = Label::new(label);

        if let Some(cached) = self.shuffles.get(&key) {
            tracing::trace!(label = %key, "shuffle cache hit");
            return *cached;
        }

        tracing::debug!(label = %key, "deriving shuffle");
        let shuffle = Shuffle::generate(&mut self.source.stream(&key));
        self.shuffles.insert(key, shuffle);
        shuffle
    }

    /// Random invertible `size x size` matrix over GF(2) for `label`.
    ///
    /// The size is only consulted on a cache miss.
    pub fn matrix(&mut self, label: &[u8], size: usize) -> Matrix {
        let key = Label::new(label);

        if let Some(cached) = self.matrices.get(&key) {
            if cached.size() != size {
                tracing::warn!(
                    label = %key,
                    cached = cached.size(),
                    requested = size,
                    "matrix cache hit with different size"
                );
            } else {
                tracing::trace!(label = %key, size, "matrix cache hit");
            }
            return cached.clone();
        }

        tracing::debug!(label = %key, size, "deriving matrix");
        let matrix = Matrix::generate(&mut self.source.stream(&key), size);
        self.matrices.insert(key, matrix.clone());
        matrix
    }

    /// Number of labels with a cached shuffle.
    pub fn cached_shuffles(&self) -> usize {
        self.shuffles.len()
    }

    /// Number of labels with a cached matrix.
    pub fn cached_matrices(&self) -> usize {
        self.matrices.len()
    }

    /// Forget every cached shuffle and matrix.
    ///
    /// Later calls re-derive identical values.
    pub fn clear_caches(&mut self) {
        self.shuffles.clear();
        self.matrices.clear();
    }
}
