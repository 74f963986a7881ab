//! Byte sources feeding the generators.
//!
//! [`StreamSource`] is the seam between the generator and the keystream: the
//! generator only ever asks for "a fresh stream for this label". Production
//! code uses [`AesCtrSource`]; tests can substitute an instrumented source to
//! observe how often streams are derived.

use seedweave_crypto::{CryptoError, Keystream, Label, Seed, keystream};

/// A sequential supply of pseudorandom bytes.
pub trait ByteStream {
    /// Fill `dest` with the next bytes of the stream.
    fn fill(&mut self, dest: &mut [u8]);

    /// Next single byte of the stream.
    fn next_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.fill(&mut byte);
        byte[0]
    }
}

impl ByteStream for Keystream {
    fn fill(&mut self, dest: &mut [u8]) {
        Keystream::fill(self, dest);
    }
}

/// Opens a fresh, deterministic stream per label.
///
/// # Invariants
///
/// - Two calls with the same label return streams producing identical bytes
/// - Streams for labels differing in their first 16 bytes are independent
pub trait StreamSource {
    /// Stream type produced for each label.
    type Stream: ByteStream;

    /// Open a new stream positioned at its start.
    fn stream(&self, label: &Label) -> Self::Stream;
}

/// AES-CTR keystreams keyed by `(seed, name)`.
#[derive(Debug, Clone)]
pub struct AesCtrSource {
    name: Vec<u8>,
    seed: Seed,
}

impl AesCtrSource {
    /// Create a source from a generator name and 16 bytes of seed material.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` if `seed` is not exactly 16 bytes
    pub fn new(name: impl Into<Vec<u8>>, seed: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self { name: name.into(), seed: Seed::from_slice(seed)? })
    }

    /// Create a source from an already validated seed.
    pub fn from_seed(name: impl Into<Vec<u8>>, seed: Seed) -> Self {
        Self { name: name.into(), seed }
    }

    /// Name bound into every derivation.
    pub fn name(&self) -> &[u8] {
        &self.name
    }
}

impl StreamSource for AesCtrSource {
    type Stream = Keystream;

    fn stream(&self, label: &Label) -> Keystream {
        keystream(&self.seed, &self.name, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_matches_direct_keystream() {
        let source = AesCtrSource::new("test", &[0u8; 16]).unwrap();
        let label = Label::new(b"m1");

        let mut via_source = source.stream(&label);
        let mut buf = [0u8; 40];
        ByteStream::fill(&mut via_source, &mut buf);

        let direct = keystream(&Seed::new([0u8; 16]), b"test", &label).take_bytes(40);
        assert_eq!(buf.to_vec(), direct);
    }

    #[test]
    fn next_byte_advances_stream() {
        let source = AesCtrSource::new("test", &[0u8; 16]).unwrap();
        let label = Label::new(b"bytes");

        let mut stream = source.stream(&label);
        let bytes: Vec<u8> = (0..8).map(|_| ByteStream::next_byte(&mut stream)).collect();

        let direct = keystream(&Seed::new([0u8; 16]), b"test", &label).take_bytes(8);
        assert_eq!(bytes, direct);
    }

    #[test]
    fn wrong_seed_length_rejected() {
        let err = AesCtrSource::new("test", &[0u8; 24]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidKeyLength { expected: 16, actual: 24 });
    }

    #[test]
    fn name_is_kept() {
        let source = AesCtrSource::from_seed("gen-a", Seed::new([1u8; 16]));
        assert_eq!(source.name(), b"gen-a");
    }
}
