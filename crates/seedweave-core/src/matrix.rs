//! Square matrices over GF(2).
//!
//! Row `i` is packed little-endian into `ceil(size / 8)` bytes: column `j` is
//! bit `j % 8` of byte `j / 8`. Padding bits past `size` are always zero.
//! Vectors use the same packing.

use crate::{error::RandomError, source::ByteStream};

/// A `size x size` matrix over GF(2), representing a linear map on
/// `size`-bit vectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    rows: Vec<Vec<u8>>,
}

impl Matrix {
    /// The identity map on `size`-bit vectors.
    pub fn identity(size: usize) -> Self {
        let mut rows = vec![vec![0u8; row_bytes(size)]; size];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i / 8] |= 1 << (i % 8);
        }
        Self { size, rows }
    }

    /// Build a matrix from packed rows.
    ///
    /// # Errors
    ///
    /// - `InvalidMatrix` if there are not `size` rows of `ceil(size / 8)`
    ///   bytes, or a row sets a padding bit
    pub fn from_rows(size: usize, rows: Vec<Vec<u8>>) -> Result<Self, RandomError> {
        if rows.len() != size {
            return Err(RandomError::InvalidMatrix {
                reason: format!("expected {size} rows, got {}", rows.len()),
            });
        }

        let width = row_bytes(size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RandomError::InvalidMatrix {
                    reason: format!("row {i} has {} bytes, expected {width}", row.len()),
                });
            }
            if row.last().is_some_and(|&last| last & !padding_mask(size) != 0) {
                return Err(RandomError::InvalidMatrix {
                    reason: format!("row {i} sets bits past column {size}"),
                });
            }
        }

        Ok(Self { size, rows })
    }

    /// Draw random matrices from `stream` until one is invertible.
    ///
    /// Each candidate consumes `size * ceil(size / 8)` bytes, one row at a
    /// time. Roughly 29% of uniformly random matrices are invertible, so the
    /// expected number of candidates is below four.
    pub fn generate<B: ByteStream>(stream: &mut B, size: usize) -> Self {
        let width = row_bytes(size);
        let mask = padding_mask(size);
        let mut rejected = 0u64;

        loop {
            let mut rows = vec![vec![0u8; width]; size];
            for row in &mut rows {
                stream.fill(row);
                if let Some(last) = row.last_mut() {
                    *last &= mask;
                }
            }

            let candidate = Self { size, rows };
            if candidate.is_invertible() {
                tracing::trace!(size, rejected, "sampled invertible matrix");
                return candidate;
            }
            rejected += 1;
        }
    }

    /// Dimension of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Packed row `i`.
    pub fn row(&self, i: usize) -> &[u8] {
        &self.rows[i]
    }

    /// Entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> bool {
        bit(&self.rows[i], j)
    }

    /// Apply the map to a packed `size`-bit vector.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if `vector` is not `ceil(size / 8)` bytes
    pub fn mul(&self, vector: &[u8]) -> Result<Vec<u8>, RandomError> {
        let width = row_bytes(self.size);
        if vector.len() != width {
            return Err(RandomError::DimensionMismatch { expected: width, actual: vector.len() });
        }

        let mut out = vec![0u8; width];
        for (i, row) in self.rows.iter().enumerate() {
            let parity =
                row.iter().zip(vector).fold(0u32, |acc, (a, b)| acc ^ (a & b).count_ones());
            if parity & 1 == 1 {
                out[i / 8] |= 1 << (i % 8);
            }
        }

        Ok(out)
    }

    /// The product `self * other`, i.e. the map applying `other` first.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the sizes differ
    pub fn compose(&self, other: &Self) -> Result<Self, RandomError> {
        if self.size != other.size {
            return Err(RandomError::DimensionMismatch { expected: self.size, actual: other.size });
        }

        let width = row_bytes(self.size);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = vec![0u8; width];
                for k in (0..self.size).filter(|&k| bit(row, k)) {
                    xor_into(&mut out, &other.rows[k]);
                }
                out
            })
            .collect();

        Ok(Self { size: self.size, rows })
    }

    /// Inverse map, or `None` if the matrix is singular.
    ///
    /// Gauss-Jordan elimination on `[self | I]`.
    pub fn invert(&self) -> Option<Self> {
        let mut work = self.rows.clone();
        let mut inverse = Self::identity(self.size).rows;

        for col in 0..self.size {
            let pivot = (col..self.size).find(|&r| bit(&work[r], col))?;
            work.swap(col, pivot);
            inverse.swap(col, pivot);

            let (pivot_work, pivot_inverse) = (work[col].clone(), inverse[col].clone());
            for r in (0..self.size).filter(|&r| r != col) {
                if bit(&work[r], col) {
                    xor_into(&mut work[r], &pivot_work);
                    xor_into(&mut inverse[r], &pivot_inverse);
                }
            }
        }

        Some(Self { size: self.size, rows: inverse })
    }

    /// Whether the matrix has full rank over GF(2).
    pub fn is_invertible(&self) -> bool {
        let mut work = self.rows.clone();

        for col in 0..self.size {
            let Some(pivot) = (col..self.size).find(|&r| bit(&work[r], col)) else {
                return false;
            };
            work.swap(col, pivot);

            let pivot_row = work[col].clone();
            for row in work.iter_mut().skip(col + 1) {
                if bit(row, col) {
                    xor_into(row, &pivot_row);
                }
            }
        }

        true
    }
}

fn row_bytes(size: usize) -> usize {
    size.div_ceil(8)
}

/// Mask of the valid bits in the last byte of a row.
fn padding_mask(size: usize) -> u8 {
    match size % 8 {
        0 => 0xFF,
        used => (1u8 << used) - 1,
    }
}

fn bit(row: &[u8], j: usize) -> bool {
    (row[j / 8] >> (j % 8)) & 1 == 1
}

fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}
