//! Integer sequences with an exact sum, and monotone functions built on them.
//!
//! # Dirichlet Sampling
//!
//! A uniform Dirichlet draw is approximated by taking one stream byte per
//! variable as an unnormalized weight and scaling the weights to the target
//! sum with round-half-up integer division. Rounding errors compound, so the
//! scaled candidate only sometimes hits the target exactly; misses are
//! discarded and a fresh set of weights is drawn from the same continuing
//! stream.
//!
//! # Termination
//!
//! The retry loop is unbounded and terminates almost surely for well-shaped
//! requests. It is not guaranteed to terminate when the target is small
//! relative to the length (e.g. 64 variables summing to 3, where every scaled
//! weight rounds to zero). No retry cap is imposed because a cap would change
//! the output distribution.

use seedweave_crypto::Label;

use crate::{
    error::RandomError,
    generator::RandomSource,
    source::{ByteStream, StreamSource},
};

impl<S: StreamSource> RandomSource<S> {
    /// `length` non-negative integers summing exactly to `sum`.
    ///
    /// Deterministic per `(label, length, sum)`; never cached. A zero `sum`
    /// returns all zeros without drawing from the stream.
    ///
    /// # Errors
    ///
    /// - `EmptyDistribution` if `length == 0` and `sum != 0` (fatal)
    pub fn dirichlet(
        &self,
        label: &[u8],
        length: usize,
        sum: usize,
    ) -> Result<Vec<usize>, RandomError> {
        if length == 0 && sum != 0 {
            return Err(RandomError::EmptyDistribution { sum });
        }

        let mut out = vec![0usize; length];
        if sum == 0 {
            return Ok(out);
        }

        let key = Label::new(label);
        let mut stream = self.source().stream(&key);
        let mut weights = vec![0u8; length];
        let mut attempts = 0u64;

        loop {
            attempts += 1;
            stream.fill(&mut weights);

            if scale_weights(&weights, sum, &mut out) == Some(sum as u128) {
                tracing::debug!(label = %key, length, sum, attempts, "sampled dirichlet");
                return Ok(out);
            }

            tracing::trace!(label = %key, attempt = attempts, "rejected dirichlet candidate");
        }
    }

    /// Non-decreasing sequence of `length` integers ending at `max`.
    ///
    /// The prefix sum of [`dirichlet`](Self::dirichlet) with the same label;
    /// draws no randomness of its own.
    ///
    /// # Errors
    ///
    /// - `EmptyDistribution` if `length == 0` and `max != 0` (fatal)
    pub fn monotone(
        &self,
        label: &[u8],
        length: usize,
        max: usize,
    ) -> Result<Vec<usize>, RandomError> {
        let mut out = self.dirichlet(label, length, max)?;

        for i in 1..out.len() {
            out[i] += out[i - 1];
        }

        Ok(out)
    }
}

/// Scale `weights` to `sum` into `out`, returning the candidate total.
///
/// Each entry is `w * sum / total` rounded up when the remainder is at least
/// `total / 2`. Returns `None` when the weights are all zero or an entry does
/// not fit in `usize`; both count as a miss.
fn scale_weights(weights: &[u8], sum: usize, out: &mut [usize]) -> Option<u128> {
    let total: u128 = weights.iter().map(|&w| u128::from(w)).sum();
    if total == 0 {
        return None;
    }

    let target = sum as u128;
    let mut candidate = 0u128;

    for (slot, &weight) in out.iter_mut().zip(weights) {
        let scaled = u128::from(weight) * target;
        let mut value = scaled / total;
        if scaled % total >= total / 2 {
            value += 1;
        }

        *slot = usize::try_from(value).ok()?;
        candidate += value;
    }

    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::CountingSource;

    fn generator() -> RandomSource {
        RandomSource::new("test", &[0u8; 16]).unwrap()
    }

    #[test]
    fn scale_rounds_half_up() {
        // total = 4; 1 * 10 / 4 = 2 r 2 -> rounds up to 3; 3 * 10 / 4 = 7 r 2 -> 8
        let mut out = [0usize; 2];
        assert_eq!(scale_weights(&[1, 3], 10, &mut out), Some(11));
        assert_eq!(out, [3, 8]);
    }

    #[test]
    fn scale_exact_when_divisible() {
        let mut out = [0usize; 3];
        assert_eq!(scale_weights(&[1, 2, 1], 8, &mut out), Some(8));
        assert_eq!(out, [2, 4, 2]);
    }

    #[test]
    fn scale_rejects_all_zero_weights() {
        let mut out = [0usize; 4];
        assert_eq!(scale_weights(&[0, 0, 0, 0], 10, &mut out), None);
    }

    #[test]
    fn scale_handles_huge_targets() {
        let mut out = [0usize; 2];
        let total = scale_weights(&[255, 255], usize::MAX - 1, &mut out);
        assert_eq!(total, Some((usize::MAX - 1) as u128));
        assert_eq!(out, [usize::MAX / 2, usize::MAX / 2]);
    }

    #[test]
    fn dirichlet_sums_exactly() {
        let rs = generator();
        for (length, sum) in [(1, 1), (2, 1), (4, 100), (16, 255), (32, 10_000)] {
            let out = rs.dirichlet(b"sum", length, sum).unwrap();
            assert_eq!(out.len(), length);
            assert_eq!(out.iter().sum::<usize>(), sum, "length {length}, sum {sum}");
        }
    }

    #[test]
    fn dirichlet_zero_length_zero_sum_is_empty() {
        assert_eq!(generator().dirichlet(b"z", 0, 0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn dirichlet_zero_length_nonzero_sum_fails() {
        let err = generator().dirichlet(b"z", 0, 5).unwrap_err();
        assert_eq!(err, RandomError::EmptyDistribution { sum: 5 });
        assert!(err.is_fatal());
    }

    #[test]
    fn dirichlet_zero_sum_draws_nothing() {
        let rs = RandomSource::with_source(CountingSource::new("test", &[0u8; 16]).unwrap());

        assert_eq!(rs.dirichlet(b"z", 6, 0).unwrap(), vec![0; 6]);
        assert_eq!(rs.source().open_count(), 0);
    }

    #[test]
    fn dirichlet_opens_one_stream_per_call() {
        let rs = RandomSource::with_source(CountingSource::new("test", &[0u8; 16]).unwrap());

        let a = rs.dirichlet(b"d", 10, 1000).unwrap();
        let b = rs.dirichlet(b"d", 10, 1000).unwrap();

        assert_eq!(a, b);
        assert_eq!(rs.source().open_count(), 2, "sequences are never cached");
    }

    #[test]
    fn dirichlet_first_accepted_candidate_matches_stream() {
        let rs = generator();
        let out = rs.dirichlet(b"replay", 8, 500).unwrap();

        // Replay the stream by hand and take the first exact candidate.
        let mut stream = rs.stream(b"replay");
        let mut weights = [0u8; 8];
        let mut expected = [0usize; 8];
        loop {
            stream.fill(&mut weights);
            if scale_weights(&weights, 500, &mut expected) == Some(500) {
                break;
            }
        }

        assert_eq!(out, expected.to_vec());
    }

    #[test]
    fn monotone_is_prefix_sum_of_dirichlet() {
        let rs = generator();
        let dirichlet = rs.dirichlet(b"mono", 12, 300).unwrap();
        let monotone = rs.monotone(b"mono", 12, 300).unwrap();

        let mut running = 0;
        for (step, total) in dirichlet.iter().zip(&monotone) {
            running += step;
            assert_eq!(*total, running);
        }
        assert_eq!(monotone.last(), Some(&300));
    }

    #[test]
    fn monotone_zero_length() {
        let rs = generator();
        assert_eq!(rs.monotone(b"m", 0, 0).unwrap(), Vec::<usize>::new());
        assert_eq!(rs.monotone(b"m", 0, 9), Err(RandomError::EmptyDistribution { sum: 9 }));
    }
}
