//! 256-entry lookup tables and their application to sample buffers.
//!
//! Every transform in this crate is a function of the sample value alone
//! (possibly parameterized by statistics gathered up front), so it can be
//! baked into a table once and applied in a single pass.

use crate::image::MAX_SAMPLE;

/// Number of distinct 8-bit sample values.
pub const LUT_SIZE: usize = 256;

/// A lookup table mapping every 8-bit sample value to an output value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut {
    table: [u8; LUT_SIZE],
}

impl Lut {
    /// Table that maps every value to itself.
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Bake `f` into a table by evaluating it at every sample value.
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut table = [0u8; LUT_SIZE];
        for (value, slot) in (0..=MAX_SAMPLE).zip(table.iter_mut()) {
            *slot = f(value);
        }
        Self { table }
    }

    #[inline]
    pub fn get(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    pub fn as_slice(&self) -> &[u8; LUT_SIZE] {
        &self.table
    }

    /// `true` if the mapping never decreases.
    pub fn is_monotonic(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }

    /// Map a sample slice into a new buffer.
    pub fn apply(&self, samples: &[u8]) -> Vec<u8> {
        samples.iter().map(|&s| self.get(s)).collect()
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Map an interleaved buffer in place, row by row.
///
/// `luts` is either a single shared table or one table per channel; with one
/// table per channel, `row_len` must be a multiple of `luts.len()`.
#[cfg(not(feature = "parallel"))]
pub(crate) fn apply_interleaved(samples: &mut [u8], luts: &[Lut], row_len: usize) {
    if row_len == 0 {
        return;
    }
    samples
        .chunks_mut(row_len)
        .for_each(|row| map_row(row, luts));
}

/// Map an interleaved buffer in place, distributing rows across the rayon pool.
#[cfg(feature = "parallel")]
pub(crate) fn apply_interleaved(samples: &mut [u8], luts: &[Lut], row_len: usize) {
    use rayon::prelude::*;

    if row_len == 0 {
        return;
    }
    samples
        .par_chunks_mut(row_len)
        .for_each(|row| map_row(row, luts));
}

fn map_row(row: &mut [u8], luts: &[Lut]) {
    match luts {
        [] => {}
        [lut] => {
            for s in row.iter_mut() {
                *s = lut.get(*s);
            }
        }
        per_channel => {
            for px in row.chunks_exact_mut(per_channel.len()) {
                for (s, lut) in px.iter_mut().zip(per_channel) {
                    *s = lut.get(*s);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_maps_every_value_to_itself() {
        let lut = Lut::identity();
        for v in 0..=MAX_SAMPLE {
            assert_eq!(lut.get(v), v);
        }
        assert!(lut.is_monotonic());
    }

    #[test]
    fn test_from_fn_evaluates_full_domain() {
        let lut = Lut::from_fn(|v| MAX_SAMPLE - v);
        assert_eq!(lut.get(0), 255);
        assert_eq!(lut.get(255), 0);
        assert!(!lut.is_monotonic());
    }

    #[test]
    fn test_apply_interleaved_uses_per_channel_tables() {
        let luts = [
            Lut::from_fn(|_| 1),
            Lut::from_fn(|_| 2),
            Lut::from_fn(|_| 3),
        ];
        // 2 pixels per row, 2 rows
        let mut samples = vec![0u8; 12];
        apply_interleaved(&mut samples, &luts, 6);
        assert_eq!(samples, vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_apply_interleaved_shared_table() {
        let lut = Lut::from_fn(|v| v / 2);
        let mut samples = vec![10, 20, 30, 40];
        apply_interleaved(&mut samples, std::slice::from_ref(&lut), 2);
        assert_eq!(samples, vec![5, 10, 15, 20]);
        assert_eq!(lut.apply(&[100]), vec![50]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let luts = [
            Lut::from_fn(|v| v.wrapping_mul(7)),
            Lut::from_fn(|v| v ^ 0x5A),
            Lut::from_fn(|v| MAX_SAMPLE - v),
        ];
        // 97 rows of 61 RGB pixels, enough rows to split across threads.
        let row_len = 61 * 3;
        let source: Vec<u8> = (0..row_len * 97).map(|i| (i * 31 % 256) as u8).collect();

        let mut parallel = source.clone();
        apply_interleaved(&mut parallel, &luts, row_len);

        let mut sequential = source;
        sequential
            .chunks_mut(row_len)
            .for_each(|row| map_row(row, &luts));

        assert_eq!(parallel, sequential);
    }
}
