//! Slice-level expminus for f32 arrays of any length.
//!
//! Three strategies, mirroring the rest of the crate's slice operations:
//!
//! | Strategy      | Function                  | Use                                  |
//! |---------------|---------------------------|--------------------------------------|
//! | Scalar        | [`scalar_expminus`]       | reference, `f32::exp` per element    |
//! | SIMD          | `simd_expminus`           | single thread, [`Native`] backend    |
//! | Parallel SIMD | [`parallel_simd_expminus`]| rayon chunks of `PARALLEL_CHUNK_SIZE`|
//!
//! [`fast_expminus`] picks between the last two by size. The lane-aligned prefix goes
//! through the native backend and the remaining `len % LANES` elements through the
//! [`Scalar`] backend, which computes the same bits.
//!
//! # Example
//!
//! ```rust
//! use expminus::simd::SimdExpMinus;
//!
//! let x = vec![0.0f32, -0.5, -1000.0];
//! let y = x.as_slice().simd_expminus();
//!
//! assert_eq!(y[0], 1.0);
//! assert!((y[1] - 0.606_530_66).abs() < 1e-6);
//! assert_eq!(y[2], 0.0);
//! ```

use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    expminus::{Polynomial, P1},
    simd::{Backend, Native, Scalar, SimdExpMinus},
    PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD,
};

/// Reference implementation using the standard library's `f32::exp`.
#[inline(always)]
pub fn scalar_expminus(a: &[f32]) -> Vec<f32> {
    a.iter().map(|x| x.exp()).collect()
}

/// Runs the native backend on the aligned prefix and the scalar backend on the tail.
#[inline(always)]
fn expminus_block<P: Polynomial>(a: &[f32], c: &mut [f32]) {
    debug_assert_eq!(a.len(), c.len());

    let complete_lanes = a.len() - (a.len() % Native::LANES);
    let (a_head, a_tail) = a.split_at(complete_lanes);
    let (c_head, c_tail) = c.split_at_mut(complete_lanes);

    Native::expminus::<P>(a_head, c_head);

    if !a_tail.is_empty() {
        Scalar::expminus::<P>(a_tail, c_tail);
    }
}

/// Single-threaded kernel with polynomial `P`, any length.
pub fn simd_expminus_with<P: Polynomial>(a: &[f32]) -> Vec<f32> {
    trace!(
        "simd_expminus: {} elements, backend {} ({} lanes), polynomial {}",
        a.len(),
        Native::NAME,
        Native::LANES,
        P::NAME
    );

    let mut c = vec![0.0f32; a.len()];
    expminus_block::<P>(a, &mut c);
    c
}

#[inline(always)]
fn simd_expminus(a: &[f32]) -> Vec<f32> {
    simd_expminus_with::<P1>(a)
}

/// Multi-threaded kernel. Falls back to the single-threaded path below
/// `PARALLEL_SIMD_THRESHOLD` elements.
pub fn parallel_simd_expminus(a: &[f32]) -> Vec<f32> {
    if a.len() <= PARALLEL_SIMD_THRESHOLD {
        return simd_expminus(a);
    }

    let step = Native::LANES;

    // Chunks are whole vectors so only the last one can have a tail.
    let chunk_size = ((PARALLEL_CHUNK_SIZE / step) * step).max(step);

    debug!(
        "parallel_simd_expminus: {} elements in chunks of {} on {} threads",
        a.len(),
        chunk_size,
        rayon::current_num_threads()
    );

    let mut c = vec![0.0f32; a.len()];

    c.par_chunks_mut(chunk_size)
        .zip(a.par_chunks(chunk_size))
        .for_each(|(c_chunk, a_chunk)| expminus_block::<P1>(a_chunk, c_chunk));

    c
}

/// Chooses single-threaded or parallel SIMD by input size.
#[inline(always)]
pub fn fast_expminus(a: &[f32]) -> Vec<f32> {
    match a.len() {
        0..=PARALLEL_SIMD_THRESHOLD => simd_expminus(a),
        _ => parallel_simd_expminus(a),
    }
}

impl SimdExpMinus for &[f32] {
    type Output = Vec<f32>;

    #[inline(always)]
    fn simd_expminus(self) -> Self::Output {
        simd_expminus(self)
    }

    #[inline(always)]
    fn par_simd_expminus(self) -> Self::Output {
        parallel_simd_expminus(self)
    }

    #[inline(always)]
    fn scalar_expminus(self) -> Self::Output {
        scalar_expminus(self)
    }
}

impl SimdExpMinus for Vec<f32> {
    type Output = Vec<f32>;

    #[inline(always)]
    fn simd_expminus(self) -> Self::Output {
        simd_expminus(&self)
    }

    #[inline(always)]
    fn par_simd_expminus(self) -> Self::Output {
        parallel_simd_expminus(&self)
    }

    #[inline(always)]
    fn scalar_expminus(self) -> Self::Output {
        scalar_expminus(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expminus::P2;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| -((i % 997) as f32) * 0.0876).collect()
    }

    fn scalar_backend(a: &[f32]) -> Vec<f32> {
        let mut c = vec![0.0f32; a.len()];
        Scalar::expminus::<P1>(a, &mut c);
        c
    }

    #[test]
    fn test_empty_input() {
        assert!(simd_expminus(&[]).is_empty());
        assert!(parallel_simd_expminus(&[]).is_empty());
        assert!(fast_expminus(&[]).is_empty());
    }

    #[test]
    fn test_every_tail_length() {
        for len in 0..(3 * Native::LANES + 1) {
            let a = ramp(len);
            assert_eq!(simd_expminus(&a), scalar_backend(&a), "len = {len}");
        }
    }

    #[test]
    fn test_parallel_matches_single_threaded() {
        let a = ramp(PARALLEL_SIMD_THRESHOLD + PARALLEL_CHUNK_SIZE / 2 + 3);
        assert_eq!(parallel_simd_expminus(&a), simd_expminus(&a));
        assert_eq!(fast_expminus(&a), simd_expminus(&a));
    }

    #[test]
    fn test_close_to_std_exp() {
        let a = ramp(4096);
        for (x, (fast, reference)) in a
            .iter()
            .zip(simd_expminus(&a).iter().zip(scalar_expminus(&a).iter()))
        {
            let error = ((fast - reference) / reference).abs() as f64;
            assert!(error <= 5.0 / (1u32 << 24) as f64, "x = {x}: {fast} vs {reference}");
        }
    }

    #[test]
    fn test_with_polynomial() {
        let a = ramp(100);
        let p2 = simd_expminus_with::<P2>(&a);
        for (&x, &y) in a.iter().zip(p2.iter()) {
            let reference = (x as f64).exp();
            assert!(((y as f64 - reference) / reference).abs() <= P2::MAX_RELATIVE_ERROR);
        }
    }

    #[test]
    fn test_trait_impls_agree() {
        let a = ramp(123);
        let from_slice = a.as_slice().simd_expminus();
        let from_vec = a.clone().simd_expminus();
        assert_eq!(from_slice, from_vec);
        assert_eq!(a.as_slice().par_simd_expminus(), from_slice);
        assert_eq!(a.clone().scalar_expminus(), scalar_expminus(&a));
    }
}
