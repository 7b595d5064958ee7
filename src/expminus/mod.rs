//! The expminus kernel: `e^x` for `x ≤ 0` on single-precision lanes.
//!
//! Per lane:
//!
//! 1. `n + B = fma(x, 2048/ln2, B)` with the magic bias `B` ([`reduce`])
//! 2. `s = 2^(n/2048)`: table fetch on the low 11 bits, exponent patch with the rest
//!    ([`scale`])
//! 3. `t = x - n·ln2/2048` with a hi/lo split constant ([`reduce`])
//! 4. `p ≈ e^t - 1` ([`poly`])
//! 5. `f = fma(s, p, s)`
//! 6. `f = 0` where `x` is below the denormal cutoff, NaN passes through ([`clamp`])
//!
//! The steps are written once against [`SimdF32`] and monomorphized per backend. No
//! branch, division or libm call appears in the loop.

pub mod clamp;
pub mod poly;
pub mod reduce;
pub mod scale;

pub use clamp::DENORMAL_CUTOFF;
pub use poly::{Polynomial, P1, P2};
pub use reduce::MAGIC_BIAS;

use crate::{simd::SimdF32, table::Exp2Table};

/// Evaluates `e^x` on every lane of `x`.
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub unsafe fn expminus_lanes<V: SimdF32, P: Polynomial>(table: &Exp2Table, x: V) -> V {
    let n_biased = reduce::biased_multiple(x);
    let s = scale::reconstruct(table, n_biased);

    let n = reduce::unbias(n_biased);
    let t = reduce::residual(x, n);

    let p = P::correction(t);
    let f = s.fmadd(p, s);

    clamp::clamp_underflow(x, f)
}

/// Runs the kernel over `input`, writing `output`.
///
/// # Panics
///
/// Panics if the lengths differ or are not a multiple of `V::LANES`.
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub(crate) unsafe fn run<V: SimdF32, P: Polynomial>(input: &[f32], output: &mut [f32]) {
    assert_eq!(
        input.len(),
        output.len(),
        "Input and output must be the same length"
    );
    assert!(
        input.len() % V::LANES == 0,
        "Length {} is not a multiple of {} lanes",
        input.len(),
        V::LANES
    );

    let table = Exp2Table::get();
    for (src, dst) in input
        .chunks_exact(V::LANES)
        .zip(output.chunks_exact_mut(V::LANES))
    {
        let x = V::load(src.as_ptr());
        expminus_lanes::<V, P>(table, x).store(dst.as_mut_ptr());
    }
}

/// In-place variant of [`run`]: each block is loaded before its result is stored.
///
/// # Panics
///
/// Panics if the length is not a multiple of `V::LANES`.
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub(crate) unsafe fn run_in_place<V: SimdF32, P: Polynomial>(data: &mut [f32]) {
    assert!(
        data.len() % V::LANES == 0,
        "Length {} is not a multiple of {} lanes",
        data.len(),
        V::LANES
    );

    let table = Exp2Table::get();
    for block in data.chunks_exact_mut(V::LANES) {
        let x = V::load(block.as_ptr());
        expminus_lanes::<V, P>(table, x).store(block.as_mut_ptr());
    }
}
