//! Branchless underflow clamp.

use crate::simd::SimdF32;

/// `ln(2^-126)` rounded to binary32 (`-0x1.5D589Ep+6`). Below it `e^x` is subnormal.
pub const DENORMAL_CUTOFF: f32 = f32::from_bits(0xC2AE_AC4F);

/// Replaces `f` with `+0.0` in every lane where `x < DENORMAL_CUTOFF`.
///
/// The compare is ordered, so NaN lanes keep `f` (which is NaN for NaN `x`).
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub unsafe fn clamp_underflow<V: SimdF32>(x: V, f: V) -> V {
    let underflow = x.lt_mask(V::splat(DENORMAL_CUTOFF));
    V::from_bits(V::bits_andnot(f.to_bits(), underflow))
}
