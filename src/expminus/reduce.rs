//! Range reduction `x = n·ln2/2048 + t`.
//!
//! `n` is rounded to an integer by the magic-bias trick: once `x·2048/ln2` is added to
//! `1.5·2^23` the sum has no fractional mantissa bits left, so the addition itself
//! rounds to nearest. Subtracting the bias back is exact. The residual uses the
//! Cody-Waite split of `ln2/2048` into a high part and a low correction below the
//! high part's last bit.

use crate::simd::SimdF32;

/// `1.5·2^23`. Adding it to any `|v| ≤ 2^22` leaves `round(v)` in the low mantissa bits.
pub const MAGIC_BIAS: f32 = (3u32 << (f32::MANTISSA_DIGITS - 2)) as f32;

/// `2048/ln2` (`0x1.715476p+11`).
pub const LOG2E_X2048: f32 = f32::from_bits(0x4538_AA3B);

/// High part of `-ln2/2048` (`-0x1.62E43p-12`).
pub const MINUS_LN2_OVER_2048_HI: f32 = f32::from_bits(0xB9B1_7218);

/// Low part of `-ln2/2048` (`0x1.05C61p-40`).
pub const MINUS_LN2_OVER_2048_LO: f32 = f32::from_bits(0x2B82_E308);

/// Largest `|x|` for which the magic bias still rounds `x·2048/ln2` exactly.
pub const REDUCTION_LIMIT: f32 = 1419.565;

/// Returns `n + MAGIC_BIAS` where `n = round(x·2048/ln2)`.
///
/// The integer `n` sits in the low bits of the result's bit pattern; see
/// [`super::scale::reconstruct`].
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub unsafe fn biased_multiple<V: SimdF32>(x: V) -> V {
    x.fmadd(V::splat(LOG2E_X2048), V::splat(MAGIC_BIAS))
}

/// Removes the magic bias, leaving the integral `n` as a float.
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub unsafe fn unbias<V: SimdF32>(n_biased: V) -> V {
    n_biased.sub(V::splat(MAGIC_BIAS))
}

/// Computes `t = x - n·ln2/2048` with two fused multiply-adds.
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub unsafe fn residual<V: SimdF32>(x: V, n: V) -> V {
    let t = n.fmadd(V::splat(MINUS_LN2_OVER_2048_HI), x);
    n.fmadd(V::splat(MINUS_LN2_OVER_2048_LO), t)
}
