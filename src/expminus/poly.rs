//! Polynomial correction for the residual.
//!
//! The result is assembled as `f = s + s·p`, so a polynomial returns `p ≈ e^t - 1`
//! on `|t| ≤ ln2/4096`. On that interval the quadratic term is below `2^-25`, which is
//! why a single coefficient already lands within a few units of `2^-24`.

use crate::simd::SimdF32;

/// Correction polynomial of a fixed degree.
pub trait Polynomial {
    /// Short identifier used in logs and benchmark names.
    const NAME: &'static str;

    /// Documented bound on `|f - e^x| / e^x` over the normal domain.
    const MAX_RELATIVE_ERROR: f64;

    /// Returns `p ≈ e^t - 1`.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn correction<V: SimdF32>(t: V) -> V;
}

/// Degree-1 minimax correction `p = t·c1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct P1;

impl P1 {
    /// `0x1.FFFFFEp-1`
    pub const C1: f32 = f32::from_bits(0x3F7F_FFFF);
}

impl Polynomial for P1 {
    const NAME: &'static str = "p1";
    const MAX_RELATIVE_ERROR: f64 = 4.0 / (1u32 << 24) as f64;

    #[inline(always)]
    unsafe fn correction<V: SimdF32>(t: V) -> V {
        t.mul(V::splat(Self::C1))
    }
}

/// Degree-2 correction `p = t·(c1 + t·c2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct P2;

impl P2 {
    pub const C1: f32 = 1.0;
    pub const C2: f32 = 0.5;
}

impl Polynomial for P2 {
    const NAME: &'static str = "p2";
    const MAX_RELATIVE_ERROR: f64 = 4.0 / (1u32 << 24) as f64;

    #[inline(always)]
    unsafe fn correction<V: SimdF32>(t: V) -> V {
        t.fmadd(V::splat(Self::C2), V::splat(Self::C1)).mul(t)
    }
}
