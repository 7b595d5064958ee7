//! AVX2 8-lane f32 SIMD vector implementation.
//!
//! This module provides `F32x8`, a SIMD vector type that wraps Intel's AVX2 `__m256`
//! intrinsic and implements [`SimdF32`] for the expminus pipeline.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: AVX2 and FMA (Intel Haswell and later, AMD Excavator and later)
//! - **Target Architecture**: x86_64
//! - **Compilation**: the intrinsics are inlined into a `#[target_feature(enable =
//!   "avx2,fma")]` entry point, so no global `-C target-feature` flag is needed
//!
//! # Instruction Mapping
//!
//! | Pipeline step        | Instruction               |
//! |----------------------|---------------------------|
//! | fused multiply-add   | `vfmadd231ps`             |
//! | table fetch          | `vgatherdps` (scale 4)    |
//! | exponent shift       | `vpslld`                  |
//! | exponent patch       | `vpaddd`                  |
//! | clamp compare        | `vcmpltps` (ordered)      |
//! | clamp mask           | `vpandn`                  |

use std::arch::x86_64::*;

use crate::{simd::SimdF32, table::Exp2Table};

/// Number of f32 elements that fit in an AVX2 256-bit vector.
pub const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    pub elements: __m256,
}

impl SimdF32 for F32x8 {
    type Bits = __m256i;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: _mm256_set1_ps(value),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        _mm256_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        Self {
            elements: _mm256_sub_ps(self.elements, rhs.elements),
        }
    }

    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        Self {
            elements: _mm256_mul_ps(self.elements, rhs.elements),
        }
    }

    #[inline(always)]
    unsafe fn fmadd(self, a: Self, b: Self) -> Self {
        Self {
            elements: _mm256_fmadd_ps(self.elements, a.elements, b.elements),
        }
    }

    #[inline(always)]
    unsafe fn to_bits(self) -> __m256i {
        _mm256_castps_si256(self.elements)
    }

    #[inline(always)]
    unsafe fn from_bits(bits: __m256i) -> Self {
        Self {
            elements: _mm256_castsi256_ps(bits),
        }
    }

    #[inline(always)]
    unsafe fn bits_splat(value: u32) -> __m256i {
        _mm256_set1_epi32(value as i32)
    }

    #[inline(always)]
    unsafe fn bits_and(a: __m256i, b: __m256i) -> __m256i {
        _mm256_and_si256(a, b)
    }

    #[inline(always)]
    unsafe fn bits_andnot(a: __m256i, mask: __m256i) -> __m256i {
        // vpandn negates its first operand
        _mm256_andnot_si256(mask, a)
    }

    #[inline(always)]
    unsafe fn bits_add(a: __m256i, b: __m256i) -> __m256i {
        _mm256_add_epi32(a, b)
    }

    #[inline(always)]
    unsafe fn bits_shl<const SHIFT: i32>(a: __m256i) -> __m256i {
        _mm256_slli_epi32::<SHIFT>(a)
    }

    #[inline(always)]
    unsafe fn lt_mask(self, rhs: Self) -> __m256i {
        _mm256_castps_si256(_mm256_cmp_ps::<_CMP_LT_OQ>(self.elements, rhs.elements))
    }

    #[inline(always)]
    unsafe fn gather(table: &Exp2Table, index: __m256i) -> Self {
        Self {
            elements: _mm256_i32gather_ps::<4>(table.as_ptr(), index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_avx2_fma() -> bool {
        is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
    }

    fn extract(v: F32x8) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        unsafe { v.store(out.as_mut_ptr()) };
        out
    }

    fn extract_bits(v: __m256i) -> [u32; 8] {
        let mut out = [0u32; 8];
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, v) };
        out
    }

    #[test]
    fn test_fmadd_operand_order() {
        if !has_avx2_fma() {
            return;
        }
        let v = unsafe { F32x8::splat(3.0).fmadd(F32x8::splat(4.0), F32x8::splat(5.0)) };
        assert_eq!(extract(v), [17.0; 8]);
    }

    #[test]
    fn test_lt_mask_is_ordered() {
        if !has_avx2_fma() {
            return;
        }
        let data = [-100.0f32, 0.0, f32::NAN, f32::NEG_INFINITY, -87.0, -87.5, -0.0, -f32::NAN];
        let x = unsafe { F32x8::load(data.as_ptr()) };
        let mask = extract_bits(unsafe { x.lt_mask(F32x8::splat(-87.0)) });
        assert_eq!(mask, [u32::MAX, 0, 0, u32::MAX, 0, u32::MAX, 0, 0]);
    }

    #[test]
    fn test_gather_lanes() {
        if !has_avx2_fma() {
            return;
        }
        let table = Exp2Table::get();
        let index_data = [0u32, 1, 2, 1023, 1024, 2000, 2046, 2047];
        let index = unsafe { _mm256_loadu_si256(index_data.as_ptr() as *const __m256i) };
        let v = extract(unsafe { F32x8::gather(table, index) });
        for (lane, &k) in index_data.iter().enumerate() {
            assert_eq!(v[lane], table.lookup(k));
        }
    }

    #[test]
    fn test_bits_andnot_takes_mask_second() {
        if !has_avx2_fma() {
            return;
        }
        unsafe {
            let a = F32x8::bits_splat(0x4B40_0FFF);
            let masked = F32x8::bits_andnot(a, F32x8::bits_splat(0x7FF));
            assert_eq!(extract_bits(masked), [0x4B40_0800; 8]);
            assert_eq!(extract_bits(F32x8::bits_shl::<12>(masked)), [0x0080_0000; 8]);
        }
    }
}
