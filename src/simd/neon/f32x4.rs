//! ARM NEON 4-lane f32 vector.
//!
//! Wraps `float32x4_t`. Integer lanes are carried as `uint32x4_t`, so every bit
//! operation of the pipeline maps to a single NEON instruction: `vandq_u32`,
//! `vbicq_u32` (and-not), `vaddq_u32`, `vshlq_n_u32` and `vcltq_f32` for the clamp
//! mask. NEON has no gather instruction, so the table fetch extracts the four indices
//! and assembles the vector from scalar loads.

use std::arch::aarch64::*;

use crate::{simd::SimdF32, table::Exp2Table};

/// Number of f32 elements in a NEON vector.
pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: float32x4_t,
}

impl SimdF32 for F32x4 {
    type Bits = uint32x4_t;

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: vdupq_n_f32(value),
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        Self {
            elements: vld1q_f32(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        vst1q_f32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        Self {
            elements: vsubq_f32(self.elements, rhs.elements),
        }
    }

    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        Self {
            elements: vmulq_f32(self.elements, rhs.elements),
        }
    }

    #[inline(always)]
    unsafe fn fmadd(self, a: Self, b: Self) -> Self {
        // vfmaq_f32(acc, x, y) = acc + x * y
        Self {
            elements: vfmaq_f32(b.elements, self.elements, a.elements),
        }
    }

    #[inline(always)]
    unsafe fn to_bits(self) -> uint32x4_t {
        vreinterpretq_u32_f32(self.elements)
    }

    #[inline(always)]
    unsafe fn from_bits(bits: uint32x4_t) -> Self {
        Self {
            elements: vreinterpretq_f32_u32(bits),
        }
    }

    #[inline(always)]
    unsafe fn bits_splat(value: u32) -> uint32x4_t {
        vdupq_n_u32(value)
    }

    #[inline(always)]
    unsafe fn bits_and(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        vandq_u32(a, b)
    }

    #[inline(always)]
    unsafe fn bits_andnot(a: uint32x4_t, mask: uint32x4_t) -> uint32x4_t {
        vbicq_u32(a, mask)
    }

    #[inline(always)]
    unsafe fn bits_add(a: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
        vaddq_u32(a, b)
    }

    #[inline(always)]
    unsafe fn bits_shl<const SHIFT: i32>(a: uint32x4_t) -> uint32x4_t {
        vshlq_n_u32::<SHIFT>(a)
    }

    #[inline(always)]
    unsafe fn lt_mask(self, rhs: Self) -> uint32x4_t {
        vcltq_f32(self.elements, rhs.elements)
    }

    #[inline(always)]
    unsafe fn gather(table: &Exp2Table, index: uint32x4_t) -> Self {
        let lanes = [
            table.lookup(vgetq_lane_u32::<0>(index)),
            table.lookup(vgetq_lane_u32::<1>(index)),
            table.lookup(vgetq_lane_u32::<2>(index)),
            table.lookup(vgetq_lane_u32::<3>(index)),
        ];
        Self {
            elements: vld1q_f32(lanes.as_ptr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(v: F32x4) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { v.store(out.as_mut_ptr()) };
        out
    }

    fn extract_bits(v: uint32x4_t) -> [u32; 4] {
        let mut out = [0u32; 4];
        unsafe { vst1q_u32(out.as_mut_ptr(), v) };
        out
    }

    #[test]
    fn test_fmadd_operand_order() {
        let a = unsafe { F32x4::splat(3.0) };
        let b = unsafe { F32x4::splat(4.0) };
        let c = unsafe { F32x4::splat(5.0) };
        // 3 * 4 + 5
        assert_eq!(extract(unsafe { a.fmadd(b, c) }), [17.0; 4]);
    }

    #[test]
    fn test_lt_mask_nan_is_false() {
        let data = [-100.0f32, 0.0, f32::NAN, f32::NEG_INFINITY];
        let x = unsafe { F32x4::load(data.as_ptr()) };
        let mask = unsafe { x.lt_mask(F32x4::splat(-87.0)) };
        assert_eq!(extract_bits(mask), [u32::MAX, 0, 0, u32::MAX]);
    }

    #[test]
    fn test_gather_lanes() {
        let table = Exp2Table::get();
        let index_data = [0u32, 1024, 2047, 5];
        let index = unsafe { vld1q_u32(index_data.as_ptr()) };
        let v = extract(unsafe { F32x4::gather(table, index) });
        for (lane, &k) in index_data.iter().enumerate() {
            assert_eq!(v[lane], table.lookup(k));
        }
    }

    #[test]
    fn test_bits_andnot_and_shift() {
        unsafe {
            let a = F32x4::bits_splat(0x4B40_0FFF);
            let masked = F32x4::bits_andnot(a, F32x4::bits_splat(0x7FF));
            assert_eq!(extract_bits(masked), [0x4B40_0800; 4]);
            assert_eq!(extract_bits(F32x4::bits_shl::<12>(masked)), [0x0080_0000; 4]);
        }
    }
}
