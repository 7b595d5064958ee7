//! Single-lane backend: the expminus pipeline on a plain `f32`.
//!
//! Every other backend must agree with this one bit for bit, which makes it the
//! reference in the cross-backend tests. The slice API also uses it for the tail that
//! does not fill a whole vector.

use crate::{simd::SimdF32, table::Exp2Table};

impl SimdF32 for f32 {
    type Bits = u32;

    const LANES: usize = 1;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        value
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        ptr.read_unaligned()
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        ptr.write_unaligned(self)
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline(always)]
    unsafe fn fmadd(self, a: Self, b: Self) -> Self {
        self.mul_add(a, b)
    }

    #[inline(always)]
    unsafe fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline(always)]
    unsafe fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }

    #[inline(always)]
    unsafe fn bits_splat(value: u32) -> u32 {
        value
    }

    #[inline(always)]
    unsafe fn bits_and(a: u32, b: u32) -> u32 {
        a & b
    }

    #[inline(always)]
    unsafe fn bits_andnot(a: u32, mask: u32) -> u32 {
        a & !mask
    }

    #[inline(always)]
    unsafe fn bits_add(a: u32, b: u32) -> u32 {
        a.wrapping_add(b)
    }

    #[inline(always)]
    unsafe fn bits_shl<const SHIFT: i32>(a: u32) -> u32 {
        a << SHIFT
    }

    #[inline(always)]
    unsafe fn lt_mask(self, rhs: Self) -> u32 {
        // 0 - 1 wraps to all ones
        0u32.wrapping_sub((self < rhs) as u32)
    }

    #[inline(always)]
    unsafe fn gather(table: &Exp2Table, index: u32) -> Self {
        table.lookup(index)
    }
}
