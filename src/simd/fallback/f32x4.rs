//! Array-backed 4-lane f32 vector.

use crate::{simd::SimdF32, table::Exp2Table};

/// Number of f32 elements in a portable vector.
pub const LANE_COUNT: usize = 4;

/// Four packed f32 values held in a plain array.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct F32x4 {
    pub elements: [f32; LANE_COUNT],
}

impl F32x4 {
    #[inline(always)]
    fn zip_with(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut elements = self.elements;
        for (lane, &r) in elements.iter_mut().zip(rhs.elements.iter()) {
            *lane = f(*lane, r);
        }
        Self { elements }
    }
}

impl From<[f32; LANE_COUNT]> for F32x4 {
    fn from(elements: [f32; LANE_COUNT]) -> Self {
        Self { elements }
    }
}

#[inline(always)]
fn zip_bits(
    a: [u32; LANE_COUNT],
    b: [u32; LANE_COUNT],
    f: impl Fn(u32, u32) -> u32,
) -> [u32; LANE_COUNT] {
    let mut out = a;
    for (lane, &r) in out.iter_mut().zip(b.iter()) {
        *lane = f(*lane, r);
    }
    out
}

impl SimdF32 for F32x4 {
    type Bits = [u32; LANE_COUNT];

    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self {
            elements: (ptr as *const [f32; LANE_COUNT]).read_unaligned(),
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        (ptr as *mut [f32; LANE_COUNT]).write_unaligned(self.elements)
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }

    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a * b)
    }

    #[inline(always)]
    unsafe fn fmadd(self, a: Self, b: Self) -> Self {
        let mut elements = self.elements;
        for i in 0..LANE_COUNT {
            elements[i] = elements[i].mul_add(a.elements[i], b.elements[i]);
        }
        Self { elements }
    }

    #[inline(always)]
    unsafe fn to_bits(self) -> Self::Bits {
        self.elements.map(f32::to_bits)
    }

    #[inline(always)]
    unsafe fn from_bits(bits: Self::Bits) -> Self {
        Self {
            elements: bits.map(f32::from_bits),
        }
    }

    #[inline(always)]
    unsafe fn bits_splat(value: u32) -> Self::Bits {
        [value; LANE_COUNT]
    }

    #[inline(always)]
    unsafe fn bits_and(a: Self::Bits, b: Self::Bits) -> Self::Bits {
        zip_bits(a, b, |x, y| x & y)
    }

    #[inline(always)]
    unsafe fn bits_andnot(a: Self::Bits, mask: Self::Bits) -> Self::Bits {
        zip_bits(a, mask, |x, m| x & !m)
    }

    #[inline(always)]
    unsafe fn bits_add(a: Self::Bits, b: Self::Bits) -> Self::Bits {
        zip_bits(a, b, u32::wrapping_add)
    }

    #[inline(always)]
    unsafe fn bits_shl<const SHIFT: i32>(a: Self::Bits) -> Self::Bits {
        a.map(|x| x << SHIFT)
    }

    #[inline(always)]
    unsafe fn lt_mask(self, rhs: Self) -> Self::Bits {
        let mut mask = [0u32; LANE_COUNT];
        for i in 0..LANE_COUNT {
            mask[i] = 0u32.wrapping_sub((self.elements[i] < rhs.elements[i]) as u32);
        }
        mask
    }

    #[inline(always)]
    unsafe fn gather(table: &Exp2Table, index: Self::Bits) -> Self {
        Self {
            elements: index.map(|k| table.lookup(k)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_store_unaligned() {
        let data = [0.0f32, 1.0, 2.0, 3.0, 4.0];
        let mut out = [0.0f32; 5];
        unsafe {
            let v = F32x4::load(data.as_ptr().add(1));
            v.store(out.as_mut_ptr().add(1));
        }
        assert_eq!(out, [0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_lt_mask_lanes() {
        let a = F32x4::from([-100.0, 0.0, f32::NAN, f32::NEG_INFINITY]);
        let b = unsafe { F32x4::splat(-87.0) };
        let mask = unsafe { a.lt_mask(b) };
        assert_eq!(mask, [u32::MAX, 0, 0, u32::MAX]);
    }

    #[test]
    fn test_gather_uses_each_lane_index() {
        let table = Exp2Table::get();
        let v = unsafe { F32x4::gather(table, [0, 1024, 2047, 5]) };
        assert_eq!(v.elements[0], 1.0);
        assert_eq!(v.elements[1], table.lookup(1024));
        assert_eq!(v.elements[2], table.lookup(2047));
        assert_eq!(v.elements[3], table.lookup(5));
    }

    #[test]
    fn test_bit_ops() {
        unsafe {
            let a = [0xFFFF_FFFF, 0x0000_0800, 0x4B40_07FF, 0];
            let mask = F32x4::bits_splat(0x7FF);
            assert_eq!(F32x4::bits_and(a, mask), [0x7FF, 0, 0x7FF, 0]);
            assert_eq!(
                F32x4::bits_andnot(a, mask),
                [0xFFFF_F800, 0x0000_0800, 0x4B40_0000, 0]
            );
            assert_eq!(
                F32x4::bits_add(a, [1, 1, 1, 1]),
                [0, 0x0000_0801, 0x4B40_0800, 1]
            );
        }
    }
}
