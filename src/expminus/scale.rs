//! Scale reconstruction `s = 2^(n/2048)`.
//!
//! With the magic bias in place the bit pattern of `n + MAGIC_BIAS` is
//! `0x4B40_0000 + n` (wrapping, two's complement for negative `n`). Its low 11 bits
//! are `n mod 2048`, the table index. The remaining bits shifted left by 12 land in
//! the exponent field: the `0x4B4` prefix falls off the top and what is left is
//! `floor(n/2048) << 23`. Adding that to a table entry, whose exponent is that of
//! 1.0, multiplies it by `2^floor(n/2048)` without rounding.

use crate::{
    simd::SimdF32,
    table::{Exp2Table, INDEX_MASK, TABLE_BITS},
};

/// Shift moving the bits above the table index into the binary32 exponent field.
pub const EXPONENT_SHIFT: i32 = (f32::MANTISSA_DIGITS - 1 - TABLE_BITS) as i32;

/// Returns `2^(n/2048)` for the biased multiple produced by
/// [`super::reduce::biased_multiple`].
///
/// # Safety
///
/// The CPU must support the backend's instruction set.
#[inline(always)]
pub unsafe fn reconstruct<V: SimdF32>(table: &Exp2Table, n_biased: V) -> V {
    let bits = n_biased.to_bits();
    let index_mask = V::bits_splat(INDEX_MASK);

    let k = V::bits_and(bits, index_mask);
    let e = V::bits_shl::<EXPONENT_SHIFT>(V::bits_andnot(bits, index_mask));

    let l = V::gather(table, k);
    V::from_bits(V::bits_add(l.to_bits(), e))
}
