use crate::table::Exp2Table;

/// Fixed-width f32 vector capability the expminus pipeline is written against.
///
/// Each backend wraps one register type (`f32`, `[f32; 4]`, `float32x4_t`, `__m256`)
/// and exposes only what the kernel needs: memory access, float arithmetic with a
/// fused multiply-add, reinterpretation to an integer lane vector, integer bit
/// operations, an ordered compare mask and a gather from the `2^(k/2048)` table.
///
/// All methods are `unsafe`: implementations may be backed by instructions that the
/// running CPU must support, and the memory methods take raw pointers.
pub trait SimdF32: Copy {
    /// Integer vector with the same lane count, holding raw binary32 bit patterns.
    type Bits: Copy;

    /// Number of f32 lanes.
    const LANES: usize;

    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn splat(value: f32) -> Self;

    /// Loads `LANES` consecutive values.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANES` f32 values. No alignment is required.
    unsafe fn load(ptr: *const f32) -> Self;

    /// Stores `LANES` consecutive values.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANES` f32 values. No alignment is required.
    unsafe fn store(self, ptr: *mut f32);

    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn sub(self, rhs: Self) -> Self;

    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn mul(self, rhs: Self) -> Self;

    /// Computes `self * a + b` with a single rounding.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn fmadd(self, a: Self, b: Self) -> Self;

    /// Reinterprets each lane as its IEEE-754 bit pattern.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn to_bits(self) -> Self::Bits;

    /// Reinterprets each integer lane as a binary32 value.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn from_bits(bits: Self::Bits) -> Self;

    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn bits_splat(value: u32) -> Self::Bits;

    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn bits_and(a: Self::Bits, b: Self::Bits) -> Self::Bits;

    /// Computes `a & !mask`.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn bits_andnot(a: Self::Bits, mask: Self::Bits) -> Self::Bits;

    /// Wrapping 32-bit integer addition.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn bits_add(a: Self::Bits, b: Self::Bits) -> Self::Bits;

    /// Logical left shift of every lane by `SHIFT` bits (`0..32`).
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn bits_shl<const SHIFT: i32>(a: Self::Bits) -> Self::Bits;

    /// All-ones lanes where `self < rhs`, zero elsewhere.
    ///
    /// The comparison is ordered: a NaN on either side yields zero.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set.
    unsafe fn lt_mask(self, rhs: Self) -> Self::Bits;

    /// Fetches `table[index]` for every lane.
    ///
    /// # Safety
    ///
    /// The CPU must support the backend's instruction set, and every lane of `index`
    /// must already be masked to `table::INDEX_MASK`.
    unsafe fn gather(table: &Exp2Table, index: Self::Bits) -> Self;
}

/// Slice-level exp(x) for non-positive inputs.
///
/// Mirrors the scalar / SIMD / parallel SIMD split used across the crate's slice
/// operations. All variants accept any length.
pub trait SimdExpMinus {
    type Output;

    fn simd_expminus(self) -> Self::Output;
    fn par_simd_expminus(self) -> Self::Output;
    fn scalar_expminus(self) -> Self::Output;
}
