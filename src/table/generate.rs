//! Generator for the `2^(k/2048)` table.
//!
//! This file is compiled twice: by `build.rs`, which writes the embedded table into
//! `OUT_DIR`, and by the library, where `Exp2Table::generate` rebuilds the same values
//! at run time. It must therefore stay free of any `crate::` path.

/// Number of index bits consumed by the table lookup.
pub const TABLE_BITS: u32 = 11;

/// Number of entries in the table (`2^TABLE_BITS`).
pub const TABLE_LEN: usize = 1 << TABLE_BITS;

/// Returns `2^(k/2048)` computed in double precision and rounded to nearest `f32`.
///
/// The f64 result carries 29 more bits than the target format, which leaves the
/// conversion within half an f32 ULP unless the value sits on a rounding tie.
pub fn exp2_entry(k: usize) -> f32 {
    debug_assert!(k < TABLE_LEN, "table index {k} out of range");
    ((k as f64) / (TABLE_LEN as f64)).exp2() as f32
}
