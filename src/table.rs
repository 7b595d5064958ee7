//! Constant table of `2^(k/2048)` for `k = 0..2048`.
//!
//! The table is generated by `build.rs` with double-precision `exp2` rounded to
//! single precision and embedded as a `static`, so it is fully constructed before any
//! thread can read it and there is no initialization path at run time.
//!
//! Every entry lies in `[1.0, 2.0)`: its biased exponent field is exactly `127`. The
//! scale reconstructor relies on this to patch the exponent with a plain integer add.

pub mod generate;

pub use generate::{TABLE_BITS, TABLE_LEN};

/// Mask selecting the table index bits of an integer lane.
pub const INDEX_MASK: u32 = (TABLE_LEN as u32) - 1;

// Defines `EXP2_TABLE_DATA: [f32; TABLE_LEN]`.
include!(concat!(env!("OUT_DIR"), "/exp2_table.rs"));

static EXP2_TABLE: Exp2Table = Exp2Table(EXP2_TABLE_DATA);

/// Immutable table of `2^(k/2048)` values, aligned for vector gathers.
#[repr(C, align(64))]
#[derive(Clone, PartialEq)]
pub struct Exp2Table([f32; TABLE_LEN]);

impl Exp2Table {
    /// Returns the table embedded at build time.
    #[inline(always)]
    pub fn get() -> &'static Exp2Table {
        &EXP2_TABLE
    }

    /// Rebuilds the table from scratch.
    ///
    /// Deterministic: two calls produce bit-identical tables, equal to [`Exp2Table::get`]
    /// on native builds.
    pub fn generate() -> Exp2Table {
        let mut values = [0.0f32; TABLE_LEN];
        for (k, value) in values.iter_mut().enumerate() {
            *value = generate::exp2_entry(k);
        }
        Exp2Table(values)
    }

    /// Returns `2^(k/2048)` for the low 11 bits of `k`.
    #[inline(always)]
    pub fn lookup(&self, k: u32) -> f32 {
        self.0[(k & INDEX_MASK) as usize]
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[f32; TABLE_LEN] {
        &self.0
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const f32 {
        self.0.as_ptr()
    }
}

impl std::fmt::Debug for Exp2Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exp2Table")
            .field("len", &TABLE_LEN)
            .field("first", &self.0[0])
            .field("last", &self.0[TABLE_LEN - 1])
            .finish()
    }
}
