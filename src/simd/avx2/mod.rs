//! AVX2 SIMD implementation for 256-bit vector operations.
//!
//! AVX2 is available on most Intel processors since Haswell (2013) and AMD processors
//! since Excavator (2015). The expminus kernel also needs FMA, which ships on the same
//! generations.
//!
//! # Conditional Compilation
//!
//! This module is only compiled when the build script detects both `avx2` and `fma` on
//! an x86_64 host. The safe entry points still assert runtime support before calling
//! into `#[target_feature]` code, so a binary copied to an older machine panics
//! instead of raising an illegal-instruction fault.

pub mod f32x8;
