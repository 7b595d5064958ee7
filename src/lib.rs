//! Vectorized `e^x` for non-positive single-precision inputs.
//!
//! The kernel combines a 2048-entry table of `2^(k/2048)`, magic-bias range reduction,
//! exponent-field patching and a degree-1 (or degree-2) polynomial, then clamps
//! underflowing lanes to `+0.0`. It is written once against [`simd::SimdF32`] and
//! instantiated for scalar, portable, NEON and AVX2 backends.
//!
//! ```rust
//! use expminus::{expminus::P1, simd::{Backend, Native}};
//!
//! let input = vec![0.0f32; 4 * Native::LANES];
//! let mut output = vec![0.0f32; input.len()];
//! Native::expminus::<P1>(&input, &mut output);
//! assert!(output.iter().all(|&y| y == 1.0));
//! ```

pub mod error;
pub mod expminus;
pub mod simd;
pub mod table;

pub use error::{ExpMinusError, Result};
pub use simd::slice::fast_expminus;

/// Inputs at or below this many elements stay on a single thread.
pub const PARALLEL_SIMD_THRESHOLD: usize = 131_072;

/// Elements per rayon task in the parallel path.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;
