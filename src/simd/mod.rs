//! SIMD backends for the expminus kernel.
//!
//! - [`traits::SimdF32`]: the vector capability the kernel is written against
//! - [`backend::Backend`]: kernel entry points per vector width
//! - [`slice`]: any-length slice API on top of the native backend
//!
//! `avx2` and `neon` are compiled only when the build script selects them; the
//! array-backed `fallback` vector and the scalar `f32` backend always are.

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

pub mod backend;
pub mod fallback;
pub mod scalar;
pub mod slice;
pub mod traits;

pub use backend::*;
pub use traits::*;
