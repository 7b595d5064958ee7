//! Portable backend built on plain arrays.
//!
//! Always compiled, whatever the target, so every host can run the vector form of the
//! pipeline. The array operations are written lane-by-lane and left to the compiler's
//! auto-vectorizer.

pub mod f32x4;
