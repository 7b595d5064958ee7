//! ARM NEON SIMD backend for 128-bit vector operations.
//!
//! NEON is part of the AArch64 baseline (Apple Silicon, AWS Graviton, modern Android
//! and iOS devices), so this backend needs no runtime check. The build script enables
//! it for every aarch64 target.
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 128 bits (4 × f32)
//! - **FMA**: `vfmaq_f32`, single rounding
//! - **Table fetch**: four scalar loads, NEON has no gather

pub mod f32x4;
