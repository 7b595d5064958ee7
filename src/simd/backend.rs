//! Kernel entry points, one unit type per vector capability.
//!
//! Each backend instantiates the generic pipeline in [`crate::expminus`] with its own
//! [`SimdF32`](super::SimdF32) type. `Scalar` and `Portable` are always compiled;
//! `Neon` and `Avx2` only when the build script enables their cfg. [`Native`] names
//! the widest backend available in this build.

use log::warn;

use crate::{
    error::{check_buffers, Result},
    expminus::{run, run_in_place, Polynomial},
    simd::fallback::f32x4::F32x4 as PortableF32x4,
};

/// A fixed-width instantiation of the expminus kernel.
pub trait Backend {
    /// Short identifier used in logs and benchmark names.
    const NAME: &'static str;

    /// Elements processed per vector step. Buffer lengths must be a multiple of it.
    const LANES: usize;

    /// Whether the running CPU can execute this backend.
    fn is_available() -> bool {
        true
    }

    /// Writes `e^input[i]` to `output[i]` for every `i`.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ, are not a multiple of [`Self::LANES`], or the
    /// CPU lacks the backend's instruction set.
    fn expminus<P: Polynomial>(input: &[f32], output: &mut [f32]);

    /// Replaces every element of `data` with its exponential.
    ///
    /// # Panics
    ///
    /// Panics if the length is not a multiple of [`Self::LANES`] or the CPU lacks the
    /// backend's instruction set.
    fn expminus_in_place<P: Polynomial>(data: &mut [f32]);

    /// Checked variant of [`Backend::expminus`].
    fn try_expminus<P: Polynomial>(input: &[f32], output: &mut [f32]) -> Result<()> {
        if let Err(error) = check_buffers(input.len(), output.len(), Self::LANES) {
            warn!("{} backend rejected buffers: {}", Self::NAME, error);
            return Err(error);
        }
        Self::expminus::<P>(input, output);
        Ok(())
    }
}

/// One lane per step on plain `f32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

impl Backend for Scalar {
    const NAME: &'static str = "scalar";
    const LANES: usize = 1;

    fn expminus<P: Polynomial>(input: &[f32], output: &mut [f32]) {
        // SAFETY: f32 operations need no target feature.
        unsafe { run::<f32, P>(input, output) }
    }

    fn expminus_in_place<P: Polynomial>(data: &mut [f32]) {
        // SAFETY: f32 operations need no target feature.
        unsafe { run_in_place::<f32, P>(data) }
    }
}

/// Four lanes per step on arrays, left to the compiler's autovectorizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

impl Backend for Portable {
    const NAME: &'static str = "portable";
    const LANES: usize = 4;

    fn expminus<P: Polynomial>(input: &[f32], output: &mut [f32]) {
        // SAFETY: array operations need no target feature.
        unsafe { run::<PortableF32x4, P>(input, output) }
    }

    fn expminus_in_place<P: Polynomial>(data: &mut [f32]) {
        // SAFETY: array operations need no target feature.
        unsafe { run_in_place::<PortableF32x4, P>(data) }
    }
}

/// Four lanes per step on `float32x4_t`.
#[cfg(neon)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Neon;

#[cfg(neon)]
impl Backend for Neon {
    const NAME: &'static str = "neon";
    const LANES: usize = crate::simd::neon::f32x4::LANE_COUNT;

    fn expminus<P: Polynomial>(input: &[f32], output: &mut [f32]) {
        // SAFETY: NEON is part of the aarch64 baseline.
        unsafe { run::<crate::simd::neon::f32x4::F32x4, P>(input, output) }
    }

    fn expminus_in_place<P: Polynomial>(data: &mut [f32]) {
        // SAFETY: NEON is part of the aarch64 baseline.
        unsafe { run_in_place::<crate::simd::neon::f32x4::F32x4, P>(data) }
    }
}

/// Eight lanes per step on `__m256` with AVX2 and FMA.
#[cfg(avx2)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Avx2;

#[cfg(avx2)]
impl Avx2 {
    fn assert_available() {
        assert!(
            Self::is_available(),
            "CPU does not support AVX2 and FMA required by the avx2 backend"
        );
    }
}

#[cfg(avx2)]
#[target_feature(enable = "avx2,fma")]
unsafe fn avx2_run<P: Polynomial>(input: &[f32], output: &mut [f32]) {
    run::<crate::simd::avx2::f32x8::F32x8, P>(input, output)
}

#[cfg(avx2)]
#[target_feature(enable = "avx2,fma")]
unsafe fn avx2_run_in_place<P: Polynomial>(data: &mut [f32]) {
    run_in_place::<crate::simd::avx2::f32x8::F32x8, P>(data)
}

#[cfg(avx2)]
impl Backend for Avx2 {
    const NAME: &'static str = "avx2";
    const LANES: usize = crate::simd::avx2::f32x8::LANE_COUNT;

    fn is_available() -> bool {
        is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
    }

    fn expminus<P: Polynomial>(input: &[f32], output: &mut [f32]) {
        Self::assert_available();
        // SAFETY: AVX2 and FMA support was checked above.
        unsafe { avx2_run::<P>(input, output) }
    }

    fn expminus_in_place<P: Polynomial>(data: &mut [f32]) {
        Self::assert_available();
        // SAFETY: AVX2 and FMA support was checked above.
        unsafe { avx2_run_in_place::<P>(data) }
    }
}

/// Widest backend enabled at build time.
#[cfg(avx2)]
pub type Native = Avx2;

/// Widest backend enabled at build time.
#[cfg(neon)]
pub type Native = Neon;

/// Widest backend enabled at build time.
#[cfg(fallback)]
pub type Native = Portable;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{length_mismatch, unaligned_length},
        expminus::{P1, P2},
    };

    fn sample_inputs(len: usize) -> Vec<f32> {
        (0..len).map(|i| -(i as f32) * 0.731).collect()
    }

    fn assert_matches_scalar<B: Backend>() {
        if !B::is_available() {
            return;
        }
        let mut input = sample_inputs(B::LANES * 64);
        input[3] = f32::NAN;
        input[5] = f32::NEG_INFINITY;

        let mut expected = vec![0.0f32; input.len()];
        let mut actual = vec![0.0f32; input.len()];
        Scalar::expminus::<P1>(&input, &mut expected);
        B::expminus::<P1>(&input, &mut actual);

        for i in 0..input.len() {
            if expected[i].is_nan() {
                assert!(actual[i].is_nan(), "{}: lane {i} lost NaN", B::NAME);
            } else {
                assert_eq!(
                    actual[i].to_bits(),
                    expected[i].to_bits(),
                    "{}: x = {}",
                    B::NAME,
                    input[i]
                );
            }
        }
    }

    #[test]
    fn test_portable_matches_scalar() {
        assert_matches_scalar::<Portable>();
    }

    #[test]
    fn test_native_matches_scalar() {
        assert_matches_scalar::<Native>();
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        if !Native::is_available() {
            return;
        }
        let input = sample_inputs(Native::LANES * 16);
        let mut expected = vec![0.0f32; input.len()];
        Native::expminus::<P2>(&input, &mut expected);

        let mut data = input.clone();
        Native::expminus_in_place::<P2>(&mut data);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_try_expminus_reports_contract_violations() {
        let input = [0.0f32; 6];
        let mut short = [0.0f32; 4];
        assert_eq!(
            Portable::try_expminus::<P1>(&input, &mut short),
            Err(length_mismatch(6, 4))
        );

        let mut output = [0.0f32; 6];
        assert_eq!(
            Portable::try_expminus::<P1>(&input, &mut output),
            Err(unaligned_length(6, 4))
        );
        assert_eq!(Scalar::try_expminus::<P1>(&input, &mut output), Ok(()));
        assert_eq!(output, [1.0; 6]);
    }

    #[test]
    #[should_panic(expected = "multiple of 4 lanes")]
    fn test_portable_panics_on_unaligned_length() {
        let input = [0.0f32; 5];
        let mut output = [0.0f32; 5];
        Portable::expminus::<P1>(&input, &mut output);
    }
}
