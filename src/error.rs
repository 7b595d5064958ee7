//! Error types for expminus operations.
//!
//! The kernels themselves never fail: buffer contract violations panic at the entry
//! point. The checked entry points (`Backend::try_expminus`) report the same violations
//! as values instead.

use std::fmt;

/// Errors that can occur when validating expminus buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpMinusError {
    /// Input and output buffers have different lengths.
    LengthMismatch {
        /// Number of input elements.
        input: usize,
        /// Number of output elements.
        output: usize,
    },
    /// Buffer length is not a multiple of the backend lane count.
    UnalignedLength {
        /// Number of elements in the buffer.
        len: usize,
        /// Lane count of the backend.
        lanes: usize,
    },
}

impl fmt::Display for ExpMinusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpMinusError::LengthMismatch { input, output } => write!(
                f,
                "Buffer length mismatch: input has {} elements, output has {}",
                input, output
            ),
            ExpMinusError::UnalignedLength { len, lanes } => write!(
                f,
                "Buffer length {} is not a multiple of the lane count {}",
                len, lanes
            ),
        }
    }
}

impl std::error::Error for ExpMinusError {}

/// Result type alias for expminus operations.
pub type Result<T> = std::result::Result<T, ExpMinusError>;

/// Creates a length mismatch error.
pub fn length_mismatch(input: usize, output: usize) -> ExpMinusError {
    ExpMinusError::LengthMismatch { input, output }
}

/// Creates an unaligned length error.
pub fn unaligned_length(len: usize, lanes: usize) -> ExpMinusError {
    ExpMinusError::UnalignedLength { len, lanes }
}

/// Checks the buffer contract shared by every kernel entry point.
///
/// `lanes` is a backend's `LANES` constant and is never zero.
pub fn check_buffers(input: usize, output: usize, lanes: usize) -> Result<()> {
    debug_assert!(lanes > 0, "lane count must be non-zero");
    if input != output {
        return Err(length_mismatch(input, output));
    }
    if input % lanes != 0 {
        return Err(unaligned_length(input, lanes));
    }
    Ok(())
}
