//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and matrix operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Errors from constructing or driving a [`Matrix`](crate::Matrix)
//! - [`UnsupportedFormat`] - A numeric format code the backpack does not speak
//! - [`TransportError`](crate::interface::TransportError) - Low-level I2C errors
//!
//! ## Example
//!
//! ```
//! use rgb_matrix::{Builder, BuilderError, Format};
//!
//! // Missing address
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingAddress)));
//!
//! // Unknown format code
//! assert!(Format::try_from(0x7).is_err());
//! ```

use crate::interface::BusTransport;

/// Highest valid 7-bit bus address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Errors that can occur when driving the matrix
///
/// Generic over the transport type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<T: BusTransport> {
    /// Transport error
    ///
    /// Wraps the error reported by the [`BusTransport`] implementation.
    Transport(T::Error),
    /// Bus traffic was attempted before [`Matrix::begin`](crate::Matrix::begin)
    NotBegun,
    /// Buffer is too small for the selected format
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Row or column outside the 8x8 grid
    OutOfRange {
        /// Requested row
        row: u8,
        /// Requested column
        col: u8,
    },
    /// Format code not understood by the backpack
    UnsupportedFormat(u8),
}

impl<T: BusTransport> core::fmt::Display for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {e:?}"),
            Self::NotBegun => write!(f, "Bus not initialized, call begin() first"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::OutOfRange { row, col } => {
                write!(f, "Pixel ({row}, {col}) outside 8x8 matrix")
            }
            Self::UnsupportedFormat(code) => write!(f, "Unsupported format code {code:#04x}"),
        }
    }
}

impl<T: BusTransport + core::fmt::Debug> core::error::Error for Error<T> {}

impl<T: BusTransport> From<UnsupportedFormat> for Error<T> {
    fn from(err: UnsupportedFormat) -> Self {
        Self::UnsupportedFormat(err.0)
    }
}

/// A numeric format code with no matching [`Format`](crate::Format)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedFormat(pub u8);

impl core::fmt::Display for UnsupportedFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unsupported format code {:#04x}", self.0)
    }
}

impl core::error::Error for UnsupportedFormat {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Address was not specified
    ///
    /// [`Builder::address()`](crate::config::Builder::address) must be called before building.
    MissingAddress,
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
    /// Format code not understood by the backpack
    UnsupportedFormat(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingAddress => write!(f, "Address must be specified"),
            Self::InvalidAddress(address) => write!(
                f,
                "Invalid address {address:#04x} (max {MAX_ADDRESS:#04x})"
            ),
            Self::UnsupportedFormat(code) => write!(f, "Unsupported format code {code:#04x}"),
        }
    }
}

impl core::error::Error for BuilderError {}

impl From<UnsupportedFormat> for BuilderError {
    fn from(err: UnsupportedFormat) -> Self {
        Self::UnsupportedFormat(err.0)
    }
}
