//! I2C 8x8 RGB LED Matrix Driver
//!
//! A driver for 8x8 RGB LED matrix backpacks that take a pixel frame and
//! per-channel dimmer commands over I2C.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Channel-interleaved (192 byte) and bit-packed (24 byte) pixel formats
//! - Global and per-channel dimmers
//! - Caller-owned pixel buffers that can be handed between drivers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use rgb_matrix::{Builder, Format, I2cTransport, Matrix};
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c<SevenBitAddress> for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let i2c = MockI2c;
//! let config = match Builder::new().address(0x60).format(Format::BitPacked).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut buffer = [0u8; 24];
//! let mut matrix = match Matrix::from_config(I2cTransport::new(i2c), config, &mut buffer[..]) {
//!     Ok(matrix) => matrix,
//!     Err(_) => return,
//! };
//! let _ = matrix.begin();
//! let _ = matrix.set_pixel(3, 4, 0xFF, 0x00, 0xFF);
//! let _ = matrix.set_dim(0x40);
//! let _ = matrix.transmit();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// RGB color values
pub mod color;
/// Backpack command definitions
pub mod command;
/// Matrix configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Pixel buffer formats
pub mod format;
/// Bus transport abstraction
pub mod interface;
/// Core matrix operations
pub mod matrix;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::Rgb;
pub use config::{Builder, Config, MAX_ADDRESS};
pub use error::{BuilderError, Error, UnsupportedFormat};
pub use format::Format;
pub use interface::{BusTransport, I2cTransport, STAGING_LEN, TransportError};
pub use matrix::{Dimmer, Matrix};
