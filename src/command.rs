//! Matrix backpack command definitions
//!
//! This module defines the command bytes understood by the matrix backpack
//! firmware, along with the buffer capacities of each pixel format. Every
//! command is the first byte of an I2C write addressed to the backpack.
//!
//! ## Frame Structure
//!
//! | Frame                 | Bytes on the wire                         |
//! |-----------------------|-------------------------------------------|
//! | Interleaved pixels    | `0x01` + 192 data bytes (chunked by row)  |
//! | Bit-packed pixels     | `0x02` + 24 data bytes                    |
//! | Legacy bit-packed     | 24 data bytes, no command                 |
//! | Dimmer                | `0x04`/`0x08`/`0x10`/`0x20` + 1 value byte |
//!
//! ## Example
//!
//! ```
//! use rgb_matrix::{command, BusTransport};
//! # use core::convert::Infallible;
//! # struct Bus;
//! # impl BusTransport for Bus {
//! #     type Error = Infallible;
//! #     fn begin(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn start_transaction(&mut self, _address: u8) -> Result<(), Infallible> { Ok(()) }
//! #     fn write_byte(&mut self, _byte: u8) -> Result<(), Infallible> { Ok(()) }
//! #     fn write_block(&mut self, _bytes: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn end_transaction(&mut self, _release: bool) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let mut bus = Bus;
//! // Halve the red channel by hand
//! let _ = bus.start_transaction(0x60);
//! let _ = bus.write_block(&[command::RED_DIM, 0x80]);
//! let _ = bus.end_transaction(true);
//! ```

// Pixel data commands

/// Interleaved pixel data command (0x01)
///
/// Followed by 192 bytes, three per pixel in green, red, blue order.
/// The payload may be split across repeated starts; only the first chunk
/// carries the command byte.
pub const GRB_DATA: u8 = 0x01;

/// Bit-packed pixel data command (0x02)
///
/// Followed by 24 bytes: red plane, green plane, blue plane, one byte per row.
pub const RGB_PLANE_DATA: u8 = 0x02;

// Dimmer commands

/// Global dimmer command (0x04)
///
/// Requires 1 byte: brightness scale applied to all channels.
pub const ALL_DIM: u8 = 0x04;

/// Red dimmer command (0x08)
pub const RED_DIM: u8 = 0x08;

/// Green dimmer command (0x10)
pub const GRN_DIM: u8 = 0x10;

/// Blue dimmer command (0x20)
pub const BLU_DIM: u8 = 0x20;

// Geometry

/// Rows on the matrix
pub const ROWS: u8 = 8;

/// Columns on the matrix
pub const COLS: u8 = 8;

/// Buffer length for the interleaved (PWM) format
pub const INTERLEAVED_BUF_LEN: usize = 192;

/// Buffer length for the bit-packed formats
pub const PACKED_BUF_LEN: usize = 24;

/// Bytes sent per repeated-start chunk in the interleaved format
///
/// One row of pixels. Sized to fit the 32-byte write buffer found on
/// small two-wire peripherals.
pub const ROW_CHUNK_LEN: usize = 24;
