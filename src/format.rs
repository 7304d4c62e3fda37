//! Pixel buffer formats
//!
//! The backpack accepts pixel data in one of three layouts. All of them use
//! the same buffer storage; the active [`Format`] decides where a pixel lives
//! and how the buffer is framed on the wire.
//!
//! ## Interleaved
//!
//! Three bytes per pixel, 24 bytes per row. Channels are stored green, red,
//! blue to match the wiring of the backpack's LED drivers.
//!
//! ```text
//! offset = row * 24 + col * 3
//! [offset + 0] = green, [offset + 1] = red, [offset + 2] = blue
//! ```
//!
//! ## Bit-packed
//!
//! Three 8-byte planes. Each byte is a row and each bit a column, so a
//! channel is either fully on or off.
//!
//! ```text
//! red   = buf[row]       bit col
//! green = buf[row + 8]   bit col
//! blue  = buf[row + 16]  bit col
//! ```
//!
//! ## Example
//!
//! ```
//! use rgb_matrix::Format;
//!
//! assert_eq!(Format::ChannelInterleaved.buffer_len(), 192);
//! assert_eq!(Format::BitPacked.buffer_len(), 24);
//! assert_eq!(Format::try_from(0x3), Ok(Format::BitPackedLegacy));
//! ```

use crate::color::Rgb;
use crate::command::{
    GRB_DATA, INTERLEAVED_BUF_LEN, PACKED_BUF_LEN, RGB_PLANE_DATA, ROW_CHUNK_LEN,
};
use crate::error::UnsupportedFormat;

/// Offset of the green plane in the bit-packed formats
const GRN_PLANE: usize = 8;
/// Offset of the blue plane in the bit-packed formats
const BLU_PLANE: usize = 16;

/// Pixel buffer layout and wire framing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Format {
    /// Three bytes per pixel (green, red, blue), 192 bytes total
    ///
    /// Full 8-bit PWM per channel. Sent as 8 row-sized chunks joined by
    /// repeated starts.
    #[default]
    ChannelInterleaved = 0x1,
    /// Three bit planes, 24 bytes total
    ///
    /// Sent in one write prefixed with [`RGB_PLANE_DATA`].
    BitPacked = 0x2,
    /// Same layout as [`Format::BitPacked`], sent without a command byte
    ///
    /// First-revision backpacks infer the format from the missing command.
    BitPackedLegacy = 0x3,
}

impl Format {
    /// Buffer length this format requires
    pub const fn buffer_len(self) -> usize {
        match self {
            Self::ChannelInterleaved => INTERLEAVED_BUF_LEN,
            Self::BitPacked | Self::BitPackedLegacy => PACKED_BUF_LEN,
        }
    }

    /// Command byte that opens a data frame, if any
    pub const fn data_command(self) -> Option<u8> {
        match self {
            Self::ChannelInterleaved => Some(GRB_DATA),
            Self::BitPacked => Some(RGB_PLANE_DATA),
            Self::BitPackedLegacy => None,
        }
    }

    /// Whether each channel is stored as a single bit
    pub const fn is_packed(self) -> bool {
        !matches!(self, Self::ChannelInterleaved)
    }

    /// Write one pixel into `buf`
    ///
    /// `row` and `col` must be below 8 and `buf` at least
    /// [`buffer_len`](Self::buffer_len) long.
    pub(crate) fn write_cell(self, buf: &mut [u8], row: u8, col: u8, color: Rgb) {
        if self.is_packed() {
            let row = row as usize;
            let bit = 1u8 << col;
            set_bit(&mut buf[row], bit, color.red != 0);
            set_bit(&mut buf[row + GRN_PLANE], bit, color.grn != 0);
            set_bit(&mut buf[row + BLU_PLANE], bit, color.blu != 0);
        } else {
            let offset = interleaved_offset(row, col);
            buf[offset] = color.grn;
            buf[offset + 1] = color.red;
            buf[offset + 2] = color.blu;
        }
    }

    /// Read one pixel back out of `buf`
    ///
    /// Bit-packed channels decode to `0xFF` when lit and `0x00` otherwise.
    pub(crate) fn read_cell(self, buf: &[u8], row: u8, col: u8) -> Rgb {
        if self.is_packed() {
            let row = row as usize;
            let bit = 1u8 << col;
            let level = |byte: u8| if byte & bit != 0 { 0xFF } else { 0x00 };
            Rgb::new(
                level(buf[row]),
                level(buf[row + GRN_PLANE]),
                level(buf[row + BLU_PLANE]),
            )
        } else {
            let offset = interleaved_offset(row, col);
            Rgb::new(buf[offset + 1], buf[offset], buf[offset + 2])
        }
    }
}

impl TryFrom<u8> for Format {
    type Error = UnsupportedFormat;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x1 => Ok(Self::ChannelInterleaved),
            0x2 => Ok(Self::BitPacked),
            0x3 => Ok(Self::BitPackedLegacy),
            other => Err(UnsupportedFormat(other)),
        }
    }
}

impl From<Format> for u8 {
    fn from(format: Format) -> Self {
        format as u8
    }
}

fn interleaved_offset(row: u8, col: u8) -> usize {
    row as usize * ROW_CHUNK_LEN + col as usize * 3
}

fn set_bit(byte: &mut u8, bit: u8, on: bool) {
    if on {
        *byte |= bit;
    } else {
        *byte &= !bit;
    }
}
