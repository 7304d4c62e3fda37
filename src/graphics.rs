//! Graphics support via embedded-graphics
//!
//! With the `graphics` feature, [`Matrix`] implements
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) with
//! [`Rgb888`] colors, so the embedded-graphics primitives, fonts and images
//! can draw straight into the pixel buffer.
//!
//! `x` is the column and `y` the row. Pixels outside the 8x8 grid are
//! skipped. Bit-packed formats light a channel when its value is nonzero.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb888,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle, Rectangle},
//! };
//! use rgb_matrix::Matrix;
//! # use core::convert::Infallible;
//! # use rgb_matrix::BusTransport;
//! # struct Bus;
//! # impl BusTransport for Bus {
//! #     type Error = Infallible;
//! #     fn begin(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn start_transaction(&mut self, _address: u8) -> Result<(), Infallible> { Ok(()) }
//! #     fn write_byte(&mut self, _byte: u8) -> Result<(), Infallible> { Ok(()) }
//! #     fn write_block(&mut self, _bytes: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn end_transaction(&mut self, _release: bool) -> Result<(), Infallible> { Ok(()) }
//! # }
//! let mut matrix = Matrix::new(Bus, 0x60);
//! let _ = matrix.begin();
//!
//! // Blue border with a red diagonal
//! let _ = Rectangle::new(Point::zero(), Size::new(8, 8))
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb888::BLUE, 1))
//!     .draw(&mut matrix);
//! let _ = Line::new(Point::new(0, 0), Point::new(7, 7))
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb888::RED, 1))
//!     .draw(&mut matrix);
//!
//! let _ = matrix.transmit();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb888,
    prelude::Pixel,
};

use crate::color::Rgb;
use crate::command::{COLS, ROWS};
use crate::interface::BusTransport;
use crate::matrix::Matrix;

impl<T, B> DrawTarget for Matrix<T, B>
where
    T: BusTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(col), Ok(row)) = (u8::try_from(x), u8::try_from(y)) else {
                continue;
            };
            if row >= ROWS || col >= COLS {
                continue;
            }
            self.set_pixel_unchecked(row, col, Rgb::from(color));
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let color = Rgb::from(color);
        for row in 0..ROWS {
            for col in 0..COLS {
                self.set_pixel_unchecked(row, col, color);
            }
        }
        Ok(())
    }
}

impl<T, B> OriginDimensions for Matrix<T, B>
where
    T: BusTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(u32::from(COLS), u32::from(ROWS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use embedded_graphics::{
        pixelcolor::RgbColor,
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };

    #[derive(Debug)]
    struct MockTransport;

    impl BusTransport for MockTransport {
        type Error = Infallible;

        fn begin(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn start_transaction(&mut self, _address: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write_byte(&mut self, _byte: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write_block(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn end_transaction(&mut self, _release: bool) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_size_is_eight_by_eight() {
        let matrix = Matrix::new(MockTransport, 0x60);
        assert_eq!(matrix.size(), Size::new(8, 8));
    }

    #[test]
    fn test_draw_row_maps_x_to_column() {
        let mut matrix = Matrix::new(MockTransport, 0x60);
        Line::new(Point::new(0, 2), Point::new(7, 2))
            .into_styled(PrimitiveStyle::with_stroke(Rgb888::new(1, 2, 3), 1))
            .draw(&mut matrix)
            .unwrap();

        for col in 0..8 {
            assert_eq!(matrix.get_pixel(2, col).unwrap(), Rgb::new(1, 2, 3));
            assert_eq!(matrix.get_pixel(3, col).unwrap(), Rgb::OFF);
        }
    }

    #[test]
    fn test_out_of_bounds_pixels_are_skipped() {
        let mut matrix = Matrix::new(MockTransport, 0x60);
        Rectangle::new(Point::new(-4, -4), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::GREEN))
            .draw(&mut matrix)
            .unwrap();

        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(matrix.get_pixel(row, col).unwrap(), Rgb::new(0, 0xFF, 0));
            }
        }
    }

    #[test]
    fn test_clear_in_bit_packed_format() {
        let mut matrix =
            Matrix::with_format(MockTransport, 0x60, [0u8; 24], Format::BitPacked).unwrap();
        DrawTarget::clear(&mut matrix, Rgb888::new(0x01, 0x00, 0x80)).unwrap();

        assert!(matrix.buffer()[..8].iter().all(|b| *b == 0xFF));
        assert!(matrix.buffer()[8..16].iter().all(|b| *b == 0x00));
        assert!(matrix.buffer()[16..].iter().all(|b| *b == 0xFF));
    }
}
