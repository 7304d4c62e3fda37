//! Core matrix operations

use crate::color::Rgb;
use crate::command::{
    ALL_DIM, BLU_DIM, COLS, GRN_DIM, INTERLEAVED_BUF_LEN, RED_DIM, ROW_CHUNK_LEN, ROWS,
};
use crate::config::Config;
use crate::error::Error;
use crate::format::Format;
use crate::interface::BusTransport;

type MatrixResult<T> = core::result::Result<(), Error<T>>;

/// Brightness scaling channel
///
/// Each channel is set with its own two-byte command frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Dimmer {
    /// Scales every channel
    Global = ALL_DIM,
    /// Scales the red channel
    Red = RED_DIM,
    /// Scales the green channel
    Green = GRN_DIM,
    /// Scales the blue channel
    Blue = BLU_DIM,
}

impl Dimmer {
    /// Command byte that sets this dimmer
    pub const fn command(self) -> u8 {
        self as u8
    }
}

/// Last dimmer values sent to the backpack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DimmerLevels {
    global: u8,
    red: u8,
    grn: u8,
    blu: u8,
}

impl Default for DimmerLevels {
    fn default() -> Self {
        Self {
            global: 0xFF,
            red: 0xFF,
            grn: 0xFF,
            blu: 0xFF,
        }
    }
}

impl DimmerLevels {
    fn get(&self, dimmer: Dimmer) -> u8 {
        match dimmer {
            Dimmer::Global => self.global,
            Dimmer::Red => self.red,
            Dimmer::Green => self.grn,
            Dimmer::Blue => self.blu,
        }
    }

    fn slot(&mut self, dimmer: Dimmer) -> &mut u8 {
        match dimmer {
            Dimmer::Global => &mut self.global,
            Dimmer::Red => &mut self.red,
            Dimmer::Green => &mut self.grn,
            Dimmer::Blue => &mut self.blu,
        }
    }
}

/// Driver for an 8x8 RGB LED matrix backpack
///
/// Holds the pixel buffer and the transport. Pixel operations only touch
/// the buffer; nothing reaches the matrix until [`transmit`](Self::transmit).
///
/// ## Buffer ownership
///
/// `B` is any byte storage. [`Matrix::new`] allocates an owned
/// `[u8; 192]`. Pass `&mut [u8]` to [`Matrix::with_buffer`] or
/// [`Matrix::with_format`] to use caller storage; the borrow lasts as long
/// as the driver, and [`release`](Self::release) hands it back so another
/// driver can bind to the same bytes.
///
/// ## Coordinates
///
/// Rows and columns run 0..8. Checked operations return
/// [`Error::OutOfRange`] for anything else.
///
/// ## Example
///
/// ```rust,no_run
/// use rgb_matrix::{I2cTransport, Matrix};
/// # use core::convert::Infallible;
/// # use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
/// # struct MockI2c;
/// # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
/// # impl I2c<SevenBitAddress> for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// let mut matrix = Matrix::new(I2cTransport::new(MockI2c), 0x60);
/// let _ = matrix.begin();
///
/// let _ = matrix.set_pixel(0, 0, 0xFF, 0x00, 0x00);
/// let _ = matrix.set_row(7, &[0x00_00_FF; 8]);
/// let _ = matrix.transmit();
/// ```
pub struct Matrix<T, B = [u8; INTERLEAVED_BUF_LEN]>
where
    T: BusTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Bus transport
    transport: T,
    /// Pixel buffer
    buffer: B,
    /// Address and format
    config: Config,
    /// Dimmer values last sent
    dimmers: DimmerLevels,
    /// Whether `begin` has run
    begun: bool,
}

impl<T> Matrix<T>
where
    T: BusTransport,
{
    /// Create a matrix with an owned 192-byte buffer in interleaved format
    ///
    /// Does not touch the bus.
    pub fn new(transport: T, address: u8) -> Self {
        Self::bind(
            transport,
            Config::new(address, Format::ChannelInterleaved),
            [0; INTERLEAVED_BUF_LEN],
        )
    }
}

impl<T, B> Matrix<T, B>
where
    T: BusTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a matrix on caller storage in interleaved format
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is shorter than 192 bytes.
    pub fn with_buffer(transport: T, address: u8, buffer: B) -> Result<Self, Error<T>> {
        Self::with_format(transport, address, buffer, Format::ChannelInterleaved)
    }

    /// Create a matrix on caller storage in the given format
    ///
    /// The buffer must hold at least [`Format::buffer_len`] bytes: 192 for
    /// [`Format::ChannelInterleaved`], 24 for the bit-packed formats. Extra
    /// bytes are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is too short.
    pub fn with_format(
        transport: T,
        address: u8,
        buffer: B,
        format: Format,
    ) -> Result<Self, Error<T>> {
        Self::from_config(transport, Config::new(address, format), buffer)
    }

    /// Create a matrix from a [`Config`]
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is too short for
    /// `config.format`.
    pub fn from_config(transport: T, config: Config, buffer: B) -> Result<Self, Error<T>> {
        let required = config.buffer_len();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(Error::BufferTooSmall { required, provided });
        }
        Ok(Self::bind(transport, config, buffer))
    }

    fn bind(transport: T, config: Config, buffer: B) -> Self {
        Self {
            transport,
            buffer,
            config,
            dimmers: DimmerLevels::default(),
            begun: false,
        }
    }

    /// Initialize the bus transport
    ///
    /// Must be called once before [`transmit`](Self::transmit) or any dimmer
    /// setter.
    pub fn begin(&mut self) -> MatrixResult<T> {
        log::debug!("rgb-matrix {:#04x}: begin", self.config.address);
        self.transport.begin().map_err(Self::transport_error)?;
        self.begun = true;
        Ok(())
    }

    /// Whether [`begin`](Self::begin) has completed
    pub fn is_begun(&self) -> bool {
        self.begun
    }

    /// Set one pixel
    ///
    /// In the bit-packed formats each channel is on when nonzero.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if `row` or `col` is 8 or more.
    pub fn set_pixel(&mut self, row: u8, col: u8, red: u8, grn: u8, blu: u8) -> MatrixResult<T> {
        Self::check_cell(row, col)?;
        self.write_cell(row, col, Rgb::new(red, grn, blu));
        Ok(())
    }

    /// Set one pixel from a packed `0xRRGGBB` value
    pub fn set_pixel_rgb(&mut self, row: u8, col: u8, rgb: u32) -> MatrixResult<T> {
        let color = Rgb::from_packed(rgb);
        self.set_pixel(row, col, color.red, color.grn, color.blu)
    }

    /// Set one pixel without a range check
    ///
    /// `row` and `col` must be below 8. This is only asserted in debug
    /// builds; in release builds a bad coordinate writes some other cell or
    /// panics on the buffer index.
    pub fn set_pixel_unchecked(&mut self, row: u8, col: u8, color: Rgb) {
        debug_assert!(row < ROWS && col < COLS, "pixel ({row}, {col}) out of range");
        self.write_cell(row, col, color);
    }

    /// Read one pixel back from the buffer
    ///
    /// Bit-packed channels read as `0xFF` when on and `0x00` when off.
    pub fn get_pixel(&self, row: u8, col: u8) -> Result<Rgb, Error<T>> {
        Self::check_cell(row, col)?;
        Ok(self.config.format.read_cell(self.buffer.as_ref(), row, col))
    }

    /// Set a column from packed `0xRRGGBB` values, top row first
    pub fn set_col(&mut self, col: u8, colors: &[u32; 8]) -> MatrixResult<T> {
        for (row, rgb) in (0..ROWS).zip(colors) {
            self.set_pixel_rgb(row, col, *rgb)?;
        }
        Ok(())
    }

    /// Set a column from separate channel arrays, top row first
    pub fn set_col_channels(
        &mut self,
        col: u8,
        red: &[u8; 8],
        grn: &[u8; 8],
        blu: &[u8; 8],
    ) -> MatrixResult<T> {
        for row in 0..ROWS {
            let i = row as usize;
            self.set_pixel(row, col, red[i], grn[i], blu[i])?;
        }
        Ok(())
    }

    /// Set a row from packed `0xRRGGBB` values, left column first
    pub fn set_row(&mut self, row: u8, colors: &[u32; 8]) -> MatrixResult<T> {
        for (col, rgb) in (0..COLS).zip(colors) {
            self.set_pixel_rgb(row, col, *rgb)?;
        }
        Ok(())
    }

    /// Set a row from separate channel arrays, left column first
    pub fn set_row_channels(
        &mut self,
        row: u8,
        red: &[u8; 8],
        grn: &[u8; 8],
        blu: &[u8; 8],
    ) -> MatrixResult<T> {
        for col in 0..COLS {
            let i = col as usize;
            self.set_pixel(row, col, red[i], grn[i], blu[i])?;
        }
        Ok(())
    }

    /// Turn one pixel off
    pub fn clear_pixel(&mut self, row: u8, col: u8) -> MatrixResult<T> {
        Self::check_cell(row, col)?;
        self.write_cell(row, col, Rgb::OFF);
        Ok(())
    }

    /// Turn a row off
    pub fn clear_row(&mut self, row: u8) -> MatrixResult<T> {
        for col in 0..COLS {
            self.clear_pixel(row, col)?;
        }
        Ok(())
    }

    /// Turn a column off
    pub fn clear_col(&mut self, col: u8) -> MatrixResult<T> {
        for row in 0..ROWS {
            self.clear_pixel(row, col)?;
        }
        Ok(())
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        let len = self.config.buffer_len();
        self.buffer.as_mut()[..len].fill(0);
    }

    /// Set the global dimmer and send it
    pub fn set_dim(&mut self, level: u8) -> MatrixResult<T> {
        self.set_dimmer(Dimmer::Global, level)
    }

    /// Set the red dimmer and send it
    pub fn set_red_dim(&mut self, level: u8) -> MatrixResult<T> {
        self.set_dimmer(Dimmer::Red, level)
    }

    /// Set the green dimmer and send it
    pub fn set_grn_dim(&mut self, level: u8) -> MatrixResult<T> {
        self.set_dimmer(Dimmer::Green, level)
    }

    /// Set the blue dimmer and send it
    pub fn set_blu_dim(&mut self, level: u8) -> MatrixResult<T> {
        self.set_dimmer(Dimmer::Blue, level)
    }

    /// Store a dimmer level and send it in its own transaction
    ///
    /// The level is stored even if sending fails, so the getters report what
    /// was last requested.
    ///
    /// # Errors
    ///
    /// - `Error::NotBegun` if [`begin`](Self::begin) has not run
    /// - `Error::Transport` if the bus reports a failure
    pub fn set_dimmer(&mut self, dimmer: Dimmer, level: u8) -> MatrixResult<T> {
        *self.dimmers.slot(dimmer) = level;
        self.ensure_begun()?;
        log::debug!(
            "rgb-matrix {:#04x}: {:?} dimmer -> {:#04x}",
            self.config.address,
            dimmer,
            level
        );
        self.send_frame(&[dimmer.command(), level])
    }

    /// Last global dimmer level
    pub fn dim(&self) -> u8 {
        self.dimmers.global
    }

    /// Last red dimmer level
    pub fn red_dim(&self) -> u8 {
        self.dimmers.red
    }

    /// Last green dimmer level
    pub fn grn_dim(&self) -> u8 {
        self.dimmers.grn
    }

    /// Last blue dimmer level
    pub fn blu_dim(&self) -> u8 {
        self.dimmers.blu
    }

    /// Last level of any dimmer
    pub fn dimmer(&self, dimmer: Dimmer) -> u8 {
        self.dimmers.get(dimmer)
    }

    /// Send the pixel buffer to the matrix
    ///
    /// - [`Format::ChannelInterleaved`]: 8 row chunks of 24 bytes, the first
    ///   prefixed with the data command, joined by repeated starts and
    ///   released after the last
    /// - [`Format::BitPacked`]: data command and 24 bytes in one write
    /// - [`Format::BitPackedLegacy`]: 24 bytes in one write, no command
    ///
    /// # Errors
    ///
    /// - `Error::NotBegun` if [`begin`](Self::begin) has not run
    /// - `Error::Transport` if the bus reports a failure; no retry is made
    pub fn transmit(&mut self) -> MatrixResult<T> {
        self.ensure_begun()?;
        log::debug!(
            "rgb-matrix {:#04x}: transmit {:?}",
            self.config.address,
            self.config.format
        );
        match self.config.format {
            Format::ChannelInterleaved => self.transmit_chunked(),
            Format::BitPacked | Format::BitPackedLegacy => self.transmit_packed(),
        }
    }

    fn transmit_chunked(&mut self) -> MatrixResult<T> {
        let address = self.config.address;
        let data = &self.buffer.as_ref()[..INTERLEAVED_BUF_LEN];
        let last = INTERLEAVED_BUF_LEN / ROW_CHUNK_LEN - 1;

        for (i, chunk) in data.chunks_exact(ROW_CHUNK_LEN).enumerate() {
            log::trace!("rgb-matrix {:#04x}: chunk {}", address, i);
            self.transport
                .start_transaction(address)
                .map_err(Self::transport_error)?;
            if i == 0 {
                if let Some(cmd) = self.config.format.data_command() {
                    self.transport.write_byte(cmd).map_err(Self::transport_error)?;
                }
            }
            self.transport.write_block(chunk).map_err(Self::transport_error)?;
            // Hold the bus between chunks so the backpack sees one write
            self.transport
                .end_transaction(i == last)
                .map_err(Self::transport_error)?;
        }
        Ok(())
    }

    fn transmit_packed(&mut self) -> MatrixResult<T> {
        let len = self.config.buffer_len();
        self.transport
            .start_transaction(self.config.address)
            .map_err(Self::transport_error)?;
        if let Some(cmd) = self.config.format.data_command() {
            self.transport.write_byte(cmd).map_err(Self::transport_error)?;
        }
        self.transport
            .write_block(&self.buffer.as_ref()[..len])
            .map_err(Self::transport_error)?;
        self.transport.end_transaction(true).map_err(Self::transport_error)
    }

    fn send_frame(&mut self, frame: &[u8]) -> MatrixResult<T> {
        self.transport
            .start_transaction(self.config.address)
            .map_err(Self::transport_error)?;
        self.transport.write_block(frame).map_err(Self::transport_error)?;
        self.transport.end_transaction(true).map_err(Self::transport_error)
    }

    fn ensure_begun(&self) -> MatrixResult<T> {
        if self.begun {
            Ok(())
        } else {
            Err(Error::NotBegun)
        }
    }

    fn write_cell(&mut self, row: u8, col: u8, color: Rgb) {
        self.config
            .format
            .write_cell(self.buffer.as_mut(), row, col, color);
    }

    /// Pixel bytes in the active format
    pub fn buffer(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.config.buffer_len()]
    }

    /// Pixel bytes in the active format, mutably
    ///
    /// For loading a frame prepared elsewhere.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        let len = self.config.buffer_len();
        &mut self.buffer.as_mut()[..len]
    }

    /// Active pixel format
    pub fn format(&self) -> Format {
        self.config.format
    }

    /// Bus address of the backpack
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tear down the driver, returning the transport and buffer
    pub fn release(self) -> (T, B) {
        (self.transport, self.buffer)
    }

    fn check_cell(row: u8, col: u8) -> MatrixResult<T> {
        if row < ROWS && col < COLS {
            Ok(())
        } else {
            Err(Error::OutOfRange { row, col })
        }
    }

    fn transport_error(err: T::Error) -> Error<T> {
        log::warn!("rgb-matrix: transport error {:?}", err);
        Error::Transport(err)
    }
}
