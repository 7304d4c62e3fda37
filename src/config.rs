//! Matrix configuration types and builder

pub use crate::error::{BuilderError, MAX_ADDRESS};
use crate::format::Format;

/// Matrix configuration
///
/// Use [`Builder`] to create a validated Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// 7-bit bus address of the backpack
    pub address: u8,
    /// Pixel buffer format
    pub format: Format,
}

impl Config {
    /// Create a configuration without validating the address
    pub const fn new(address: u8, format: Format) -> Self {
        Self { address, format }
    }

    /// Buffer length required by the configured format
    pub const fn buffer_len(&self) -> usize {
        self.format.buffer_len()
    }
}

/// Builder for constructing matrix configuration
///
/// # Example
///
/// ```
/// use rgb_matrix::{Builder, Format};
///
/// let config = match Builder::new().address(0x61).format(Format::BitPacked).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.buffer_len(), 24);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Bus address (required)
    address: Option<u8>,
    /// Pixel buffer format
    format: Format,
    /// Raw format code, validated at build time
    format_code: Option<u8>,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 7-bit bus address (required)
    pub fn address(mut self, address: u8) -> Self {
        self.address = Some(address);
        self
    }

    /// Set the pixel buffer format
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self.format_code = None;
        self
    }

    /// Set the pixel buffer format from its numeric code
    ///
    /// Codes match the backpack firmware: 1 interleaved, 2 bit-packed,
    /// 3 legacy bit-packed. Unknown codes fail in [`build`](Self::build).
    pub fn format_code(mut self, code: u8) -> Self {
        self.format_code = Some(code);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// - `BuilderError::MissingAddress` if no address was set
    /// - `BuilderError::InvalidAddress` if the address exceeds [`MAX_ADDRESS`]
    /// - `BuilderError::UnsupportedFormat` if a format code is unknown
    pub fn build(self) -> Result<Config, BuilderError> {
        let address = self.address.ok_or(BuilderError::MissingAddress)?;
        if address > MAX_ADDRESS {
            return Err(BuilderError::InvalidAddress(address));
        }
        let format = match self.format_code {
            Some(code) => Format::try_from(code)?,
            None => self.format,
        };
        Ok(Config { address, format })
    }
}
