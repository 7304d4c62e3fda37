//! Bus transport abstraction
//!
//! This module provides the [`BusTransport`] trait the driver talks through,
//! and [`I2cTransport`], an implementation over any embedded-hal v1.0
//! [`I2c`] bus.
//!
//! ## Transactions
//!
//! A transaction is opened with [`BusTransport::start_transaction`], filled
//! with [`write_byte`](BusTransport::write_byte) /
//! [`write_block`](BusTransport::write_block) calls and closed with
//! [`end_transaction`](BusTransport::end_transaction). Closing with
//! `release = false` keeps the peripheral selected so the next transaction to
//! the same address continues the same logical write (a repeated start).
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use rgb_matrix::{BusTransport, I2cTransport};
//! # use core::convert::Infallible;
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
//! let mut bus = I2cTransport::new(MockI2c);
//!
//! // Set the global dimmer to half brightness
//! let _ = bus.begin();
//! let _ = bus.start_transaction(0x60);
//! let _ = bus.write_block(&[0x04, 0x80]);
//! let _ = bus.end_transaction(true);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::I2c;

use crate::command::INTERLEAVED_BUF_LEN;

type TransportResult<E> = core::result::Result<(), E>;

/// Trait for the two-wire bus the matrix is attached to
///
/// This trait abstracts over bus implementations so the
/// [`Matrix`](crate::Matrix) can run on any controller.
///
/// ## Implementing
///
/// For embedded-hal buses use the provided [`I2cTransport`]. Implement this
/// trait yourself to wrap a bus library with its own transaction model.
pub trait BusTransport {
    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Prepare the bus for use
    ///
    /// Called once by [`Matrix::begin`](crate::Matrix::begin).
    fn begin(&mut self) -> TransportResult<Self::Error>;

    /// Open a write transaction to `address`
    fn start_transaction(&mut self, address: u8) -> TransportResult<Self::Error>;

    /// Queue one byte in the open transaction
    fn write_byte(&mut self, byte: u8) -> TransportResult<Self::Error>;

    /// Queue a block of bytes in the open transaction
    fn write_block(&mut self, bytes: &[u8]) -> TransportResult<Self::Error>;

    /// Close the open transaction
    ///
    /// # Arguments
    ///
    /// * `release` - `true` sends a stop and frees the bus; `false` keeps the
    ///   peripheral selected for a repeated start
    fn end_transaction(&mut self, release: bool) -> TransportResult<Self::Error>;
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    type Error = T::Error;

    fn begin(&mut self) -> TransportResult<Self::Error> {
        T::begin(self)
    }

    fn start_transaction(&mut self, address: u8) -> TransportResult<Self::Error> {
        T::start_transaction(self, address)
    }

    fn write_byte(&mut self, byte: u8) -> TransportResult<Self::Error> {
        T::write_byte(self, byte)
    }

    fn write_block(&mut self, bytes: &[u8]) -> TransportResult<Self::Error> {
        T::write_block(self, bytes)
    }

    fn end_transaction(&mut self, release: bool) -> TransportResult<Self::Error> {
        T::end_transaction(self, release)
    }
}

/// Errors that can occur at the I2C transport level
///
/// Generic over the bus error type.
#[derive(Debug, PartialEq, Eq)]
pub enum TransportError<E> {
    /// I2C bus error
    I2c(E),
    /// Logical write exceeds [`STAGING_LEN`] bytes
    Overflow,
    /// Write or end without an open transaction
    NoTransaction,
    /// Repeated start addressed a different peripheral
    AddressMismatch {
        /// Address of the held transfer
        held: u8,
        /// Address requested by the new transaction
        requested: u8,
    },
}

impl<E: Debug> core::fmt::Display for TransportError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
            Self::Overflow => write!(f, "Transfer exceeds {STAGING_LEN} bytes"),
            Self::NoTransaction => write!(f, "No open transaction"),
            Self::AddressMismatch { held, requested } => write!(
                f,
                "Repeated start to {requested:#04x} while {held:#04x} is held"
            ),
        }
    }
}

impl<E: Debug> core::error::Error for TransportError<E> {}

/// Largest logical write the transport can stage
///
/// A full interleaved frame plus its command byte.
pub const STAGING_LEN: usize = INTERLEAVED_BUF_LEN + 1;

/// Transaction state of an [`I2cTransport`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Session {
    /// Bus released
    Idle,
    /// Transaction open and accepting bytes
    Open(u8),
    /// Closed without release, waiting for a repeated start
    Held(u8),
}

/// [`BusTransport`] over an embedded-hal v1.0 [`I2c`] bus
///
/// Bytes of one logical write are staged in a fixed buffer. Ending a
/// transaction without release keeps them staged; the release sends
/// everything with a single [`I2c::write`], so chunks joined by repeated
/// starts reach the peripheral as one contiguous write.
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
/// let transport = I2cTransport::new(MockI2c);
/// let _matrix = Matrix::new(transport, 0x60);
/// ```
pub struct I2cTransport<I2C> {
    /// I2C bus
    i2c: I2C,
    /// Bytes of the current logical write
    staged: [u8; STAGING_LEN],
    /// Number of staged bytes
    len: usize,
    /// Transaction state
    session: Session,
}

impl<I2C: I2c> I2cTransport<I2C> {
    /// Create a new transport owning `i2c`
    ///
    /// Pass `&mut i2c` to keep using the bus for other devices.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            staged: [0; STAGING_LEN],
            len: 0,
            session: Session::Idle,
        }
    }

    /// Give back the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Number of bytes waiting to be sent
    pub fn staged_len(&self) -> usize {
        self.len
    }

    fn stage(&mut self, bytes: &[u8]) -> TransportResult<TransportError<I2C::Error>> {
        if !matches!(self.session, Session::Open(_)) {
            return Err(TransportError::NoTransaction);
        }
        let end = self.len + bytes.len();
        if end > STAGING_LEN {
            return Err(TransportError::Overflow);
        }
        self.staged[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}

impl<I2C: I2c> BusTransport for I2cTransport<I2C> {
    type Error = TransportError<I2C::Error>;

    fn begin(&mut self) -> TransportResult<Self::Error> {
        // Bus timing and pins are configured by the HAL when `I2C` is built
        self.len = 0;
        self.session = Session::Idle;
        Ok(())
    }

    fn start_transaction(&mut self, address: u8) -> TransportResult<Self::Error> {
        match self.session {
            Session::Held(held) if held != address => {
                return Err(TransportError::AddressMismatch {
                    held,
                    requested: address,
                });
            }
            Session::Held(_) => {}
            Session::Idle | Session::Open(_) => self.len = 0,
        }
        self.session = Session::Open(address);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> TransportResult<Self::Error> {
        self.stage(&[byte])
    }

    fn write_block(&mut self, bytes: &[u8]) -> TransportResult<Self::Error> {
        self.stage(bytes)
    }

    fn end_transaction(&mut self, release: bool) -> TransportResult<Self::Error> {
        let Session::Open(address) = self.session else {
            return Err(TransportError::NoTransaction);
        };
        if !release {
            self.session = Session::Held(address);
            return Ok(());
        }

        let len = self.len;
        self.len = 0;
        self.session = Session::Idle;
        self.i2c
            .write(address, &self.staged[..len])
            .map_err(TransportError::I2c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[derive(Debug, Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c<SevenBitAddress> for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            let mut bytes = Vec::new();
            for op in operations.iter() {
                if let Operation::Write(buf) = op {
                    bytes.extend_from_slice(buf);
                }
            }
            self.writes.push((address, bytes));
            Ok(())
        }
    }

    #[test]
    fn test_release_sends_single_write() {
        let mut bus = I2cTransport::new(MockI2c::default());
        bus.begin().unwrap();
        bus.start_transaction(0x60).unwrap();
        bus.write_byte(0x08).unwrap();
        bus.write_byte(0x80).unwrap();
        bus.end_transaction(true).unwrap();

        let i2c = bus.release();
        assert_eq!(i2c.writes, alloc::vec![(0x60, alloc::vec![0x08, 0x80])]);
    }

    #[test]
    fn test_repeated_start_joins_chunks() {
        let mut bus = I2cTransport::new(MockI2c::default());
        bus.start_transaction(0x61).unwrap();
        bus.write_block(&[1, 2]).unwrap();
        bus.end_transaction(false).unwrap();
        assert_eq!(bus.staged_len(), 2);

        bus.start_transaction(0x61).unwrap();
        bus.write_block(&[3]).unwrap();
        bus.end_transaction(true).unwrap();
        assert_eq!(bus.staged_len(), 0);

        let i2c = bus.release();
        assert_eq!(i2c.writes, alloc::vec![(0x61, alloc::vec![1, 2, 3])]);
    }

    #[test]
    fn test_repeated_start_to_other_address_fails() {
        let mut bus = I2cTransport::new(MockI2c::default());
        bus.start_transaction(0x60).unwrap();
        bus.end_transaction(false).unwrap();

        assert_eq!(
            bus.start_transaction(0x61),
            Err(TransportError::AddressMismatch {
                held: 0x60,
                requested: 0x61
            })
        );
    }

    #[test]
    fn test_write_without_transaction_fails() {
        let mut bus = I2cTransport::new(MockI2c::default());
        assert_eq!(bus.write_byte(0x01), Err(TransportError::NoTransaction));
        assert_eq!(bus.end_transaction(true), Err(TransportError::NoTransaction));
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut bus = I2cTransport::new(MockI2c::default());
        bus.start_transaction(0x60).unwrap();
        bus.write_block(&[0u8; STAGING_LEN]).unwrap();
        assert_eq!(bus.write_byte(0), Err(TransportError::Overflow));
    }

    #[test]
    fn test_i2c_error_is_wrapped() {
        let mut bus = I2cTransport::new(MockI2c {
            fail: true,
            ..MockI2c::default()
        });
        bus.start_transaction(0x60).unwrap();
        bus.write_byte(0x04).unwrap();
        assert_eq!(
            bus.end_transaction(true),
            Err(TransportError::I2c(MockError))
        );
    }

    #[test]
    fn test_begin_drops_held_transfer() {
        let mut bus = I2cTransport::new(MockI2c::default());
        bus.start_transaction(0x60).unwrap();
        bus.write_byte(0x01).unwrap();
        bus.end_transaction(false).unwrap();

        bus.begin().unwrap();
        assert_eq!(bus.staged_len(), 0);
        assert!(bus.start_transaction(0x61).is_ok());
    }
}
