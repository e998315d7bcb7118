//! SPI bus abstractions
//!
//! Provides the byte-level SPI master trait chip-specific HALs implement,
//! and [`SpiTransport`], which combines an SPI bus with the chip-select and
//! ready lines into a [`Transport`].

use crate::gpio::{InputPin, OutputPin};
use crate::transport::Transport;

/// Size of the scratch buffer used to clock out filler bytes
const FILLER_CHUNK: usize = 32;

/// SPI bus master
///
/// Provides basic SPI transfer operations for communicating with
/// peripheral devices.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Transfer data (simultaneous read/write)
    ///
    /// Writes data from `write` buffer while reading into `read` buffer.
    /// Both buffers must be the same length.
    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error>;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data (writes zeros)
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// [`Transport`] built from an SPI bus and two GPIO lines
///
/// - `cs`: chip-select output, active low (selected = pin low)
/// - `ready`: HRDY input, high when the controller is ready
///
/// The IT8951 expects SPI mode 0, MSB first, at no more than 24 MHz; bus
/// configuration is left to the HAL that constructs `spi`.
pub struct SpiTransport<SPI, CS, RDY> {
    spi: SPI,
    cs: CS,
    ready: RDY,
}

impl<SPI, CS, RDY> SpiTransport<SPI, CS, RDY>
where
    SPI: SpiBus,
    CS: OutputPin,
    RDY: InputPin,
{
    /// Create a new transport
    ///
    /// The chip-select line is released immediately so the first
    /// transaction starts from a known state.
    pub fn new(spi: SPI, mut cs: CS, ready: RDY) -> Self {
        cs.set_high();
        Self { spi, cs, ready }
    }

    /// Consume the transport and return its parts
    pub fn release(self) -> (SPI, CS, RDY) {
        (self.spi, self.cs, self.ready)
    }
}

impl<SPI, CS, RDY> Transport for SpiTransport<SPI, CS, RDY>
where
    SPI: SpiBus,
    CS: OutputPin,
    RDY: InputPin,
{
    type Error = SPI::Error;

    fn exchange(
        &mut self,
        tx: Option<&[u8]>,
        rx: Option<&mut [u8]>,
        len: usize,
    ) -> Result<(), Self::Error> {
        match (tx, rx) {
            (Some(tx), Some(rx)) => self.spi.transfer(&mut rx[..len], &tx[..len]),
            (Some(tx), None) => self.spi.write(&tx[..len]),
            (None, Some(rx)) => self.spi.read(&mut rx[..len]),
            (None, None) => {
                // Nothing to send or keep, but the clocks still have to run
                let mut scratch = [0u8; FILLER_CHUNK];
                let mut remaining = len;
                while remaining > 0 {
                    let n = remaining.min(FILLER_CHUNK);
                    self.spi.read(&mut scratch[..n])?;
                    remaining -= n;
                }
                Ok(())
            }
        }
    }

    fn set_select(&mut self, active: bool) {
        // Active low
        self.cs.set_state(!active);
    }

    fn read_ready(&mut self) -> bool {
        self.ready.is_high()
    }
}
