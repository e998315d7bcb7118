//! embedded-hal 1.0 adapters
//!
//! Wraps `embedded_hal` bus and pin implementations so they satisfy the
//! tcon-hal traits and can be handed to [`SpiTransport`](crate::SpiTransport).
//!
//! The tcon-hal pin traits are infallible. Pin errors are therefore folded
//! into the safest observable value: a failed output write is dropped, and a
//! failed ready-line read reports "not ready".

use embedded_hal::digital;
use embedded_hal::spi;

use crate::gpio::{InputPin, OutputPin};
use crate::spi::SpiBus;

/// SPI bus adapter for `embedded_hal::spi::SpiBus<u8>`
pub struct EhSpi<T>(pub T);

impl<T: spi::SpiBus<u8>> SpiBus for EhSpi<T> {
    type Error = T::Error;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.0.transfer(read, write)?;
        self.0.flush()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(data)?;
        self.0.flush()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(buf)?;
        self.0.flush()
    }
}

/// Output pin adapter for `embedded_hal::digital::OutputPin`
///
/// Remembers the last requested level so [`OutputPin::is_set_high`] does
/// not need a stateful pin.
pub struct EhOutput<T> {
    pin: T,
    high: bool,
}

impl<T: digital::OutputPin> EhOutput<T> {
    /// Wrap a pin, assuming it currently reads low
    pub fn new(pin: T) -> Self {
        Self { pin, high: false }
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> T {
        self.pin
    }
}

impl<T: digital::OutputPin> OutputPin for EhOutput<T> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_ok() {
            self.high = true;
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_ok() {
            self.high = false;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin adapter for `embedded_hal::digital::InputPin`
pub struct EhInput<T>(pub T);

impl<T: digital::InputPin> InputPin for EhInput<T> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or(false)
    }
}
