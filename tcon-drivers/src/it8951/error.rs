//! Driver error type

use tcon_core::bitmap::BitmapError;
use tcon_core::{PackError, Rectangle};
use tcon_protocol::{ColorDepth, ProtocolError};

use super::device::DeviceState;

/// IT8951 driver errors, generic over the transport error `E`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport reported a failed exchange
    Transport(E),
    /// Rectangle is not fully inside the panel
    RectangleOutsidePanel { rect: Rectangle, panel: Rectangle },
    /// Transfer requested at a color depth the driver cannot send
    UnsupportedColorDepth(ColorDepth),
    /// VCOM must be strictly negative and its magnitude fit in 16 bits
    InvalidVcom(i32),
    /// Image buffer address does not fit in 26 bits
    AddressOutOfRange(u32),
    /// Packed buffer does not match the rectangle's word count
    BufferLength { expected: usize, actual: usize },
    Pack(PackError),
    Bitmap(BitmapError),
    Protocol(ProtocolError),
    /// Controller reported a zero panel dimension
    DeviceNotReady,
    /// Handle is not in the `Ready` state
    NotInitialized(DeviceState),
    /// Ready line stayed low for the configured number of polls
    ReadyTimeout,
    /// Refresh engine stayed busy for the configured number of polls
    EngineBusyTimeout,
    /// Bitmap file could not be opened or read
    #[cfg(feature = "std")]
    FileOpen,
}

impl<E> From<PackError> for Error<E> {
    fn from(e: PackError) -> Self {
        Error::Pack(e)
    }
}

impl<E> From<BitmapError> for Error<E> {
    fn from(e: BitmapError) -> Self {
        Error::Bitmap(e)
    }
}

impl<E> From<ProtocolError> for Error<E> {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}
