//! Controller transport abstraction
//!
//! The three primitives the IT8951 host interface is built on. They are
//! supplied by the host for the whole lifetime of a driver handle; the
//! driver borrows them and never owns the bus.

/// Half-duplex serial transport with chip-select and ready lines
///
/// All calls are synchronous and block until the transfer completes.
pub trait Transport {
    /// Error type reported by a failed exchange
    type Error;

    /// Perform one transfer of `len` bytes
    ///
    /// - `tx`: bytes to clock out. When `None`, the clocked-out data is
    ///   irrelevant (implementations typically send zeros).
    /// - `rx`: buffer for the received bytes. When `None`, received data is
    ///   discarded.
    ///
    /// Any provided buffer holds at least `len` bytes; only the first `len`
    /// bytes take part in the transfer.
    fn exchange(
        &mut self,
        tx: Option<&[u8]>,
        rx: Option<&mut [u8]>,
        len: usize,
    ) -> Result<(), Self::Error>;

    /// Drive the bus-select line
    ///
    /// `true` selects the controller (frames the start of a transaction),
    /// `false` releases it. Electrical polarity is the implementation's
    /// concern.
    fn set_select(&mut self, active: bool);

    /// Sample the controller's ready line
    ///
    /// Returns `true` when the controller can accept or produce the next word.
    fn read_ready(&mut self) -> bool;
}
