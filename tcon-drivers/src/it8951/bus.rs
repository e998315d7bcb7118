//! Host interface framing
//!
//! Every transaction is framed by chip-select and opens with a preamble
//! word. Words go out most-significant byte first. The controller drops its
//! ready line while it digests a word; register traffic waits for it before
//! every word, while bulk pixel payloads only wait once.

use tcon_core::config::WaitLimit;
use tcon_hal::Transport;
use tcon_protocol::SpiPreamble;

use super::Error;

/// Chip-select held for the lifetime of the guard
///
/// Dropping the guard releases the line, so every exit path of a
/// transaction ends deselected.
struct Selected<'b, T: Transport>(&'b mut T);

impl<'b, T: Transport> Selected<'b, T> {
    fn new(transport: &'b mut T) -> Self {
        transport.set_select(true);
        Self(transport)
    }
}

impl<T: Transport> Drop for Selected<'_, T> {
    fn drop(&mut self) {
        self.0.set_select(false);
    }
}

/// Poll the ready line until it is high or `limit` runs out
fn wait_ready<T: Transport>(transport: &mut T, limit: WaitLimit) -> Result<(), Error<T::Error>> {
    let mut polls = 0u32;
    while !transport.read_ready() {
        polls = polls.saturating_add(1);
        if limit.exhausted(polls) {
            warn!("ready line still low after {} polls", polls);
            return Err(Error::ReadyTimeout);
        }
    }
    Ok(())
}

fn send_word<T: Transport>(transport: &mut T, word: u16) -> Result<(), Error<T::Error>> {
    transport
        .exchange(Some(&word.to_be_bytes()), None, 2)
        .map_err(Error::Transport)
}

/// Framed access to the controller over a borrowed [`Transport`]
pub struct Interface<'a, T: Transport> {
    transport: &'a mut T,
    ready_wait: WaitLimit,
}

impl<'a, T: Transport> Interface<'a, T> {
    pub fn new(transport: &'a mut T, ready_wait: WaitLimit) -> Self {
        Self {
            transport,
            ready_wait,
        }
    }

    /// Block until the controller signals ready
    pub fn wait_ready(&mut self) -> Result<(), Error<T::Error>> {
        wait_ready(&mut *self.transport, self.ready_wait)
    }

    /// Send `preamble` followed by `words`
    ///
    /// Waits for ready before every word. Sending no words is a no-op.
    pub fn send_with_preamble(
        &mut self,
        preamble: SpiPreamble,
        words: &[u16],
    ) -> Result<(), Error<T::Error>> {
        if words.is_empty() {
            return Ok(());
        }
        let limit = self.ready_wait;

        wait_ready(&mut *self.transport, limit)?;
        let bus = Selected::new(&mut *self.transport);
        send_word(&mut *bus.0, preamble.code())?;
        for &word in words {
            wait_ready(&mut *bus.0, limit)?;
            send_word(&mut *bus.0, word)?;
        }
        Ok(())
    }

    /// Send a pre-formatted byte payload as one exchange
    ///
    /// The bytes go out as given; the caller decides their order.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), Error<T::Error>> {
        if data.is_empty() {
            return Ok(());
        }

        wait_ready(&mut *self.transport, self.ready_wait)?;
        let bus = Selected::new(&mut *self.transport);
        send_word(&mut *bus.0, SpiPreamble::WriteData.code())?;
        bus.0
            .exchange(Some(data), None, data.len())
            .map_err(Error::Transport)
    }

    /// Read `out.len()` words
    ///
    /// The controller answers the preamble and one dummy word before the
    /// data, so `n` words take `n + 2` exchanges. Reading nothing is a no-op.
    pub fn read_data(&mut self, out: &mut [u16]) -> Result<(), Error<T::Error>> {
        if out.is_empty() {
            return Ok(());
        }
        let limit = self.ready_wait;
        let mut rx = [0u8; 2];

        wait_ready(&mut *self.transport, limit)?;
        let bus = Selected::new(&mut *self.transport);
        bus.0
            .exchange(Some(&SpiPreamble::ReadData.code().to_be_bytes()), None, 2)
            .map_err(Error::Transport)?;
        wait_ready(&mut *bus.0, limit)?;
        bus.0
            .exchange(Some(&[0, 0]), None, 2)
            .map_err(Error::Transport)?;

        for word in out.iter_mut() {
            wait_ready(&mut *bus.0, limit)?;
            bus.0
                .exchange(Some(&[0, 0]), Some(&mut rx), 2)
                .map_err(Error::Transport)?;
            *word = u16::from_be_bytes(rx);
        }
        Ok(())
    }
}
