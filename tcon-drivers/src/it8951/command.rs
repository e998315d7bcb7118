//! Command layer
//!
//! Opcodes go out in a command frame of exactly two words; arguments follow
//! in a separate write-data frame.

use tcon_hal::Transport;
use tcon_protocol::{Command, Register, SpiPreamble};

use super::bus::Interface;
use super::Error;

impl<T: Transport> Interface<'_, T> {
    pub fn send_command(&mut self, cmd: Command) -> Result<(), Error<T::Error>> {
        self.send_with_preamble(SpiPreamble::Command, &[cmd.code()])
    }

    /// Send a raw opcode, rejecting codes the controller does not define
    pub fn send_command_code(&mut self, code: u16) -> Result<(), Error<T::Error>> {
        let cmd = Command::try_from(code)?;
        self.send_command(cmd)
    }

    pub fn send_command_args(&mut self, cmd: Command, args: &[u16]) -> Result<(), Error<T::Error>> {
        self.send_command(cmd)?;
        self.send_with_preamble(SpiPreamble::WriteData, args)
    }

    pub fn write_register(&mut self, reg: Register, value: u16) -> Result<(), Error<T::Error>> {
        trace!("write reg {} = {}", reg.address(), value);
        self.send_command_args(Command::RegisterWrite, &[reg.address(), value])
    }

    pub fn read_register(&mut self, reg: Register) -> Result<u16, Error<T::Error>> {
        let mut value = [0u16; 1];
        self.send_command_args(Command::RegisterRead, &[reg.address()])?;
        self.read_data(&mut value)?;
        Ok(value[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeIt8951, RecordingTransport};
    use tcon_core::config::WaitLimit;
    use tcon_protocol::ProtocolError;

    #[test]
    fn test_system_run_bytes() {
        let mut t = RecordingTransport::new();
        let mut bus = Interface::new(&mut t, WaitLimit::Unbounded);
        bus.send_command(Command::SysRun).unwrap();

        assert_eq!(t.sent_bytes(), [0x60, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_every_command_is_two_words() {
        for cmd in Command::ALL {
            let mut t = RecordingTransport::new();
            let mut bus = Interface::new(&mut t, WaitLimit::Unbounded);
            bus.send_command(cmd).unwrap();

            let mut expected = std::vec![0x60, 0x00];
            expected.extend_from_slice(&cmd.code().to_be_bytes());
            assert_eq!(t.exchange_count(), 2);
            assert_eq!(t.sent_bytes(), expected);
        }
    }

    #[test]
    fn test_unknown_opcode_sends_nothing() {
        let mut t = RecordingTransport::new();
        let mut bus = Interface::new(&mut t, WaitLimit::Unbounded);

        assert_eq!(
            bus.send_command_code(0x0099),
            Err(Error::Protocol(ProtocolError::InvalidCommand(0x0099)))
        );
        assert!(t.events.is_empty());
    }

    #[test]
    fn test_command_args_two_frames() {
        let mut t = RecordingTransport::new();
        let mut bus = Interface::new(&mut t, WaitLimit::Unbounded);
        bus.send_command_args(Command::Vcom, &[1, 1580]).unwrap();

        assert_eq!(
            t.sent_bytes(),
            [0x60, 0x00, 0x00, 0x39, 0x00, 0x00, 0x00, 0x01, 0x06, 0x2C]
        );
        let selects = t
            .events
            .iter()
            .filter(|e| matches!(e, crate::testing::Event::Select(true)))
            .count();
        assert_eq!(selects, 2);
    }

    #[test]
    fn test_register_roundtrip() {
        let mut fake = FakeIt8951::new(800, 600);
        let mut bus = Interface::new(&mut fake, WaitLimit::Unbounded);

        bus.write_register(Register::I80Cpcr, 1).unwrap();
        assert_eq!(bus.read_register(Register::I80Cpcr), Ok(1));
        assert_eq!(bus.read_register(Register::Up0Sr), Ok(0));
        assert_eq!(fake.register(Register::I80Cpcr), 1);
    }

    #[test]
    fn test_write_register_frames() {
        let mut t = RecordingTransport::new();
        let mut bus = Interface::new(&mut t, WaitLimit::Unbounded);
        bus.write_register(Register::Lisar, 0x36E0).unwrap();

        assert_eq!(
            t.sent_bytes(),
            [0x60, 0x00, 0x00, 0x11, 0x00, 0x00, 0x02, 0x08, 0x36, 0xE0]
        );
    }
}
