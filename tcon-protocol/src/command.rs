//! Preambles, command opcodes and register addresses
//!
//! Each transaction on the host interface opens with a preamble word that
//! tells the controller how to interpret the words that follow.

use crate::ProtocolError;

/// Transaction preamble word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum SpiPreamble {
    /// Following word is a command opcode
    Command = 0x6000,
    /// Following words are data sent to the controller
    WriteData = 0x0000,
    /// Following words are clocked out of the controller
    ReadData = 0x1000,
}

impl SpiPreamble {
    /// Wire value of the preamble
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Decode a preamble word
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x6000 => Some(SpiPreamble::Command),
            0x0000 => Some(SpiPreamble::WriteData),
            0x1000 => Some(SpiPreamble::ReadData),
            _ => None,
        }
    }
}

impl TryFrom<u16> for SpiPreamble {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(ProtocolError::InvalidPreamble(code))
    }
}

/// Command opcodes
///
/// `Vcom`, `FillRect`, `Temperature` and `GetDeviceInfo` are user-defined
/// commands implemented by the panel firmware rather than the IT8951 core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Command {
    /// Leave standby or sleep and start the system clock
    SysRun = 0x0001,
    /// Stop clocks, keep register contents
    Standby = 0x0002,
    /// Stop clocks and power down the panel supply
    Sleep = 0x0003,
    /// Read a register (argument: address)
    RegisterRead = 0x0010,
    /// Write a register (arguments: address, value)
    RegisterWrite = 0x0011,
    /// Burst memory read, trigger
    MemBurstReadTrigger = 0x0012,
    /// Burst memory read, start
    MemBurstReadStart = 0x0013,
    /// Burst memory write
    MemBurstWrite = 0x0014,
    /// End a burst memory transfer
    MemBurstEnd = 0x0015,
    /// Load a full-frame image
    LoadImage = 0x0020,
    /// Load an image into a sub-rectangle
    LoadImageArea = 0x0021,
    /// Terminate an image load
    LoadImageEnd = 0x0022,
    /// Load a 1bpp image
    LoadImage1Bpp = 0x0095,
    /// Refresh a rectangle of the panel
    DisplayArea = 0x0034,
    /// Refresh a rectangle from an explicit buffer address
    DisplayBufferArea = 0x0037,
    /// Panel power sequence on/off
    PowerSequence = 0x0038,
    /// Get or set the VCOM voltage
    Vcom = 0x0039,
    /// Fill a rectangle with a single colour
    FillRect = 0x003A,
    /// Read, force or release the panel temperature
    Temperature = 0x0040,
    /// Select the frame-buffer pixel depth
    BppSettings = 0x0080,
    /// Read the 20-word device information block
    GetDeviceInfo = 0x0302,
}

impl Command {
    /// Every defined command
    pub const ALL: [Command; 21] = [
        Command::SysRun,
        Command::Standby,
        Command::Sleep,
        Command::RegisterRead,
        Command::RegisterWrite,
        Command::MemBurstReadTrigger,
        Command::MemBurstReadStart,
        Command::MemBurstWrite,
        Command::MemBurstEnd,
        Command::LoadImage,
        Command::LoadImageArea,
        Command::LoadImageEnd,
        Command::LoadImage1Bpp,
        Command::DisplayArea,
        Command::DisplayBufferArea,
        Command::PowerSequence,
        Command::Vcom,
        Command::FillRect,
        Command::Temperature,
        Command::BppSettings,
        Command::GetDeviceInfo,
    ];

    /// Wire opcode
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Decode an opcode
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0001 => Some(Command::SysRun),
            0x0002 => Some(Command::Standby),
            0x0003 => Some(Command::Sleep),
            0x0010 => Some(Command::RegisterRead),
            0x0011 => Some(Command::RegisterWrite),
            0x0012 => Some(Command::MemBurstReadTrigger),
            0x0013 => Some(Command::MemBurstReadStart),
            0x0014 => Some(Command::MemBurstWrite),
            0x0015 => Some(Command::MemBurstEnd),
            0x0020 => Some(Command::LoadImage),
            0x0021 => Some(Command::LoadImageArea),
            0x0022 => Some(Command::LoadImageEnd),
            0x0095 => Some(Command::LoadImage1Bpp),
            0x0034 => Some(Command::DisplayArea),
            0x0037 => Some(Command::DisplayBufferArea),
            0x0038 => Some(Command::PowerSequence),
            0x0039 => Some(Command::Vcom),
            0x003A => Some(Command::FillRect),
            0x0040 => Some(Command::Temperature),
            0x0080 => Some(Command::BppSettings),
            0x0302 => Some(Command::GetDeviceInfo),
            _ => None,
        }
    }
}

impl TryFrom<u16> for Command {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(ProtocolError::InvalidCommand(code))
    }
}

/// Base address of the display-controller register block
pub const DISPLAY_CTRL_BASE: u16 = 0x1000;

/// Register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Register {
    /// LUT0 engine width/height
    Lut0Ewhr = DISPLAY_CTRL_BASE,
    /// LUT0 x/y
    Lut0Xyr = DISPLAY_CTRL_BASE + 0x40,
    /// LUT0 base address
    Lut0BaseAddr = DISPLAY_CTRL_BASE + 0x80,
    /// LUT0 mode and frame number
    Lut0Mfn = DISPLAY_CTRL_BASE + 0xC0,
    /// LUT0 and LUT1 active flag
    Lut01Af = DISPLAY_CTRL_BASE + 0x114,
    /// Update parameter 0 setting
    Up0Sr = DISPLAY_CTRL_BASE + 0x134,
    /// Update parameter 1 setting
    Up1Sr = DISPLAY_CTRL_BASE + 0x138,
    /// LUT0 alpha blend and fill rectangle value
    Lut0Abfrv = DISPLAY_CTRL_BASE + 0x13C,
    /// Update buffer base address
    UpBufBaseAddr = DISPLAY_CTRL_BASE + 0x17C,
    /// LUT0 image buffer x/y
    Lut0ImXy = DISPLAY_CTRL_BASE + 0x180,
    /// LUT status; zero when every LUT engine is idle
    LutAfsr = DISPLAY_CTRL_BASE + 0x224,
    /// Bit-pixel value for 1bpp mode
    Bgvr = DISPLAY_CTRL_BASE + 0x250,
    /// Host interface packed-write control
    I80Cpcr = 0x0004,
    /// Memory converter status
    Mcsr = 0x0200,
    /// Load-image start address, low half
    Lisar = 0x0208,
    /// Load-image start address, high half
    LisarHigh = 0x0208 + 2,
}

impl Register {
    /// Every defined register
    pub const ALL: [Register; 16] = [
        Register::Lut0Ewhr,
        Register::Lut0Xyr,
        Register::Lut0BaseAddr,
        Register::Lut0Mfn,
        Register::Lut01Af,
        Register::Up0Sr,
        Register::Up1Sr,
        Register::Lut0Abfrv,
        Register::UpBufBaseAddr,
        Register::Lut0ImXy,
        Register::LutAfsr,
        Register::Bgvr,
        Register::I80Cpcr,
        Register::Mcsr,
        Register::Lisar,
        Register::LisarHigh,
    ];

    /// Register address
    pub const fn address(self) -> u16 {
        self as u16
    }

    /// Decode a register address
    pub fn from_address(address: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.address() == address)
    }
}

impl TryFrom<u16> for Register {
    type Error = ProtocolError;

    fn try_from(address: u16) -> Result<Self, Self::Error> {
        Self::from_address(address).ok_or(ProtocolError::InvalidRegister(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_codes() {
        assert_eq!(SpiPreamble::Command.code(), 0x6000);
        assert_eq!(SpiPreamble::WriteData.code(), 0x0000);
        assert_eq!(SpiPreamble::ReadData.code(), 0x1000);
        assert_eq!(
            SpiPreamble::try_from(0x2000),
            Err(ProtocolError::InvalidPreamble(0x2000))
        );
    }

    #[test]
    fn test_command_codes_roundtrip() {
        for cmd in Command::ALL {
            assert_eq!(Command::try_from(cmd.code()), Ok(cmd));
        }
        assert_eq!(Command::SysRun.code(), 0x0001);
        assert_eq!(Command::FillRect.code(), 0x003A);
        assert_eq!(Command::GetDeviceInfo.code(), 0x0302);
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert_eq!(Command::from_code(0x0004), None);
        assert_eq!(
            Command::try_from(0xFFFF),
            Err(ProtocolError::InvalidCommand(0xFFFF))
        );
    }

    #[test]
    fn test_register_addresses() {
        assert_eq!(Register::Lut0Ewhr.address(), 0x1000);
        assert_eq!(Register::Lut01Af.address(), 0x1114);
        assert_eq!(Register::LutAfsr.address(), 0x1224);
        assert_eq!(Register::Bgvr.address(), 0x1250);
        assert_eq!(Register::I80Cpcr.address(), 0x0004);
        assert_eq!(Register::Lisar.address(), 0x0208);
        assert_eq!(Register::LisarHigh.address(), 0x020A);

        for reg in Register::ALL {
            assert_eq!(Register::try_from(reg.address()), Ok(reg));
        }
    }

    #[test]
    fn test_unknown_register_rejected() {
        assert_eq!(
            Register::try_from(0x0206),
            Err(ProtocolError::InvalidRegister(0x0206))
        );
    }
}
