//! Pixel format descriptors
//!
//! [`ImageInfo`] is the single word sent ahead of every image load. Its bit
//! layout is fixed by the controller:
//!
//! ```text
//!  15      9 8  7   6 5 4  3 2 1 0
//! ┌─────────┬───┬─────┬────┬───────┐
//! │ 0       │ E │ 0   │ BPP│ 0 │ R │
//! └─────────┴───┴─────┴────┴───────┘
//! E = endianness (bit 8), BPP = color depth (bits 4..6), R = rotation (bits 0..1)
//! ```

use crate::ProtocolError;

const ROTATION_MASK: u16 = 0x0003;
const DEPTH_SHIFT: u16 = 4;
const DEPTH_MASK: u16 = 0x0007;
const ENDIAN_SHIFT: u16 = 8;
const ENDIAN_MASK: u16 = 0x0001;

/// Frame-buffer pixel depth codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ColorDepth {
    Bpp2 = 0,
    Bpp3 = 1,
    Bpp4 = 2,
    Bpp8 = 3,
    Bpp1 = 4,
}

impl ColorDepth {
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Bits each pixel occupies inside a 16-bit wire word
    ///
    /// 3 bpp pixels travel in 4-bit slots.
    pub const fn slot_bits(self) -> u16 {
        match self {
            ColorDepth::Bpp1 => 1,
            ColorDepth::Bpp2 => 2,
            ColorDepth::Bpp3 | ColorDepth::Bpp4 => 4,
            ColorDepth::Bpp8 => 8,
        }
    }

    /// Number of pixels held by one 16-bit word
    pub const fn pixels_per_word(self) -> u16 {
        16 / self.slot_bits()
    }

    /// Largest pixel value representable at this depth
    pub const fn max_value(self) -> u8 {
        match self {
            ColorDepth::Bpp1 => 0x01,
            ColorDepth::Bpp2 => 0x03,
            ColorDepth::Bpp3 => 0x07,
            ColorDepth::Bpp4 => 0x0F,
            ColorDepth::Bpp8 => 0xFF,
        }
    }
}

impl TryFrom<u16> for ColorDepth {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ColorDepth::Bpp2),
            1 => Ok(ColorDepth::Bpp3),
            2 => Ok(ColorDepth::Bpp4),
            3 => Ok(ColorDepth::Bpp8),
            4 => Ok(ColorDepth::Bpp1),
            _ => Err(ProtocolError::InvalidColorDepth(code)),
        }
    }
}

/// Image rotation applied by the controller while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Rotation {
    #[default]
    Rotate0 = 0,
    Rotate90 = 1,
    Rotate180 = 2,
    Rotate270 = 3,
}

impl Rotation {
    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Rotation::Rotate0),
            1 => Ok(Rotation::Rotate90),
            2 => Ok(Rotation::Rotate180),
            3 => Ok(Rotation::Rotate270),
            _ => Err(ProtocolError::InvalidRotation(code)),
        }
    }
}

/// Byte order of the pixel payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Endianness {
    #[default]
    Little = 0,
    Big = 1,
}

impl Endianness {
    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for Endianness {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Endianness::Little),
            1 => Ok(Endianness::Big),
            _ => Err(ProtocolError::InvalidEndianness(code)),
        }
    }
}

/// Waveform used for a display refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum DisplayMode {
    /// Full clear to white, slow, flashes
    Init = 0,
    /// Direct update, monochrome, fast
    Du = 1,
    /// 16 grey levels, flashing
    Gc16 = 2,
    /// 16 grey levels, non-flashing
    Gl16 = 3,
    /// GL16 with ghosting reduction
    Glr16 = 4,
    /// GL16 with ghosting reduction, dithered
    Gld16 = 5,
    /// Two-level animation mode
    A2 = 6,
    /// Direct update, 4 grey levels
    Du4 = 7,
}

impl DisplayMode {
    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for DisplayMode {
    type Error = ProtocolError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DisplayMode::Init),
            1 => Ok(DisplayMode::Du),
            2 => Ok(DisplayMode::Gc16),
            3 => Ok(DisplayMode::Gl16),
            4 => Ok(DisplayMode::Glr16),
            5 => Ok(DisplayMode::Gld16),
            6 => Ok(DisplayMode::A2),
            7 => Ok(DisplayMode::Du4),
            _ => Err(ProtocolError::InvalidDisplayMode(code)),
        }
    }
}

/// Pixel transfer descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageInfo {
    pub rotation: Rotation,
    pub depth: ColorDepth,
    pub endianness: Endianness,
}

impl ImageInfo {
    pub const fn new(rotation: Rotation, depth: ColorDepth, endianness: Endianness) -> Self {
        Self {
            rotation,
            depth,
            endianness,
        }
    }

    /// Encode into the argument word of `LD_IMG` / `LD_IMG_AREA`
    pub const fn encode(&self) -> u16 {
        (self.endianness.code() << ENDIAN_SHIFT)
            | (self.depth.code() << DEPTH_SHIFT)
            | self.rotation.code()
    }

    /// Decode an image-info word
    ///
    /// Bits outside the three fields are ignored.
    pub fn decode(word: u16) -> Result<Self, ProtocolError> {
        Ok(Self {
            rotation: Rotation::try_from(word & ROTATION_MASK)?,
            depth: ColorDepth::try_from((word >> DEPTH_SHIFT) & DEPTH_MASK)?,
            endianness: Endianness::try_from((word >> ENDIAN_SHIFT) & ENDIAN_MASK)?,
        })
    }
}

impl Default for ImageInfo {
    fn default() -> Self {
        Self::new(Rotation::Rotate0, ColorDepth::Bpp4, Endianness::Little)
    }
}
