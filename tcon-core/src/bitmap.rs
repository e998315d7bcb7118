//! Minimal BMP parsing
//!
//! Reads the fixed-offset fields of a Windows bitmap header and unpacks a
//! 4 bpp pixel array into one byte per pixel, top row first. No other bit
//! depth, compression or palette handling is supported.
//!
//! ```text
//! offset  size  field
//!   0      2    "BM"
//!  10      4    pixel array offset
//!  18      4    width
//!  22      4    height (negative = rows stored top-down)
//!  28      2    bits per pixel
//! ```

const MAGIC: [u8; 2] = *b"BM";
const OFFSET_PIXELS: usize = 10;
const OFFSET_WIDTH: usize = 18;
const OFFSET_HEIGHT: usize = 22;
const OFFSET_BPP: usize = 28;

/// Bytes needed to read every header field
pub const HEADER_LEN: usize = 30;

/// The only bit depth the loader accepts
pub const SUPPORTED_BPP: u16 = 4;

/// Bitmap parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// File does not start with "BM"
    BadMagic,
    /// Header or pixel array extends past the end of the data
    Truncated,
    /// Bit depth other than 4
    UnsupportedDepth(u16),
    /// Zero-sized, or larger than a panel coordinate can address
    BadDimensions,
    /// Output buffer smaller than width * height
    OutputTooSmall,
}

/// Decoded header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitmapHeader {
    pub pixel_offset: u32,
    pub width: u16,
    pub height: u16,
    /// Rows stored top row first
    pub top_down: bool,
    pub bits_per_pixel: u16,
}

fn read_u16(data: &[u8], at: usize) -> Result<u16, BitmapError> {
    data.get(at..at + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or(BitmapError::Truncated)
}

fn read_u32(data: &[u8], at: usize) -> Result<u32, BitmapError> {
    data.get(at..at + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(BitmapError::Truncated)
}

impl BitmapHeader {
    /// Parse and validate the header at the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        if data.get(..2) != Some(&MAGIC[..]) {
            return Err(BitmapError::BadMagic);
        }
        if data.len() < HEADER_LEN {
            return Err(BitmapError::Truncated);
        }

        let pixel_offset = read_u32(data, OFFSET_PIXELS)?;
        let width = read_u32(data, OFFSET_WIDTH)?;
        let height = read_u32(data, OFFSET_HEIGHT)? as i32;
        let bits_per_pixel = read_u16(data, OFFSET_BPP)?;

        if bits_per_pixel != SUPPORTED_BPP {
            return Err(BitmapError::UnsupportedDepth(bits_per_pixel));
        }

        let width = u16::try_from(width).map_err(|_| BitmapError::BadDimensions)?;
        let top_down = height < 0;
        let height =
            u16::try_from(height.unsigned_abs()).map_err(|_| BitmapError::BadDimensions)?;
        if width == 0 || height == 0 {
            return Err(BitmapError::BadDimensions);
        }

        Ok(Self {
            pixel_offset,
            width,
            height,
            top_down,
            bits_per_pixel,
        })
    }

    /// Bytes per stored row, padded to a multiple of four
    pub fn row_stride(&self) -> usize {
        (usize::from(self.width) * usize::from(self.bits_per_pixel)).div_ceil(32) * 4
    }

    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// The stored pixel array, `row_stride * height` bytes from `pixel_offset`
    pub fn pixel_array<'d>(&self, data: &'d [u8]) -> Result<&'d [u8], BitmapError> {
        let start = usize::try_from(self.pixel_offset).map_err(|_| BitmapError::Truncated)?;
        let end = self
            .row_stride()
            .checked_mul(usize::from(self.height))
            .and_then(|len| len.checked_add(start))
            .ok_or(BitmapError::Truncated)?;
        data.get(start..end).ok_or(BitmapError::Truncated)
    }

    /// Expand the pixel array into `out`, one byte per pixel, top row first
    ///
    /// Within a byte the left pixel is the high nibble.
    pub fn unpack(&self, data: &[u8], out: &mut [u8]) -> Result<(), BitmapError> {
        if out.len() < self.pixel_count() {
            return Err(BitmapError::OutputTooSmall);
        }

        let stride = self.row_stride();
        let array = self.pixel_array(data)?;

        let width = usize::from(self.width);
        let height = usize::from(self.height);
        for (row, dst) in out.chunks_exact_mut(width).take(height).enumerate() {
            let stored = if self.top_down { row } else { height - 1 - row };
            let src = &array[stored * stride..][..stride];
            for (col, px) in dst.iter_mut().enumerate() {
                let byte = src[col / 2];
                *px = if col % 2 == 0 { byte >> 4 } else { byte & 0x0F };
            }
        }

        Ok(())
    }
}
