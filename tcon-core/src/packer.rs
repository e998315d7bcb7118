//! Pixel packing
//!
//! The controller loads pixels as 16-bit words, `16 / bpp` pixels per word,
//! pixel 0 in the lowest bits. A row transfer must start and end on a word
//! boundary measured in panel x-coordinates, so a rectangle whose edges are
//! not aligned gets zero padding slots at the front of its first word and at
//! the back of its last word:
//!
//! ```text
//! x = 3, width = 4, 4 bpp (4 slots per word)
//!
//!   word 0            word 1
//! ┌───┬───┬───┬───┐ ┌───┬───┬───┬───┐
//! │ 0 │ 0 │ 0 │ p0│ │ p1│ p2│ p3│ 0 │   slot 0 on the left
//! └───┴───┴───┴───┘ └───┴───┴───┴───┘
//!  start_pad = 3       end_pad = 1
//! ```
//!
//! Only 4 bpp little-endian packing is implemented. Other formats are
//! rejected with [`PackError::Unsupported`].

use core::ops::Range;

use tcon_protocol::{ColorDepth, Endianness, ImageInfo};

use crate::geometry::Rectangle;

/// Packing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PackError {
    /// No packing routine for this depth and byte order
    Unsupported {
        depth: ColorDepth,
        endianness: Endianness,
    },
    /// Rectangle has zero width or height
    EmptyRectangle,
    /// Fewer source pixels than the rectangle covers
    InputTooShort { needed: usize, actual: usize },
    /// Destination cannot hold the packed words
    OutputTooSmall { needed: usize, actual: usize },
    /// Source pixel does not fit in the color depth
    PixelOutOfRange(u8),
}

/// Word layout of a rectangle at a given depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackLayout {
    pub pixels_per_word: u16,
    /// Padding slots at the front of each row
    pub start_pad: u16,
    /// Padding slots at the back of each row
    pub end_pad: u16,
    pub words_per_row: u32,
    pub rows: u16,
    bits: u16,
}

impl PackLayout {
    pub fn new(depth: ColorDepth, rect: &Rectangle) -> Self {
        let ppw = depth.pixels_per_word();
        let start_pad = rect.x % ppw;
        let end_mod = (rect.right() % u32::from(ppw)) as u16;
        let end_pad = if end_mod == 0 { 0 } else { ppw - end_mod };
        let padded = u32::from(rect.width) + u32::from(start_pad) + u32::from(end_pad);

        Self {
            pixels_per_word: ppw,
            start_pad,
            end_pad,
            words_per_row: padded.div_ceil(u32::from(ppw)),
            rows: rect.height,
            bits: depth.slot_bits(),
        }
    }

    /// Total words needed for the rectangle
    pub fn word_count(&self) -> usize {
        self.words_per_row as usize * usize::from(self.rows)
    }

    /// Slots of the word at `column` that carry pixels
    ///
    /// The first word of a row skips `start_pad` slots and the last word
    /// drops `end_pad` slots. A row of one word does both.
    pub fn valid_slots(&self, column: u32) -> Range<u16> {
        let start = if column == 0 { self.start_pad } else { 0 };
        let end = if column + 1 == self.words_per_row {
            self.pixels_per_word - self.end_pad
        } else {
            self.pixels_per_word
        };
        start..end
    }

    fn slot_mask(&self) -> u16 {
        (1u16 << self.bits) - 1
    }
}

/// Number of words [`pack_pixels`] produces for `rect`
pub fn word_count(info: &ImageInfo, rect: &Rectangle) -> usize {
    if rect.is_empty() {
        return 0;
    }
    PackLayout::new(info.depth, rect).word_count()
}

fn check_supported(info: &ImageInfo, rect: &Rectangle) -> Result<PackLayout, PackError> {
    match (info.depth, info.endianness) {
        (ColorDepth::Bpp4, Endianness::Little) => {}
        (depth, endianness) => return Err(PackError::Unsupported { depth, endianness }),
    }
    if rect.is_empty() {
        return Err(PackError::EmptyRectangle);
    }
    Ok(PackLayout::new(info.depth, rect))
}

/// Pack one byte per pixel into wire words
///
/// `pixels` is row-major, `rect.width` pixels per row. Returns the number of
/// words written to `out`.
pub fn pack_pixels(
    info: &ImageInfo,
    rect: &Rectangle,
    pixels: &[u8],
    out: &mut [u16],
) -> Result<usize, PackError> {
    let layout = check_supported(info, rect)?;

    let needed = rect.area() as usize;
    if pixels.len() < needed {
        return Err(PackError::InputTooShort {
            needed,
            actual: pixels.len(),
        });
    }
    let words = layout.word_count();
    if out.len() < words {
        return Err(PackError::OutputTooSmall {
            needed: words,
            actual: out.len(),
        });
    }

    let max = info.depth.max_value();
    let mut src = pixels.iter().copied();
    let mut dst = out.iter_mut();

    for _ in 0..layout.rows {
        for column in 0..layout.words_per_row {
            let mut word = 0u16;
            for slot in layout.valid_slots(column) {
                // Length was checked against the area above
                let px = src.next().unwrap_or(0);
                if px > max {
                    return Err(PackError::PixelOutOfRange(px));
                }
                word |= u16::from(px) << (slot * layout.bits);
            }
            if let Some(w) = dst.next() {
                *w = word;
            }
        }
    }

    Ok(words)
}

/// Recover per-pixel bytes from packed words
///
/// The inverse of [`pack_pixels`], matching how the controller reads an
/// area load. Padding slots are skipped. Returns the number of pixels
/// written to `out`.
pub fn unpack_pixels(
    info: &ImageInfo,
    rect: &Rectangle,
    words: &[u16],
    out: &mut [u8],
) -> Result<usize, PackError> {
    let layout = check_supported(info, rect)?;

    let needed = layout.word_count();
    if words.len() < needed {
        return Err(PackError::InputTooShort {
            needed,
            actual: words.len(),
        });
    }
    let pixels = rect.area() as usize;
    if out.len() < pixels {
        return Err(PackError::OutputTooSmall {
            needed: pixels,
            actual: out.len(),
        });
    }

    let mask = layout.slot_mask();
    let mut dst = out.iter_mut();
    let mut src = words.iter().copied();

    for _ in 0..layout.rows {
        for column in 0..layout.words_per_row {
            let word = src.next().unwrap_or(0);
            for slot in layout.valid_slots(column) {
                if let Some(px) = dst.next() {
                    *px = ((word >> (slot * layout.bits)) & mask) as u8;
                }
            }
        }
    }

    Ok(pixels)
}
