//! Device information block returned by `GET_DEV_INFO`

use heapless::String;

/// Number of words in the device information block
pub const DEVICE_INFO_WORDS: usize = 20;

/// Length in bytes of each version string field
pub const VERSION_LEN: usize = 16;

/// Panel geometry, image-buffer address and version strings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// Panel width in pixels
    pub panel_width: u16,
    /// Panel height in pixels
    pub panel_height: u16,
    /// Controller-side address of the image buffer
    pub image_buffer_addr: u32,
    pub firmware_version: String<VERSION_LEN>,
    pub lut_version: String<VERSION_LEN>,
}

impl DeviceInfo {
    /// Decode the raw block
    ///
    /// Layout: width, height, address low, address high, then eight words of
    /// firmware version and eight words of LUT version. The version text is
    /// packed two characters per word, first character in the high byte.
    pub fn from_words(raw: &[u16; DEVICE_INFO_WORDS]) -> Self {
        Self {
            panel_width: raw[0],
            panel_height: raw[1],
            image_buffer_addr: (u32::from(raw[3]) << 16) | u32::from(raw[2]),
            firmware_version: version_string(&raw[4..12]),
            lut_version: version_string(&raw[12..20]),
        }
    }

    /// Whether the controller reported a usable panel
    pub fn has_panel(&self) -> bool {
        self.panel_width != 0 && self.panel_height != 0
    }
}

/// Recover a NUL-terminated version string
///
/// Non-ASCII bytes are replaced with `?` so the result always fits.
fn version_string(words: &[u16]) -> String<VERSION_LEN> {
    let mut s = String::new();
    let bytes = words.iter().flat_map(|w| w.to_be_bytes());
    for b in bytes.take_while(|&b| b != 0) {
        let c = if b.is_ascii() { char::from(b) } else { '?' };
        if s.push(c).is_err() {
            break;
        }
    }
    s
}
