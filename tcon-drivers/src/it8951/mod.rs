//! IT8951 e-paper timing controller
//!
//! The IT8951 sits between the host and the panel. It owns the frame buffer
//! and the waveform (LUT) engine; the host loads pixels into the buffer and
//! asks for rectangles to be refreshed.
//!
//! # Layers
//!
//! ```text
//! It8951         bring-up, power, VCOM, temperature, refresh, pixel loads
//!   │
//! Interface      commands, arguments, register access
//!   │            preamble framing, chip-select, ready handshake
//!   │
//! Transport      exchange / set_select / read_ready (host supplied)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut transport = SpiTransport::new(spi, cs, hrdy);
//! let mut epd = It8951::new(&mut transport, DriverConfig::with_vcom(-1530));
//! epd.init()?;
//!
//! let panel = epd.panel();
//! epd.fill_rect(&panel, DisplayMode::Init, 0xFF)?;
//! epd.write_pixels(&ImageInfo::default(), &rect, &pixels)?;
//! epd.display_area(&rect, DisplayMode::Gc16)?;
//! ```

mod bitmap;
mod bus;
mod command;
mod device;
mod error;

pub use bus::Interface;
pub use device::{DeviceState, It8951, Temperature};
pub use error::Error;
