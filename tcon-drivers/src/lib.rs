//! E-paper controller drivers
//!
//! This crate provides the IT8951 timing controller driver on top of the
//! tcon-hal [`Transport`](tcon_hal::Transport) trait:
//!
//! - Framing: preamble words, chip-select discipline, ready-line handshake
//! - Command layer: opcodes, argument words, register access
//! - Device control: bring-up, power, VCOM, temperature, refresh
//! - Pixel transfers and the bitmap loader

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod it8951;

#[cfg(test)]
pub(crate) mod testing;
