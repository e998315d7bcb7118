//! IT8951 Host Interface Protocol
//!
//! This crate defines the wire vocabulary of the IT8951 e-paper timing
//! controller's SPI host interface. Every transfer is a sequence of 16-bit
//! words sent most-significant byte first, framed by chip-select and paced
//! by the controller's HRDY line.
//!
//! # Transaction Overview
//!
//! ```text
//! command:    ┌──────────┬──────────┐
//!             │ 0x6000   │ opcode   │
//!             └──────────┴──────────┘
//! write data: ┌──────────┬──────────┬─────┐
//!             │ 0x0000   │ word 0   │ ... │
//!             └──────────┴──────────┴─────┘
//! read data:  ┌──────────┬──────────┬──────────┬─────┐
//!             │ 0x1000   │ dummy    │ word 0   │ ... │
//!             └──────────┴──────────┴──────────┴─────┘
//! ```
//!
//! Every numeric code is held in a closed enumeration; decoding a raw value
//! outside the set yields a [`ProtocolError`] instead of a silently accepted
//! value.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod device_info;
pub mod image;

pub use command::{Command, Register, SpiPreamble};
pub use device_info::{DeviceInfo, DEVICE_INFO_WORDS};
pub use image::{ColorDepth, DisplayMode, Endianness, ImageInfo, Rotation};

/// Errors raised when a raw code falls outside its protocol-defined set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Unknown SPI preamble word
    InvalidPreamble(u16),
    /// Unknown command opcode
    InvalidCommand(u16),
    /// Unknown register address
    InvalidRegister(u16),
    /// Unknown color depth code
    InvalidColorDepth(u16),
    /// Unknown rotation code
    InvalidRotation(u16),
    /// Unknown endianness code
    InvalidEndianness(u16),
    /// Unknown display (waveform) mode
    InvalidDisplayMode(u16),
}
