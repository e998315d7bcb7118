//! tcon Hardware Abstraction Layer
//!
//! This crate defines the narrow interface the controller driver needs from
//! the host: one synchronous bus exchange, a chip-select line and the
//! controller's ready (HRDY) line. Board support code implements these
//! traits; the driver never touches a peripheral directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tcon-drivers (IT8951 handler)          │
//! └─────────────────────────────────────────┘
//!                     │ Transport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tcon-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ SpiTransport  │       │ host-specific │
//! │ (SpiBus+pins) │       │  Transport    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Framed word exchange with select/ready lines
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - SPI bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;
pub mod transport;

#[cfg(feature = "embedded-hal")]
pub mod compat;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use spi::{SpiBus, SpiTransport};
pub use transport::Transport;
