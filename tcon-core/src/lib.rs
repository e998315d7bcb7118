//! Board-agnostic core logic for the e-paper driver
//!
//! This crate contains the pure computations the controller driver relies
//! on. Nothing here touches the bus:
//!
//! - Rectangle geometry (area, containment)
//! - Pixel packing into the controller's word-aligned wire format
//! - Bitmap header and pixel-array parsing
//! - Driver configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bitmap;
pub mod config;
pub mod geometry;
pub mod packer;

pub use geometry::Rectangle;
pub use packer::{PackError, PackLayout};
