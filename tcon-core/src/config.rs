//! Driver configuration
//!
//! Settings the host supplies when creating a controller handle. With the
//! `toml` feature the configuration can be read from a document such as:
//!
//! ```toml
//! vcom_mv = -1530
//! persist_vcom = false
//! ready_wait = "unbounded"
//! engine_wait = { polls = 100000 }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bound on a busy-wait loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WaitLimit {
    /// Poll until the condition holds, however long it takes
    #[default]
    Unbounded,
    /// Give up after this many polls
    Polls(u32),
}

impl WaitLimit {
    /// Whether `polls` completed polls exhaust the limit
    pub fn exhausted(&self, polls: u32) -> bool {
        match self {
            WaitLimit::Unbounded => false,
            WaitLimit::Polls(max) => polls >= *max,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Document is not valid TOML or does not match the schema
    Parse,
    /// VCOM must be strictly negative
    InvalidVcom(i32),
}

/// Controller driver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// VCOM to program at bring-up in mV; `None` keeps the panel's value
    pub vcom_mv: Option<i32>,
    /// Write the bring-up VCOM to flash instead of RAM
    pub persist_vcom: bool,
    /// Bound on each wait for the ready line
    pub ready_wait: WaitLimit,
    /// Bound on the wait for the refresh engine before a display command
    pub engine_wait: WaitLimit,
}

impl DriverConfig {
    /// Configuration that overrides the panel VCOM at bring-up
    pub fn with_vcom(vcom_mv: i32) -> Self {
        Self {
            vcom_mv: Some(vcom_mv),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.vcom_mv {
            Some(v) if v >= 0 => Err(ConfigError::InvalidVcom(v)),
            _ => Ok(()),
        }
    }

    /// Parse and validate a TOML document
    #[cfg(feature = "toml")]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}
