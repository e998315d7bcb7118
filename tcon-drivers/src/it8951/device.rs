//! IT8951 device control

use alloc::vec;
use alloc::vec::Vec;

use tcon_core::config::DriverConfig;
use tcon_core::packer::{self, PackError};
use tcon_core::Rectangle;
use tcon_hal::Transport;
use tcon_protocol::{
    ColorDepth, Command, DeviceInfo, DisplayMode, Endianness, ImageInfo, Register,
    DEVICE_INFO_WORDS,
};

use super::bus::Interface;
use super::Error;

/// Image buffer addresses are 26 bits wide
const MAX_BUFFER_ADDR: u32 = 1 << 26;

/// FILL_RECT mode word: refresh and update the buffer with the fill colour
const FILL_RECT_FLAGS: u16 = 0x1100;

const VCOM_GET: u16 = 0;
const VCOM_SET_RAM: u16 = 1;
const VCOM_SET_FLASH: u16 = 2;

const TEMPERATURE_GET: u16 = 0;
const TEMPERATURE_FORCE: u16 = 1;
const TEMPERATURE_RELEASE: u16 = 2;

/// Lifecycle of a controller handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Bring-up has not run
    Uninitialized,
    Ready,
    Standby,
    Sleeping,
    /// Bring-up failed; run it again before transferring
    Faulted,
}

/// Temperature readings in °C
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    /// Sensor reading
    pub real: u16,
    /// Forced value; meaningless unless forcing is active
    pub forced: u16,
}

/// IT8951 controller handle
///
/// Borrows the transport for its whole lifetime. Calls are blocking and
/// the handle does no locking; hosts sharing it between contexts must
/// serialise access themselves.
pub struct It8951<'a, T: Transport> {
    bus: Interface<'a, T>,
    config: DriverConfig,
    device_info: DeviceInfo,
    panel: Rectangle,
    state: DeviceState,
}

impl<'a, T: Transport> It8951<'a, T> {
    pub fn new(transport: &'a mut T, config: DriverConfig) -> Self {
        Self {
            bus: Interface::new(transport, config.ready_wait),
            config,
            device_info: DeviceInfo::default(),
            panel: Rectangle::default(),
            state: DeviceState::Uninitialized,
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Device information from the last bring-up
    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    /// Full panel area from the last bring-up
    pub fn panel(&self) -> Rectangle {
        self.panel
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Framed access for commands the handle does not wrap
    pub fn interface(&mut self) -> &mut Interface<'a, T> {
        &mut self.bus
    }

    /// Bring the controller up
    ///
    /// Reads the device information, programs the image buffer address,
    /// enables packed writes, records the panel area and applies the
    /// configured VCOM if it differs from the panel's. Stops at the first
    /// failure and leaves the handle `Faulted`.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        info!("initialising IT8951");
        match self.bring_up() {
            Ok(()) => {
                self.state = DeviceState::Ready;
                Ok(())
            }
            Err(e) => {
                error!("IT8951 bring-up failed");
                self.state = DeviceState::Faulted;
                Err(e)
            }
        }
    }

    fn bring_up(&mut self) -> Result<(), Error<T::Error>> {
        if let Some(vcom) = self.config.vcom_mv {
            check_vcom::<T::Error>(vcom)?;
        }

        let info = self.get_device_info()?;
        info!(
            "panel {}x{}, buffer at {}, firmware {}, LUT {}",
            info.panel_width,
            info.panel_height,
            info.image_buffer_addr,
            info.firmware_version.as_str(),
            info.lut_version.as_str(),
        );
        if !info.has_panel() {
            return Err(Error::DeviceNotReady);
        }

        self.set_image_buffer_base(info.image_buffer_addr)?;
        self.set_packed_mode(true)?;
        self.panel = Rectangle::with_size(info.panel_width, info.panel_height);
        self.device_info = info;

        let current = self.get_vcom()?;
        info!("current VCOM {} mV", current);
        if let Some(wanted) = self.config.vcom_mv {
            if wanted != current {
                info!("setting VCOM to {} mV", wanted);
                self.set_vcom(wanted, self.config.persist_vcom)?;
            }
        }
        Ok(())
    }

    /// Read and decode the device information block
    pub fn get_device_info(&mut self) -> Result<DeviceInfo, Error<T::Error>> {
        let mut raw = [0u16; DEVICE_INFO_WORDS];
        self.bus.send_command(Command::GetDeviceInfo)?;
        self.bus.read_data(&mut raw)?;
        Ok(DeviceInfo::from_words(&raw))
    }

    /// Set the load-image start address, low half first
    pub fn set_image_buffer_base(&mut self, addr: u32) -> Result<(), Error<T::Error>> {
        if addr >= MAX_BUFFER_ADDR {
            return Err(Error::AddressOutOfRange(addr));
        }
        self.bus.write_register(Register::Lisar, addr as u16)?;
        self.bus
            .write_register(Register::LisarHigh, (addr >> 16) as u16)
    }

    /// Enable or disable packed pixel writes on the host interface
    pub fn set_packed_mode(&mut self, enable: bool) -> Result<(), Error<T::Error>> {
        self.bus.write_register(Register::I80Cpcr, u16::from(enable))
    }

    pub fn system_run(&mut self) -> Result<(), Error<T::Error>> {
        self.power_command(Command::SysRun, DeviceState::Ready)
    }

    pub fn standby(&mut self) -> Result<(), Error<T::Error>> {
        self.power_command(Command::Standby, DeviceState::Standby)
    }

    pub fn sleep(&mut self) -> Result<(), Error<T::Error>> {
        self.power_command(Command::Sleep, DeviceState::Sleeping)
    }

    /// Power states are only tracked once bring-up has succeeded
    fn power_command(&mut self, cmd: Command, next: DeviceState) -> Result<(), Error<T::Error>> {
        self.bus.send_command(cmd)?;
        if matches!(
            self.state,
            DeviceState::Ready | DeviceState::Standby | DeviceState::Sleeping
        ) {
            self.state = next;
        }
        Ok(())
    }

    /// Switch the panel supply on or off
    pub fn set_power(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.bus
            .send_command_args(Command::PowerSequence, &[u16::from(on)])
    }

    /// Current VCOM in mV (negative)
    pub fn get_vcom(&mut self) -> Result<i32, Error<T::Error>> {
        let mut magnitude = [0u16; 1];
        self.bus.send_command_args(Command::Vcom, &[VCOM_GET])?;
        self.bus.read_data(&mut magnitude)?;
        Ok(-i32::from(magnitude[0]))
    }

    /// Set VCOM in mV, optionally persisting it to flash
    pub fn set_vcom(&mut self, vcom_mv: i32, persist: bool) -> Result<(), Error<T::Error>> {
        let magnitude = check_vcom::<T::Error>(vcom_mv)?;
        let target = if persist { VCOM_SET_FLASH } else { VCOM_SET_RAM };
        self.bus
            .send_command_args(Command::Vcom, &[target, magnitude])
    }

    /// Pin the temperature the waveform selection uses
    pub fn force_temperature(&mut self, celsius: u16) -> Result<(), Error<T::Error>> {
        self.bus
            .send_command_args(Command::Temperature, &[TEMPERATURE_FORCE, celsius])
    }

    /// Go back to the temperature sensor
    pub fn cancel_forced_temperature(&mut self) -> Result<(), Error<T::Error>> {
        self.bus
            .send_command_args(Command::Temperature, &[TEMPERATURE_RELEASE])
    }

    pub fn temperature(&mut self) -> Result<Temperature, Error<T::Error>> {
        let mut raw = [0u16; 2];
        self.bus
            .send_command_args(Command::Temperature, &[TEMPERATURE_GET])?;
        self.bus.read_data(&mut raw)?;
        Ok(Temperature {
            real: raw[0],
            forced: raw[1],
        })
    }

    /// Must be enabled before refreshing 2 bpp images
    pub fn set_bpp_mode(&mut self, is_2bpp: bool) -> Result<(), Error<T::Error>> {
        self.bus
            .send_command_args(Command::BppSettings, &[u16::from(is_2bpp)])
    }

    /// Block until every LUT engine is idle
    pub fn wait_display_ready(&mut self) -> Result<(), Error<T::Error>> {
        let limit = self.config.engine_wait;
        let mut polls = 0u32;
        while self.bus.read_register(Register::LutAfsr)? != 0 {
            polls = polls.saturating_add(1);
            if limit.exhausted(polls) {
                warn!("refresh engine still busy after {} polls", polls);
                return Err(Error::EngineBusyTimeout);
            }
        }
        Ok(())
    }

    /// Refresh `rect` from the frame buffer
    ///
    /// Waits for the refresh engine to go idle first.
    pub fn display_area(
        &mut self,
        rect: &Rectangle,
        mode: DisplayMode,
    ) -> Result<(), Error<T::Error>> {
        self.require_ready()?;
        self.check_rect(rect)?;
        self.wait_display_ready()?;
        self.bus.send_command_args(
            Command::DisplayArea,
            &[rect.x, rect.y, rect.width, rect.height, mode.code()],
        )
    }

    /// Fill `rect` with `colour` and refresh it
    pub fn fill_rect(
        &mut self,
        rect: &Rectangle,
        mode: DisplayMode,
        colour: u8,
    ) -> Result<(), Error<T::Error>> {
        self.require_ready()?;
        self.check_rect(rect)?;
        self.bus.send_command_args(
            Command::FillRect,
            &[
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                FILL_RECT_FLAGS | mode.code(),
                u16::from(colour),
            ],
        )
    }

    /// Load packed words into the frame buffer at `rect`
    ///
    /// `words` must hold exactly the word count the packer produces for
    /// `rect`. Does not refresh the panel; follow with
    /// [`display_area`](Self::display_area).
    pub fn write_packed_pixels(
        &mut self,
        info: &ImageInfo,
        rect: &Rectangle,
        words: &[u16],
    ) -> Result<(), Error<T::Error>> {
        self.require_ready()?;
        if info.depth != ColorDepth::Bpp4 {
            warn!("unsupported pixel depth code {}", info.depth.code());
            return Err(Error::UnsupportedColorDepth(info.depth));
        }
        self.check_rect(rect)?;
        if rect.is_empty() {
            return Err(Error::Pack(PackError::EmptyRectangle));
        }

        let expected = packer::word_count(info, rect);
        if words.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: words.len(),
            });
        }

        let mut payload = Vec::with_capacity(words.len() * 2);
        for word in words {
            match info.endianness {
                Endianness::Little => payload.extend_from_slice(&word.to_le_bytes()),
                Endianness::Big => payload.extend_from_slice(&word.to_be_bytes()),
            }
        }

        self.bus.send_command_args(
            Command::LoadImageArea,
            &[info.encode(), rect.x, rect.y, rect.width, rect.height],
        )?;
        self.bus.write_bytes(&payload)?;
        self.bus.send_command(Command::LoadImageEnd)
    }

    /// Pack one byte per pixel and load it at `rect`
    pub fn write_pixels(
        &mut self,
        info: &ImageInfo,
        rect: &Rectangle,
        pixels: &[u8],
    ) -> Result<(), Error<T::Error>> {
        self.require_ready()?;
        self.check_rect(rect)?;

        let mut words = vec![0u16; packer::word_count(info, rect)];
        packer::pack_pixels(info, rect, pixels, &mut words).map_err(|e| {
            if let PackError::Unsupported { depth, .. } = e {
                warn!("no packing for depth code {}", depth.code());
            }
            Error::<T::Error>::Pack(e)
        })?;
        self.write_packed_pixels(info, rect, &words)
    }

    pub(super) fn require_ready(&self) -> Result<(), Error<T::Error>> {
        match self.state {
            DeviceState::Ready => Ok(()),
            other => Err(Error::NotInitialized(other)),
        }
    }

    pub(super) fn check_rect(&self, rect: &Rectangle) -> Result<(), Error<T::Error>> {
        if self.panel.contains(rect) {
            return Ok(());
        }
        warn!(
            "rectangle {},{} {}x{} outside panel {}x{}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            self.panel.width,
            self.panel.height,
        );
        Err(Error::RectangleOutsidePanel {
            rect: *rect,
            panel: self.panel,
        })
    }
}

/// Validate a VCOM value and return its wire magnitude
fn check_vcom<E>(vcom_mv: i32) -> Result<u16, Error<E>> {
    if vcom_mv >= 0 {
        return Err(Error::InvalidVcom(vcom_mv));
    }
    u16::try_from(vcom_mv.unsigned_abs()).map_err(|_| Error::InvalidVcom(vcom_mv))
}
