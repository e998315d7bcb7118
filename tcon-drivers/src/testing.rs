//! Test doubles for the controller transport

use std::collections::{BTreeMap, VecDeque};
use std::vec;
use std::vec::Vec;

use tcon_hal::Transport;
use tcon_protocol::{Command, Register, SpiPreamble, DEVICE_INFO_WORDS};

/// Error reported by a mock exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportFault;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select(bool),
    /// Bytes clocked out; zeros when the caller passed no tx buffer
    Exchange(Vec<u8>),
}

/// Transport that records traffic and answers from a byte script
pub struct RecordingTransport {
    pub events: Vec<Event>,
    pub selected: bool,
    pub ready: bool,
    /// Ready reads that succeed before the line goes low for good
    pub ready_budget: Option<usize>,
    pub ready_polls: usize,
    /// Index of the exchange that fails
    pub fail_on_exchange: Option<usize>,
    rx_script: VecDeque<u8>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            selected: false,
            ready: true,
            ready_budget: None,
            ready_polls: 0,
            fail_on_exchange: None,
            rx_script: VecDeque::new(),
        }
    }

    /// Queue bytes to be clocked in, one per byte clocked out
    pub fn script_rx(&mut self, bytes: &[u8]) {
        self.rx_script.extend(bytes.iter().copied());
    }

    pub fn exchange_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Exchange(_)))
            .count()
    }

    pub fn sent_bytes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Exchange(tx) => Some(tx.as_slice()),
                Event::Select(_) => None,
            })
            .flatten()
            .copied()
            .collect()
    }
}

impl Transport for RecordingTransport {
    type Error = TransportFault;

    fn exchange(
        &mut self,
        tx: Option<&[u8]>,
        rx: Option<&mut [u8]>,
        len: usize,
    ) -> Result<(), TransportFault> {
        let index = self.exchange_count();
        let sent = tx.map_or_else(|| vec![0; len], |t| t[..len].to_vec());
        self.events.push(Event::Exchange(sent));

        if self.fail_on_exchange == Some(index) {
            return Err(TransportFault);
        }

        // Full duplex: every clocked byte shifts one scripted byte in
        let incoming: Vec<u8> = (0..len)
            .map(|_| self.rx_script.pop_front().unwrap_or(0))
            .collect();
        if let Some(rx) = rx {
            rx[..len].copy_from_slice(&incoming);
        }
        Ok(())
    }

    fn set_select(&mut self, active: bool) {
        self.selected = active;
        self.events.push(Event::Select(active));
    }

    fn read_ready(&mut self) -> bool {
        self.ready_polls += 1;
        match self.ready_budget.as_mut() {
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                self.ready
            }
            None => self.ready,
        }
    }
}

/// In-memory IT8951
///
/// Decodes framed traffic the way the controller does and keeps just
/// enough state to answer device-info, register, VCOM and temperature
/// reads and to capture image loads.
pub struct FakeIt8951 {
    pub width: u16,
    pub height: u16,
    pub buffer_addr: u32,
    pub registers: BTreeMap<u16, u16>,
    pub vcom: u16,
    /// Flag word of each VCOM write (1 = RAM, 2 = flash)
    pub vcom_writes: Vec<u16>,
    pub temperature: u16,
    pub forced_temperature: Option<u16>,
    /// LUTAFSR reads that still report a busy engine
    pub busy_polls: usize,
    pub lutafsr_reads: usize,
    pub power_on: Option<bool>,
    pub bpp_2: Option<bool>,
    /// Opcodes in the order received
    pub commands: Vec<u16>,
    /// Argument words of the last command that took arguments
    pub last_args: Vec<u16>,
    pub image_area: Option<[u16; 5]>,
    pub image_payload: Vec<u8>,
    pub image_loads_completed: usize,
    pub selected: bool,
    pub exchanges: usize,
    /// Exchange index that fails
    pub fail_on_exchange: Option<usize>,
    pub never_ready: bool,

    frame: Vec<u8>,
    pending_cmd: Option<Command>,
    awaiting_payload: bool,
    responses: VecDeque<u16>,
}

impl FakeIt8951 {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer_addr: 0x0012_36E0,
            registers: BTreeMap::new(),
            vcom: 1530,
            vcom_writes: Vec::new(),
            temperature: 23,
            forced_temperature: None,
            busy_polls: 0,
            lutafsr_reads: 0,
            power_on: None,
            bpp_2: None,
            commands: Vec::new(),
            last_args: Vec::new(),
            image_area: None,
            image_payload: Vec::new(),
            image_loads_completed: 0,
            selected: false,
            exchanges: 0,
            fail_on_exchange: None,
            never_ready: false,
            frame: Vec::new(),
            pending_cmd: None,
            awaiting_payload: false,
            responses: VecDeque::new(),
        }
    }

    pub fn register(&self, reg: Register) -> u16 {
        self.registers.get(&reg.address()).copied().unwrap_or(0)
    }

    fn device_info_words(&self) -> [u16; DEVICE_INFO_WORDS] {
        let mut raw = [0u16; DEVICE_INFO_WORDS];
        raw[0] = self.width;
        raw[1] = self.height;
        raw[2] = self.buffer_addr as u16;
        raw[3] = (self.buffer_addr >> 16) as u16;
        for (i, pair) in b"SWv_0.1.1".chunks(2).enumerate() {
            raw[4 + i] = u16::from_be_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]);
        }
        for (i, pair) in b"M841_TFA2812".chunks(2).enumerate() {
            raw[12 + i] = u16::from_be_bytes([pair[0], pair[1]]);
        }
        raw
    }

    fn preamble(&self) -> Option<SpiPreamble> {
        let word = u16::from_be_bytes([*self.frame.first()?, *self.frame.get(1)?]);
        SpiPreamble::from_code(word)
    }

    fn frame_words(&self) -> Vec<u16> {
        self.frame[2..]
            .chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .collect()
    }

    fn end_frame(&mut self) {
        match self.preamble() {
            Some(SpiPreamble::Command) => {
                let words = self.frame_words();
                if let Some(&code) = words.first() {
                    self.commands.push(code);
                    self.on_command(Command::from_code(code));
                }
            }
            Some(SpiPreamble::WriteData) if self.awaiting_payload => {
                self.image_payload.extend_from_slice(&self.frame[2..]);
            }
            Some(SpiPreamble::WriteData) => {
                let args = self.frame_words();
                if let Some(cmd) = self.pending_cmd.take() {
                    self.on_args(cmd, &args);
                }
                self.last_args = args;
            }
            Some(SpiPreamble::ReadData) | None => {}
        }
        self.frame.clear();
    }

    fn on_command(&mut self, cmd: Option<Command>) {
        match cmd {
            Some(Command::GetDeviceInfo) => {
                let words = self.device_info_words();
                self.responses.extend(words);
            }
            Some(Command::LoadImageEnd) => {
                self.awaiting_payload = false;
                self.image_loads_completed += 1;
            }
            Some(Command::SysRun) | Some(Command::Standby) | Some(Command::Sleep) | None => {}
            Some(other) => self.pending_cmd = Some(other),
        }
    }

    fn on_args(&mut self, cmd: Command, args: &[u16]) {
        match (cmd, args) {
            (Command::RegisterWrite, &[addr, value]) => {
                self.registers.insert(addr, value);
            }
            (Command::RegisterRead, &[addr]) => {
                let value = if addr == Register::LutAfsr.address() {
                    self.lutafsr_reads += 1;
                    if self.busy_polls > 0 {
                        self.busy_polls -= 1;
                        1
                    } else {
                        0
                    }
                } else {
                    self.registers.get(&addr).copied().unwrap_or(0)
                };
                self.responses.push_back(value);
            }
            (Command::Vcom, &[0]) => self.responses.push_back(self.vcom),
            (Command::Vcom, &[flag, magnitude]) => {
                self.vcom = magnitude;
                self.vcom_writes.push(flag);
            }
            (Command::Temperature, &[0]) => {
                self.responses.push_back(self.temperature);
                self.responses
                    .push_back(self.forced_temperature.unwrap_or(0xFFFF));
            }
            (Command::Temperature, &[1, t]) => self.forced_temperature = Some(t),
            (Command::Temperature, &[2]) => self.forced_temperature = None,
            (Command::LoadImageArea, &[info, x, y, w, h]) => {
                self.image_area = Some([info, x, y, w, h]);
                self.image_payload.clear();
                self.awaiting_payload = true;
            }
            (Command::PowerSequence, &[on]) => self.power_on = Some(on != 0),
            (Command::BppSettings, &[v]) => self.bpp_2 = Some(v != 0),
            _ => {}
        }
    }
}

impl Transport for FakeIt8951 {
    type Error = TransportFault;

    fn exchange(
        &mut self,
        tx: Option<&[u8]>,
        rx: Option<&mut [u8]>,
        len: usize,
    ) -> Result<(), TransportFault> {
        let index = self.exchanges;
        self.exchanges += 1;
        if self.fail_on_exchange == Some(index) {
            return Err(TransportFault);
        }

        let word_index = self.frame.len() / 2;
        match tx {
            Some(tx) => self.frame.extend_from_slice(&tx[..len]),
            None => self.frame.extend(core::iter::repeat(0).take(len)),
        }

        if let Some(rx) = rx {
            let reading = self.preamble() == Some(SpiPreamble::ReadData) && word_index >= 2;
            let word = if reading {
                self.responses.pop_front().unwrap_or(0xDEAD)
            } else {
                0
            };
            for (i, b) in rx[..len].iter_mut().enumerate() {
                *b = word.to_be_bytes()[i % 2];
            }
        }
        Ok(())
    }

    fn set_select(&mut self, active: bool) {
        if self.selected && !active {
            self.end_frame();
        }
        if active {
            self.frame.clear();
        }
        self.selected = active;
    }

    fn read_ready(&mut self) -> bool {
        !self.never_ready
    }
}
