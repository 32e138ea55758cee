// id003-rs/id003/src/transport/simulator.rs

//! In-process ID003 validator. It answers host frames the way an iVizion
//! class validator does and advances its own state every few status polls,
//! which is enough to drive a full insert/escrow/stack cycle without
//! hardware.

use log::{debug, trace};

use crate::constants::*;
use crate::protocol::checksum::Kermit;
use crate::protocol::commands::Command;
use crate::protocol::frame::Frame;
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Status polls a self-advancing state is held before moving on.
pub const DEFAULT_DWELL: u8 = 3;

/// Simulated validator state. Each one answers a status poll with its own
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Just powered; waits for a reset.
    PowerUp,
    /// Initializing after a reset.
    Initialize,
    /// Idle, inhibited.
    Disable,
    /// Idle, accepting.
    Enable,
    /// Pulling a bill in.
    Accepting,
    /// Holding a bill.
    Escrow,
    /// Stacking.
    Stacking,
    /// Waiting for the ack.
    VendValid,
    /// Bill stacked.
    Stacked,
    /// Rejecting.
    Rejecting,
    /// Handing the bill back.
    Returning,
    /// Stacker removed.
    StackerOpen,
    /// Stacker full.
    StackerFull,
}

impl SimState {
    fn status_code(&self) -> u8 {
        match self {
            Self::PowerUp => 0x40,
            Self::Initialize => 0x1B,
            Self::Disable => 0x1A,
            Self::Enable => 0x11,
            Self::Accepting => 0x12,
            Self::Escrow => 0x13,
            Self::Stacking => 0x14,
            Self::VendValid => 0x15,
            Self::Stacked => 0x16,
            Self::Rejecting => 0x17,
            Self::Returning => 0x18,
            Self::StackerOpen => 0x44,
            Self::StackerFull => 0x43,
        }
    }
}

/// Transport that is its own validator.
#[derive(Debug)]
pub struct Simulator {
    open: bool,
    state: SimState,
    dwell: u8,
    polls: u8,
    frozen: bool,
    silent: bool,
    light: bool,
    escrow_code: u8,
    reject_code: u8,
    pending_reject: Option<u8>,
    inhibited: bool,
    denominations: Vec<[u8; 4]>,
    version: String,
    counts: [u8; 2],
    outbound: Vec<u8>,
    received: Vec<Command>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Validator with a small USD table (1, 5, 10, 20).
    pub fn new() -> Self {
        Self {
            open: false,
            state: SimState::PowerUp,
            dwell: DEFAULT_DWELL,
            polls: 0,
            frozen: false,
            silent: false,
            light: false,
            escrow_code: 0,
            reject_code: 0,
            pending_reject: None,
            inhibited: true,
            denominations: vec![
                [0x61, 0x00, 0x01, 0x00],
                [0x63, 0x00, 0x05, 0x00],
                [0x64, 0x00, 0x01, 0x01],
                [0x65, 0x00, 0x02, 0x01],
            ],
            version: "i(USA)100-SS ID003-05V200-34".to_string(),
            counts: [0, 0],
            outbound: Vec::new(),
            received: Vec::new(),
        }
    }

    /// Replace the denomination records (code, 0x00, mantissa, exponent).
    pub fn with_denominations(mut self, records: Vec<[u8; 4]>) -> Self {
        self.denominations = records;
        self
    }

    /// Replace the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Status polls spent in each self-advancing state.
    pub fn with_dwell(mut self, polls: u8) -> Self {
        self.dwell = polls;
        self
    }

    /// Current simulated state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Commands received so far, oldest first.
    pub fn received(&self) -> &[Command] {
        &self.received
    }

    /// Forget the received commands.
    pub fn clear_received(&mut self) {
        self.received.clear();
    }

    /// Whether the bezel light is on.
    pub fn light(&self) -> bool {
        self.light
    }

    /// Stop answering entirely.
    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    /// Keep the current state no matter how often it is polled.
    pub fn freeze(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Insert a bill with the given escrow code. Ignored unless accepting.
    pub fn insert(&mut self, escrow_code: u8) {
        if self.state == SimState::Enable {
            self.escrow_code = escrow_code;
            self.pending_reject = None;
            self.enter(SimState::Accepting);
        }
    }

    /// Insert something the validator will refuse with `reject_code`.
    pub fn insert_rejected(&mut self, reject_code: u8) {
        if self.state == SimState::Enable {
            self.pending_reject = Some(reject_code);
            self.enter(SimState::Accepting);
        }
    }

    /// Pull the stacker box.
    pub fn open_stacker(&mut self) {
        self.enter(SimState::StackerOpen);
    }

    /// Put the stacker box back. The validator reinitializes.
    pub fn close_stacker(&mut self) {
        if self.state == SimState::StackerOpen {
            self.enter(SimState::Initialize);
        }
    }

    /// Drop power and come back in PowerUp.
    pub fn power_cycle(&mut self) {
        self.enter(SimState::PowerUp);
    }

    fn enter(&mut self, state: SimState) {
        debug!("sim: {:?} -> {:?}", self.state, state);
        self.state = state;
        self.polls = 0;
    }

    fn idle_state(&self) -> SimState {
        if self.inhibited {
            SimState::Disable
        } else {
            SimState::Enable
        }
    }

    /// Follow-up state for self-advancing states.
    fn successor(&self) -> Option<SimState> {
        let next = match self.state {
            SimState::Initialize => self.idle_state(),
            SimState::Accepting => match self.pending_reject {
                Some(_) => SimState::Rejecting,
                None => SimState::Escrow,
            },
            SimState::Stacking => SimState::VendValid,
            SimState::VendValid => SimState::Stacked,
            SimState::Stacked | SimState::Rejecting | SimState::Returning => self.idle_state(),
            _ => return None,
        };
        Some(next)
    }

    fn advance(&mut self) {
        if self.frozen {
            return;
        }
        if let Some(next) = self.successor() {
            if self.polls < self.dwell {
                self.polls += 1;
            } else {
                if next == SimState::Rejecting {
                    self.reject_code = self.pending_reject.take().unwrap_or(0x7A);
                }
                self.enter(next);
            }
        }
    }

    fn respond(&mut self, opcode: u8, data: Vec<u8>) {
        if self.silent {
            return;
        }
        match Frame::new(opcode, data).encode(&Kermit) {
            Ok(bytes) => {
                trace!("sim: >> {:02x?}", bytes);
                self.outbound.extend(bytes);
            }
            Err(e) => debug!("sim: cannot encode reply: {}", e),
        }
    }

    fn status(&mut self) {
        self.advance();
        let data = match self.state {
            SimState::Escrow => vec![self.escrow_code],
            SimState::Rejecting => vec![self.reject_code],
            _ => Vec::new(),
        };
        self.respond(self.state.status_code(), data);
    }

    fn ack(&mut self) {
        self.respond(0x50, Vec::new());
    }

    fn handle(&mut self, cmd: Command) {
        self.received.push(cmd);
        match cmd {
            Command::Status => self.status(),
            Command::Ack => {}
            Command::Reset => {
                self.ack();
                if self.state != SimState::StackerOpen {
                    self.enter(SimState::Initialize);
                }
            }
            Command::Denominations => {
                let data = self.denominations.iter().flatten().copied().collect();
                self.respond(0x8A, data);
            }
            Command::Version => {
                let mut data = self.version.clone().into_bytes();
                data.extend_from_slice(&[0x00, 0x00]);
                self.respond(0x88, data);
            }
            Command::Stack => {
                self.ack();
                if self.state == SimState::Escrow {
                    self.enter(SimState::Stacking);
                }
            }
            Command::Reject => {
                self.ack();
                if self.state == SimState::Escrow {
                    self.enter(SimState::Returning);
                }
            }
            Command::Inhibit | Command::UnInhibit => {
                let inhibit = cmd == Command::Inhibit;
                self.inhibited = inhibit;
                self.respond(0xC3, vec![u8::from(inhibit)]);
                if matches!(
                    self.state,
                    SimState::Initialize | SimState::Enable | SimState::Disable
                ) {
                    let idle = self.idle_state();
                    self.enter(idle);
                }
            }
            Command::Count => {
                let [c1, c2] = self.counts;
                self.respond(EXTENSION_OPCODE, vec![EXTENSION_UNIT, SUB_COUNT, c1, 0x00, c2, 0x00]);
            }
            Command::SetCount { count, box_id } | Command::SetCurrentCount { count, box_id } => {
                let sub = match cmd {
                    Command::SetCount { .. } => SUB_SET_COUNT,
                    _ => SUB_SET_CURRENT_COUNT,
                };
                if let Some(slot) = self.counts.get_mut(usize::from(box_id).wrapping_sub(1)) {
                    *slot = count;
                }
                self.respond(
                    EXTENSION_OPCODE,
                    vec![EXTENSION_UNIT, sub, count, 0x00, box_id],
                );
            }
            Command::CurrencyPath { path1, path2 } => self.respond(
                EXTENSION_OPCODE,
                vec![
                    EXTENSION_UNIT,
                    SUB_CURRENCY_PATH,
                    path1,
                    0x00,
                    0x01,
                    path2,
                    0x00,
                    0x02,
                ],
            ),
            Command::Payout { .. } | Command::Emergency | Command::CurrentCount => self.ack(),
        }
    }
}

impl Transport for Simulator {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        let frame = Frame::decode(data, &Kermit)?;
        let cmd = Command::from_frame(&frame)?;
        trace!("sim: << {}", cmd);
        self.handle(cmd);
        Ok(())
    }

    fn receive(&mut self, _timeout_ms: u64) -> Result<Vec<u8>> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        Ok(std::mem::take(&mut self.outbound))
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        self.outbound.clear();
        Ok(())
    }

    fn supports_control_line(&self) -> bool {
        true
    }

    fn set_control_line(&mut self, on: bool) -> Result<()> {
        self.light = on;
        Ok(())
    }
}
