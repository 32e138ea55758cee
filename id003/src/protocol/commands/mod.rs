// id003-rs/id003/src/protocol/commands/mod.rs
//! Host commands.

pub mod extension;
pub mod templates;

use std::fmt;
use std::str::FromStr;

pub use extension::{encode_currency_path, encode_payout, encode_set_count};

use crate::constants::*;
use crate::protocol::checksum::{Checksum, Kermit};
use crate::protocol::frame::Frame;
use crate::protocol::parser;
use crate::{Error, Result};

/// High-level Command enum. Every variant maps to one template in
/// `protocol::commands::templates`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Status request, sent on every poll.
    Status,
    /// Ask for the denomination table.
    Denominations,
    /// Ask for the firmware version.
    Version,
    /// Reset the validator.
    Reset,
    /// Acknowledge vend valid or pay valid.
    Ack,
    /// Stack the bill in escrow.
    Stack,
    /// Hand the bill in escrow back.
    Reject,
    /// Stop accepting bills.
    Inhibit,
    /// Start accepting bills.
    UnInhibit,
    /// Read the recycler count.
    Count,
    /// Read the current recycler count.
    CurrentCount,
    /// Recycler emergency stop.
    Emergency,
    /// Select the recycler currency paths.
    CurrencyPath {
        /// First path.
        path1: u8,
        /// Second path.
        path2: u8,
    },
    /// Pay `count` bills out of recycler box `box_id`.
    Payout {
        /// Number of bills.
        count: u8,
        /// Recycler box.
        box_id: u8,
    },
    /// Set the count of a recycler box.
    SetCount {
        /// New count.
        count: u8,
        /// Recycler box.
        box_id: u8,
    },
    /// Set the current count of a recycler box.
    SetCurrentCount {
        /// New count.
        count: u8,
        /// Recycler box.
        box_id: u8,
    },
}

/// Parameters for the parametric commands when building them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandParams {
    /// For `currencypath`.
    Paths {
        /// First path.
        path1: u8,
        /// Second path.
        path2: u8,
    },
    /// For `payout`, `setcount` and `setcurrentcount`.
    Count {
        /// Bill count.
        count: u8,
        /// Recycler box.
        box_id: u8,
    },
}

impl Command {
    /// Commands sent verbatim from their template.
    pub const FIXED: [Command; 12] = [
        Command::Status,
        Command::Denominations,
        Command::Version,
        Command::Reset,
        Command::Ack,
        Command::Stack,
        Command::Reject,
        Command::Inhibit,
        Command::UnInhibit,
        Command::Count,
        Command::CurrentCount,
        Command::Emergency,
    ];

    /// Wire-level name used in logs and by `from_name`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Denominations => "denominations",
            Self::Version => "version",
            Self::Reset => "reset",
            Self::Ack => "ack",
            Self::Stack => "stack",
            Self::Reject => "reject",
            Self::Inhibit => "inhibit",
            Self::UnInhibit => "unInhibit",
            Self::Count => "count",
            Self::CurrentCount => "currentcount",
            Self::Emergency => "emergency",
            Self::CurrencyPath { .. } => "currencypath",
            Self::Payout { .. } => "payout",
            Self::SetCount { .. } => "setcount",
            Self::SetCurrentCount { .. } => "setcurrentcount",
        }
    }

    /// Captured frame the command is built from.
    pub fn template(&self) -> &'static [u8] {
        match self {
            Self::Status => templates::STATUS,
            Self::Denominations => templates::DENOMINATIONS,
            Self::Version => templates::VERSION,
            Self::Reset => templates::RESET,
            Self::Ack => templates::ACK,
            Self::Stack => templates::STACK,
            Self::Reject => templates::REJECT,
            Self::Inhibit => templates::INHIBIT,
            Self::UnInhibit => templates::UNINHIBIT,
            Self::Count => templates::COUNT,
            Self::CurrentCount => templates::CURRENT_COUNT,
            Self::Emergency => templates::EMERGENCY,
            Self::CurrencyPath { .. } => templates::CURRENCY_PATH,
            Self::Payout { .. } => templates::PAYOUT,
            Self::SetCount { .. } => templates::SET_COUNT,
            Self::SetCurrentCount { .. } => templates::SET_CURRENT_COUNT,
        }
    }

    /// Opcode byte (third byte of the frame).
    pub fn opcode(&self) -> u8 {
        self.template()[2]
    }

    /// Commands whose template has parameter slots.
    pub fn is_parametric(&self) -> bool {
        matches!(
            self,
            Self::CurrencyPath { .. }
                | Self::Payout { .. }
                | Self::SetCount { .. }
                | Self::SetCurrentCount { .. }
        )
    }

    /// Encode the full wire frame with the default CRC.
    pub fn encode(&self) -> Vec<u8> {
        self.encode_with(&Kermit)
    }

    /// Encode the full wire frame. Parametric commands get their slots
    /// written and the CRC recomputed by `checksum`.
    pub fn encode_with<C: Checksum>(&self, checksum: &C) -> Vec<u8> {
        match *self {
            Self::CurrencyPath { path1, path2 } => encode_currency_path(path1, path2, checksum),
            Self::Payout { count, box_id } => encode_payout(count, box_id, checksum),
            Self::SetCount { count, box_id } => {
                encode_set_count(templates::SET_COUNT, count, box_id, checksum)
            }
            Self::SetCurrentCount { count, box_id } => {
                encode_set_count(templates::SET_CURRENT_COUNT, count, box_id, checksum)
            }
            _ => self.template().to_vec(),
        }
    }

    /// Build a command from its wire name. Parametric commands need `params`
    /// of the matching shape.
    pub fn from_name(name: &str, params: Option<CommandParams>) -> Result<Self> {
        if let Some(cmd) = Self::FIXED.into_iter().find(|c| c.name() == name) {
            return Ok(cmd);
        }

        let cmd = match (name, params) {
            ("currencypath", Some(CommandParams::Paths { path1, path2 })) => {
                Self::CurrencyPath { path1, path2 }
            }
            ("payout", Some(CommandParams::Count { count, box_id })) => {
                Self::Payout { count, box_id }
            }
            ("setcount", Some(CommandParams::Count { count, box_id })) => {
                Self::SetCount { count, box_id }
            }
            ("setcurrentcount", Some(CommandParams::Count { count, box_id })) => {
                Self::SetCurrentCount { count, box_id }
            }
            ("currencypath", _) => return Err(Error::MissingParameters("currencypath")),
            ("payout", _) => return Err(Error::MissingParameters("payout")),
            ("setcount", _) => return Err(Error::MissingParameters("setcount")),
            ("setcurrentcount", _) => return Err(Error::MissingParameters("setcurrentcount")),
            (other, _) => return Err(Error::UnknownCommand(other.to_string())),
        };
        Ok(cmd)
    }

    /// Recover the command carried by a host->validator frame.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let data = &frame.data;
        let cmd = match frame.opcode {
            0x11 => Self::Status,
            0x8A => Self::Denominations,
            0x88 => Self::Version,
            0x40 => Self::Reset,
            0x50 => Self::Ack,
            0x41 => Self::Stack,
            0x43 => Self::Reject,
            0xC3 => match parser::byte_at(data, 0)? {
                0x00 => Self::UnInhibit,
                _ => Self::Inhibit,
            },
            EXTENSION_OPCODE => match parser::byte_at(data, 1)? {
                SUB_COUNT => Self::Count,
                SUB_CURRENT_COUNT => Self::CurrentCount,
                SUB_EMERGENCY => Self::Emergency,
                SUB_CURRENCY_PATH => Self::CurrencyPath {
                    path1: parser::byte_at(data, 2)?,
                    path2: parser::byte_at(data, 5)?,
                },
                SUB_PAYOUT => Self::Payout {
                    count: parser::byte_at(data, 2)?,
                    box_id: parser::byte_at(data, 3)?,
                },
                SUB_SET_COUNT => Self::SetCount {
                    count: parser::byte_at(data, 2)?,
                    box_id: parser::byte_at(data, 4)?,
                },
                SUB_SET_CURRENT_COUNT => Self::SetCurrentCount {
                    count: parser::byte_at(data, 2)?,
                    box_id: parser::byte_at(data, 4)?,
                },
                sub => {
                    return Err(Error::UnknownCommand(format!(
                        "extension sub-code {:#04x}",
                        sub
                    )));
                }
            },
            other => return Err(Error::UnknownCommand(format!("opcode {:#04x}", other))),
        };
        Ok(cmd)
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s, None)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::CurrencyPath { path1, path2 } => {
                write!(f, "currencypath(path1={}, path2={})", path1, path2)
            }
            Self::Payout { count, box_id }
            | Self::SetCount { count, box_id }
            | Self::SetCurrentCount { count, box_id } => {
                write!(f, "{}(count={}, box={})", self.name(), count, box_id)
            }
            _ => f.write_str(self.name()),
        }
    }
}
