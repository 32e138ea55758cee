// id003-rs/id003/src/protocol/responses/mod.rs
//! Validator responses.

/// Replies on the shared extension opcode.
pub mod extension;
/// Denomination and version replies.
pub mod setting;
/// Status replies that carry data.
pub mod status;

pub use extension::decode_extension;
pub use setting::{decode_denominations, decode_version};
pub use status::{decode_escrow, decode_rejecting, decode_stacked};

use derive_more::Display;

use super::frame::Frame;
use crate::fsm::Trigger;
use crate::types::{CountReply, DenominationTable, Escrow, PathReply, Rejection};
use crate::{Error, Result};

/// Logical name of a validator response. Most map 1:1 to an opcode; the
/// last three only appear as overrides of the shared 0xF0 opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseKind {
    /// 0x40
    #[display(fmt = "powerUp")]
    PowerUp,
    /// 0x41
    #[display(fmt = "powerUpAcceptor")]
    PowerUpAcceptor,
    /// 0x42
    #[display(fmt = "powerUpStacker")]
    PowerUpStacker,
    /// 0x1B
    #[display(fmt = "initialize")]
    Initialize,
    /// 0x1A
    #[display(fmt = "disable")]
    Disable,
    /// 0x11
    #[display(fmt = "enable")]
    Enable,
    /// 0x12
    #[display(fmt = "accepting")]
    Accepting,
    /// 0x13
    #[display(fmt = "escrow")]
    Escrow,
    /// 0x14
    #[display(fmt = "stacking")]
    Stacking,
    /// 0x15
    #[display(fmt = "vendValid")]
    VendValid,
    /// 0x16
    #[display(fmt = "stacked")]
    Stacked,
    /// 0x17
    #[display(fmt = "rejecting")]
    Rejecting,
    /// 0x18
    #[display(fmt = "returning")]
    Returning,
    /// 0x20
    #[display(fmt = "paying")]
    Paying,
    /// 0x22
    #[display(fmt = "collected")]
    Collected,
    /// 0x23
    #[display(fmt = "payvalid")]
    PayValid,
    /// 0x24
    #[display(fmt = "paystay")]
    PayStay,
    /// 0x25
    #[display(fmt = "returningtobox")]
    ReturningToBox,
    /// 0x43
    #[display(fmt = "stackerFull")]
    StackerFull,
    /// 0x44
    #[display(fmt = "stackerOpen")]
    StackerOpen,
    /// 0x45
    #[display(fmt = "acceptorJam")]
    AcceptorJam,
    /// 0x46
    #[display(fmt = "stackerJam")]
    StackerJam,
    /// 0x47
    #[display(fmt = "pause")]
    Pause,
    /// 0x48
    #[display(fmt = "cheated")]
    Cheated,
    /// 0x49
    #[display(fmt = "failure")]
    Failure,
    /// 0x4B
    #[display(fmt = "invalidcommand")]
    InvalidCommand,
    /// 0x4C
    #[display(fmt = "recyclerunitfailure")]
    RecyclerUnitFailure,
    /// 0x50
    #[display(fmt = "ack")]
    Ack,
    /// 0x88
    #[display(fmt = "version")]
    Version,
    /// 0x8A
    #[display(fmt = "denominations")]
    Denominations,
    /// 0xC3
    #[display(fmt = "inhibit")]
    Inhibit,
    /// Extension reply (0xF0); currency path unless the sub-code says otherwise.
    #[display(fmt = "currencypath")]
    CurrencyPath,
    /// Extension reply to `setcount`.
    #[display(fmt = "setcount")]
    SetCount,
    /// Extension reply to `setcurrentcount`.
    #[display(fmt = "setcurrentcount")]
    SetCurrentCount,
    /// Extension reply to `count`.
    #[display(fmt = "count")]
    Count,
}

impl ResponseKind {
    /// Look up the response code table.
    pub fn from_code(code: u8) -> Option<Self> {
        let kind = match code {
            0x40 => Self::PowerUp,
            0x41 => Self::PowerUpAcceptor,
            0x42 => Self::PowerUpStacker,
            0x1B => Self::Initialize,
            0x1A => Self::Disable,
            0x11 => Self::Enable,
            0x12 => Self::Accepting,
            0x13 => Self::Escrow,
            0x14 => Self::Stacking,
            0x15 => Self::VendValid,
            0x16 => Self::Stacked,
            0x17 => Self::Rejecting,
            0x18 => Self::Returning,
            0x20 => Self::Paying,
            0x22 => Self::Collected,
            0x23 => Self::PayValid,
            0x24 => Self::PayStay,
            0x25 => Self::ReturningToBox,
            0x43 => Self::StackerFull,
            0x44 => Self::StackerOpen,
            0x45 => Self::AcceptorJam,
            0x46 => Self::StackerJam,
            0x47 => Self::Pause,
            0x48 => Self::Cheated,
            0x49 => Self::Failure,
            0x4B => Self::InvalidCommand,
            0x4C => Self::RecyclerUnitFailure,
            0x50 => Self::Ack,
            0x88 => Self::Version,
            0x8A => Self::Denominations,
            0xC3 => Self::Inhibit,
            0xF0 => Self::CurrencyPath,
            _ => return None,
        };
        Some(kind)
    }

    /// FSM event fed for this response. `ack` and `inhibit` are consumed by
    /// the session and never reach the FSM.
    pub fn trigger(&self) -> Option<Trigger> {
        let trigger = match self {
            Self::Ack | Self::Inhibit => return None,
            Self::PowerUp => Trigger::PowerUp,
            Self::PowerUpAcceptor => Trigger::PowerUpAcceptor,
            Self::PowerUpStacker => Trigger::PowerUpStacker,
            Self::Initialize => Trigger::Initialize,
            Self::Disable => Trigger::Disable,
            Self::Enable => Trigger::Enable,
            Self::Accepting => Trigger::Accepting,
            Self::Escrow => Trigger::Escrow,
            Self::Stacking => Trigger::Stacking,
            Self::VendValid => Trigger::VendValid,
            Self::Stacked => Trigger::Stacked,
            Self::Rejecting => Trigger::Rejecting,
            Self::Returning => Trigger::Returning,
            Self::Paying => Trigger::Paying,
            Self::Collected => Trigger::Collected,
            Self::PayValid => Trigger::PayValid,
            Self::PayStay => Trigger::PayStay,
            Self::ReturningToBox => Trigger::ReturningToBox,
            Self::StackerFull => Trigger::StackerFull,
            Self::StackerOpen => Trigger::StackerOpen,
            Self::AcceptorJam => Trigger::AcceptorJam,
            Self::StackerJam => Trigger::StackerJam,
            Self::Pause => Trigger::Pause,
            Self::Cheated => Trigger::Cheated,
            Self::Failure => Trigger::Failure,
            Self::InvalidCommand => Trigger::InvalidCommand,
            Self::RecyclerUnitFailure => Trigger::RecyclerUnitFailure,
            Self::Version => Trigger::Version,
            Self::Denominations => Trigger::Denominations,
            Self::CurrencyPath => Trigger::CurrencyPath,
            Self::SetCount => Trigger::SetCount,
            Self::SetCurrentCount => Trigger::SetCurrentCount,
            Self::Count => Trigger::Count,
        };
        Some(trigger)
    }
}

/// Typed data carried by a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// No data.
    None,
    /// Escrow status with the bill code.
    Escrow(Escrow),
    /// Rejecting status with the reason.
    Rejection(Rejection),
    /// Stacked status, with the recycler path when present.
    Stacked {
        /// Recycler path byte.
        path: Option<u8>,
    },
    /// Denomination table.
    Denominations(DenominationTable),
    /// Firmware version string.
    Version(String),
    /// Currency path reply.
    CurrencyPath(PathReply),
    /// Set count reply.
    SetCount(CountReply),
    /// Set current count reply.
    SetCurrentCount(CountReply),
    /// Count reply.
    Count(PathReply),
    /// Extension reply with a sub-code this crate does not interpret.
    Extension {
        /// Sub-code at payload offset 1.
        sub_code: u8,
        /// Whole reply payload.
        data: Vec<u8>,
    },
    /// Data on a response that normally carries none.
    Raw(Vec<u8>),
}

impl Payload {
    /// Logical event that replaces the opcode's own name, if any.
    pub fn event_override(&self) -> Option<ResponseKind> {
        match self {
            Self::SetCount(_) => Some(ResponseKind::SetCount),
            Self::SetCurrentCount(_) => Some(ResponseKind::SetCurrentCount),
            Self::Count(_) => Some(ResponseKind::Count),
            _ => None,
        }
    }
}

/// A decoded validator response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Logical response name, after any override.
    pub kind: ResponseKind,
    /// Opcode as received.
    pub code: u8,
    /// Decoded data.
    pub payload: Payload,
}

impl Message {
    /// Decode a CRC-checked frame into a typed message. The event override
    /// of the payload, when present, replaces the opcode's kind.
    pub fn decode(frame: &Frame) -> Result<Self> {
        let kind =
            ResponseKind::from_code(frame.opcode).ok_or(Error::UnknownResponse(frame.opcode))?;
        let data = frame.payload();

        let payload = match kind {
            ResponseKind::Escrow => Payload::Escrow(decode_escrow(data)?),
            ResponseKind::Rejecting => Payload::Rejection(decode_rejecting(data)?),
            ResponseKind::Stacked => Payload::Stacked {
                path: decode_stacked(data),
            },
            ResponseKind::Denominations => Payload::Denominations(decode_denominations(data)),
            ResponseKind::Version => Payload::Version(decode_version(data)),
            ResponseKind::CurrencyPath => decode_extension(data)?,
            _ => match data {
                Some(d) => Payload::Raw(d.to_vec()),
                None => Payload::None,
            },
        };

        Ok(Self {
            kind: payload.event_override().unwrap_or(kind),
            code: frame.opcode,
            payload,
        })
    }

    /// Event name, honouring any override.
    pub fn name(&self) -> String {
        self.kind.to_string()
    }
}
