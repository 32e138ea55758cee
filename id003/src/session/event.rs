// id003-rs/id003/src/session/event.rs
//! Events published by a session.

use crate::Error;
use crate::protocol::commands::Command;
use crate::types::{CountReply, Denomination, PathReply, Rejection};

/// What a `Session` publishes on its event channel.
#[derive(Debug)]
pub enum Event {
    /// Outcome of the denomination bootstrap started by `connect`.
    Connected(crate::Result<()>),
    /// A bill in escrow with a denomination the table knows.
    BillRead {
        /// Face value.
        denomination: Denomination,
        /// Escrow code as received.
        code: u8,
        /// `code` as `x` followed by two hex digits.
        hex_code: String,
    },
    /// Bill pulled in.
    BillAccepted,
    /// Vend valid. The bill is yours.
    BillValid,
    /// Bill in the stacker.
    BillStacked {
        /// Recycler path byte, when reported.
        path: Option<u8>,
    },
    /// Bill rejected or handed back.
    BillRejected(Rejection),
    /// Stacker box removed.
    StackerOpen,
    /// Stacker box full.
    StackerFull,
    /// Acceptor jam.
    AcceptorJam,
    /// Stacker jam.
    StackerJam,
    /// Cheat attempt.
    Cheated,
    /// Validator finished initializing and sits inhibited.
    Standby,
    /// Payout held.
    OnPayStay,
    /// Payout done.
    OnPayValid,
    /// Currency path reply.
    PathCurrency(PathReply),
    /// Set count reply.
    PathSetCount(CountReply),
    /// Set current count reply.
    PathSetCurrentCount(CountReply),
    /// Count reply.
    PathCount(PathReply),
    /// Extension reply with a sub-code this crate does not interpret.
    Extension {
        /// Sub-code at payload offset 1.
        sub_code: u8,
        /// Whole reply payload.
        data: Vec<u8>,
    },
    /// Response opcode missing from the response table.
    UnknownResponse(u8),
    /// Every command as it is written to the transport, whether the FSM,
    /// the poll loop or a caller asked for it. Only published when
    /// `SessionConfig::emit_dispatch` is set.
    Dispatch(Command),
    /// Throttled transport errors and fatal liveness errors.
    Error(Error),
}

impl Event {
    /// Published event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::BillRead { .. } => "billRead",
            Self::BillAccepted => "billAccepted",
            Self::BillValid => "billValid",
            Self::BillStacked { .. } => "billStacked",
            Self::BillRejected(_) => "billRejected",
            Self::StackerOpen => "stackerOpen",
            Self::StackerFull => "stackerFull",
            Self::AcceptorJam => "acceptorJam",
            Self::StackerJam => "stackerJam",
            Self::Cheated => "cheated",
            Self::Standby => "standby",
            Self::OnPayStay => "onpaystay",
            Self::OnPayValid => "onpayvalid",
            Self::PathCurrency(_) => "pathCurrency",
            Self::PathSetCount(_) => "pathSetCount",
            Self::PathSetCurrentCount(_) => "pathSetCurrentCount",
            Self::PathCount(_) => "pathCount",
            Self::Extension { .. } => "extension",
            Self::UnknownResponse(_) => "unknownResponse",
            Self::Dispatch(_) => "dispatch",
            Self::Error(_) => "error",
        }
    }

    /// Error events that end the session.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Error(e) => e.is_fatal(),
            Self::Connected(Err(e)) => e.is_fatal(),
            _ => false,
        }
    }
}
