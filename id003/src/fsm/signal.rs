// id003-rs/id003/src/fsm/signal.rs
//! What the machine asks of its owner.

use crate::protocol::commands::Command;
use crate::types::{CountReply, Escrow, PathReply, Rejection};

/// Output of an FSM hook, drained by the session after every transition.
///
/// Most variants become the session event of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The validator powered up; fetch the denominations.
    PowerUp,
    /// Left the Connected state.
    Ready,
    /// Denomination table received; reset the validator.
    Denominations,
    /// Firmware version reply.
    Version(String),
    /// Command the session should write.
    Dispatch(Command),
    /// Initialization finished; the validator is idle in Disable.
    Standby,
    /// Bill pulled in and being read.
    BillAccepted,
    /// Bill rejected or returned.
    BillRejected(Rejection),
    /// Bill read and held in escrow.
    BillRead(Escrow),
    /// Bill stacked, with the recycler path if the validator reported one.
    BillStacked {
        /// Recycler path byte.
        path: Option<u8>,
    },
    /// Vend valid; the bill will be kept.
    BillValid,
    /// Reply to a currency path request.
    PathCurrency(PathReply),
    /// Reply to a set count request.
    PathSetCount(CountReply),
    /// Reply to a set current count request.
    PathSetCurrentCount(CountReply),
    /// Reply to a count request.
    PathCount(PathReply),
    /// Extension reply with a sub-code the decoder does not interpret.
    Extension {
        /// Sub-code at payload offset 1.
        sub_code: u8,
        /// Whole reply payload.
        data: Vec<u8>,
    },
    /// Stacker removed.
    StackerOpen,
    /// Stacker full.
    StackerFull,
    /// Bill jammed in the acceptor.
    AcceptorJam,
    /// Bill jammed in the stacker.
    StackerJam,
    /// Cheat attempt detected.
    Cheated,
    /// Payout held.
    OnPayStay,
    /// Payout done.
    OnPayValid,
    /// A transient state outlived the configured timeout.
    Stuck,
}
