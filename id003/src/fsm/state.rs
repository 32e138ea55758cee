// id003-rs/id003/src/fsm/state.rs
//! Host-side view of the validator state.

use derive_more::Display;

/// Validator state as tracked by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// Before the first connect, and after a recovered failure.
    Start,
    /// Validator reported power up.
    PowerUp,
    /// Denomination table received.
    Denominations,
    /// Version reply received.
    Version,
    /// Transport open, validator not heard from yet.
    Connected,
    /// Refresh requested; the next connect lands in Disable.
    Refresh,
    /// Validator initializing.
    Initialize,
    /// Idle and accepting bills.
    Enable,
    /// Idle and inhibited.
    Disable,
    /// Bill being pulled in.
    Accepting,
    /// Bill held, waiting for stack or return.
    Escrow,
    /// Bill on its way to the stacker.
    Stacking,
    /// Bill committed; waiting for the ack.
    VendValid,
    /// Bill in the stacker.
    Stacked,
    /// Bill being rejected.
    Rejecting,
    /// Bill being handed back.
    Returning,
    /// Stacker box removed.
    StackerOpen,
    /// Stacker box full.
    StackerFull,
    /// Jam in the acceptor.
    AcceptorJam,
    /// Jam in the stacker.
    StackerJam,
    /// Cheat attempt detected.
    Cheated,
    /// Validator failure.
    Failure,
    /// The transport could not be opened.
    ComError,
    /// Last frame failed to decode.
    BadFrame,
    /// Recycler currency path reply.
    CurrencyPath,
    /// Recycler set count reply.
    SetCount,
    /// Recycler set current count reply.
    SetCurrentCount,
    /// Recycler count reply.
    Count,
    /// Recycler paying out.
    Paying,
    /// Payout held.
    PayStay,
    /// Payout done.
    PayValid,
    /// Validator refused the last command.
    InvalidCommand,
    /// Recycler unit failure.
    RecyclerUnitFailure,
    /// Validator paused; a bill may still be in flight.
    Paused,
}

impl State {
    /// Every state, in declaration order.
    pub const ALL: [State; 34] = [
        State::Start,
        State::PowerUp,
        State::Denominations,
        State::Version,
        State::Connected,
        State::Refresh,
        State::Initialize,
        State::Enable,
        State::Disable,
        State::Accepting,
        State::Escrow,
        State::Stacking,
        State::VendValid,
        State::Stacked,
        State::Rejecting,
        State::Returning,
        State::StackerOpen,
        State::StackerFull,
        State::AcceptorJam,
        State::StackerJam,
        State::Cheated,
        State::Failure,
        State::ComError,
        State::BadFrame,
        State::CurrencyPath,
        State::SetCount,
        State::SetCurrentCount,
        State::Count,
        State::Paying,
        State::PayStay,
        State::PayValid,
        State::InvalidCommand,
        State::RecyclerUnitFailure,
        State::Paused,
    ];

    /// States a bill only passes through. Staying in one of them longer
    /// than the transient timeout means the validator is stuck.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Returning | Self::Stacking | Self::Stacked | Self::Accepting | Self::Rejecting
        )
    }
}
