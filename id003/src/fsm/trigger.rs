// id003-rs/id003/src/fsm/trigger.rs
//! Events fed to the state machine.

use derive_more::Display;

/// FSM event. Most are named after the validator response that raises
/// them; `start`, `connect`, `refresh`, `commerror` and `badFrame` come from
/// the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// Recover from Failure.
    #[display(fmt = "start")]
    Start,
    /// A frame failed to decode.
    #[display(fmt = "badFrame")]
    BadFrame,
    /// Opening the transport failed.
    #[display(fmt = "commerror")]
    CommError,
    /// Transport opened.
    #[display(fmt = "connect")]
    Connect,
    /// Refresh requested before reconnecting.
    #[display(fmt = "refresh")]
    Refresh,
    /// Power up status.
    #[display(fmt = "powerUp")]
    PowerUp,
    /// Power up with a bill in the acceptor.
    #[display(fmt = "powerUpAcceptor")]
    PowerUpAcceptor,
    /// Power up with a bill in the stacker.
    #[display(fmt = "powerUpStacker")]
    PowerUpStacker,
    /// Denomination table reply.
    #[display(fmt = "denominations")]
    Denominations,
    /// Version reply.
    #[display(fmt = "version")]
    Version,
    /// Currency path reply.
    #[display(fmt = "currencypath")]
    CurrencyPath,
    /// Set count reply.
    #[display(fmt = "setcount")]
    SetCount,
    /// Set current count reply.
    #[display(fmt = "setcurrentcount")]
    SetCurrentCount,
    /// Count reply.
    #[display(fmt = "count")]
    Count,
    /// Paying status.
    #[display(fmt = "paying")]
    Paying,
    /// Pay stay status.
    #[display(fmt = "paystay")]
    PayStay,
    /// Pay valid status.
    #[display(fmt = "payvalid")]
    PayValid,
    /// Invalid command reply.
    #[display(fmt = "invalidcommand")]
    InvalidCommand,
    /// Recycler unit failure status.
    #[display(fmt = "recyclerunitfailure")]
    RecyclerUnitFailure,
    /// Initializing status.
    #[display(fmt = "initialize")]
    Initialize,
    /// Enabled (idle) status.
    #[display(fmt = "enable")]
    Enable,
    /// Disabled (inhibit) status.
    #[display(fmt = "disable")]
    Disable,
    /// Escrow status carrying the bill code.
    #[display(fmt = "escrow")]
    Escrow,
    /// Returning status.
    #[display(fmt = "returning")]
    Returning,
    /// Stacking status.
    #[display(fmt = "stacking")]
    Stacking,
    /// Vend valid status.
    #[display(fmt = "vendValid")]
    VendValid,
    /// Stacked status.
    #[display(fmt = "stacked")]
    Stacked,
    /// Rejecting status carrying the reason code.
    #[display(fmt = "rejecting")]
    Rejecting,
    /// Stacker open status.
    #[display(fmt = "stackerOpen")]
    StackerOpen,
    /// Stacker full status.
    #[display(fmt = "stackerFull")]
    StackerFull,
    /// Accepting status.
    #[display(fmt = "accepting")]
    Accepting,
    /// Failure status.
    #[display(fmt = "failure")]
    Failure,
    /// Acceptor jam status.
    #[display(fmt = "acceptorJam")]
    AcceptorJam,
    /// Stacker jam status.
    #[display(fmt = "stackerJam")]
    StackerJam,
    /// Cheated status.
    #[display(fmt = "cheated")]
    Cheated,
    /// Pause status.
    #[display(fmt = "pause")]
    Pause,
    /// No rule; always rejected.
    #[display(fmt = "collected")]
    Collected,
    /// No rule; always rejected.
    #[display(fmt = "returningtobox")]
    ReturningToBox,
}
