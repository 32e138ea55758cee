// id003-rs/id003/src/error.rs
//! Error type shared by the codec, the FSM, the session and transports.

use thiserror::Error;

use crate::fsm::{State, Trigger};

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// No command by that name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A parametric command was built without its parameters.
    #[error("missing parameters for command: {0}")]
    MissingParameters(&'static str),

    /// Frame or payload shorter or longer than it has to be.
    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Length the frame should have had.
        expected: usize,
        /// Length it had.
        actual: usize,
    },

    /// The trailing CRC does not match the frame contents.
    #[error("CRC error: expected {expected:#06x}, got {actual:#06x}")]
    CrcMismatch {
        /// CRC computed over the received bytes.
        expected: u16,
        /// CRC carried by the frame.
        actual: u16,
    },

    /// Anything else wrong with a frame, e.g. a bad sync byte.
    #[error("frame format error: {0}")]
    FrameFormat(String),

    /// Opcode missing from the response table.
    #[error("unknown response code: {0:#04x}")]
    UnknownResponse(u8),

    /// The FSM has no rule for `event` in `state`.
    #[error("event {event} inappropriate in current state {state}")]
    InvalidTransition {
        /// Trigger that was fired.
        event: Trigger,
        /// State the machine was in.
        state: State,
    },

    /// The validator never answered the denomination request.
    #[error("Timeout waiting for denominations")]
    DenominationsTimeout,

    /// Nothing received for longer than the heartbeat timeout.
    #[error("Lost bill validator heartbeat")]
    LostHeartbeat,

    /// A bill sat in a transient state for too long.
    #[error("Bill validator stuck")]
    Stuck,

    /// The transport was used while closed.
    #[error("transport is not open")]
    NotConnected,

    /// A pending operation was abandoned, e.g. a bootstrap cut short
    /// by a refresh.
    #[error("cancelled: {0}")]
    Cancelled(&'static str),

    /// Failure reported by a transport implementation.
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O failure from the host.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // シリアル実装を後から有効化できるように optional dependency にしている
    /// Error from the `serialport` crate.
    #[cfg(feature = "serial")]
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    /// The transport cannot do what was asked, e.g. drive a control line.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// Liveness failures end the session; the caller has to refresh or
    /// reconnect.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DenominationsTimeout | Self::LostHeartbeat | Self::Stuck)
    }

    /// Errors raised while assembling or verifying an inbound frame.
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            Self::CrcMismatch { .. } | Self::InvalidLength { .. } | Self::FrameFormat(_)
        )
    }
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
