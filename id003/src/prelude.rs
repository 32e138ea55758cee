// id003-rs/id003/src/prelude.rs
//! Everything a session owner usually needs, in one import.

pub use crate::fsm::{Machine, Signal, State, Trigger};
pub use crate::protocol::{Codec, Command, CommandParams, Message, Payload, ResponseKind};
pub use crate::session::{Event, SerialConfig, Session, SessionConfig};
pub use crate::transport::{MockTransport, Simulator, Transport};
pub use crate::{
    CountReply, Denomination, DenominationTable, Error, Escrow, PathReply, Rejection,
    RejectionReason, ReplyStatus, Result,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
