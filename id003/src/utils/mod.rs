//! Small helpers shared across the crate: hex formatting for traces and
//! escrow codes, and the deadline timers the session and FSM run on.

pub mod hex;
pub mod timeout;

pub use hex::{bytes_to_hex, bytes_to_hex_spaced};
pub use timeout::*;
