// id003-rs/id003/src/transport/mod.rs
//! Byte transports a session can run over.

pub mod mock;
#[cfg(feature = "serial")]
pub mod serial;
pub mod simulator;
pub mod traits;

pub use mock::MockTransport;
#[cfg(feature = "serial")]
pub use serial::SerialTransport;
pub use simulator::{SimState, Simulator};
pub use traits::Transport;
