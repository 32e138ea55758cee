// id003-rs/id003/src/lib.rs

//! id003
//!
//! Pure Rust protocol engine for JCM ID003 bill validators: frame codec,
//! validator state machine and a session that polls the device and
//! publishes bill events.
#![warn(missing_docs)]

pub mod constants;
#[cfg(feature = "async")]
pub mod driver;
pub mod error;
pub mod fsm;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Error, Result and the wire data types live at the crate root as well.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
