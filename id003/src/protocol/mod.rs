// id003-rs/id003/src/protocol/mod.rs
//! ID003 wire protocol: framing, CRC, commands and responses.

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use checksum::{Checksum, Kermit, crc16};
pub use codec::Codec;
pub use commands::{Command, CommandParams};
pub use frame::Frame;
pub use responses::{Message, Payload, ResponseKind};
