// id003-rs/id003/src/constants.rs
//! Common protocol constants used across the crate

/// Every ID003 frame starts with this sync byte.
pub const SYNC: u8 = 0xFC;

/// Sync byte + length byte + opcode.
pub const HEADER_LEN: usize = 3;

/// Trailing CRC-16 (little endian).
pub const CRC_LEN: usize = 2;

/// Minimal ID003 frame length in bytes (header + CRC, no payload)
pub const MIN_FRAME_LEN: usize = HEADER_LEN + CRC_LEN;

/// The length field is a single byte, so this is the longest frame possible.
pub const MAX_FRAME_LEN: usize = 0xFF;

/// Opcode shared by the extension (recycler) commands and their replies.
pub const EXTENSION_OPCODE: u8 = 0xF0;

/// Unit address that follows the extension opcode.
pub const EXTENSION_UNIT: u8 = 0x20;

/// Extension sub-codes, found at payload offset 1 of an extension reply.
pub const SUB_CURRENCY_PATH: u8 = 0xD0;
/// Set the recycler count of a box.
pub const SUB_SET_COUNT: u8 = 0xD2;
/// Read the recycler count.
pub const SUB_COUNT: u8 = 0x92;
/// Read the current recycler count.
pub const SUB_CURRENT_COUNT: u8 = 0xA2;
/// Set the current recycler count.
pub const SUB_SET_CURRENT_COUNT: u8 = 0xE2;
/// Pay bills out of a recycler box.
pub const SUB_PAYOUT: u8 = 0x4A;
/// Emergency stop.
pub const SUB_EMERGENCY: u8 = 0x4D;
