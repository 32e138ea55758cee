// id003-rs/id003/src/protocol/commands/templates.rs
//! Outbound frame templates. Fixed commands are sent exactly as listed;
//! parametric ones are copied, patched and re-sealed before sending.

/// `status`
pub const STATUS: &[u8] = &[0xFC, 0x05, 0x11, 0x27, 0x56];
/// `denominations`
pub const DENOMINATIONS: &[u8] = &[0xFC, 0x05, 0x8A, 0x7D, 0x7C];
/// `version`
pub const VERSION: &[u8] = &[0xFC, 0x05, 0x88, 0x6F, 0x5F];
/// `reset`
pub const RESET: &[u8] = &[0xFC, 0x05, 0x40, 0x2B, 0x15];
/// `ack`
pub const ACK: &[u8] = &[0xFC, 0x05, 0x50, 0xAA, 0x05];
/// `stack`
pub const STACK: &[u8] = &[0xFC, 0x05, 0x41, 0xA2, 0x04];
/// `reject`
pub const REJECT: &[u8] = &[0xFC, 0x05, 0x43, 0xB0, 0x27];
/// `inhibit`
pub const INHIBIT: &[u8] = &[0xFC, 0x06, 0xC3, 0x01, 0x8D, 0xC7];
/// `unInhibit`
pub const UNINHIBIT: &[u8] = &[0xFC, 0x06, 0xC3, 0x00, 0x04, 0xD6];
/// `count`
pub const COUNT: &[u8] = &[0xFC, 0x07, 0xF0, 0x20, 0x92, 0x2B, 0xA7];
/// `currentcount`
pub const CURRENT_COUNT: &[u8] = &[0xFC, 0x07, 0xF0, 0x20, 0xA2, 0xA8, 0x96];
/// `emergency`
pub const EMERGENCY: &[u8] = &[0xFC, 0x07, 0xF0, 0x20, 0x4D, 0x51, 0x89];

/// `currencypath`, paths 2 and 8.
//                                                       path1             path2             crc
pub const CURRENCY_PATH: &[u8] = &[
    0xFC, 0x0D, 0xF0, 0x20, 0xD0, 0x02, 0x00, 0x01, 0x08, 0x00, 0x02, 0xBA, 0x42,
];
/// `payout`, one bill from box 2.
//                                                 cnt   box   crc
pub const PAYOUT: &[u8] = &[0xFC, 0x09, 0xF0, 0x20, 0x4A, 0x01, 0x02, 0x8B, 0x5C];
/// `setcount`, 50 bills in box 1.
//                                                   cnt         box   crc
pub const SET_COUNT: &[u8] = &[0xFC, 0x0A, 0xF0, 0x20, 0xD2, 0x32, 0x00, 0x01, 0x0D, 0xD2];
/// `setcurrentcount`, two bills in box 1. Same slots as `SET_COUNT`.
pub const SET_CURRENT_COUNT: &[u8] = &[0xFC, 0x0A, 0xF0, 0x20, 0xE2, 0x02, 0x00, 0x01, 0x51, 0x18];

// Byte offsets of the parameter slots inside the frames above.

/// `path1` slot in `CURRENCY_PATH`.
pub const CURRENCY_PATH1_AT: usize = 5;
/// `path2` slot in `CURRENCY_PATH`.
pub const CURRENCY_PATH2_AT: usize = 8;
/// Count slot in `PAYOUT`.
pub const PAYOUT_COUNT_AT: usize = 5;
/// Box slot in `PAYOUT`.
pub const PAYOUT_BOX_AT: usize = 6;
/// Count slot in `SET_COUNT` and `SET_CURRENT_COUNT`.
pub const SET_COUNT_COUNT_AT: usize = 5;
/// Box slot in `SET_COUNT` and `SET_CURRENT_COUNT`.
pub const SET_COUNT_BOX_AT: usize = 7;
