// id003-rs/id003/src/protocol/commands/extension.rs
//! Parametric recycler commands.

use super::templates::*;
use crate::protocol::checksum::Checksum;
use crate::protocol::frame::seal;

/// Encode a currency path request (extension sub-code 0xD0)
/// Layout: FC 0D F0 20 D0 path1 00 01 path2 00 02 crc(2)
pub fn encode_currency_path<C: Checksum>(path1: u8, path2: u8, checksum: &C) -> Vec<u8> {
    patched(
        CURRENCY_PATH,
        &[(CURRENCY_PATH1_AT, path1), (CURRENCY_PATH2_AT, path2)],
        checksum,
    )
}

/// Encode a payout request (extension sub-code 0x4A)
/// Layout: FC 09 F0 20 4A count box crc(2)
pub fn encode_payout<C: Checksum>(count: u8, box_id: u8, checksum: &C) -> Vec<u8> {
    patched(
        PAYOUT,
        &[(PAYOUT_COUNT_AT, count), (PAYOUT_BOX_AT, box_id)],
        checksum,
    )
}

/// Encode a set count / set current count request (sub-codes 0xD2 / 0xE2)
/// Layout: FC 0A F0 20 sub count 00 box crc(2)
pub fn encode_set_count<C: Checksum>(
    template: &[u8],
    count: u8,
    box_id: u8,
    checksum: &C,
) -> Vec<u8> {
    patched(
        template,
        &[(SET_COUNT_COUNT_AT, count), (SET_COUNT_BOX_AT, box_id)],
        checksum,
    )
}

fn patched<C: Checksum>(template: &[u8], slots: &[(usize, u8)], checksum: &C) -> Vec<u8> {
    let mut buf = template.to_vec();
    for &(at, value) in slots {
        buf[at] = value;
    }
    seal(&mut buf, checksum);
    buf
}
