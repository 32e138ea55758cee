// id003-rs/id003/src/protocol/responses/setting.rs

use crate::constants::CRC_LEN;
use crate::types::DenominationTable;

/// Decode the denominations reply (0x8A): 4-byte records, see
/// `DenominationTable::parse`.
pub fn decode_denominations(payload: Option<&[u8]>) -> DenominationTable {
    DenominationTable::parse(payload.unwrap_or(&[]))
}

/// Decode the version reply (0x88). The last two data bytes are not part of
/// the printable version string.
pub fn decode_version(payload: Option<&[u8]>) -> String {
    let data = payload.unwrap_or(&[]);
    let text = &data[..data.len().saturating_sub(CRC_LEN)];
    String::from_utf8_lossy(text).into_owned()
}
