// id003-rs/id003/src/protocol/responses/status.rs

use crate::Result;
use crate::protocol::parser;
use crate::types::{Escrow, Rejection};
use crate::utils::bytes_to_hex;

/// Decode escrow status data (status code 0x13)
/// Layout: escrow_code(1) [+ vendor bytes]
pub fn decode_escrow(payload: Option<&[u8]>) -> Result<Escrow> {
    let data = parser::require_payload(payload, 1)?;
    Ok(Escrow {
        code: data[0],
        hex_code: format!("x{}", bytes_to_hex(data)),
        denomination: None,
    })
}

/// Decode rejecting status data (status code 0x17)
/// Layout: reject_code(1)
pub fn decode_rejecting(payload: Option<&[u8]>) -> Result<Rejection> {
    let code = parser::byte_at(parser::require_payload(payload, 1)?, 0)?;
    Ok(Rejection::from_code(code))
}

/// Decode stacked status data (status code 0x16). Plain validators send no
/// data; recyclers report the path the bill went to.
pub fn decode_stacked(payload: Option<&[u8]>) -> Option<u8> {
    payload.and_then(|d| d.first().copied())
}
