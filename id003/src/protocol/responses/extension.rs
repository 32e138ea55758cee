// id003-rs/id003/src/protocol/responses/extension.rs

use super::Payload;
use crate::Result;
use crate::constants::*;
use crate::protocol::parser;
use crate::types::{CountReply, PathReply, ReplyStatus};

/// Decode an extension reply (opcode 0xF0). The currency path, set count,
/// set current count and count requests all answer on this opcode; the
/// sub-code at data offset 1 tells them apart.
///
/// Layouts (data bytes, after the opcode):
/// - currency path:   20 D0 path1 00 01 path2 00 02
/// - set count:       20 D2 count 00 box
/// - set current cnt: 20 E2 count 00 box
/// - count:           20 92 path1 00 path2 00
pub fn decode_extension(payload: Option<&[u8]>) -> Result<Payload> {
    let data = parser::require_payload(payload, 2)?;
    let payload = match data[1] {
        SUB_CURRENCY_PATH => Payload::CurrencyPath(PathReply {
            status: ReplyStatus::Ok,
            path1: parser::byte_at(data, 2)?,
            path2: parser::byte_at(data, 5)?,
        }),
        SUB_SET_COUNT => Payload::SetCount(count_reply(data)?),
        SUB_SET_CURRENT_COUNT => Payload::SetCurrentCount(count_reply(data)?),
        SUB_COUNT => Payload::Count(PathReply {
            status: ReplyStatus::Ok,
            path1: parser::byte_at(data, 2)?,
            path2: parser::byte_at(data, 4)?,
        }),
        sub_code => Payload::Extension {
            sub_code,
            data: data.to_vec(),
        },
    };
    Ok(payload)
}

fn count_reply(data: &[u8]) -> Result<CountReply> {
    Ok(CountReply {
        status: ReplyStatus::Ok,
        count: parser::byte_at(data, 2)?,
        box_id: parser::byte_at(data, 4)?,
    })
}
