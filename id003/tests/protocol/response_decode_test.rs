#[path = "../common/mod.rs"]
mod common;

use id003::protocol::codec::Codec;
use id003::protocol::responses::{Payload, ResponseKind};
use id003::types::{Denomination, RejectionReason};

fn decode_one(bytes: &[u8]) -> id003::protocol::responses::Message {
    Codec::new().decode_frame(bytes).expect("decode")
}

#[test]
fn count_reply_overrides_event() {
    let msg = decode_one(&common::fixtures::bytes(
        common::fixtures::COUNT_REPLY_HEX,
    ));
    assert_eq!(msg.kind, ResponseKind::Count);
    assert_eq!(msg.name(), "count");
    match msg.payload {
        Payload::Count(r) => assert_eq!((r.path1, r.path2), (5, 10)),
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn denominations_reply() {
    let msg = decode_one(&common::fixtures::denominations_reply());
    match msg.payload {
        Payload::Denominations(t) => {
            assert_eq!(t.len(), 4);
            assert_eq!(t.get(0x65), Some(Denomination::new(20)));
            assert_eq!(t.highest_not_exceeding(15), Some(Denomination::new(10)));
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn rejecting_reply() {
    let msg = decode_one(&common::fixtures::rejecting(0x7E));
    match msg.payload {
        Payload::Rejection(r) => assert_eq!(r.reason, Some(RejectionReason::PhotoPattern)),
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn truncated_escrow_is_frame_error() {
    let err = Codec::new()
        .decode_frame(&common::fixtures::status(0x13))
        .unwrap_err();
    assert!(err.is_frame_error());
}
