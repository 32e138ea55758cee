#[path = "../common/mod.rs"]
mod common;

use id003::Error;
use id003::protocol::codec::Codec;
use id003::protocol::commands::{Command, CommandParams, templates};

#[test]
fn set_count_matches_capture() {
    let codec = Codec::new();
    let bytes = codec
        .encode_named(
            "setcount",
            Some(CommandParams::Count {
                count: 10,
                box_id: 2,
            }),
        )
        .unwrap();
    assert_eq!(
        bytes,
        common::fixtures::bytes(common::fixtures::SET_COUNT_10_BOX2_HEX)
    );
}

#[test]
fn fixed_commands_are_captured_templates() {
    assert_eq!(
        Command::Status.encode(),
        common::fixtures::bytes(common::fixtures::STATUS_HEX)
    );
    assert_eq!(Command::Inhibit.encode(), templates::INHIBIT);
    assert_eq!(Command::UnInhibit.encode(), templates::UNINHIBIT);
    assert_eq!(Command::Emergency.encode(), templates::EMERGENCY);
}

#[test]
fn payout_slots() {
    let bytes = Command::Payout {
        count: 3,
        box_id: 2,
    }
    .encode();
    assert_eq!(&bytes[..5], &templates::PAYOUT[..5]);
    assert_eq!((bytes[5], bytes[6]), (3, 2));
}

#[test]
fn unknown_and_incomplete_commands() {
    let codec = Codec::new();
    assert!(matches!(
        codec.encode_named("shred", None),
        Err(Error::UnknownCommand(name)) if name == "shred"
    ));
    assert!(matches!(
        codec.encode_named("payout", None),
        Err(Error::MissingParameters("payout"))
    ));
}
