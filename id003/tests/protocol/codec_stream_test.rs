#[path = "../common/mod.rs"]
mod common;

use id003::protocol::codec::Codec;
use id003::protocol::responses::ResponseKind;
use proptest::prelude::*;

fn stream() -> Vec<u8> {
    let mut bytes = common::fixtures::status(0x11);
    bytes.extend(common::fixtures::escrow(0x63));
    bytes.extend(common::fixtures::denominations_reply());
    bytes
}

fn kinds(out: Vec<id003::Result<id003::protocol::responses::Message>>) -> Vec<ResponseKind> {
    out.into_iter().map(|r| r.expect("frame").kind).collect()
}

#[test]
fn whole_stream_at_once() {
    let mut codec = Codec::new();
    assert_eq!(
        kinds(codec.ingest(&stream())),
        vec![
            ResponseKind::Enable,
            ResponseKind::Escrow,
            ResponseKind::Denominations
        ]
    );
}

#[test]
fn byte_by_byte() {
    let mut codec = Codec::new();
    let mut out = Vec::new();
    for b in stream() {
        out.extend(codec.ingest(&[b]));
    }
    assert_eq!(kinds(out).len(), 3);
    assert_eq!(codec.pending(), 0);
}

proptest! {
    #[test]
    fn arbitrary_chunking_preserves_frames(cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6)) {
        let bytes = stream();
        let mut points: Vec<usize> = cuts.iter().map(|i| i.index(bytes.len())).collect();
        points.sort_unstable();

        let mut codec = Codec::new();
        let mut out = Vec::new();
        let mut start = 0;
        for p in points {
            out.extend(codec.ingest(&bytes[start..p]));
            start = p;
        }
        out.extend(codec.ingest(&bytes[start..]));
        prop_assert_eq!(kinds(out), vec![
            ResponseKind::Enable,
            ResponseKind::Escrow,
            ResponseKind::Denominations
        ]);
    }
}
