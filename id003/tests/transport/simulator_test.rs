use id003::prelude::*;
use id003::transport::simulator::SimState;

fn exchange(sim: &mut Simulator, codec: &mut Codec, cmd: Command) -> Vec<Message> {
    sim.send(&codec.encode(&cmd)).unwrap();
    codec
        .ingest(&sim.receive(0).unwrap())
        .into_iter()
        .map(|r| r.unwrap())
        .collect()
}

fn poll(sim: &mut Simulator, codec: &mut Codec) -> ResponseKind {
    let replies = exchange(sim, codec, Command::Status);
    assert_eq!(replies.len(), 1);
    replies[0].kind
}

#[test]
fn closed_simulator_refuses_io() {
    let mut sim = Simulator::new();
    let frame = Codec::new().encode(&Command::Status);
    assert!(matches!(sim.send(&frame), Err(Error::NotConnected)));
    assert!(matches!(sim.receive(0), Err(Error::NotConnected)));
}

#[test]
fn garbage_frames_are_refused() {
    let mut sim = Simulator::new();
    sim.open().unwrap();
    assert!(sim.send(&[0xFC, 0x05, 0x11, 0x00, 0x00]).is_err());
    assert!(sim.received().is_empty());
}

#[test]
fn dwell_holds_each_state() {
    let mut sim = Simulator::new().with_dwell(2);
    let mut codec = Codec::new();
    sim.open().unwrap();

    let replies = exchange(&mut sim, &mut codec, Command::Reset);
    assert_eq!(replies[0].kind, ResponseKind::Ack);

    let seen: Vec<ResponseKind> = (0..4).map(|_| poll(&mut sim, &mut codec)).collect();
    assert_eq!(
        seen,
        vec![
            ResponseKind::Initialize,
            ResponseKind::Initialize,
            ResponseKind::Disable,
            ResponseKind::Disable,
        ]
    );
}

#[test]
fn uninhibit_echoes_and_enables() {
    let mut sim = Simulator::new().with_dwell(0);
    let mut codec = Codec::new();
    sim.open().unwrap();
    exchange(&mut sim, &mut codec, Command::Reset);
    poll(&mut sim, &mut codec);

    let replies = exchange(&mut sim, &mut codec, Command::UnInhibit);
    assert_eq!(replies[0].kind, ResponseKind::Inhibit);
    assert_eq!(replies[0].payload, Payload::Raw(vec![0x00]));
    assert_eq!(sim.state(), SimState::Enable);
    assert_eq!(poll(&mut sim, &mut codec), ResponseKind::Enable);
}

#[test]
fn stacker_open_blocks_reset() {
    let mut sim = Simulator::new().with_dwell(0);
    let mut codec = Codec::new();
    sim.open().unwrap();
    sim.open_stacker();

    exchange(&mut sim, &mut codec, Command::Reset);
    assert_eq!(poll(&mut sim, &mut codec), ResponseKind::StackerOpen);

    sim.close_stacker();
    assert_eq!(sim.state(), SimState::Initialize);
}

#[test]
fn custom_table_and_version() {
    let mut sim = Simulator::new()
        .with_denominations(vec![[0x61, 0x00, 0x05, 0x02]])
        .with_version("ID003-TEST");
    let mut codec = Codec::new();
    sim.open().unwrap();

    match &exchange(&mut sim, &mut codec, Command::Denominations)[0].payload {
        Payload::Denominations(t) => assert_eq!(t.get(0x61), Some(Denomination::new(500))),
        other => panic!("unexpected {:?}", other),
    }
    match &exchange(&mut sim, &mut codec, Command::Version)[0].payload {
        Payload::Version(v) => assert_eq!(v, "ID003-TEST"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn close_drops_unread_replies() {
    let mut sim = Simulator::new();
    let codec = Codec::new();
    sim.open().unwrap();
    sim.send(&codec.encode(&Command::Version)).unwrap();
    sim.close().unwrap();
    sim.open().unwrap();
    assert!(sim.receive(0).unwrap().is_empty());
}
