use std::time::Instant;

#[path = "sim.rs"]
mod sim;

#[path = "../common/mod.rs"]
mod common;

use id003::prelude::*;

use common::fixtures;
use common::helpers::{enabled_session, events, sent};
use sim::SimRun;

#[test]
fn counts_round_trip_through_simulator() {
    common::helpers::init_logger();
    let mut run = SimRun::ready_and_enabled(1);

    let now = run.now;
    run.session.set_count(5, 1, now);
    match run.run_until(ms(500), |e| matches!(e, Event::PathSetCount(_))) {
        Event::PathSetCount(r) => assert_eq!((r.count, r.box_id), (5, 1)),
        other => panic!("unexpected {:?}", other),
    }
    run.run_to_state(State::Enable, ms(500));

    let now = run.now;
    run.session.set_current_count(10, 2, now);
    match run.run_until(ms(500), |e| matches!(e, Event::PathSetCurrentCount(_))) {
        Event::PathSetCurrentCount(r) => assert_eq!((r.count, r.box_id), (10, 2)),
        other => panic!("unexpected {:?}", other),
    }
    run.run_to_state(State::Enable, ms(500));

    let now = run.now;
    run.session.count(now);
    match run.run_until(ms(500), |e| matches!(e, Event::PathCount(_))) {
        Event::PathCount(r) => assert_eq!((r.path1, r.path2), (5, 10)),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn currency_path_reply() {
    common::helpers::init_logger();
    let mut run = SimRun::ready_and_enabled(1);

    let now = run.now;
    run.session
        .send_named("currencypath", Some(CommandParams::Paths { path1: 3, path2: 4 }), now)
        .unwrap();
    match run.run_until(ms(500), |e| matches!(e, Event::PathCurrency(_))) {
        Event::PathCurrency(r) => {
            assert_eq!(r.status, ReplyStatus::Ok);
            assert_eq!((r.path1, r.path2), (3, 4));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn captured_count_reply() {
    let now = Instant::now();
    let (mut session, rx) = enabled_session(now);
    session.ingest(&fixtures::bytes(fixtures::COUNT_REPLY_HEX), now);

    assert_eq!(session.state(), State::Count);
    assert!(matches!(
        events(&rx).as_slice(),
        [Event::PathCount(PathReply { path1: 5, path2: 10, .. })]
    ));
}

#[test]
fn unknown_sub_code_is_published_raw() {
    let now = Instant::now();
    let (mut session, rx) = enabled_session(now);
    session.ingest(&fixtures::response(0xF0, &[0x20, 0xAA, 0x01, 0x02]), now);

    match events(&rx).as_slice() {
        [Event::Extension { sub_code, data }] => {
            assert_eq!(*sub_code, 0xAA);
            assert_eq!(data, &vec![0x20, 0xAA, 0x01, 0x02]);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(session.state(), State::CurrencyPath);
}

#[test]
fn payout_and_set_count_frames() {
    let now = Instant::now();
    let (mut session, _rx) = enabled_session(now);

    session.set_count(5, 1, now);
    session.set_count(10, 2, now);
    let frames = session.transport_mut().take_sent();
    assert_eq!(
        frames,
        vec![
            fixtures::bytes(fixtures::SET_COUNT_5_BOX1_HEX),
            fixtures::bytes(fixtures::SET_COUNT_10_BOX2_HEX),
        ]
    );

    session.payout(2, 1, now);
    session.emergency(now);
    session.current_count(now);
    assert_eq!(
        sent(&mut session),
        vec![
            Command::Payout { count: 2, box_id: 1 },
            Command::Emergency,
            Command::CurrentCount,
        ]
    );
}

#[test]
fn named_command_errors() {
    let now = Instant::now();
    let (mut session, _rx) = enabled_session(now);

    assert!(matches!(
        session.send_named("setcount", None, now),
        Err(Error::MissingParameters("setcount"))
    ));
    assert!(matches!(
        session.send_named("shred", None, now),
        Err(Error::UnknownCommand(_))
    ));
    assert!(session.transport_mut().take_sent().is_empty());
}
