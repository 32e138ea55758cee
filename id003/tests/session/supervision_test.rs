use std::time::Instant;

#[path = "sim.rs"]
mod sim;

#[path = "../common/mod.rs"]
mod common;

use id003::prelude::*;
use id003::test_support::run_for;

use common::helpers::{enabled_session, events};
use sim::SimRun;

fn is_stuck(e: &Event) -> bool {
    matches!(e, Event::Error(Error::Stuck))
}

fn is_lost_heartbeat(e: &Event) -> bool {
    matches!(e, Event::Error(Error::LostHeartbeat))
}

#[test]
fn frozen_validator_is_reported_stuck_once() {
    common::helpers::init_logger();
    let mut run = SimRun::ready_and_enabled(1);
    run.sim().insert(0x61);
    run.run_to_state(State::Accepting, ms(1000));
    run.sim().freeze(true);

    run.run(ms(6000));
    assert_eq!(run.count(is_stuck), 1);
    assert_eq!(run.session.state(), State::Accepting);
    assert!(run.seen.iter().find(|e| is_stuck(e)).is_some_and(Event::is_fatal));
}

#[test]
fn normal_cycle_is_never_stuck() {
    common::helpers::init_logger();
    let mut run = SimRun::ready_and_enabled(3);
    run.sim().insert(0x63);
    run.run_until(ms(3000), |e| matches!(e, Event::BillRead { .. }));
    let now = run.now;
    run.session.stack(now);
    run.run_until(ms(5000), |e| matches!(e, Event::BillStacked { .. }));
    run.run(ms(3000));

    assert_eq!(run.count(is_stuck), 0);
}

#[test]
fn heartbeat_holds_while_validator_answers() {
    common::helpers::init_logger();
    let mut run = SimRun::ready_and_enabled(1);
    let now = run.now;
    run.session.monitor_heartbeat(now);

    run.run(ms(5000));
    assert_eq!(run.count(is_lost_heartbeat), 0);
    assert!(run.session.is_monitoring_heartbeat());
}

#[test]
fn silent_validator_loses_heartbeat_once() {
    common::helpers::init_logger();
    let mut run = SimRun::ready_and_enabled(1);
    let now = run.now;
    run.session.monitor_heartbeat(now);
    run.sim().set_silent(true);

    run.run(ms(5000));
    assert_eq!(run.count(is_lost_heartbeat), 1);
    assert!(!run.session.is_monitoring_heartbeat());
}

#[test]
fn stopped_heartbeat_never_fires() {
    common::helpers::init_logger();
    let mut run = SimRun::ready_and_enabled(1);
    let now = run.now;
    run.session.monitor_heartbeat(now);
    run.session.stop_heartbeat();
    run.sim().set_silent(true);

    run.run(ms(3000));
    assert_eq!(run.count(is_lost_heartbeat), 0);
}

#[test]
fn read_failures_are_throttled_to_two_reports() {
    let t0 = Instant::now();
    let (mut session, rx) = enabled_session(t0);
    session.transport_mut().set_receive_failures(50);

    // 50 failing reads within the first half second
    let t = run_for(&mut session, t0, t0 + ms(500), ms(10));
    let first = events(&rx);
    assert_eq!(first.iter().filter(|e| e.name() == "error").count(), 1);

    run_for(&mut session, t, t0 + ms(5000), ms(10));
    let rest: Vec<Event> = events(&rx)
        .into_iter()
        .filter(|e| matches!(e, Event::Error(Error::Transport(_))))
        .collect();
    assert_eq!(rest.len(), 1);
    assert!(!rest[0].is_fatal());
}

#[test]
fn light_follows_commands() {
    common::helpers::init_logger();
    let mut run = SimRun::connect(1);
    assert!(!run.sim().light());

    let now = run.now;
    run.session.light_on(now);
    assert!(run.sim().light());
    run.session.light_off(now);
    assert!(!run.sim().light());
}

#[test]
fn close_stops_everything_but_heartbeat() {
    common::helpers::init_logger();
    let mut run = SimRun::connect(1);
    let now = run.now;
    run.session.monitor_heartbeat(now);
    run.session.close(now).unwrap();

    assert!(!run.session.is_polling());
    assert!(!run.session.is_bootstrapping());
    assert!(!run.session.transport().is_open());
    assert!(run.session.is_monitoring_heartbeat());

    run.run(ms(2000));
    assert_eq!(run.count(is_lost_heartbeat), 1);
    assert_eq!(run.count(|e| matches!(e, Event::Connected(_))), 0);
}

#[test]
fn next_deadline_tracks_poll_timer() {
    let t0 = Instant::now();
    let (session, _rx) = enabled_session(t0);
    let next = session.next_deadline().expect("polling");
    assert!(next <= t0 + session.config().poll_interval);
}
