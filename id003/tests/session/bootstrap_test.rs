use std::time::Instant;

#[path = "sim.rs"]
mod sim;

#[path = "../common/mod.rs"]
mod common;

use id003::prelude::*;
use id003::test_support::{connected_session, run_for, take_commands};

use sim::SimRun;

#[test]
fn simulator_bootstrap_reaches_standby() {
    common::helpers::init_logger();
    let mut run = SimRun::connect(1);

    let connected = run.run_until(ms(2000), |e| matches!(e, Event::Connected(_)));
    assert!(matches!(connected, Event::Connected(Ok(()))));

    assert_eq!(run.names(), vec!["standby", "connected"]);
    assert_eq!(run.session.state(), State::Disable);
    assert_eq!(run.session.version(), Some("i(USA)100-SS ID003-05V200-34"));
    assert_eq!(run.session.denominations().map(|t| t.len()), Some(4));
    assert_eq!(run.session.lowest_bill(), Some(Denomination::new(1)));
    assert_eq!(run.session.highest_bill(15), Some(Denomination::new(10)));
    assert!(!run.session.is_bootstrapping());

    let received = run.sim().received().to_vec();
    assert_eq!(
        &received[..3],
        &[Command::Version, Command::Denominations, Command::Reset]
    );
}

#[test]
fn silent_validator_times_out_once() {
    common::helpers::init_logger();
    let mut sim = Simulator::new();
    sim.set_silent(true);
    let mut run = SimRun::with_simulator(sim);

    run.run(ms(7000));
    assert_eq!(
        run.count(|e| matches!(e, Event::Connected(Err(Error::DenominationsTimeout)))),
        1
    );
    assert_eq!(run.count(|e| matches!(e, Event::Connected(Ok(())))), 0);
    assert!(!run.session.has_denominations());
    assert_eq!(run.session.state(), State::Connected);
    // polling carries on after the timeout
    assert!(run.session.is_polling());
}

#[test]
fn open_failure_is_reported_at_once() {
    common::helpers::init_logger();
    let now = Instant::now();
    let mut mock = MockTransport::new();
    mock.fail_open("no such device");

    let err = connected_session(mock, now).err().expect("open must fail");
    assert!(matches!(err, Error::Transport(ref m) if m == "no such device"));
}

#[test]
fn open_failure_leaves_session_in_comerror() {
    common::helpers::init_logger();
    let now = Instant::now();
    let mut mock = MockTransport::new();
    mock.fail_open("busy");
    let (mut session, rx) =
        Session::new(id003::test_support::test_config(ms(2000)), mock, now);

    assert!(session.connect(now).is_err());
    assert_eq!(session.state(), State::ComError);
    assert_eq!(session.com_error(), Some("transport error: busy"));
    assert!(!session.is_polling());

    run_for(&mut session, now, now + ms(1000), ms(10));
    assert!(rx.try_iter().next().is_none());
}

#[test]
fn refresh_cancels_pending_bootstrap_and_starts_over() {
    common::helpers::init_logger();
    let mut run = SimRun::connect(1);
    let now = run.now;
    run.session.refresh(now).expect("refresh");
    run.seen.extend(run.rx.try_iter());

    assert!(matches!(
        run.seen.as_slice(),
        [Event::Connected(Err(Error::Cancelled("refresh")))]
    ));
    assert_eq!(run.session.state(), State::Disable);

    let connected = run.run_until(ms(2000), |e| matches!(e, Event::Connected(Ok(()))));
    assert!(matches!(connected, Event::Connected(Ok(()))));
    assert!(run.session.has_denominations());
}

#[test]
fn refresh_asks_for_denominations_again() {
    common::helpers::init_logger();
    let now = Instant::now();
    let (mut session, _rx) = connected_session(MockTransport::new(), now).unwrap();
    session.ingest(&common::fixtures::denominations_reply(), now);
    assert!(session.has_denominations());
    take_commands(session.transport_mut());

    session.refresh(now).unwrap();

    assert!(!session.has_denominations());
    assert_eq!(session.version(), None);
    assert_eq!(session.transport().close_calls, 1);
    assert_eq!(
        take_commands(session.transport_mut()),
        vec![Command::Version, Command::Denominations]
    );
}

#[test]
fn denomination_table_is_kept_from_first_reply() {
    common::helpers::init_logger();
    let now = Instant::now();
    let (mut session, _rx) = common::helpers::enabled_session(now);

    let other = common::fixtures::response(0x8A, &[0x61, 0x00, 0x05, 0x02]);
    session.ingest(&other, now);

    assert_eq!(session.denominations().map(|t| t.len()), Some(4));
    assert_eq!(session.lowest_bill(), Some(Denomination::new(1)));
}
