//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize frame building and session setup so tests
//! across the crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::protocol::checksum::Kermit;
use crate::protocol::commands::Command;
use crate::protocol::frame::Frame;
use crate::session::{Event, SerialConfig, Session, SessionConfig};
use crate::transport::{MockTransport, Transport};
use crate::utils::ms;

/// Encode a validator response frame with the default CRC.
#[doc(hidden)]
pub fn response_frame(opcode: u8, data: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; crate::constants::MIN_FRAME_LEN + data.len()];
    buf[0] = crate::constants::SYNC;
    buf[1] = buf.len() as u8;
    buf[2] = opcode;
    buf[3..3 + data.len()].copy_from_slice(data);
    crate::protocol::frame::seal(&mut buf, &Kermit);
    buf
}

/// Session config used by tests: mock device, USD, given stuck timeout.
#[doc(hidden)]
pub fn test_config(transient_timeout: Duration) -> SessionConfig {
    SessionConfig::new(SerialConfig::new("mock"), "USD", transient_timeout).with_emit_dispatch(false)
}

/// Build and connect a session over `transport`.
#[doc(hidden)]
pub fn connected_session<T: Transport>(
    transport: T,
    now: Instant,
) -> crate::Result<(Session<T>, Receiver<Event>)> {
    let (mut session, rx) = Session::new(test_config(ms(2000)), transport, now);
    session.connect(now)?;
    Ok((session, rx))
}

/// Decode every frame a MockTransport has recorded back into commands,
/// clearing the record.
#[doc(hidden)]
pub fn take_commands(mock: &mut MockTransport) -> Vec<Command> {
    mock.take_sent()
        .iter()
        .filter_map(|b| Frame::decode(b, &Kermit).ok())
        .filter_map(|f| Command::from_frame(&f).ok())
        .collect()
}

/// Tick `session` every `step` from `from` up to and including `until`.
/// Returns the last instant ticked.
#[doc(hidden)]
pub fn run_for<T: Transport>(
    session: &mut Session<T>,
    from: Instant,
    until: Instant,
    step: Duration,
) -> Instant {
    let mut now = from;
    while now + step <= until {
        now += step;
        session.tick(now);
    }
    now
}

/// Names of all events currently queued.
#[doc(hidden)]
pub fn event_names(rx: &Receiver<Event>) -> Vec<&'static str> {
    rx.try_iter().map(|e| e.name()).collect()
}
