// id003-rs/id003/src/session/mod.rs

//! Session orchestration: owns the transport, codec and FSM, runs the
//! timers and publishes events.
//!
//! Nothing here blocks or spawns. The owner calls `tick(now)` often (every
//! few milliseconds) and reads events from the channel returned by
//! `Session::new`.

pub mod config;
pub mod event;
/// Error rate limiting.
pub mod throttle;

use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Instant;

use log::{debug, info, trace, warn};

pub use config::{Parity, SerialConfig, SessionConfig};
pub use event::Event;
pub use throttle::Throttle;

use crate::fsm::{Machine, Signal, State, Trigger};
use crate::protocol::codec::Codec;
use crate::protocol::commands::{Command, CommandParams};
use crate::protocol::responses::{Message, Payload};
use crate::transport::Transport;
use crate::types::{Denomination, DenominationTable};
use crate::utils::timeout::{Timer, earliest};
use crate::{Error, Result};

/// Denomination bootstrap started by `connect`.
#[derive(Debug, Clone, Copy)]
struct Bootstrap {
    started: Instant,
    check: Timer,
}

/// A bill validator session over transport `T`.
pub struct Session<T: Transport> {
    config: SessionConfig,
    transport: T,
    codec: Codec,
    fsm: Machine,
    events: Sender<Event>,
    denominations: Option<DenominationTable>,
    version: Option<String>,
    last_received: Instant,
    com_error: Option<String>,
    bad_frames: u64,
    poll: Option<Timer>,
    bootstrap: Option<Bootstrap>,
    heartbeat: Option<Timer>,
    errors: Throttle<Error>,
}

impl<T: Transport> Session<T> {
    /// Build a session and the receiving end of its event channel.
    pub fn new(config: SessionConfig, transport: T, now: Instant) -> (Self, Receiver<Event>) {
        let (tx, rx) = channel();
        let session = Self {
            fsm: Machine::new(config.transient_timeout),
            errors: Throttle::new(config.error_throttle),
            config,
            transport,
            codec: Codec::new(),
            events: tx,
            denominations: None,
            version: None,
            last_received: now,
            com_error: None,
            bad_frames: 0,
            poll: None,
            bootstrap: None,
            heartbeat: None,
        };
        (session, rx)
    }

    /// Open the transport and start polling. Fails at once when the
    /// transport cannot be opened; the denomination bootstrap outcome is
    /// published later as `Event::Connected`.
    pub fn connect(&mut self, now: Instant) -> Result<()> {
        if let Err(e) = self.transport.open() {
            warn!("session: open failed: {}", e);
            self.com_error = Some(e.to_string());
            if let Err(err) = self.fsm.fire(Trigger::CommError, now) {
                debug!("session: {}", err);
            }
            return Err(e);
        }
        info!("session: transport open ({})", self.config.serial.device);
        self.com_error = None;
        self.last_received = now;
        self.set_light(false, now);

        self.poll = Some(Timer::every(now, self.config.poll_interval));
        let refreshing = self.fsm.is(State::Refresh);
        if let Err(e) = self.fsm.fire(Trigger::Connect, now) {
            debug!("session: {}", e);
        }
        self.process_signals(now);

        self.send(Command::Version, now);
        if refreshing {
            // Refresh goes straight to Disable and never leaves Connected,
            // so nothing else asks for the table.
            self.send(Command::Denominations, now);
        }

        self.bootstrap = Some(Bootstrap {
            started: now,
            check: Timer::every(now, self.config.denomination_check),
        });
        Ok(())
    }

    /// Read pending bytes, react to them, then fire due timers.
    pub fn tick(&mut self, now: Instant) {
        if self.transport.is_open() {
            match self.transport.receive(0) {
                Ok(bytes) if !bytes.is_empty() => self.ingest(&bytes, now),
                Ok(_) => {}
                Err(e) => self.report_transport_error(e, now),
            }
        }

        self.fsm.poll(now);
        self.process_signals(now);

        if self.poll.as_mut().is_some_and(|t| t.fire(now)) {
            self.send(Command::Status, now);
        }

        self.check_bootstrap(now);
        self.check_heartbeat(now);

        if let Some(e) = self.errors.flush(now) {
            self.publish(Event::Error(e));
        }
    }

    /// Feed raw received bytes, as `tick` does with whatever the transport
    /// returned.
    pub fn ingest(&mut self, bytes: &[u8], now: Instant) {
        for outcome in self.codec.ingest(bytes) {
            match outcome {
                Ok(msg) => self.handle_message(msg, now),
                Err(Error::UnknownResponse(code)) => {
                    warn!("session: unknown response code {:#04x}", code);
                    self.publish(Event::UnknownResponse(code));
                }
                Err(e) => {
                    self.bad_frames += 1;
                    warn!("session: bad frame ({}): {}", self.bad_frames, e);
                    if let Err(err) = self.fsm.fire(Trigger::BadFrame, now) {
                        debug!("session: {}", err);
                    }
                    self.process_signals(now);
                }
            }
        }
    }

    fn handle_message(&mut self, mut msg: Message, now: Instant) {
        self.last_received = now;
        trace!("session: {} in {}", msg.name(), self.fsm.state());

        match &mut msg.payload {
            Payload::Denominations(table) => {
                if self.denominations.is_none() {
                    info!("session: {} denominations", table.len());
                    self.denominations = Some(std::mem::take(table));
                }
            }
            Payload::Version(v) => {
                if self.version.is_none() {
                    info!("session: validator version {}", v);
                    self.version = Some(v.clone());
                }
            }
            Payload::Escrow(escrow) => {
                escrow.denomination = self
                    .denominations
                    .as_ref()
                    .and_then(|t| t.get(escrow.code));
            }
            _ => {}
        }

        let Some(trigger) = msg.kind.trigger() else {
            return;
        };
        // InvalidTransition is logged by the machine; the state is held.
        let _ = self.fsm.transition(trigger, &msg.payload, now);
        self.process_signals(now);
    }

    fn process_signals(&mut self, now: Instant) {
        for signal in self.fsm.take_signals() {
            match signal {
                Signal::PowerUp | Signal::Ready => self.send(Command::Denominations, now),
                Signal::Denominations => self.send(Command::Reset, now),
                Signal::Version(v) => debug!("session: version {}", v),
                Signal::Dispatch(cmd) => {
                    debug!("session: dispatch {}", cmd);
                    self.send(cmd, now);
                }
                Signal::BillRead(escrow) => match escrow.denomination {
                    Some(denomination) => self.publish(Event::BillRead {
                        denomination,
                        code: escrow.code,
                        hex_code: escrow.hex_code,
                    }),
                    None => {
                        warn!(
                            "session: bill rejected: unsupported denomination. Code: {:#04x}",
                            escrow.code
                        );
                        self.send(Command::Reject, now);
                    }
                },
                Signal::Stuck => self.publish(Event::Error(Error::Stuck)),
                Signal::Standby => self.publish(Event::Standby),
                Signal::BillAccepted => self.publish(Event::BillAccepted),
                Signal::BillRejected(r) => self.publish(Event::BillRejected(r)),
                Signal::BillStacked { path } => self.publish(Event::BillStacked { path }),
                Signal::BillValid => self.publish(Event::BillValid),
                Signal::PathCurrency(r) => self.publish(Event::PathCurrency(r)),
                Signal::PathSetCount(r) => self.publish(Event::PathSetCount(r)),
                Signal::PathSetCurrentCount(r) => self.publish(Event::PathSetCurrentCount(r)),
                Signal::PathCount(r) => self.publish(Event::PathCount(r)),
                Signal::Extension { sub_code, data } => {
                    self.publish(Event::Extension { sub_code, data })
                }
                Signal::StackerOpen => self.publish(Event::StackerOpen),
                Signal::StackerFull => self.publish(Event::StackerFull),
                Signal::AcceptorJam => self.publish(Event::AcceptorJam),
                Signal::StackerJam => self.publish(Event::StackerJam),
                Signal::Cheated => self.publish(Event::Cheated),
                Signal::OnPayStay => self.publish(Event::OnPayStay),
                Signal::OnPayValid => self.publish(Event::OnPayValid),
            }
        }
    }

    fn check_bootstrap(&mut self, now: Instant) {
        let Some(bootstrap) = self.bootstrap.as_mut() else {
            return;
        };
        if !bootstrap.check.fire(now) {
            return;
        }

        if self.denominations.is_some() {
            self.bootstrap = None;
            info!("session: ready");
            self.publish(Event::Connected(Ok(())));
        } else if now.duration_since(bootstrap.started) > self.config.denomination_timeout {
            self.bootstrap = None;
            warn!("session: {}", Error::DenominationsTimeout);
            self.publish(Event::Connected(Err(Error::DenominationsTimeout)));
        }
    }

    fn check_heartbeat(&mut self, now: Instant) {
        if !self.heartbeat.as_mut().is_some_and(|t| t.fire(now)) {
            return;
        }
        if now.duration_since(self.last_received) > self.config.heartbeat_timeout {
            self.heartbeat = None;
            warn!("session: {}", Error::LostHeartbeat);
            self.publish(Event::Error(Error::LostHeartbeat));
        }
    }

    fn send(&mut self, cmd: Command, now: Instant) {
        let bytes = self.codec.encode(&cmd);
        if self.config.emit_dispatch {
            self.publish(Event::Dispatch(cmd));
        }
        if let Err(e) = self.transport.send(&bytes) {
            self.report_transport_error(e, now);
        }
    }

    fn report_transport_error(&mut self, e: Error, now: Instant) {
        warn!("session: transport error: {}", e);
        if let Some(e) = self.errors.offer(e, now) {
            self.publish(Event::Error(e));
        }
    }

    fn publish(&self, event: Event) {
        trace!("session: event {}", event.name());
        if self.events.send(event).is_err() {
            trace!("session: event receiver dropped");
        }
    }

    fn set_light(&mut self, on: bool, now: Instant) {
        if !self.transport.supports_control_line() {
            debug!("session: transport has no light control");
            return;
        }
        if let Err(e) = self.transport.set_control_line(on) {
            self.report_transport_error(e, now);
        }
    }

    /// Stop polling, drop the bootstrap and close the transport.
    pub fn close(&mut self, _now: Instant) -> Result<()> {
        self.poll = None;
        self.bootstrap = None;
        self.codec.reset();
        self.transport.close()
    }

    /// Rebuild the FSM, close and reopen the transport and bootstrap the
    /// denomination table again.
    pub fn refresh(&mut self, now: Instant) -> Result<()> {
        info!("session: refresh");
        if self.bootstrap.take().is_some() {
            self.publish(Event::Connected(Err(Error::Cancelled("refresh"))));
        }
        self.fsm.cancel_timers();
        self.fsm = Machine::new(self.config.transient_timeout);
        if let Err(e) = self.fsm.fire(Trigger::Refresh, now) {
            debug!("session: {}", e);
        }

        if let Err(e) = self.close(now) {
            warn!("session: close during refresh: {}", e);
        }
        self.denominations = None;
        self.version = None;
        self.connect(now)
    }

    /// Start checking for a lost heartbeat.
    pub fn monitor_heartbeat(&mut self, now: Instant) {
        self.last_received = now;
        self.heartbeat = Some(Timer::every(now, self.config.heartbeat_check));
    }

    /// Stop the heartbeat check.
    pub fn stop_heartbeat(&mut self) {
        self.heartbeat = None;
    }

    /// Accept bills.
    pub fn enable(&mut self, now: Instant) {
        self.send(Command::UnInhibit, now);
    }

    /// Inhibit acceptance. Outside Enable the inhibit is deferred until the
    /// validator gets back there.
    pub fn disable(&mut self, now: Instant) {
        match self.fsm.state() {
            State::Disable => {}
            State::Enable => self.send(Command::Inhibit, now),
            other => {
                debug!("session: deferring disable in {}", other);
                self.fsm.set_disable_flag();
            }
        }
    }

    /// Stack the bill in escrow.
    pub fn stack(&mut self, now: Instant) {
        self.send(Command::Stack, now);
    }

    /// Return the bill in escrow.
    pub fn reject(&mut self, now: Instant) {
        self.send(Command::Reject, now);
    }

    /// Reset the validator.
    pub fn reset(&mut self, now: Instant) {
        self.send(Command::Reset, now);
    }

    /// Return the bill to the stacker.
    pub fn emergency(&mut self, now: Instant) {
        self.send(Command::Emergency, now);
    }

    /// Ask the recycler for its counts.
    pub fn count(&mut self, now: Instant) {
        self.send(Command::Count, now);
    }

    /// Ask the recycler for its current counts.
    pub fn current_count(&mut self, now: Instant) {
        self.send(Command::CurrentCount, now);
    }

    /// Select the recycler currency paths.
    pub fn currency_path(&mut self, path1: u8, path2: u8, now: Instant) {
        self.send(Command::CurrencyPath { path1, path2 }, now);
    }

    /// Maximum bill count for a box.
    pub fn set_count(&mut self, count: u8, box_id: u8, now: Instant) {
        self.send(Command::SetCount { count, box_id }, now);
    }

    /// Bills currently in a box.
    pub fn set_current_count(&mut self, count: u8, box_id: u8, now: Instant) {
        self.send(Command::SetCurrentCount { count, box_id }, now);
    }

    /// Pay `count` bills out of box `box_id`.
    pub fn payout(&mut self, count: u8, box_id: u8, now: Instant) {
        self.send(Command::Payout { count, box_id }, now);
    }

    /// Send a command by wire name. Unknown names fail immediately.
    pub fn send_named(
        &mut self,
        name: &str,
        params: Option<CommandParams>,
        now: Instant,
    ) -> Result<()> {
        let cmd = Command::from_name(name, params)?;
        self.send(cmd, now);
        Ok(())
    }

    /// Bezel light on. Needs a transport that drives a control line.
    pub fn light_on(&mut self, now: Instant) {
        self.set_light(true, now);
    }

    /// Bezel light off.
    pub fn light_off(&mut self, now: Instant) {
        self.set_light(false, now);
    }

    /// Current FSM state.
    pub fn state(&self) -> State {
        self.fsm.state()
    }

    /// Whether the stacker box is removed.
    pub fn is_cashbox_out(&self) -> bool {
        self.fsm.is(State::StackerOpen)
    }

    /// Whether the denomination table has arrived.
    pub fn has_denominations(&self) -> bool {
        self.denominations.is_some()
    }

    /// The denomination table, once received.
    pub fn denominations(&self) -> Option<&DenominationTable> {
        self.denominations.as_ref()
    }

    /// Smallest bill the validator knows.
    pub fn lowest_bill(&self) -> Option<Denomination> {
        self.denominations.as_ref().and_then(|t| t.lowest())
    }

    /// Largest bill not above `fiat`.
    pub fn highest_bill(&self, fiat: u32) -> Option<Denomination> {
        self.denominations
            .as_ref()
            .and_then(|t| t.highest_not_exceeding(fiat))
    }

    /// Software version reported by the validator.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Frames that failed to decode since the session was created.
    pub fn bad_frames(&self) -> u64 {
        self.bad_frames
    }

    /// Last transport open failure, if the most recent connect failed.
    pub fn com_error(&self) -> Option<&str> {
        self.com_error.as_deref()
    }

    /// Whether connect is still waiting for denominations.
    pub fn is_bootstrapping(&self) -> bool {
        self.bootstrap.is_some()
    }

    /// Whether the heartbeat check runs.
    pub fn is_monitoring_heartbeat(&self) -> bool {
        self.heartbeat.is_some()
    }

    /// Whether status polls go out.
    pub fn is_polling(&self) -> bool {
        self.poll.is_some()
    }

    /// Earliest instant at which `tick` has timer work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.fsm.next_deadline(),
            self.poll.map(|t| t.deadline()),
            self.bootstrap.map(|b| b.check.deadline()),
            self.heartbeat.map(|t| t.deadline()),
            self.errors.next_deadline(),
        ])
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The transport, mutably. Tests use it to drive mocks and simulators.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
