// id003-rs/id003/src/fsm/machine.rs
//! State machine with entry, exit and per-state hooks.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use super::rules;
use super::signal::Signal;
use super::state::State;
use super::trigger::Trigger;
use crate::protocol::commands::Command;
use crate::protocol::responses::Payload;
use crate::types::Rejection;
use crate::utils::timeout::{Timer, fire_once};
use crate::{Error, Result};

/// Table-driven validator state machine.
///
/// Hooks never talk to the transport. They queue `Signal`s that the owner
/// drains with `take_signals` after each call.
#[derive(Debug)]
pub struct Machine {
    state: State,
    disable_flag: bool,
    transient_timeout: Duration,
    stuck: Option<Timer>,
    outbox: VecDeque<Signal>,
}

impl Machine {
    /// New machine in the Start state.
    pub fn new(transient_timeout: Duration) -> Self {
        Self {
            state: State::Start,
            disable_flag: false,
            transient_timeout,
            stuck: None,
            outbox: VecDeque::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Shorthand for `self.state() == state`.
    pub fn is(&self, state: State) -> bool {
        self.state == state
    }

    /// Whether `trigger` would be accepted in the current state.
    pub fn can(&self, trigger: Trigger) -> bool {
        rules::target(trigger, self.state).is_some()
    }

    /// Whether a disable is waiting for the next Enable.
    pub fn disable_flag(&self) -> bool {
        self.disable_flag
    }

    /// Defer a disable until the validator reaches Enable.
    pub fn set_disable_flag(&mut self) {
        self.disable_flag = true;
    }

    /// Fire a trigger that carries no response data.
    pub fn fire(&mut self, trigger: Trigger, now: Instant) -> Result<State> {
        self.transition(trigger, &Payload::None, now)
    }

    /// Apply `trigger`. An unmatched trigger leaves the state untouched and
    /// returns `InvalidTransition`. A rule that targets the current state is
    /// accepted without running any hook.
    pub fn transition(&mut self, trigger: Trigger, payload: &Payload, now: Instant) -> Result<State> {
        let from = self.state;
        let to = match rules::target(trigger, from) {
            Some(to) => to,
            None => {
                let err = Error::InvalidTransition {
                    event: trigger,
                    state: from,
                };
                warn!("fsm: {}", err);
                return Err(err);
            }
        };

        if to == from {
            trace!("fsm: {} [ {} ]", trigger, from);
            return Ok(to);
        }

        debug!("fsm: {} [ {} -> {} ]", trigger, from, to);
        self.on_exit(from);
        self.state = to;
        self.on_enter(to, now);
        self.on_state(to, from, payload);
        Ok(to)
    }

    /// Fire the stuck timer if it is due. Emits `Signal::Stuck` at most once
    /// per transient state entry.
    pub fn poll(&mut self, now: Instant) {
        if fire_once(&mut self.stuck, now) {
            warn!("fsm: stuck in {}", self.state);
            self.outbox.push_back(Signal::Stuck);
        }
    }

    /// Deadline of the armed stuck timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.stuck.map(|t| t.deadline())
    }

    /// Drop the stuck timer without firing it.
    pub fn cancel_timers(&mut self) {
        self.stuck = None;
    }

    /// Drain queued signals in emission order.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        self.outbox.drain(..).collect()
    }

    fn emit(&mut self, signal: Signal) {
        self.outbox.push_back(signal);
    }

    fn dispatch(&mut self, cmd: Command) {
        self.emit(Signal::Dispatch(cmd));
    }

    fn on_exit(&mut self, from: State) {
        self.stuck = None;
        match from {
            State::Connected => self.emit(Signal::Ready),
            State::Disable => self.disable_flag = false,
            _ => {}
        }
    }

    fn on_enter(&mut self, to: State, now: Instant) {
        if to.is_transient() {
            self.stuck = Some(Timer::once(now, self.transient_timeout));
        }
    }

    fn on_state(&mut self, to: State, from: State, payload: &Payload) {
        match to {
            State::PowerUp => self.emit(Signal::PowerUp),
            State::Denominations => self.emit(Signal::Denominations),
            State::Version => {
                let version = match payload {
                    Payload::Version(v) => v.clone(),
                    _ => String::new(),
                };
                self.emit(Signal::Version(version));
            }
            State::PayStay => self.emit(Signal::OnPayStay),
            State::PayValid => {
                self.emit(Signal::OnPayValid);
                self.dispatch(Command::Ack);
            }
            State::Enable => {
                if self.disable_flag {
                    self.disable_flag = false;
                    self.dispatch(Command::Inhibit);
                }
            }
            State::Disable => {
                self.disable_flag = false;
                if from == State::Initialize {
                    self.emit(Signal::Standby);
                }
            }
            State::Accepting => self.emit(Signal::BillAccepted),
            State::Rejecting => {
                let rejection = match payload {
                    Payload::Rejection(r) => *r,
                    _ => Rejection {
                        reason: None,
                        code: None,
                    },
                };
                debug!("fsm: rejected bill: {:?}", rejection.reason);
                self.emit(Signal::BillRejected(rejection));
            }
            State::Returning => self.emit(Signal::BillRejected(Rejection::returned())),
            State::Escrow => match payload {
                Payload::Escrow(escrow) => self.emit(Signal::BillRead(escrow.clone())),
                other => warn!("fsm: escrow without escrow data: {:?}", other),
            },
            State::Stacked => {
                let path = match payload {
                    Payload::Stacked { path } => *path,
                    _ => None,
                };
                self.emit(Signal::BillStacked { path });
            }
            State::CurrencyPath => match payload {
                Payload::CurrencyPath(reply) => self.emit(Signal::PathCurrency(*reply)),
                Payload::Extension { sub_code, data } => self.emit(Signal::Extension {
                    sub_code: *sub_code,
                    data: data.clone(),
                }),
                _ => {}
            },
            State::SetCount => {
                if let Payload::SetCount(reply) = payload {
                    self.emit(Signal::PathSetCount(*reply));
                }
            }
            State::SetCurrentCount => {
                if let Payload::SetCurrentCount(reply) = payload {
                    self.emit(Signal::PathSetCurrentCount(*reply));
                }
            }
            State::Count => {
                if let Payload::Count(reply) = payload {
                    self.emit(Signal::PathCount(*reply));
                }
            }
            State::VendValid => {
                if from == State::Connected {
                    self.dispatch(Command::Reset);
                } else {
                    self.emit(Signal::BillValid);
                    self.dispatch(Command::Ack);
                }
            }
            State::StackerOpen => self.emit(Signal::StackerOpen),
            State::StackerFull => self.emit(Signal::StackerFull),
            State::AcceptorJam => self.emit(Signal::AcceptorJam),
            State::StackerJam => self.emit(Signal::StackerJam),
            State::Cheated => self.emit(Signal::Cheated),
            _ => {}
        }
    }
}
