// sim.rs — drives a Session against the in-process Simulator
#![allow(dead_code)]

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use id003::prelude::*;
use id003::test_support::test_config;
use id003::utils::ms;

pub const STEP: Duration = Duration::from_millis(10);

pub struct SimRun {
    pub session: Session<Simulator>,
    pub rx: Receiver<Event>,
    pub now: Instant,
    pub seen: Vec<Event>,
}

impl SimRun {
    /// Connected session over a simulator holding each state for `dwell`
    /// status polls.
    pub fn connect(dwell: u8) -> Self {
        Self::with_simulator(Simulator::new().with_dwell(dwell))
    }

    pub fn with_simulator(sim: Simulator) -> Self {
        Self::with_config(test_config(ms(2000)), sim)
    }

    pub fn with_config(config: SessionConfig, sim: Simulator) -> Self {
        let now = Instant::now();
        let (mut session, rx) = Session::new(config, sim, now);
        session.connect(now).expect("simulator opens");
        Self {
            session,
            rx,
            now,
            seen: Vec::new(),
        }
    }

    pub fn sim(&mut self) -> &mut Simulator {
        self.session.transport_mut()
    }

    /// Tick for `span`, collecting events.
    pub fn run(&mut self, span: Duration) {
        let until = self.now + span;
        while self.now < until {
            self.step();
        }
    }

    /// Tick until an event matches `pred`, for at most `limit`. Returns the
    /// matching event.
    pub fn run_until(&mut self, limit: Duration, pred: impl Fn(&Event) -> bool) -> &Event {
        let until = self.now + limit;
        let start = self.seen.len();
        loop {
            if let Some(pos) = self.seen[start..].iter().position(&pred) {
                return &self.seen[start + pos];
            }
            assert!(self.now < until, "no matching event; saw {:?}", self.names());
            self.step();
        }
    }

    /// Tick until the FSM sits in `state`, for at most `limit`.
    pub fn run_to_state(&mut self, state: State, limit: Duration) {
        let until = self.now + limit;
        while self.session.state() != state {
            assert!(
                self.now < until,
                "stuck in {} waiting for {}",
                self.session.state(),
                state
            );
            self.step();
        }
    }

    /// Connected and bootstrapped, with acceptance enabled.
    pub fn ready_and_enabled(dwell: u8) -> Self {
        let mut run = Self::connect(dwell);
        run.run_until(ms(2000), |e| matches!(e, Event::Connected(_)));
        run.session.enable(run.now);
        run.run_to_state(State::Enable, ms(2000));
        run.seen.clear();
        run
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.seen
            .iter()
            .map(|e| e.name())
            .filter(|n| *n != "dispatch")
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.seen.iter().filter(|e| pred(e)).count()
    }

    fn step(&mut self) {
        self.now += STEP;
        self.session.tick(self.now);
        self.seen.extend(self.rx.try_iter());
    }
}
