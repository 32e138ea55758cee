// id003-rs/id003/src/transport/mock.rs
//! Scriptable transport for tests.

use std::collections::VecDeque;

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent frames and returns queued
/// byte chunks, one chunk per `receive` call.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Frames written so far, oldest first.
    pub sent: Vec<Vec<u8>>,
    /// Chunks handed out by `receive`, one per call.
    pub responses: VecDeque<Vec<u8>>,
    /// Whether the mock is open.
    pub open: bool,
    /// Testing hook: the next `open` fails with this message
    pub open_failure: Option<String>,
    /// Testing hook: number of subsequent `receive` calls that fail
    pub receive_failures: usize,
    /// `None` when the mock has no control line
    pub control_line: Option<bool>,
    /// How often `close` was called.
    pub close_calls: usize,
}

impl MockTransport {
    /// Closed mock with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock with an RTS-style control line, initially off.
    pub fn with_control_line() -> Self {
        Self {
            control_line: Some(false),
            ..Self::default()
        }
    }

    /// Make the next `open` fail.
    pub fn fail_open(&mut self, message: impl Into<String>) {
        self.open_failure = Some(message.into());
    }

    /// Fail the next `n` receives.
    pub fn set_receive_failures(&mut self, n: usize) {
        self.receive_failures = n;
    }

    /// Queue a chunk for `receive`.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(resp);
    }

    /// Oldest frame not yet taken.
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    /// Drain everything sent so far.
    pub fn take_sent(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> Result<()> {
        if let Some(msg) = self.open_failure.take() {
            return Err(Error::Transport(msg));
        }
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn receive(&mut self, _timeout_ms: u64) -> Result<Vec<u8>> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        if self.receive_failures > 0 {
            self.receive_failures -= 1;
            return Err(Error::Transport("simulated read failure".into()));
        }
        Ok(self.responses.pop_front().unwrap_or_default())
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        self.close_calls += 1;
        Ok(())
    }

    fn supports_control_line(&self) -> bool {
        self.control_line.is_some()
    }

    fn set_control_line(&mut self, on: bool) -> Result<()> {
        match self.control_line.as_mut() {
            Some(line) => {
                *line = on;
                Ok(())
            }
            None => Err(Error::UnsupportedOperation("mock has no control line".into())),
        }
    }
}
