// id003-rs/id003/src/transport/traits.rs
//! The `Transport` trait.

use crate::{Error, Result};

/// Transport trait abstracts the serial line away from protocol/session logic.
pub trait Transport {
    /// Open the underlying line.
    fn open(&mut self) -> Result<()>;

    /// Whether the line is open.
    fn is_open(&self) -> bool;

    /// Send raw bytes to the validator
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Bytes received so far, waiting at most `timeout_ms`. An empty vector
    /// means nothing arrived; it is not an error.
    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Close the line. Closing a closed line is fine.
    fn close(&mut self) -> Result<()>;

    /// Whether `set_control_line` drives anything (the accessory light on
    /// RTS for serial validators).
    fn supports_control_line(&self) -> bool {
        false
    }

    /// Raise or drop the control line.
    fn set_control_line(&mut self, _on: bool) -> Result<()> {
        Err(Error::UnsupportedOperation(
            "transport has no control line".into(),
        ))
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        (**self).receive(timeout_ms)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn supports_control_line(&self) -> bool {
        (**self).supports_control_line()
    }

    fn set_control_line(&mut self, on: bool) -> Result<()> {
        (**self).set_control_line(on)
    }
}
