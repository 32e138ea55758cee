// id003-rs/id003/src/transport/serial.rs

//! Serial line transport.
#![cfg(feature = "serial")]

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use log::{debug, info};
use serialport::{DataBits, SerialPort, StopBits};

use crate::session::config::{Parity, SerialConfig};
use crate::transport::traits::Transport;
use crate::utils::default_read_timeout;
use crate::{Error, Result};

const READ_CHUNK: usize = 256;

/// RS-232 transport backed by the `serialport` crate. The accessory light
/// hangs off RTS.
pub struct SerialTransport {
    config: SerialConfig,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Closed transport for `config`. Nothing is opened until `open`.
    pub fn new(config: SerialConfig) -> Self {
        Self { config, port: None }
    }

    /// Line settings.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(Error::NotConnected)
    }
}

fn parity(p: Parity) -> serialport::Parity {
    match p {
        Parity::None => serialport::Parity::None,
        Parity::Odd => serialport::Parity::Odd,
        Parity::Even => serialport::Parity::Even,
    }
}

fn data_bits(bits: u8) -> Result<DataBits> {
    match bits {
        5 => Ok(DataBits::Five),
        6 => Ok(DataBits::Six),
        7 => Ok(DataBits::Seven),
        8 => Ok(DataBits::Eight),
        other => Err(Error::UnsupportedOperation(format!(
            "{} data bits",
            other
        ))),
    }
}

fn stop_bits(bits: u8) -> Result<StopBits> {
    match bits {
        1 => Ok(StopBits::One),
        2 => Ok(StopBits::Two),
        other => Err(Error::UnsupportedOperation(format!(
            "{} stop bits",
            other
        ))),
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> Result<()> {
        let c = &self.config;
        let port = serialport::new(c.device.as_str(), c.baud_rate)
            .parity(parity(c.parity))
            .data_bits(data_bits(c.data_bits)?)
            .stop_bits(stop_bits(c.stop_bits)?)
            .timeout(default_read_timeout())
            .open()?;
        info!("serial: opened {} at {} baud", c.device, c.baud_rate);
        self.port = Some(port);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port()?;
        port.write_all(data)?;
        port.flush()?;
        Ok(())
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        let port = self.port()?;
        port.set_timeout(Duration::from_millis(timeout_ms))?;

        let mut buf = [0u8; READ_CHUNK];
        match port.read(&mut buf) {
            Ok(n) => Ok(buf[..n].to_vec()),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("serial: closed {}", self.config.device);
        }
        Ok(())
    }

    fn supports_control_line(&self) -> bool {
        true
    }

    fn set_control_line(&mut self, on: bool) -> Result<()> {
        self.port()?.write_request_to_send(on)?;
        Ok(())
    }
}
