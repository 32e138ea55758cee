// id003-rs/id003/src/session/config.rs

//! Session configuration and timing constants.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::ms;

/// Status poll period.
pub const POLL_INTERVAL_MS: u64 = 100;
/// How often connect checks whether denominations have arrived.
pub const DENOMINATION_CHECK_MS: u64 = 500;
/// Connect gives up waiting for denominations after this long.
pub const DENOMINATION_TIMEOUT_MS: u64 = 5000;
/// How often the heartbeat monitor looks at the last receive time.
pub const HEARTBEAT_CHECK_MS: u64 = 500;
/// Silence longer than this is a lost heartbeat.
pub const HEARTBEAT_TIMEOUT_MS: u64 = 1000;
/// Transport errors are published at most once per window.
pub const ERROR_THROTTLE_MS: u64 = 2000;
/// ID003 line speed.
pub const DEFAULT_BAUD_RATE: u32 = 19200;

/// Serial parity. ID003 runs with even parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    /// No parity bit.
    None,
    /// Odd parity.
    Odd,
    /// Even parity.
    #[default]
    Even,
}

/// RS-232 line settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0`.
    pub device: String,
    /// Line speed.
    pub baud_rate: u32,
    /// Parity.
    pub parity: Parity,
    /// Data bits per character.
    pub data_bits: u8,
    /// Stop bits per character.
    pub stop_bits: u8,
}

impl SerialConfig {
    /// 19200 8E1 on `device`.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            parity: Parity::Even,
            data_bits: 8,
            stop_bits: 1,
        }
    }

    /// Override the line speed.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Override the parity.
    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }
}

/// Everything a `Session` needs besides its transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Line settings for the transport.
    pub serial: SerialConfig,
    /// Currency identifier, e.g. "USD". Informational only.
    pub currency: String,
    /// How long a bill may sit in a transient state before it is stuck.
    pub transient_timeout: Duration,
    /// Status poll period.
    pub poll_interval: Duration,
    /// Period of the denomination bootstrap check.
    pub denomination_check: Duration,
    /// Bootstrap gives up after this long.
    pub denomination_timeout: Duration,
    /// Period of the heartbeat check.
    pub heartbeat_check: Duration,
    /// Silence longer than this is a lost heartbeat.
    pub heartbeat_timeout: Duration,
    /// Window of the transport error throttle.
    pub error_throttle: Duration,
    /// Publish `Event::Dispatch` for every outbound command.
    pub emit_dispatch: bool,
}

impl SessionConfig {
    /// `transient_timeout` has no sensible default and must be given.
    pub fn new(serial: SerialConfig, currency: impl Into<String>, transient_timeout: Duration) -> Self {
        Self {
            serial,
            currency: currency.into(),
            transient_timeout,
            poll_interval: ms(POLL_INTERVAL_MS),
            denomination_check: ms(DENOMINATION_CHECK_MS),
            denomination_timeout: ms(DENOMINATION_TIMEOUT_MS),
            heartbeat_check: ms(HEARTBEAT_CHECK_MS),
            heartbeat_timeout: ms(HEARTBEAT_TIMEOUT_MS),
            error_throttle: ms(ERROR_THROTTLE_MS),
            emit_dispatch: cfg!(feature = "diagnostics"),
        }
    }

    /// Override the poll period.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the bootstrap timeout.
    pub fn with_denomination_timeout(mut self, timeout: Duration) -> Self {
        self.denomination_timeout = timeout;
        self
    }

    /// Override the heartbeat timeout.
    pub fn with_heartbeat_timeout(mut self, timeout: Duration) -> Self {
        self.heartbeat_timeout = timeout;
        self
    }

    /// Override the error throttle window.
    pub fn with_error_throttle(mut self, window: Duration) -> Self {
        self.error_throttle = window;
        self
    }

    /// Turn the `dispatch` event on or off.
    pub fn with_emit_dispatch(mut self, on: bool) -> Self {
        self.emit_dispatch = on;
        self
    }
}
