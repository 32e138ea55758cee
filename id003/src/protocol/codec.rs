// id003-rs/id003/src/protocol/codec.rs
//! Byte stream to messages and commands to bytes.

use log::{trace, warn};

use crate::constants::{MIN_FRAME_LEN, SYNC};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

use super::Frame;
use super::checksum::{Checksum, Kermit};
use super::commands::{Command, CommandParams};
use super::responses::Message;

/// Stateful ID003 codec: reassembles validator frames from arbitrary byte
/// deliveries and encodes host commands.
#[derive(Debug, Default)]
pub struct Codec<C: Checksum = Kermit> {
    buf: Vec<u8>,
    checksum: C,
}

impl Codec<Kermit> {
    /// Codec using CRC-16/KERMIT.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Checksum> Codec<C> {
    /// Codec using a different CRC, e.g. a stub in tests.
    pub fn with_checksum(checksum: C) -> Self {
        Self {
            buf: Vec::new(),
            checksum,
        }
    }

    /// Feed received bytes. Returns one outcome per complete frame, in
    /// arrival order. Incomplete trailing bytes stay buffered.
    ///
    /// Outcomes are `Err` for malformed frames (`CrcMismatch`,
    /// `InvalidLength`) and unmapped opcodes (`UnknownResponse`).
    pub fn ingest(&mut self, bytes: &[u8]) -> Vec<Result<Message>> {
        self.buf.extend_from_slice(bytes);
        let mut out = Vec::new();

        loop {
            match self.buf.iter().position(|&b| b == SYNC) {
                Some(0) => {}
                Some(skip) => {
                    trace!("codec: dropping {} noise bytes", skip);
                    self.buf.drain(..skip);
                }
                None => {
                    if !self.buf.is_empty() {
                        trace!("codec: dropping {} noise bytes", self.buf.len());
                        self.buf.clear();
                    }
                    break;
                }
            }

            if self.buf.len() < 2 {
                break;
            }

            let declared = self.buf[1] as usize;
            if declared < MIN_FRAME_LEN {
                warn!("codec: declared frame length {} too short", declared);
                self.buf.drain(..1);
                out.push(Err(Error::InvalidLength {
                    expected: MIN_FRAME_LEN,
                    actual: declared,
                }));
                continue;
            }

            if self.buf.len() < declared {
                break;
            }

            let frame: Vec<u8> = self.buf.drain(..declared).collect();
            out.push(self.decode_frame(&frame));
        }

        out
    }

    /// Decode exactly one complete wire frame.
    pub fn decode_frame(&self, bytes: &[u8]) -> Result<Message> {
        trace!("<< {}", bytes_to_hex_spaced(bytes));
        let frame = Frame::decode(bytes, &self.checksum)?;
        Message::decode(&frame)
    }

    /// Encode a command into its wire frame.
    pub fn encode(&self, cmd: &Command) -> Vec<u8> {
        let bytes = cmd.encode_with(&self.checksum);
        trace!(">> {} {}", cmd, bytes_to_hex_spaced(&bytes));
        bytes
    }

    /// Encode a command looked up by its wire name.
    pub fn encode_named(&self, name: &str, params: Option<CommandParams>) -> Result<Vec<u8>> {
        let cmd = Command::from_name(name, params)?;
        Ok(self.encode(&cmd))
    }

    /// Number of bytes waiting for the rest of their frame.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drop any partially received frame.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}
