// id003-rs/id003/src/protocol/frame.rs
//! Wire frames.

use crate::constants::{CRC_LEN, HEADER_LEN, MAX_FRAME_LEN, MIN_FRAME_LEN, SYNC};
use crate::protocol::checksum::Checksum;
use crate::{Error, Result};

/// ID003 frame helper. Provides encode/decode of the wire frame
/// Format: [Sync(1)] [Len(1)] [Opcode(1)] [Data(n)] [CRC16-LE(2)]
/// Sync: 0xFC
/// Len: total frame length including sync and CRC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Opcode byte.
    pub opcode: u8,
    /// Bytes between the opcode and the CRC.
    pub data: Vec<u8>,
}

impl Frame {
    /// Frame with the given opcode and data.
    pub fn new(opcode: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            opcode,
            data: data.into(),
        }
    }

    /// Frame without data bytes.
    pub fn bare(opcode: u8) -> Self {
        Self::new(opcode, Vec::new())
    }

    /// Data bytes, or `None` for a minimal 5-byte frame.
    pub fn payload(&self) -> Option<&[u8]> {
        if self.data.is_empty() {
            None
        } else {
            Some(&self.data)
        }
    }

    /// Encode into a full wire frame
    pub fn encode<C: Checksum>(&self, checksum: &C) -> Result<Vec<u8>> {
        let total = MIN_FRAME_LEN + self.data.len();
        if total > MAX_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_FRAME_LEN,
                actual: total,
            });
        }

        let mut out = Vec::with_capacity(total);
        out.push(SYNC);
        out.push(total as u8);
        out.push(self.opcode);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&[0, 0]);
        seal(&mut out, checksum);
        Ok(out)
    }

    /// Decode exactly one full wire frame
    pub fn decode<C: Checksum>(frame: &[u8], checksum: &C) -> Result<Self> {
        if frame.len() < MIN_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: MIN_FRAME_LEN,
                actual: frame.len(),
            });
        }

        if frame[0] != SYNC {
            return Err(Error::FrameFormat(format!(
                "invalid sync byte {:#04x}",
                frame[0]
            )));
        }

        let declared = frame[1] as usize;
        if declared != frame.len() {
            return Err(Error::InvalidLength {
                expected: declared,
                actual: frame.len(),
            });
        }

        verify(frame, checksum)?;

        Ok(Self {
            opcode: frame[2],
            data: frame[HEADER_LEN..frame.len() - CRC_LEN].to_vec(),
        })
    }
}

/// Recompute the CRC over everything before the trailing two bytes and
/// write it there, little endian.
pub fn seal<C: Checksum>(buf: &mut [u8], checksum: &C) {
    if buf.len() < CRC_LEN {
        return;
    }
    let body = buf.len() - CRC_LEN;
    let crc = checksum.compute(&buf[..body]);
    buf[body..].copy_from_slice(&crc.to_le_bytes());
}

/// Check the trailing CRC of a complete frame.
pub fn verify<C: Checksum>(frame: &[u8], checksum: &C) -> Result<()> {
    if frame.len() < CRC_LEN {
        return Err(Error::InvalidLength {
            expected: CRC_LEN,
            actual: frame.len(),
        });
    }
    let body = frame.len() - CRC_LEN;
    let actual = u16::from_le_bytes([frame[body], frame[body + 1]]);
    let expected = checksum.compute(&frame[..body]);
    if actual != expected {
        return Err(Error::CrcMismatch { expected, actual });
    }
    Ok(())
}
