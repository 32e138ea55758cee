// id003-rs/id003/src/protocol/checksum.rs
//! Frame CRC.

use crc::{CRC_16_KERMIT, Crc};

/// CRC collaborator used by the codec. The validator family computes a
/// 16-bit CRC over every frame byte except the trailing CRC field.
pub trait Checksum {
    /// CRC over `bytes`.
    fn compute(&self, bytes: &[u8]) -> u16;
}

const KERMIT: Crc<u16> = Crc::<u16>::new(&CRC_16_KERMIT);

/// CRC-16/KERMIT: poly 0x1021 (reflected), init 0x0000, no final xor.
/// Checked against the captured command frames in the command table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kermit;

impl Checksum for Kermit {
    fn compute(&self, bytes: &[u8]) -> u16 {
        crc16(bytes)
    }
}

/// Compute the ID003 frame CRC.
pub fn crc16(bytes: &[u8]) -> u16 {
    KERMIT.checksum(bytes)
}
