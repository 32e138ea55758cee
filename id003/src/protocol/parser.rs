// id003-rs/id003/src/protocol/parser.rs
//! Bounds checks shared by the response decoders.

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Unwrap the optional payload of a frame, failing when the response needs
/// at least `min` data bytes.
pub fn require_payload(payload: Option<&[u8]>, min: usize) -> Result<&[u8]> {
    let data = payload.unwrap_or(&[]);
    ensure_len(data, min)?;
    Ok(data)
}
