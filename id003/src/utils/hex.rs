//! Hex formatting for escrow codes and frame traces.

use std::fmt::Write;

/// Lowercase hex, no separators: `[0x61]` -> `"61"`. Escrow hex codes are
/// built from this.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        // writing to a String cannot fail
        let _ = write!(s, "{:02x}", b);
        s
    })
}

/// Lowercase hex, one space between bytes, the way serial captures are
/// usually written: `[0xfc, 0x05]` -> `"fc 05"`.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        let _ = write!(s, "{:02x}", b);
    }
    s
}
