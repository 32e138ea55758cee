// id003-rs/id003/src/types.rs
//! Data carried by validator replies.

use std::collections::BTreeMap;

use derive_more::{Display, From};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Face value of a bill in the active currency's major unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Denomination(u32);

impl Denomination {
    /// Wrap a face value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The face value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Escrow code -> denomination, as reported once by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DenominationTable {
    entries: BTreeMap<u8, Denomination>,
}

impl DenominationTable {
    /// Size of one record: escrow code, reserved, significand, exponent.
    pub const RECORD_LEN: usize = 4;

    /// Parse the payload of a denominations reply. Records with a zero
    /// significand are unused slots and are skipped, as are values that do
    /// not fit in a `u32`. A trailing partial record is ignored.
    pub fn parse(raw: &[u8]) -> Self {
        let mut entries = BTreeMap::new();
        for record in raw.chunks_exact(Self::RECORD_LEN) {
            let code = record[0];
            let significand = record[2];
            if significand == 0x00 {
                continue;
            }
            let exponent = record[3];
            let value = 10u32
                .checked_pow(u32::from(exponent))
                .and_then(|scale| scale.checked_mul(u32::from(significand)));
            match value {
                Some(v) => {
                    entries.insert(code, Denomination(v));
                }
                None => log::warn!(
                    "denomination out of range: code={:#04x} {}e{}",
                    code,
                    significand,
                    exponent
                ),
            }
        }
        Self { entries }
    }

    /// Denomination for an escrow code.
    pub fn get(&self, code: u8) -> Option<Denomination> {
        self.entries.get(&code).copied()
    }

    /// Number of known bills.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no bill is known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in escrow code order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Denomination)> + '_ {
        self.entries.iter().map(|(&code, &value)| (code, value))
    }

    /// Smallest bill the validator accepts.
    pub fn lowest(&self) -> Option<Denomination> {
        self.entries.values().min().copied()
    }

    /// Largest bill that does not exceed `fiat`.
    pub fn highest_not_exceeding(&self, fiat: u32) -> Option<Denomination> {
        self.entries
            .values()
            .filter(|d| d.value() <= fiat)
            .max()
            .copied()
    }
}

impl FromIterator<(u8, Denomination)> for DenominationTable {
    fn from_iter<I: IntoIterator<Item = (u8, Denomination)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Reject cause reported in the payload of a `rejecting` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RejectionReason {
    /// 0x71
    #[display(fmt = "insertion")]
    Insertion,
    /// 0x72
    #[display(fmt = "mug")]
    Mug,
    /// 0x73
    #[display(fmt = "head")]
    Head,
    /// 0x74
    #[display(fmt = "calibration")]
    Calibration,
    /// 0x75
    #[display(fmt = "conveying")]
    Conveying,
    /// 0x76
    #[display(fmt = "discrimination")]
    Discrimination,
    /// 0x77 or 0x7E
    #[display(fmt = "photoPattern")]
    PhotoPattern,
    /// 0x78
    #[display(fmt = "photoLevel")]
    PhotoLevel,
    /// 0x79, bill inhibited by the host
    #[display(fmt = "inhibit")]
    Inhibit,
    /// 0x7A
    #[display(fmt = "unknown")]
    Unknown,
    /// 0x7B
    #[display(fmt = "operation")]
    Operation,
    /// 0x7C
    #[display(fmt = "stacker")]
    Stacker,
    /// 0x7D
    #[display(fmt = "length")]
    Length,
    /// 0x7F
    #[display(fmt = "trueBill")]
    TrueBill,
    /// The bill came back out of the bezel (returning status, no code).
    #[display(fmt = "Returned")]
    Returned,
}

impl RejectionReason {
    /// Reason for a reject code, `None` for codes outside the table.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x71 => Some(Self::Insertion),
            0x72 => Some(Self::Mug),
            0x73 => Some(Self::Head),
            0x74 => Some(Self::Calibration),
            0x75 => Some(Self::Conveying),
            0x76 => Some(Self::Discrimination),
            0x77 | 0x7e => Some(Self::PhotoPattern),
            0x78 => Some(Self::PhotoLevel),
            0x79 => Some(Self::Inhibit),
            0x7a => Some(Self::Unknown),
            0x7b => Some(Self::Operation),
            0x7c => Some(Self::Stacker),
            0x7d => Some(Self::Length),
            0x7f => Some(Self::TrueBill),
            _ => None,
        }
    }
}

/// Bill held in escrow. `denomination` is filled in by the session from its
/// denomination table; the codec leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Escrow {
    /// Escrow code as received.
    pub code: u8,
    /// `code` as `x` followed by two hex digits, e.g. `x61`.
    pub hex_code: String,
    /// Face value, once looked up.
    pub denomination: Option<Denomination>,
}

/// Payload of `rejecting` / `returning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rejection {
    /// Decoded reason.
    pub reason: Option<RejectionReason>,
    /// Raw reject code. `None` for a returned bill.
    pub code: Option<u8>,
}

impl Rejection {
    /// Rejection for a raw reject code.
    pub fn from_code(code: u8) -> Self {
        Self {
            reason: RejectionReason::from_code(code),
            code: Some(code),
        }
    }

    /// Bill handed back without a reject code.
    pub fn returned() -> Self {
        Self {
            reason: Some(RejectionReason::Returned),
            code: None,
        }
    }
}

/// The validator only replies to extension requests it accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReplyStatus {
    /// Accepted.
    #[default]
    #[display(fmt = "ok")]
    Ok,
}

/// Reply to `currencypath` and `count`: one byte per recycler path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathReply {
    /// Reply status.
    pub status: ReplyStatus,
    /// First path.
    pub path1: u8,
    /// Second path.
    pub path2: u8,
}

/// Reply to `setcount` and `setcurrentcount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountReply {
    /// Reply status.
    pub status: ReplyStatus,
    /// Count the validator stored.
    pub count: u8,
    /// Recycler box.
    pub box_id: u8,
}
