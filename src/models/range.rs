//! Address ranges and the CIDR token parser.

use super::ipv4::{broadcast_addr, network_addr, u32_to_addr, MAX_LENGTH};
use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};

/// Inclusive interval `[start, end]` of 32-bit addresses. Always `start <= end`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    /// Number of addresses covered. A /0 covers 2^32, hence `u64`.
    pub fn size(&self) -> u64 {
        self.end as u64 - self.start as u64 + 1
    }

    /// True when the two ranges share at least one address.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", u32_to_addr(self.start), u32_to_addr(self.end))
    }
}

/// A [`Range`] together with the token it was parsed from.
///
/// The token only ends up as a comment in the emitted table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedEntry {
    #[serde(flatten)]
    pub range: Range,
    pub cidr: String,
}

impl AnnotatedEntry {
    pub fn new(range: Range, cidr: &str) -> Self {
        AnnotatedEntry {
            range,
            cidr: cidr.to_string(),
        }
    }
}

/// Parse an `A.B.C.D/M` token into the block it denotes.
///
/// The host bits of the address are cleared, so `1.2.3.4/24` gives the same
/// range as `1.2.3.0/24`.
///
/// # Examples
/// ```
/// use slow_ip_table::models::parse_cidr;
/// let r = parse_cidr("1.0.1.0/24").unwrap();
/// assert_eq!((r.start, r.end), (16777472, 16777727));
/// ```
pub fn parse_cidr(token: &str) -> Result<Range> {
    let parts: Vec<&str> = token.split('/').collect();
    if parts.len() != 2 {
        return Err(TableError::malformed(token, "expected exactly one '/'"));
    }

    let mask: u8 = parts[1].parse().map_err(|_| {
        TableError::malformed(token, format!("mask '{}' is not an integer", parts[1]))
    })?;
    if mask > MAX_LENGTH {
        return Err(TableError::malformed(
            token,
            format!("mask /{mask} is larger than /{MAX_LENGTH}"),
        ));
    }

    let octets: Vec<&str> = parts[0].split('.').collect();
    if octets.len() != 4 {
        return Err(TableError::malformed(
            token,
            format!("expected 4 octets, found {}", octets.len()),
        ));
    }
    let mut address: u32 = 0;
    for octet in octets {
        let value: u8 = octet.parse().map_err(|_| {
            TableError::malformed(token, format!("octet '{octet}' is not an integer in 0-255"))
        })?;
        address = (address << 8) | value as u32;
    }

    let start = network_addr(address, mask)?;
    let end = broadcast_addr(start, mask)?;
    Ok(Range { start, end })
}
