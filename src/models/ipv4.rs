//! IPv4 prefix arithmetic.
//!
//! All shifts are done on `u64` so a prefix length of 0 (shift by 32) stays defined.

use crate::error::{Result, TableError};
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn check_len(len: u8) -> Result<()> {
    if len > MAX_LENGTH {
        Err(TableError::InvalidConfig(format!(
            "Network length /{len} is too long"
        )))
    } else {
        Ok(())
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use slow_ip_table::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    check_len(len)?;
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    Ok(((all_bits >> right_len) << right_len) as u32)
}

/// Number of addresses covered by a prefix of the given length, `2^(32-len)`.
pub fn block_size(len: u8) -> Result<u64> {
    check_len(len)?;
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Clear the low `32 - len` bits, yielding the network base address.
pub fn network_addr(addr: u32, len: u8) -> Result<u32> {
    Ok(addr & get_cidr_mask(len)?)
}

/// Highest address in the block containing `addr`.
pub fn broadcast_addr(addr: u32, len: u8) -> Result<u32> {
    let start = network_addr(addr, len)? as u64;
    Ok((start + block_size(len)? - 1) as u32)
}

/// `a.b.c.d` as `a·2^24 + b·2^16 + c·2^8 + d`.
pub fn addr_to_u32(addr: Ipv4Addr) -> u32 {
    u32::from(addr)
}

pub fn u32_to_addr(bits: u32) -> Ipv4Addr {
    Ipv4Addr::from(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_network_addr() {
        let ip = addr_to_u32(Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(
            u32_to_addr(network_addr(ip, 24).unwrap()),
            Ipv4Addr::new(192, 168, 1, 0)
        );
        assert_eq!(
            u32_to_addr(network_addr(ip, 8).unwrap()),
            Ipv4Addr::new(192, 0, 0, 0)
        );
        assert_eq!(network_addr(ip, 32).unwrap(), ip);
        assert_eq!(network_addr(ip, 0).unwrap(), 0);
        assert!(network_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = addr_to_u32(Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(
            u32_to_addr(broadcast_addr(ip, 24).unwrap()),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            u32_to_addr(broadcast_addr(ip, 16).unwrap()),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(broadcast_addr(ip, 32).unwrap(), ip);
        assert_eq!(broadcast_addr(ip, 0).unwrap(), u32::MAX);
        assert_eq!(broadcast_addr(u32::MAX, 24).unwrap(), u32::MAX);
    }

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(0).unwrap(), 4294967296);
        assert_eq!(block_size(24).unwrap(), 256);
        assert_eq!(block_size(32).unwrap(), 1);
        assert!(block_size(33).is_err());
    }

    #[test]
    fn test_addr_to_u32() {
        assert_eq!(addr_to_u32(Ipv4Addr::new(1, 0, 1, 0)), 16777472);
        assert_eq!(addr_to_u32(Ipv4Addr::new(1, 2, 3, 4)), 16909060);
        assert_eq!(u32_to_addr(16909060), Ipv4Addr::new(1, 2, 3, 4));
    }
}
