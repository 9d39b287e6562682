//! Domain models for the range table.
//!
//! - [`Range`] - inclusive interval of 32-bit addresses
//! - [`AnnotatedEntry`] - a [`Range`] with the CIDR token it came from
//! - IPv4 prefix arithmetic shared by the parser and the builder

mod ipv4;
mod range;

pub use ipv4::{
    addr_to_u32, block_size, broadcast_addr, get_cidr_mask, network_addr, u32_to_addr, MAX_LENGTH,
};
pub use range::{parse_cidr, AnnotatedEntry, Range};
