//! IPv4 address conversions.

use std::net::Ipv4Addr;

/// Big-endian u32 to address, e.g. `0x7f000001` -> `127.0.0.1`.
pub fn u32_to_ipv4(value: u32) -> Ipv4Addr {
    Ipv4Addr::from(value)
}

/// Big-endian u32 to dotted-quad text.
pub fn ipv4_to_string(value: u32) -> String {
    u32_to_ipv4(value).to_string()
}

/// Dotted-quad text to big-endian u32; zero for anything unparsable.
pub fn ipv4_to_u32(addr: &str) -> u32 {
    addr.parse::<Ipv4Addr>().map(u32::from).unwrap_or(0)
}
