//! Lossless-by-construction value conversions.
//!
//! Numeric slice conversions are explicit per-element casts with the usual
//! two's-complement wrapping/truncation semantics; nothing here reinterprets
//! memory.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{Result, StrandError};

fn parse_empty_zero<T>(s: &str) -> Result<T>
where
    T: FromStr + Default,
    T::Err: Display,
{
    if s.is_empty() {
        return Ok(T::default());
    }
    s.parse()
        .map_err(|err| StrandError::parse(format!("invalid number {s:?}: {err}")))
}

/// Parse an i32; an empty string is zero.
pub fn parse_i32(s: &str) -> Result<i32> {
    parse_empty_zero(s)
}

/// Parse an i64; an empty string is zero.
pub fn parse_i64(s: &str) -> Result<i64> {
    parse_empty_zero(s)
}

/// Parse a u32; an empty string is zero.
pub fn parse_u32(s: &str) -> Result<u32> {
    parse_empty_zero(s)
}

/// Parse a u16; an empty string is zero.
pub fn parse_u16(s: &str) -> Result<u16> {
    parse_empty_zero(s)
}

/// Parse an i64, falling back to `default` on any failure.
pub fn parse_i64_or(s: &str, default: i64) -> i64 {
    s.parse().unwrap_or(default)
}

/// Look up `key`, falling back to `default` when absent.
pub fn map_get_or<'a>(m: &'a HashMap<String, String>, key: &str, default: &'a str) -> &'a str {
    m.get(key).map(String::as_str).unwrap_or(default)
}

/// Look up `key` as an i64, falling back to `default` when absent or
/// unparsable.
pub fn map_get_i64_or(m: &HashMap<String, String>, key: &str, default: i64) -> i64 {
    m.get(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Reinterpret each u64 as an i64 (wrapping).
pub fn u64s_to_i64s(values: &[u64]) -> Vec<i64> {
    values.iter().map(|&v| v as i64).collect()
}

/// Reinterpret each i64 as a u64 (wrapping).
pub fn i64s_to_u64s(values: &[i64]) -> Vec<u64> {
    values.iter().map(|&v| v as u64).collect()
}

/// Widen each u32 to an i64.
pub fn u32s_to_i64s(values: &[u32]) -> Vec<i64> {
    values.iter().map(|&v| i64::from(v)).collect()
}

/// Narrow each i64 to a u32 (truncating).
pub fn i64s_to_u32s(values: &[i64]) -> Vec<u32> {
    values.iter().map(|&v| v as u32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(parse_i32("").unwrap(), 0);
        assert_eq!(parse_i64("").unwrap(), 0);
        assert_eq!(parse_u32("").unwrap(), 0);
        assert_eq!(parse_u16("").unwrap(), 0);
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_i32("-42").unwrap(), -42);
        assert_eq!(parse_i64("9000000000").unwrap(), 9_000_000_000);
        assert_eq!(parse_u16("65535").unwrap(), 65535);
        assert!(parse_u32("-1").is_err());
        assert!(parse_i32("12abc").is_err());
    }

    #[test]
    fn test_parse_with_default() {
        assert_eq!(parse_i64_or("17", 3), 17);
        assert_eq!(parse_i64_or("nope", 3), 3);
        assert_eq!(parse_i64_or("", 3), 3);
    }

    #[test]
    fn test_map_lookups() {
        let mut m = HashMap::new();
        m.insert("region".to_string(), "east".to_string());
        m.insert("shards".to_string(), "16".to_string());

        assert_eq!(map_get_or(&m, "region", "west"), "east");
        assert_eq!(map_get_or(&m, "zone", "west"), "west");
        assert_eq!(map_get_i64_or(&m, "shards", 1), 16);
        assert_eq!(map_get_i64_or(&m, "region", 1), 1);
        assert_eq!(map_get_i64_or(&m, "missing", 1), 1);
    }

    #[test]
    fn test_slice_conversions_roundtrip() {
        let unsigned = vec![0_u64, 7, u64::MAX];
        let signed = u64s_to_i64s(&unsigned);
        assert_eq!(signed, vec![0, 7, -1]);
        assert_eq!(i64s_to_u64s(&signed), unsigned);
    }

    #[test]
    fn test_slice_widen_and_narrow() {
        assert_eq!(u32s_to_i64s(&[0, u32::MAX]), vec![0, 4_294_967_295]);
        assert_eq!(i64s_to_u32s(&[1, 4_294_967_296]), vec![1, 0]);
    }
}
