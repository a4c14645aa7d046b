//! ## parse
//!
//! Strict parsing of staged property values

use crate::error::{ConfigError, ConfigResult};

fn property_error(key: &str, raw: &str, expected: &str) -> ConfigError {
    ConfigError::Property {
        key: key.to_string(),
        reason: format!("[{}] is not {}", raw, expected),
    }
}

/// Parse a boolean property. Only `true` and `false` are accepted.
pub fn parse_bool(key: &str, raw: &str) -> ConfigResult<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(property_error(key, raw, "a boolean")),
    }
}

/// Parse a decimal int property
pub fn parse_i32(key: &str, raw: &str) -> ConfigResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| property_error(key, raw, "a valid int"))
}

/// Parse a decimal long property
pub fn parse_i64(key: &str, raw: &str) -> ConfigResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| property_error(key, raw, "a valid long"))
}

/// Parse a port number property
pub fn parse_u16(key: &str, raw: &str) -> ConfigResult<u16> {
    raw.parse::<u16>()
        .map_err(|_| property_error(key, raw, "a valid port"))
}
