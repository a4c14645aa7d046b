//! ## net
//!
//! Host resolution for address-valued properties

use std::io;
use std::net::{IpAddr, ToSocketAddrs};

use crate::error::{ConfigError, ConfigResult};

/// Resolve a host literal or name to an address.
///
/// IP literals parse directly; anything else goes through the system
/// resolver. Empty hosts and resolution failures are rejected.
pub fn resolve_host(key: &str, host: &str) -> ConfigResult<IpAddr> {
    if host.is_empty() {
        return Err(ConfigError::Property {
            key: key.to_string(),
            reason: "empty host".to_string(),
        });
    }
    if let Ok(address) = host.parse::<IpAddr>() {
        return Ok(address);
    }
    trace!("resolving host {}...", host);
    (host, 0u16)
        .to_socket_addrs()
        .map_err(|e| ConfigError::Resolve {
            key: key.to_string(),
            host: host.to_string(),
            source: e,
        })?
        .next()
        .map(|address| address.ip())
        .ok_or_else(|| ConfigError::Resolve {
            key: key.to_string(),
            host: host.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no address found"),
        })
}
