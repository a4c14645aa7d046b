//! # netbios config
//!
//! Typed view over the staged NetBIOS name service properties

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::error::ConfigResult;
use crate::utils::net::resolve_host;
use crate::utils::parse::{parse_i32, parse_i64, parse_u16};

/// NetBIOS name service settings
#[derive(Debug, Clone, PartialEq)]
pub struct NetbiosSettings {
    /// Local NetBIOS hostname
    pub hostname: Option<String>,
    /// NetBIOS scope identifier
    pub scope: Option<String>,
    /// Path of the lmhosts file
    pub lmhosts: Option<PathBuf>,
    /// Name cache lifetime, in seconds.
    /// The staged property value counts minutes.
    pub cache_policy: i64,
    /// Broadcast address for name queries
    pub baddr: IpAddr,
    /// Local binding address and port
    pub laddr: Option<IpAddr>,
    pub lport: u16,
    /// Name query retries and per-retry timeout (milliseconds)
    pub retry_count: i32,
    pub retry_timeout: i32,
    /// Datagram buffer sizes (bytes)
    pub rcv_buf_size: i32,
    pub snd_buf_size: i32,
    /// Socket timeout (milliseconds)
    pub so_timeout: i32,
    /// WINS server addresses, tried in order
    pub wins: Vec<IpAddr>,
}

impl Default for NetbiosSettings {
    fn default() -> Self {
        Self {
            hostname: None,
            scope: None,
            lmhosts: None,
            cache_policy: 600,
            baddr: IpAddr::V4(Ipv4Addr::BROADCAST),
            laddr: None,
            lport: 0,
            retry_count: 2,
            retry_timeout: 3000,
            rcv_buf_size: 576,
            snd_buf_size: 576,
            so_timeout: 5000,
            wins: Vec::new(),
        }
    }
}

impl NetbiosSettings {
    pub(super) fn set(&mut self, key: &str, raw: &str) -> ConfigResult<()> {
        match key {
            "smb.netbios.hostname" => self.hostname = Some(raw.to_string()),
            "smb.netbios.scope" => self.scope = Some(raw.to_string()),
            "smb.netbios.lmhosts" => self.lmhosts = Some(PathBuf::from(raw)),
            // the staged value counts minutes
            "smb.netbios.cache_policy" => {
                self.cache_policy = parse_i64(key, raw)?.saturating_mul(60)
            }
            "smb.netbios.baddr" => self.baddr = resolve_host(key, raw)?,
            "smb.netbios.laddr" => self.laddr = Some(resolve_host(key, raw)?),
            "smb.netbios.lport" => self.lport = parse_u16(key, raw)?,
            "smb.netbios.retry_count" => self.retry_count = parse_i32(key, raw)?,
            "smb.netbios.retry_timeout" => self.retry_timeout = parse_i32(key, raw)?,
            "smb.netbios.rcv_buf_size" => self.rcv_buf_size = parse_i32(key, raw)?,
            "smb.netbios.snd_buf_size" => self.snd_buf_size = parse_i32(key, raw)?,
            "smb.netbios.so_timeout" => self.so_timeout = parse_i32(key, raw)?,
            "smb.netbios.wins" => {
                self.wins = raw
                    .split(',')
                    .filter(|host| !host.is_empty())
                    .map(|host| resolve_host(key, host))
                    .collect::<ConfigResult<Vec<IpAddr>>>()?
            }
            _ => debug!("ignoring unknown configuration property [{}]", key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::{PropertyMap, SmbClientConfig};

    fn parse(key: &str, raw: &str) -> ConfigResult<SmbClientConfig> {
        let mut properties = PropertyMap::new();
        properties.insert(key.to_string(), raw.to_string());
        SmbClientConfig::from_properties(&properties)
    }

    #[test]
    fn should_have_sensible_defaults() {
        let settings = NetbiosSettings::default();
        assert_eq!(settings.cache_policy, 600);
        assert_eq!(settings.baddr.to_string().as_str(), "255.255.255.255");
        assert_eq!(settings.retry_count, 2);
        assert!(settings.wins.is_empty());
    }

    #[test]
    fn should_parse_hostname_and_scope() {
        let config = parse("smb.netbios.hostname", "BASTION").ok().unwrap();
        assert_eq!(config.netbios.hostname.as_deref(), Some("BASTION"));
        let config = parse("smb.netbios.scope", "scope.local").ok().unwrap();
        assert_eq!(config.netbios.scope.as_deref(), Some("scope.local"));
    }

    #[test]
    fn should_parse_lmhosts_path() {
        let config = parse("smb.netbios.lmhosts", "/etc/lmhosts").ok().unwrap();
        assert_eq!(
            config.netbios.lmhosts,
            Some(PathBuf::from("/etc/lmhosts"))
        );
    }

    #[test]
    fn should_scale_cache_policy_to_seconds() {
        let config = parse("smb.netbios.cache_policy", "10").ok().unwrap();
        assert_eq!(config.netbios.cache_policy, 600);
        // negative values mean "never expire" and are kept as-is, scaled
        let config = parse("smb.netbios.cache_policy", "-1").ok().unwrap();
        assert_eq!(config.netbios.cache_policy, -60);
    }

    #[test]
    fn should_parse_broadcast_address() {
        crate::mock::logger();
        let config = parse("smb.netbios.baddr", "192.168.1.255").ok().unwrap();
        assert_eq!(config.netbios.baddr.to_string().as_str(), "192.168.1.255");
    }

    #[test]
    fn should_not_parse_empty_broadcast_address() {
        assert!(parse("smb.netbios.baddr", "").is_err());
    }

    #[test]
    fn should_parse_wins_list() {
        crate::mock::logger();
        let config = parse("smb.netbios.wins", "127.0.0.1,127.0.0.2").ok().unwrap();
        assert_eq!(config.netbios.wins.len(), 2);
        assert_eq!(config.netbios.wins[0].to_string().as_str(), "127.0.0.1");
    }

    #[test]
    fn should_parse_empty_wins_list() {
        let config = parse("smb.netbios.wins", "").ok().unwrap();
        assert!(config.netbios.wins.is_empty());
    }

    #[test]
    fn should_not_parse_bad_retry_count() {
        assert!(parse("smb.netbios.retry_count", "twice").is_err());
    }
}
