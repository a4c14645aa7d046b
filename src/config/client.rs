//! # client config
//!
//! Typed view over the staged SMB client properties

use std::net::IpAddr;

use crate::config::netbios::NetbiosSettings;
use crate::config::PropertyMap;
use crate::dialect::DialectVersion;
use crate::error::{ConfigError, ConfigResult};
use crate::utils::net::resolve_host;
use crate::utils::parse::{parse_bool, parse_i32, parse_i64, parse_u16};

/// Typed SMB client configuration, parsed from a [`PropertyMap`].
///
/// Every field starts from its default and is overridden by the matching
/// staged property. Unknown properties are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SmbClientConfig {
    /// Whether to fall back to NTLM when Kerberos fails
    pub allow_ntlm_fallback: bool,
    /// Whether to use raw NTLMSSP tokens instead of SPNEGO
    pub use_raw_ntlm: bool,
    /// Size of the buffer cache
    pub max_buffers: i32,
    /// LanManager compatibility level
    pub lm_compatibility: i32,
    /// OEM encoding used for legacy string fields
    pub oem_encoding: String,
    /// Whether to trace resource acquisition and release
    pub trace_resources: bool,
    /// Per-connection client settings
    pub client: ClientSettings,
    /// NetBIOS name service settings
    pub netbios: NetbiosSettings,
}

impl Default for SmbClientConfig {
    fn default() -> Self {
        Self {
            allow_ntlm_fallback: true,
            use_raw_ntlm: false,
            max_buffers: 16,
            lm_compatibility: 3,
            oem_encoding: "Cp850".to_string(),
            trace_resources: false,
            client: ClientSettings::default(),
            netbios: NetbiosSettings::default(),
        }
    }
}

impl SmbClientConfig {
    /// Parse the typed configuration from staged properties.
    /// Parsing is strict per field; unknown keys are ignored with a debug log.
    pub fn from_properties(properties: &PropertyMap) -> ConfigResult<Self> {
        let mut config = Self::default();
        for (key, raw) in properties {
            config.set(key, raw)?;
        }
        Ok(config)
    }

    fn set(&mut self, key: &str, raw: &str) -> ConfigResult<()> {
        if key.starts_with("smb.client.") {
            return self.client.set(key, raw);
        }
        if key.starts_with("smb.netbios.") {
            return self.netbios.set(key, raw);
        }
        match key {
            "smb.allow_ntlm_fallback" => self.allow_ntlm_fallback = parse_bool(key, raw)?,
            "smb.use_raw_ntlm" => self.use_raw_ntlm = parse_bool(key, raw)?,
            "smb.max_buffers" => self.max_buffers = parse_i32(key, raw)?,
            "smb.lm_compatibility" => self.lm_compatibility = parse_i32(key, raw)?,
            "smb.encoding" => self.oem_encoding = raw.to_string(),
            "smb.trace_resources" => self.trace_resources = parse_bool(key, raw)?,
            _ => debug!("ignoring unknown configuration property [{}]", key),
        }
        Ok(())
    }
}

/// DFS (distributed filesystem) settings
#[derive(Debug, Clone, PartialEq)]
pub struct DfsSettings {
    /// Whether DFS referrals are disabled
    pub disabled: bool,
    /// Whether to convert DFS referral hosts to fully qualified names
    pub convert_to_fqdn: bool,
    /// Referral cache lifetime, in seconds
    pub ttl: i64,
    /// Whether to fail paths that cross an unresolvable referral
    pub strict_view: bool,
}

impl Default for DfsSettings {
    fn default() -> Self {
        Self {
            disabled: false,
            convert_to_fqdn: false,
            ttl: 300,
            strict_view: false,
        }
    }
}

/// Per-connection SMB client settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Default credentials
    pub username: Option<String>,
    pub password: Option<String>,
    pub domain: Option<String>,
    /// Share used for logon validation
    pub logon_share: Option<String>,
    /// Guest credentials used when guest fallback is allowed
    pub guest_username: String,
    pub guest_password: String,
    pub allow_guest_fallback: bool,
    /// Native OS and LanManager identification strings
    pub native_os: Option<String>,
    pub native_lanman: Option<String>,
    // -- timeouts (milliseconds)
    pub conn_timeout: i32,
    pub so_timeout: i32,
    pub session_timeout: i32,
    pub response_timeout: i32,
    // -- buffers (bytes)
    pub rcv_buf_size: i32,
    pub snd_buf_size: i32,
    pub notify_buf_size: i32,
    /// Transaction buffer size; the staged value is reduced by a fixed
    /// 512 byte header reservation when read back
    pub transaction_buf_size: i32,
    // -- directory listing
    pub list_count: i32,
    pub list_size: i32,
    // -- limits
    pub ssn_limit: i32,
    pub max_mpx_count: i32,
    pub max_request_retries: i32,
    // -- local binding
    pub laddr: Option<IpAddr>,
    pub lport: u16,
    /// Attribute cache expiration period, in milliseconds
    pub attr_expiration_period: i64,
    /// Raw capability bits announced to the server
    pub capabilities: i32,
    /// Raw FLAGS2 bits announced to the server
    pub flags2: i32,
    /// Negotiated dialect bounds
    pub min_version: DialectVersion,
    pub max_version: DialectVersion,
    pub dfs: DfsSettings,
    // -- protocol and security switches
    pub use_unicode: bool,
    pub force_unicode: bool,
    pub use_nt_status: bool,
    pub use_nt_smbs: bool,
    pub use_extended_security: bool,
    pub force_extended_security: bool,
    pub use_smb2_negotiation: bool,
    pub signing_preferred: bool,
    pub signing_enforced: bool,
    pub ipc_signing_enforced: bool,
    pub encryption_enabled: bool,
    pub require_secure_negotiate: bool,
    pub send_ntlm_target_name: bool,
    pub disable_plain_text_passwords: bool,
    pub disable_spnego_integrity: bool,
    pub enforce_spnego_integrity: bool,
    pub disable_idle_timeout: bool,
    pub use_batching: bool,
    pub use_large_read_write: bool,
    pub ignore_copy_to_exception: bool,
    pub tcp_no_delay: bool,
    pub port139_enabled: bool,
    pub strict_resource_lifecycle: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            domain: None,
            logon_share: None,
            guest_username: "GUEST".to_string(),
            guest_password: String::new(),
            allow_guest_fallback: false,
            native_os: None,
            native_lanman: None,
            conn_timeout: 35000,
            so_timeout: 35000,
            session_timeout: 35000,
            response_timeout: 30000,
            rcv_buf_size: 65535,
            snd_buf_size: 65535,
            notify_buf_size: 1024,
            transaction_buf_size: 65023,
            list_count: 200,
            list_size: 65435,
            ssn_limit: 250,
            max_mpx_count: 10,
            max_request_retries: 2,
            laddr: None,
            lport: 0,
            attr_expiration_period: 5000,
            capabilities: 0,
            flags2: 0,
            min_version: DialectVersion::Smb1,
            max_version: DialectVersion::Smb311,
            dfs: DfsSettings::default(),
            use_unicode: true,
            force_unicode: false,
            use_nt_status: true,
            use_nt_smbs: true,
            use_extended_security: true,
            force_extended_security: false,
            use_smb2_negotiation: false,
            signing_preferred: false,
            signing_enforced: false,
            ipc_signing_enforced: true,
            encryption_enabled: false,
            require_secure_negotiate: true,
            send_ntlm_target_name: true,
            disable_plain_text_passwords: true,
            disable_spnego_integrity: false,
            enforce_spnego_integrity: false,
            disable_idle_timeout: false,
            use_batching: false,
            use_large_read_write: true,
            ignore_copy_to_exception: true,
            tcp_no_delay: false,
            port139_enabled: false,
            strict_resource_lifecycle: false,
        }
    }
}

impl ClientSettings {
    pub(super) fn set(&mut self, key: &str, raw: &str) -> ConfigResult<()> {
        match key {
            "smb.client.username" => self.username = Some(raw.to_string()),
            "smb.client.password" => self.password = Some(raw.to_string()),
            "smb.client.domain" => self.domain = Some(raw.to_string()),
            "smb.client.logon_share" => self.logon_share = Some(raw.to_string()),
            "smb.client.guest_username" => self.guest_username = raw.to_string(),
            "smb.client.guest_password" => self.guest_password = raw.to_string(),
            "smb.client.allow_guest_fallback" => {
                self.allow_guest_fallback = parse_bool(key, raw)?
            }
            "smb.client.native_os" => self.native_os = Some(raw.to_string()),
            "smb.client.native_lanman" => self.native_lanman = Some(raw.to_string()),
            "smb.client.conn_timeout" => self.conn_timeout = parse_i32(key, raw)?,
            "smb.client.so_timeout" => self.so_timeout = parse_i32(key, raw)?,
            "smb.client.session_timeout" => self.session_timeout = parse_i32(key, raw)?,
            "smb.client.response_timeout" => self.response_timeout = parse_i32(key, raw)?,
            "smb.client.rcv_buf_size" => self.rcv_buf_size = parse_i32(key, raw)?,
            "smb.client.snd_buf_size" => self.snd_buf_size = parse_i32(key, raw)?,
            "smb.client.notify_buf_size" => self.notify_buf_size = parse_i32(key, raw)?,
            // the staged value counts the 512 byte header reservation
            "smb.client.transaction_buf_size" => {
                self.transaction_buf_size = parse_i32(key, raw)?.saturating_sub(512)
            }
            "smb.client.list_count" => self.list_count = parse_i32(key, raw)?,
            "smb.client.list_size" => self.list_size = parse_i32(key, raw)?,
            "smb.client.ssn_limit" => self.ssn_limit = parse_i32(key, raw)?,
            "smb.client.max_mpx_count" => self.max_mpx_count = parse_i32(key, raw)?,
            "smb.client.max_request_retries" => {
                self.max_request_retries = parse_i32(key, raw)?
            }
            "smb.client.laddr" => self.laddr = Some(resolve_host(key, raw)?),
            "smb.client.lport" => self.lport = parse_u16(key, raw)?,
            "smb.client.attr_expiration_period" => {
                self.attr_expiration_period = parse_i64(key, raw)?
            }
            "smb.client.capabilities" => self.capabilities = parse_i32(key, raw)?,
            "smb.client.flags2" => self.flags2 = parse_i32(key, raw)?,
            "smb.client.min_version" => self.min_version = parse_dialect(key, raw)?,
            "smb.client.max_version" => self.max_version = parse_dialect(key, raw)?,
            "smb.client.dfs.disabled" => self.dfs.disabled = parse_bool(key, raw)?,
            "smb.client.dfs.convert_to_fqdn" => {
                self.dfs.convert_to_fqdn = parse_bool(key, raw)?
            }
            "smb.client.dfs.ttl" => self.dfs.ttl = parse_i64(key, raw)?,
            "smb.client.dfs.strict_view" => self.dfs.strict_view = parse_bool(key, raw)?,
            "smb.client.use_unicode" => self.use_unicode = parse_bool(key, raw)?,
            "smb.client.force_unicode" => self.force_unicode = parse_bool(key, raw)?,
            "smb.client.use_nt_status" => self.use_nt_status = parse_bool(key, raw)?,
            "smb.client.use_nt_smbs" => self.use_nt_smbs = parse_bool(key, raw)?,
            "smb.client.use_extended_security" => {
                self.use_extended_security = parse_bool(key, raw)?
            }
            "smb.client.force_extended_security" => {
                self.force_extended_security = parse_bool(key, raw)?
            }
            "smb.client.use_smb2_negotiation" => {
                self.use_smb2_negotiation = parse_bool(key, raw)?
            }
            "smb.client.signing_preferred" => self.signing_preferred = parse_bool(key, raw)?,
            "smb.client.signing_enforced" => self.signing_enforced = parse_bool(key, raw)?,
            "smb.client.ipc_signing_enforced" => {
                self.ipc_signing_enforced = parse_bool(key, raw)?
            }
            "smb.client.encryption_enabled" => {
                self.encryption_enabled = parse_bool(key, raw)?
            }
            "smb.client.require_secure_negotiate" => {
                self.require_secure_negotiate = parse_bool(key, raw)?
            }
            "smb.client.send_ntlm_target_name" => {
                self.send_ntlm_target_name = parse_bool(key, raw)?
            }
            "smb.client.disable_plain_text_passwords" => {
                self.disable_plain_text_passwords = parse_bool(key, raw)?
            }
            "smb.client.disable_spnego_integrity" => {
                self.disable_spnego_integrity = parse_bool(key, raw)?
            }
            "smb.client.enforce_spnego_integrity" => {
                self.enforce_spnego_integrity = parse_bool(key, raw)?
            }
            "smb.client.disable_idle_timeout" => {
                self.disable_idle_timeout = parse_bool(key, raw)?
            }
            "smb.client.use_batching" => self.use_batching = parse_bool(key, raw)?,
            "smb.client.use_large_read_write" => {
                self.use_large_read_write = parse_bool(key, raw)?
            }
            "smb.client.ignore_copy_to_exception" => {
                self.ignore_copy_to_exception = parse_bool(key, raw)?
            }
            "smb.client.tcp_no_delay" => self.tcp_no_delay = parse_bool(key, raw)?,
            "smb.client.port139_enabled" => self.port139_enabled = parse_bool(key, raw)?,
            "smb.client.strict_resource_lifecycle" => {
                self.strict_resource_lifecycle = parse_bool(key, raw)?
            }
            _ => debug!("ignoring unknown configuration property [{}]", key),
        }
        Ok(())
    }
}

fn parse_dialect(key: &str, raw: &str) -> ConfigResult<DialectVersion> {
    raw.parse::<DialectVersion>().map_err(|e| ConfigError::Property {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
