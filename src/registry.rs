//! # registry
//!
//! Resolver registry mapping external option names to descriptors

use std::collections::BTreeMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::{OptionError, OptionResult};
use crate::option::{OptionDescriptor, OptionKind, SmbFileOption};

const fn opt(
    name: &'static str,
    property: &'static str,
    kind: OptionKind,
) -> OptionDescriptor {
    OptionDescriptor::new(name, property, kind)
}

use OptionKind::{Bool, Dialect, Int, Long, Str, StrList};

/// The builtin option table. One entry per external option name.
static BUILTIN: &[OptionDescriptor] = &[
    opt("smb:allowNtlmFallback", "smb.allow_ntlm_fallback", Bool),
    opt("smb:bufferCacheSize", "smb.max_buffers", Int),
    opt("smb:client.allowGuestFallback", "smb.client.allow_guest_fallback", Bool),
    opt("smb:client.attributeCacheTimeout", "smb.client.attr_expiration_period", Long),
    opt("smb:client.capabilities", "smb.client.capabilities", Int),
    opt("smb:client.connectionTimeout", "smb.client.conn_timeout", Int),
    opt("smb:client.defaultDomain", "smb.client.domain", Str),
    opt("smb:client.defaultPassword", "smb.client.password", Str),
    opt("smb:client.defaultUserName", "smb.client.username", Str),
    opt("smb:client.dfsConvertToFqdn", "smb.client.dfs.convert_to_fqdn", Bool),
    opt("smb:client.dfsDisabled", "smb.client.dfs.disabled", Bool),
    opt("smb:client.dfsStrictView", "smb.client.dfs.strict_view", Bool),
    opt("smb:client.dfsTtl", "smb.client.dfs.ttl", Long),
    opt("smb:client.disableIdleTimeout", "smb.client.disable_idle_timeout", Bool),
    opt("smb:client.disablePlainTextPasswords", "smb.client.disable_plain_text_passwords", Bool),
    opt("smb:client.disableSpnegoIntegrity", "smb.client.disable_spnego_integrity", Bool),
    opt("smb:client.encryptionEnabled", "smb.client.encryption_enabled", Bool),
    opt("smb:client.enforceSpnegoIntegrity", "smb.client.enforce_spnego_integrity", Bool),
    opt("smb:client.flags2", "smb.client.flags2", Int),
    opt("smb:client.forceExtendedSecurity", "smb.client.force_extended_security", Bool),
    opt("smb:client.forceUnicode", "smb.client.force_unicode", Bool),
    opt("smb:client.guestPassword", "smb.client.guest_password", Str),
    opt("smb:client.guestUserName", "smb.client.guest_username", Str),
    opt("smb:client.ignoreCopyToExceptions", "smb.client.ignore_copy_to_exception", Bool),
    opt("smb:client.ipcSigningEnforced", "smb.client.ipc_signing_enforced", Bool),
    opt("smb:client.listCount", "smb.client.list_count", Int),
    opt("smb:client.listSize", "smb.client.list_size", Int),
    // the capitalization quirk of this name is historical and kept as-is
    opt("smb:client.LocalAddress", "smb.client.laddr", Str),
    opt("smb:client.localPort", "smb.client.lport", Int),
    opt("smb:client.logonShare", "smb.client.logon_share", Str),
    opt("smb:client.maxMpxCount", "smb.client.max_mpx_count", Int),
    opt("smb:client.maxRequestRetries", "smb.client.max_request_retries", Int),
    opt("smb:client.nativeLanman", "smb.client.native_lanman", Str),
    opt("smb:client.nativeOs", "smb.client.native_os", Str),
    opt("smb:client.notifyBufferSize", "smb.client.notify_buf_size", Int),
    opt("smb:client.port139Enabled", "smb.client.port139_enabled", Bool),
    opt("smb:client.receiveBufferSize", "smb.client.rcv_buf_size", Int),
    opt("smb:client.requireSecureNegotiate", "smb.client.require_secure_negotiate", Bool),
    opt("smb:client.responseTimeout", "smb.client.response_timeout", Int),
    opt("smb:client.sendBufferSize", "smb.client.snd_buf_size", Int),
    opt("smb:client.sendNtlmTargetName", "smb.client.send_ntlm_target_name", Bool),
    opt("smb:client.sessionLimit", "smb.client.ssn_limit", Int),
    opt("smb:client.sessionTimeout", "smb.client.session_timeout", Int),
    opt("smb:client.signingEnforced", "smb.client.signing_enforced", Bool),
    opt("smb:client.signingPreferred", "smb.client.signing_preferred", Bool),
    opt("smb:client.socketTimeout", "smb.client.so_timeout", Int),
    opt("smb:client.strictResourceLifecycle", "smb.client.strict_resource_lifecycle", Bool),
    opt("smb:client.tcpNoDelay", "smb.client.tcp_no_delay", Bool),
    opt("smb:client.transactionBufferSize", "smb.client.transaction_buf_size", Int),
    opt("smb:client.useBatching", "smb.client.use_batching", Bool),
    opt("smb:client.useExtendedSecurity", "smb.client.use_extended_security", Bool),
    opt("smb:client.useLargeReadWrite", "smb.client.use_large_read_write", Bool),
    opt("smb:client.useNtSmbs", "smb.client.use_nt_smbs", Bool),
    opt("smb:client.useNtStatus", "smb.client.use_nt_status", Bool),
    opt("smb:client.useSmb2Negotiation", "smb.client.use_smb2_negotiation", Bool),
    opt("smb:client.useUnicode", "smb.client.use_unicode", Bool),
    opt("smb:lmCompatibility", "smb.lm_compatibility", Int),
    opt("smb:maxVersion", "smb.client.max_version", Dialect),
    opt("smb:minVersion", "smb.client.min_version", Dialect),
    opt("smb:netbios.broadcastAddress", "smb.netbios.baddr", Str),
    opt("smb:netbios.cachePolicy", "smb.netbios.cache_policy", Int),
    opt("smb:netbios.hostname", "smb.netbios.hostname", Str),
    opt("smb:netbios.lmhostsFilename", "smb.netbios.lmhosts", Str),
    opt("smb:netbios.localAddress", "smb.netbios.laddr", Str),
    opt("smb:netbios.localPort", "smb.netbios.lport", Int),
    opt("smb:netbios.receiveBufferSize", "smb.netbios.rcv_buf_size", Int),
    opt("smb:netbios.retryCount", "smb.netbios.retry_count", Int),
    opt("smb:netbios.retryTimeout", "smb.netbios.retry_timeout", Int),
    opt("smb:netbios.scope", "smb.netbios.scope", Str),
    opt("smb:netbios.sendBufferSize", "smb.netbios.snd_buf_size", Int),
    opt("smb:netbios.socketTimeout", "smb.netbios.so_timeout", Int),
    opt("smb:netbios.wins", "smb.netbios.wins", StrList),
    opt("smb:oemEncoding", "smb.encoding", Str),
    opt("smb:traceResources", "smb.trace_resources", Bool),
    opt("smb:useRawNtlm", "smb.use_raw_ntlm", Bool),
];

/// Registry of option resolvers keyed by external option name.
///
/// New option types can be registered at runtime without touching the
/// builtin table.
#[derive(Debug, Default)]
pub struct OptionRegistry {
    table: BTreeMap<&'static str, &'static OptionDescriptor>,
}

impl OptionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the builtin option table
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for descriptor in BUILTIN {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous entry under the same name
    pub fn register(&mut self, descriptor: &'static OptionDescriptor) {
        if self.table.insert(descriptor.name(), descriptor).is_some() {
            debug!("replaced resolver for option {}", descriptor.name());
        }
    }

    /// Resolve an external option name to its descriptor
    pub fn resolve(&self, name: &str) -> OptionResult<&'static OptionDescriptor> {
        self.table
            .get(name)
            .copied()
            .ok_or_else(|| OptionError::UnknownOption(name.to_string()))
    }

    /// Resolve `name` and build an option instance from a JSON value
    pub fn new_instance(&self, name: &str, value: &Value) -> OptionResult<SmbFileOption> {
        self.resolve(name)?.new_instance(value)
    }

    /// Iterate over all registered descriptors
    pub fn iter(&self) -> impl Iterator<Item = &'static OptionDescriptor> + '_ {
        self.table.values().copied()
    }

    /// All registered option names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.table.keys().copied().collect()
    }

    /// Amount of registered options
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

static DEFAULT_REGISTRY: Lazy<RwLock<OptionRegistry>> =
    Lazy::new(|| RwLock::new(OptionRegistry::with_builtin()));

/// Resolve `name` in the default registry and build an option from a JSON value
pub fn resolve_option(name: &str, value: &Value) -> OptionResult<SmbFileOption> {
    DEFAULT_REGISTRY
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .new_instance(name, value)
}

/// Register a descriptor into the default registry
pub fn register_option(descriptor: &'static OptionDescriptor) {
    DEFAULT_REGISTRY
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .register(descriptor);
}

/// Resolve an external option name to its descriptor in the default registry
pub(crate) fn descriptor(name: &str) -> OptionResult<&'static OptionDescriptor> {
    DEFAULT_REGISTRY
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .resolve(name)
}
