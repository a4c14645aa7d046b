//! # config
//!
//! SMB client configuration context and the shared mount options container

use std::collections::BTreeMap;

// -- typed views

mod client;
mod netbios;

pub use client::{ClientSettings, DfsSettings, SmbClientConfig};
pub use netbios::NetbiosSettings;

use crate::error::ConfigResult;

/// String-keyed map of staged configuration properties.
/// Built fresh for each context construction; options insert their
/// formatted value with [`crate::SmbFileOption::stage`].
pub type PropertyMap = BTreeMap<String, String>;

/// SMB client configuration context.
///
/// Holds the raw staged properties along with the typed view parsed from
/// them. Parsing is eager: a context cannot be constructed from properties
/// the client configuration rejects.
#[derive(Debug, Clone, PartialEq)]
pub struct SmbContext {
    properties: PropertyMap,
    config: SmbClientConfig,
}

impl SmbContext {
    /// Build a context from staged properties, parsing the typed
    /// configuration eagerly
    pub fn new(properties: PropertyMap) -> ConfigResult<Self> {
        let config = SmbClientConfig::from_properties(&properties)?;
        Ok(Self { properties, config })
    }

    /// Raw staged properties this context was built from
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Typed view over the staged properties
    pub fn config(&self) -> &SmbClientConfig {
        &self.config
    }
}

/// Shared options container for one filesystem connection.
///
/// Mutated in place by each option application and owned by the caller,
/// which must serialize applications against the same container.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MountOptions {
    smb: Option<SmbContext>,
}

impl MountOptions {
    /// Currently attached SMB context, if any
    pub fn smb_context(&self) -> Option<&SmbContext> {
        self.smb.as_ref()
    }

    /// Attach an SMB context, replacing any previously attached one
    pub fn set_smb_context(&mut self, context: SmbContext) {
        if self.smb.is_some() {
            debug!("replacing previously attached smb context");
        }
        self.smb = Some(context);
    }

    /// Detach and return the SMB context
    pub fn take_smb_context(&mut self) -> Option<SmbContext> {
        self.smb.take()
    }
}
