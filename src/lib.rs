#![crate_name = "vfs_smb_options"]
#![crate_type = "lib"]

//! # vfs-smb-options
//!
//! vfs-smb-options provides typed, JSON-convertible configuration options for SMB
//! virtual filesystems. Each option validates its JSON value eagerly, round-trips
//! back to JSON and can be applied onto a shared [`MountOptions`] container, where
//! it materializes the SMB client configuration context consumed by the mount layer.
//!
//! ## Get started
//!
//! Add **vfs-smb-options** to your project dependencies:
//!
//! ```toml
//! vfs-smb-options = "^0.1"
//! ```
//!
//! these features are supported:
//!
//! - `no-log`: disable logging. By default, this library will log via the `log` crate.
//!
//! ## Resolve and apply an option
//!
//! ```rust
//! use serde_json::json;
//! use vfs_smb_options::{resolve_option, MountOptions};
//!
//! // resolve the option by its external name
//! let option = resolve_option("smb:client.connectionTimeout", &json!(5000)).unwrap();
//! assert_eq!(option.value(), json!(5000));
//!
//! // apply it onto the shared mount options container
//! let mut options = MountOptions::default();
//! option.apply(&mut options).unwrap();
//! assert_eq!(
//!     options.smb_context().unwrap().config().client.conn_timeout,
//!     5000
//! );
//! ```
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

// -- crates
#[macro_use]
extern crate log;

mod config;
mod dialect;
mod error;
mod option;
mod registry;

pub use config::{
    ClientSettings, DfsSettings, MountOptions, NetbiosSettings, PropertyMap, SmbClientConfig,
    SmbContext,
};
pub use dialect::DialectVersion;
pub use error::{ConfigError, ConfigResult, OptionError, OptionResult};
pub use option::{OptionDescriptor, OptionKind, OptionValue, SmbFileOption};
pub use registry::{register_option, resolve_option, OptionRegistry};

// -- utils
pub(crate) mod utils;
// -- mock
#[cfg(test)]
pub(crate) mod mock;
