//! # dialect
//!
//! SMB protocol dialect versions

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{IntoEnumIterator, VariantNames};

use crate::error::OptionError;

/// SMB protocol version tag, ordered from oldest to newest dialect
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::VariantNames,
)]
pub enum DialectVersion {
    /// Legacy SMB1/CIFS
    #[serde(rename = "SMB1")]
    #[strum(serialize = "SMB1")]
    Smb1,
    /// SMB 2.0.2
    #[serde(rename = "SMB202")]
    #[strum(serialize = "SMB202")]
    Smb202,
    /// SMB 2.1
    #[serde(rename = "SMB210")]
    #[strum(serialize = "SMB210")]
    Smb210,
    /// SMB 3.0
    #[serde(rename = "SMB300")]
    #[strum(serialize = "SMB300")]
    Smb300,
    /// SMB 3.0.2
    #[serde(rename = "SMB302")]
    #[strum(serialize = "SMB302")]
    Smb302,
    /// SMB 3.1.1
    #[serde(rename = "SMB311")]
    #[strum(serialize = "SMB311")]
    Smb311,
}

impl DialectVersion {
    /// Comma separated list of all version tokens, sorted
    pub fn possible_values() -> String {
        Self::VARIANTS.join(", ")
    }
}

impl FromStr for DialectVersion {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|version| version.to_string() == s)
            .ok_or_else(|| OptionError::UnknownDialect {
                token: s.to_string(),
                possible: Self::possible_values(),
            })
    }
}
