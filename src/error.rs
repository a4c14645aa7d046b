//! # error
//!
//! Error types exposed by this library

use std::io;

use thiserror::Error;

use crate::option::OptionKind;

/// Result alias for option construction and resolution
pub type OptionResult<T> = Result<T, OptionError>;

/// Result alias for configuration context construction and application
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error raised while building an option from a JSON value or a native value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// The JSON document carried no option entry at all
    #[error("missing required value")]
    MissingValue,
    /// The JSON value does not have the shape required by the option
    #[error("value of [{name}] must be {expected}")]
    InvalidShape {
        name: String,
        expected: OptionKind,
    },
    /// The JSON string is not one of the enumerated dialect versions
    #[error("value of [{name}] must be either [{possible}]")]
    InvalidDialect {
        name: String,
        possible: String,
    },
    /// The token does not name any dialect version
    #[error("[{token}] is not a known dialect version, possible values are [{possible}]")]
    UnknownDialect {
        token: String,
        possible: String,
    },
    /// No resolver is registered under this name
    #[error("unknown option [{0}]")]
    UnknownOption(String),
    /// A native-value constructor was used on an option of a different shape
    #[error("option [{name}] is not a {kind} option")]
    KindMismatch {
        name: String,
        kind: OptionKind,
    },
}

/// Error raised while building the client configuration context or applying an option
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A staged property value cannot be parsed into its typed counterpart
    #[error("invalid value for property [{key}]: {reason}")]
    Property {
        key: String,
        reason: String,
    },
    /// An address-valued property names a host that cannot be resolved
    #[error("cannot resolve host [{host}] for property [{key}]")]
    Resolve {
        key: String,
        host: String,
        #[source]
        source: io::Error,
    },
    /// Context construction failed while applying the named option
    #[error("cannot apply option [{name}]")]
    Apply {
        name: String,
        #[source]
        source: Box<ConfigError>,
    },
}

#[cfg(test)]
mod test {

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_format_shape_error() {
        let error = OptionError::InvalidShape {
            name: "smb:client.dfsTtl".to_string(),
            expected: OptionKind::Long,
        };
        assert_eq!(error.to_string(), "value of [smb:client.dfsTtl] must be long");
    }

    #[test]
    fn should_format_unknown_option_error() {
        let error = OptionError::UnknownOption("smb:client.unknown".to_string());
        assert_eq!(error.to_string(), "unknown option [smb:client.unknown]");
    }

    #[test]
    fn should_format_apply_error_with_source() {
        let source = ConfigError::Property {
            key: "smb.client.lport".to_string(),
            reason: "[70000] is not a valid port".to_string(),
        };
        let error = ConfigError::Apply {
            name: "smb:client.localPort".to_string(),
            source: Box::new(source),
        };
        assert_eq!(error.to_string(), "cannot apply option [smb:client.localPort]");
        assert!(std::error::Error::source(&error).is_some());
    }
}
