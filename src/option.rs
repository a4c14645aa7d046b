//! # option
//!
//! Typed, JSON-convertible SMB configuration options

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::config::{MountOptions, PropertyMap, SmbContext};
use crate::dialect::DialectVersion;
use crate::error::{ConfigError, ConfigResult, OptionError, OptionResult};
use crate::registry;

/// The primitive shape of an option value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum OptionKind {
    #[strum(serialize = "boolean")]
    Bool,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "long")]
    Long,
    #[strum(serialize = "string")]
    Str,
    #[strum(serialize = "list of string")]
    StrList,
    #[strum(serialize = "dialect version")]
    Dialect,
}

/// A validated native option value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Str(String),
    StrList(Vec<String>),
    Dialect(DialectVersion),
}

impl OptionValue {
    /// Get the shape of this value
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Bool(_) => OptionKind::Bool,
            Self::Int(_) => OptionKind::Int,
            Self::Long(_) => OptionKind::Long,
            Self::Str(_) => OptionKind::Str,
            Self::StrList(_) => OptionKind::StrList,
            Self::Dialect(_) => OptionKind::Dialect,
        }
    }

    /// Get the canonical JSON form of this value
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(value) => Value::from(*value),
            Self::Int(value) => Value::from(*value),
            Self::Long(value) => Value::from(*value),
            Self::Str(value) => Value::from(value.as_str()),
            Self::StrList(values) => Value::from(values.clone()),
            Self::Dialect(version) => Value::from(version.to_string()),
        }
    }

    /// Get the text representation staged into the property map.
    /// Lists are comma-joined; all other values use their plain formatting.
    pub fn to_text(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Long(value) => value.to_string(),
            Self::Str(value) => value.clone(),
            Self::StrList(values) => values.join(","),
            Self::Dialect(version) => version.to_string(),
        }
    }
}

/// Coerce a JSON value into a native one, validating it against the expected shape
fn coerce(kind: OptionKind, name: &str, json: &Value) -> OptionResult<OptionValue> {
    let shape = |expected: OptionKind| OptionError::InvalidShape {
        name: name.to_string(),
        expected,
    };
    match kind {
        OptionKind::Bool => json.as_bool().map(OptionValue::Bool).ok_or_else(|| shape(kind)),
        OptionKind::Int => json
            .as_i64()
            .and_then(|number| i32::try_from(number).ok())
            .map(OptionValue::Int)
            .ok_or_else(|| shape(kind)),
        OptionKind::Long => json.as_i64().map(OptionValue::Long).ok_or_else(|| shape(kind)),
        OptionKind::Str => json
            .as_str()
            .map(|value| OptionValue::Str(value.to_string()))
            .ok_or_else(|| shape(kind)),
        OptionKind::StrList => json
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(ToString::to_string))
                    .collect::<Option<Vec<String>>>()
            })
            .map(OptionValue::StrList)
            .ok_or_else(|| shape(kind)),
        OptionKind::Dialect => {
            // a dialect option is a string option with an enumerated value set
            let token = json.as_str().ok_or_else(|| shape(OptionKind::Str))?;
            DialectVersion::from_str(token)
                .map(OptionValue::Dialect)
                .map_err(|_| OptionError::InvalidDialect {
                    name: name.to_string(),
                    possible: DialectVersion::possible_values(),
                })
        }
    }
}

/// Describes one configuration option: its external JSON-facing name, the
/// property key staged for the client configuration and its value shape.
/// A descriptor acts as the resolver for its option and can build instances
/// from JSON values.
#[derive(Debug)]
pub struct OptionDescriptor {
    name: &'static str,
    property: &'static str,
    kind: OptionKind,
}

impl OptionDescriptor {
    /// Create a new descriptor
    pub const fn new(name: &'static str, property: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            property,
            kind,
        }
    }

    /// External JSON-facing option name (e.g. `smb:client.dfsTtl`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Property key staged for the client configuration (e.g. `smb.client.dfs.ttl`)
    pub fn property(&self) -> &'static str {
        self.property
    }

    /// Value shape of this option
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Build an option instance from a JSON value, validating it eagerly
    pub fn new_instance(&'static self, value: &Value) -> OptionResult<SmbFileOption> {
        let value = coerce(self.kind, self.name, value)?;
        Ok(SmbFileOption {
            descriptor: self,
            value,
        })
    }
}

/// A single named, typed configuration option.
///
/// Immutable once constructed and safe for concurrent read-only use.
/// Converts bidirectionally with JSON and can be applied onto a
/// [`MountOptions`] container.
#[derive(Debug, Clone)]
pub struct SmbFileOption {
    descriptor: &'static OptionDescriptor,
    value: OptionValue,
}

impl SmbFileOption {
    /// Resolve `name` in the default registry and build the option from a JSON value
    pub fn from_json(name: &str, value: &Value) -> OptionResult<Self> {
        registry::resolve_option(name, value)
    }

    /// Build the named option from a native boolean value
    pub fn boolean(name: &str, value: bool) -> OptionResult<Self> {
        Self::typed(name, OptionValue::Bool(value))
    }

    /// Build the named option from a native int value
    pub fn int(name: &str, value: i32) -> OptionResult<Self> {
        Self::typed(name, OptionValue::Int(value))
    }

    /// Build the named option from a native long value
    pub fn long(name: &str, value: i64) -> OptionResult<Self> {
        Self::typed(name, OptionValue::Long(value))
    }

    /// Build the named option from a native string value
    pub fn string(name: &str, value: impl Into<String>) -> OptionResult<Self> {
        Self::typed(name, OptionValue::Str(value.into()))
    }

    /// Build the named option from a native list of strings
    pub fn string_list(name: &str, values: Vec<String>) -> OptionResult<Self> {
        Self::typed(name, OptionValue::StrList(values))
    }

    /// Build the named option from a dialect version
    pub fn dialect(name: &str, version: DialectVersion) -> OptionResult<Self> {
        Self::typed(name, OptionValue::Dialect(version))
    }

    fn typed(name: &str, value: OptionValue) -> OptionResult<Self> {
        let descriptor = registry::descriptor(name)?;
        if descriptor.kind() != value.kind() {
            return Err(OptionError::KindMismatch {
                name: name.to_string(),
                kind: value.kind(),
            });
        }
        Ok(Self { descriptor, value })
    }

    /// External JSON-facing option name
    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Property key this option stages its value under
    pub fn property_key(&self) -> &'static str {
        self.descriptor.property()
    }

    /// Value shape of this option
    pub fn kind(&self) -> OptionKind {
        self.descriptor.kind()
    }

    /// Canonical JSON form of the option value
    pub fn value(&self) -> Value {
        self.value.to_json()
    }

    /// Text representation of the option value, as staged into the property map
    pub fn value_as_text(&self) -> String {
        self.value.to_text()
    }

    /// Stage the formatted property value into `properties`
    pub fn stage(&self, properties: &mut PropertyMap) {
        properties.insert(self.property_key().to_string(), self.value_as_text());
    }

    /// Apply this option onto the shared mount options container.
    ///
    /// Stages the property into a fresh map, builds the client configuration
    /// context from it and attaches the context to `options`, replacing any
    /// previously attached one. Fails if the context rejects the property.
    pub fn apply(&self, options: &mut MountOptions) -> ConfigResult<()> {
        trace!("applying option {}", self.name());
        let mut properties = PropertyMap::new();
        self.stage(&mut properties);
        let context = SmbContext::new(properties).map_err(|e| {
            error!("cannot apply option {}: {}", self.name(), e);
            ConfigError::Apply {
                name: self.name().to_string(),
                source: Box::new(e),
            }
        })?;
        options.set_smb_context(context);
        Ok(())
    }
}

impl PartialEq for SmbFileOption {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.value == other.value
    }
}

impl Eq for SmbFileOption {}

impl Hash for SmbFileOption {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for SmbFileOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut document = serde_json::Map::new();
        document.insert(self.name().to_string(), self.value());
        write!(f, "{}", Value::Object(document))
    }
}

impl Serialize for SmbFileOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name(), &self.value())?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for SmbFileOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionVisitor;

        impl<'de> Visitor<'de> for OptionVisitor {
            type Value = SmbFileOption;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an object with a single option entry")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let (name, value): (String, Value) = map
                    .next_entry()?
                    .ok_or_else(|| de::Error::custom(OptionError::MissingValue))?;
                if map.next_entry::<String, Value>()?.is_some() {
                    return Err(de::Error::custom("expected a single option entry"));
                }
                SmbFileOption::from_json(&name, &value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(OptionVisitor)
    }
}

#[cfg(test)]
mod test {

    use std::collections::hash_map::DefaultHasher;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn hash_of(option: &SmbFileOption) -> u64 {
        let mut hasher = DefaultHasher::new();
        option.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn should_round_trip_boolean() {
        crate::mock::logger();
        let option = SmbFileOption::from_json("smb:client.tcpNoDelay", &json!(true))
            .ok()
            .unwrap();
        assert_eq!(option.value(), json!(true));
        assert_eq!(option.value_as_text(), "true");
    }

    #[test]
    fn should_round_trip_int() {
        let option = SmbFileOption::from_json("smb:client.socketTimeout", &json!(35000))
            .ok()
            .unwrap();
        assert_eq!(option.value(), json!(35000));
        assert_eq!(option.value_as_text(), "35000");
    }

    #[test]
    fn should_round_trip_long() {
        let option = SmbFileOption::from_json("smb:client.dfsTtl", &json!(300))
            .ok()
            .unwrap();
        assert_eq!(option.value(), json!(300));
        assert_eq!(option.value_as_text(), "300");
    }

    #[test]
    fn should_round_trip_string() {
        let option = SmbFileOption::from_json("smb:client.defaultUserName", &json!("omar"))
            .ok()
            .unwrap();
        assert_eq!(option.value(), json!("omar"));
        assert_eq!(option.value_as_text(), "omar");
    }

    #[test]
    fn should_round_trip_string_list() {
        let option =
            SmbFileOption::from_json("smb:netbios.wins", &json!(["localhost", "127.0.0.1"]))
                .ok()
                .unwrap();
        assert_eq!(option.value(), json!(["localhost", "127.0.0.1"]));
        assert_eq!(option.value_as_text(), "localhost,127.0.0.1");
    }

    #[test]
    fn should_round_trip_dialect() {
        let option = SmbFileOption::from_json("smb:minVersion", &json!("SMB210"))
            .ok()
            .unwrap();
        assert_eq!(option.value(), json!("SMB210"));
        assert_eq!(option.value_as_text(), "SMB210");
    }

    #[test]
    fn should_accept_int_boundaries() {
        assert!(
            SmbFileOption::from_json("smb:client.socketTimeout", &json!(i32::MIN)).is_ok()
        );
        assert!(
            SmbFileOption::from_json("smb:client.socketTimeout", &json!(i32::MAX)).is_ok()
        );
    }

    #[test]
    fn should_reject_int_out_of_range() {
        let too_large = i64::from(i32::MAX) + 1;
        assert_eq!(
            SmbFileOption::from_json("smb:client.socketTimeout", &json!(too_large))
                .err()
                .unwrap()
                .to_string(),
            "value of [smb:client.socketTimeout] must be int"
        );
    }

    #[test]
    fn should_accept_long_boundaries() {
        assert!(SmbFileOption::from_json("smb:client.dfsTtl", &json!(i64::MIN)).is_ok());
        assert!(SmbFileOption::from_json("smb:client.dfsTtl", &json!(i64::MAX)).is_ok());
    }

    #[test]
    fn should_reject_long_out_of_range() {
        // 2^63 is representable as JSON number but not as long
        let too_large = i64::MAX as u64 + 1;
        assert_eq!(
            SmbFileOption::from_json("smb:client.dfsTtl", &json!(too_large))
                .err()
                .unwrap()
                .to_string(),
            "value of [smb:client.dfsTtl] must be long"
        );
    }

    #[test]
    fn should_reject_bad_boolean_shape() {
        for bad in [json!(null), json!(1), json!("true"), json!([]), json!({})] {
            assert_eq!(
                SmbFileOption::from_json("smb:client.tcpNoDelay", &bad)
                    .err()
                    .unwrap()
                    .to_string(),
                "value of [smb:client.tcpNoDelay] must be boolean"
            );
        }
    }

    #[test]
    fn should_reject_bad_int_shape() {
        for bad in [
            json!(null),
            json!(true),
            json!(false),
            json!(""),
            json!(1.5),
            json!([]),
            json!({}),
        ] {
            assert_eq!(
                SmbFileOption::from_json("smb:client.socketTimeout", &bad)
                    .err()
                    .unwrap()
                    .to_string(),
                "value of [smb:client.socketTimeout] must be int"
            );
        }
    }

    #[test]
    fn should_reject_bad_string_shape() {
        assert_eq!(
            SmbFileOption::from_json("smb:client.defaultUserName", &json!(7))
                .err()
                .unwrap()
                .to_string(),
            "value of [smb:client.defaultUserName] must be string"
        );
    }

    #[test]
    fn should_reject_bad_string_list_shape() {
        for bad in [json!("localhost"), json!(["localhost", 1]), json!(null)] {
            assert_eq!(
                SmbFileOption::from_json("smb:netbios.wins", &bad)
                    .err()
                    .unwrap()
                    .to_string(),
                "value of [smb:netbios.wins] must be list of string"
            );
        }
    }

    #[test]
    fn should_reject_bad_dialect_token() {
        assert_eq!(
            SmbFileOption::from_json("smb:maxVersion", &json!("SMB999"))
                .err()
                .unwrap()
                .to_string(),
            "value of [smb:maxVersion] must be either [SMB1, SMB202, SMB210, SMB300, SMB302, SMB311]"
        );
        // a non-string dialect value fails string validation first
        assert_eq!(
            SmbFileOption::from_json("smb:maxVersion", &json!(311))
                .err()
                .unwrap()
                .to_string(),
            "value of [smb:maxVersion] must be string"
        );
    }

    #[test]
    fn should_build_from_native_values() {
        assert_eq!(
            SmbFileOption::boolean("smb:client.tcpNoDelay", true)
                .ok()
                .unwrap()
                .value(),
            json!(true)
        );
        assert_eq!(
            SmbFileOption::int("smb:client.socketTimeout", i32::MAX)
                .ok()
                .unwrap()
                .value(),
            json!(i32::MAX)
        );
        assert_eq!(
            SmbFileOption::long("smb:client.attributeCacheTimeout", i64::MAX)
                .ok()
                .unwrap()
                .value(),
            json!(i64::MAX)
        );
        assert_eq!(
            SmbFileOption::string("smb:client.defaultDomain", "WORKGROUP")
                .ok()
                .unwrap()
                .value(),
            json!("WORKGROUP")
        );
        assert_eq!(
            SmbFileOption::string_list(
                "smb:netbios.wins",
                vec!["localhost".to_string(), "127.0.0.1".to_string()]
            )
            .ok()
            .unwrap()
            .value(),
            json!(["localhost", "127.0.0.1"])
        );
        assert_eq!(
            SmbFileOption::dialect("smb:minVersion", DialectVersion::Smb300)
                .ok()
                .unwrap()
                .value(),
            json!("SMB300")
        );
    }

    #[test]
    fn should_not_build_from_mismatched_native_value() {
        assert_eq!(
            SmbFileOption::boolean("smb:client.socketTimeout", true)
                .err()
                .unwrap()
                .to_string(),
            "option [smb:client.socketTimeout] is not a boolean option"
        );
        assert_eq!(
            SmbFileOption::int("smb:client.dfsTtl", 7)
                .err()
                .unwrap()
                .to_string(),
            "option [smb:client.dfsTtl] is not a int option"
        );
    }

    #[test]
    fn should_not_build_unknown_option() {
        assert_eq!(
            SmbFileOption::from_json("smb:client.unknown", &json!(true))
                .err()
                .unwrap()
                .to_string(),
            "unknown option [smb:client.unknown]"
        );
    }

    #[test]
    fn should_be_equal_with_same_name_and_value() {
        let base = SmbFileOption::int("smb:netbios.cachePolicy", 100).ok().unwrap();
        let same = SmbFileOption::int("smb:netbios.cachePolicy", 100).ok().unwrap();
        let another = SmbFileOption::int("smb:netbios.cachePolicy", 101).ok().unwrap();
        assert_eq!(base, same);
        assert_eq!(hash_of(&base), hash_of(&same));
        assert!(base != another);
        assert!(hash_of(&base) != hash_of(&another));
    }

    #[test]
    fn should_display_as_single_entry_object() {
        let option = SmbFileOption::int("smb:netbios.cachePolicy", 100).ok().unwrap();
        assert_eq!(option.to_string(), r#"{"smb:netbios.cachePolicy":100}"#);
    }

    #[test]
    fn should_serialize_as_single_entry_object() {
        let option = SmbFileOption::long("smb:client.dfsTtl", 300).ok().unwrap();
        assert_eq!(
            serde_json::to_string(&option).ok().unwrap(),
            r#"{"smb:client.dfsTtl":300}"#
        );
    }

    #[test]
    fn should_deserialize_from_single_entry_object() {
        let option: SmbFileOption =
            serde_json::from_str(r#"{"smb:client.dfsTtl":300}"#).ok().unwrap();
        assert_eq!(option, SmbFileOption::long("smb:client.dfsTtl", 300).ok().unwrap());
    }

    #[test]
    fn should_not_deserialize_empty_object() {
        assert!(serde_json::from_str::<SmbFileOption>("{}")
            .err()
            .unwrap()
            .to_string()
            .contains("missing required value"));
    }

    #[test]
    fn should_stage_property() {
        let option = SmbFileOption::int("smb:client.listCount", 250).ok().unwrap();
        let mut properties = PropertyMap::new();
        option.stage(&mut properties);
        assert_eq!(
            properties.get("smb.client.list_count").map(String::as_str),
            Some("250")
        );
    }
}
