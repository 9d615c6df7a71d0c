//! Explicit per-transform configuration.
//!
//! Transforms never hold mutable configuration of their own. Each one declares
//! the settings it understands as [`SettingSpec`]s, and callers pass the
//! current values in as an [`Options`] map on every encode/decode/detect call.
//! [`Settings`] bundles the options for every registered transform so a single
//! value can be handed to the detection pipeline.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{MtransError, Result};
use crate::transform::Registry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl SettingValue {
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Flag(_) => "flag",
            SettingValue::Number(_) => "number",
            SettingValue::Text(_) => "text",
        }
    }

    fn same_kind(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Parses `raw` into a value of the same kind as `self`.
    pub fn parse_like(&self, raw: &str) -> Option<SettingValue> {
        match self {
            SettingValue::Flag(_) => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(SettingValue::Flag(true)),
                "false" | "no" | "off" | "0" => Some(SettingValue::Flag(false)),
                _ => None,
            },
            SettingValue::Number(_) => raw.trim().parse().ok().map(SettingValue::Number),
            SettingValue::Text(_) => Some(SettingValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Flag(b) => write!(f, "{}", b),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub default: SettingValue,
}

impl SettingSpec {
    pub fn text(name: &'static str, description: &'static str, default: &str) -> Self {
        Self {
            name,
            description,
            default: SettingValue::Text(default.to_string()),
        }
    }

    pub fn number(name: &'static str, description: &'static str, default: i64) -> Self {
        Self {
            name,
            description,
            default: SettingValue::Number(default),
        }
    }
}

/// Setting values for a single transform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, SettingValue>,
}

static EMPTY_OPTIONS: Options = Options { values: BTreeMap::new() };

impl Options {
    pub fn from_specs(specs: &[SettingSpec]) -> Self {
        Self {
            values: specs
                .iter()
                .map(|s| (s.name.to_string(), s.default.clone()))
                .collect(),
        }
    }

    pub fn empty() -> &'static Options {
        &EMPTY_OPTIONS
    }

    pub fn with(mut self, name: &str, value: SettingValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(SettingValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(SettingValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(SettingValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Options for every transform in a registry, keyed by transform key.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    by_transform: HashMap<String, Options>,
}

impl Settings {
    /// Seeds every transform with its declared defaults.
    pub fn defaults(registry: &Registry) -> Self {
        let by_transform = registry
            .entries()
            .map(|e| (e.key().to_string(), e.default_options().clone()))
            .collect();
        Self { by_transform }
    }

    pub fn options(&self, key: &str) -> &Options {
        self.by_transform.get(key).unwrap_or(Options::empty())
    }

    /// Replaces one setting after checking that the transform declares it and
    /// that the value has the declared kind.
    pub fn set(&mut self, registry: &Registry, key: &str, name: &str, value: SettingValue) -> Result<()> {
        let entry = registry.entry(key)?;
        let spec = entry
            .settings()
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| MtransError::unknown_setting(entry.key(), name))?;

        if !spec.default.same_kind(&value) {
            return Err(MtransError::invalid_setting(
                entry.key(),
                name,
                format!("expected {}, got {}", spec.default.kind(), value.kind()),
            ));
        }

        self.by_transform
            .entry(entry.key().to_string())
            .or_insert_with(|| entry.default_options().clone())
            .values
            .insert(name.to_string(), value);
        Ok(())
    }

    /// Like [`Settings::set`], parsing `raw` according to the declared kind.
    pub fn set_raw(&mut self, registry: &Registry, key: &str, name: &str, raw: &str) -> Result<()> {
        let entry = registry.entry(key)?;
        let spec = entry
            .settings()
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| MtransError::unknown_setting(entry.key(), name))?;
        let value = spec.default.parse_like(raw).ok_or_else(|| {
            MtransError::invalid_setting(entry.key(), name, format!("expected {}, got '{}'", spec.default.kind(), raw))
        })?;
        self.set(registry, key, name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_like() {
        let n = SettingValue::Number(3);
        assert_eq!(n.parse_like("7"), Some(SettingValue::Number(7)));
        assert_eq!(n.parse_like("seven"), None);
        let f = SettingValue::Flag(false);
        assert_eq!(f.parse_like("yes"), Some(SettingValue::Flag(true)));
        let t = SettingValue::Text(String::new());
        assert_eq!(t.parse_like("LEMON"), Some(SettingValue::Text("LEMON".into())));
    }

    #[test]
    fn test_defaults_seeded_from_registry() {
        let registry = Registry::global();
        let settings = Settings::defaults(registry);
        assert_eq!(settings.options("caesar").number("shift"), Some(3));
        assert_eq!(settings.options("vigenere").text("key"), Some("KEY"));
        assert!(settings.options("no-such-transform").get("shift").is_none());
    }

    #[test]
    fn test_set_validates_name_and_kind() {
        let registry = Registry::global();
        let mut settings = Settings::defaults(registry);

        settings.set_raw(registry, "caesar", "shift", "5").unwrap();
        assert_eq!(settings.options("caesar").number("shift"), Some(5));

        assert!(matches!(
            settings.set_raw(registry, "caesar", "key", "x"),
            Err(MtransError::UnknownSetting { .. })
        ));
        assert!(matches!(
            settings.set(registry, "caesar", "shift", SettingValue::Text("5".into())),
            Err(MtransError::InvalidSetting { .. })
        ));
        assert!(matches!(
            settings.set_raw(registry, "nope", "shift", "1"),
            Err(MtransError::UnknownTransform { .. })
        ));
    }

    #[test]
    fn test_deserialize_untagged() {
        let v: BTreeMap<String, SettingValue> = toml::from_str("shift = 4\nkey = \"abc\"\nflip = true").unwrap();
        assert_eq!(v["shift"], SettingValue::Number(4));
        assert_eq!(v["key"], SettingValue::Text("abc".into()));
        assert_eq!(v["flip"], SettingValue::Flag(true));
    }
}
