//! User configuration file (`config.toml`).
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [detect]
//! alternatives = 5
//!
//! [transforms.caesar]
//! shift = 7
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MtransError, Result};
use crate::settings::{SettingValue, Settings};
use crate::transform::Registry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub log: LogConfig,
    pub detect: DetectConfig,
    /// Setting overrides keyed by transform, then setting name.
    pub transforms: BTreeMap<String, BTreeMap<String, SettingValue>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `"debug"` or `"mtrans=trace"`.
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectConfig {
    /// Alternatives printed after the primary decoding.
    pub alternatives: usize,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self { alternatives: 5 }
    }
}

impl AppConfig {
    /// `~/.config/mtrans/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mtrans").join("config.toml"))
    }

    /// Reads `path`, or the default location when `path` is `None`. A missing
    /// default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| MtransError::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Layers the `[transforms.*]` tables over `settings`, validating each
    /// value against the transform's declared settings.
    pub fn apply(&self, registry: &Registry, settings: &mut Settings) -> Result<()> {
        for (key, values) in &self.transforms {
            for (name, value) in values {
                settings.set(registry, key, name, value.clone())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.detect.alternatives, 5);
        assert!(config.log.level.is_none());
        assert!(config.transforms.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml(
            r#"
            [log]
            level = "debug"

            [detect]
            alternatives = 2

            [transforms.caesar]
            shift = 7

            [transforms.vigenere]
            key = "LEMON"
            "#,
        )
        .unwrap();
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.detect.alternatives, 2);

        let registry = Registry::global();
        let mut settings = Settings::defaults(registry);
        config.apply(registry, &mut settings).unwrap();
        assert_eq!(settings.options("caesar").number("shift"), Some(7));
        assert_eq!(settings.options("vigenere").text("key"), Some("LEMON"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = AppConfig::from_toml("[detcet]\nalternatives = 1").unwrap_err();
        assert!(matches!(err, MtransError::Config { .. }));
    }

    #[test]
    fn test_bad_override_rejected() {
        let config = AppConfig::from_toml("[transforms.caesar]\nshift = \"seven\"").unwrap();
        let registry = Registry::global();
        let mut settings = Settings::defaults(registry);
        assert!(matches!(
            config.apply(registry, &mut settings),
            Err(MtransError::InvalidSetting { .. })
        ));

        let config = AppConfig::from_toml("[transforms.nope]\nx = 1").unwrap();
        assert!(matches!(
            config.apply(registry, &mut settings),
            Err(MtransError::UnknownTransform { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/mtrans.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::ExitCode::ConfigError);
    }
}
