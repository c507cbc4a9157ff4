use crate::error::ConfigError;
use crate::router::DeviceClass;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STATUS: &str = "Hey there! I am using Parley.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSetting {
    /// Follow the window width.
    #[default]
    Auto,
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registration_delay_ms: u64,
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
    pub mobile_breakpoint_px: i32,
    pub default_status: String,
    pub seed_demo_conversations: bool,
    pub device: DeviceSetting,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registration_delay_ms: 1500,
            reply_delay_min_ms: 1000,
            reply_delay_max_ms: 3000,
            mobile_breakpoint_px: 768,
            default_status: DEFAULT_STATUS.to_string(),
            seed_demo_conversations: true,
            device: DeviceSetting::Auto,
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("parley.toml"))
    }

    /// Reads `parley.toml` from the user config dir. A missing file or
    /// config dir yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_delay_min_ms >= self.reply_delay_max_ms {
            return Err(ConfigError::InvalidValue {
                key: "reply_delay_max_ms",
                reason: format!(
                    "must be greater than reply_delay_min_ms ({})",
                    self.reply_delay_min_ms
                ),
            });
        }
        if self.mobile_breakpoint_px <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "mobile_breakpoint_px",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }

    pub fn registration_delay(&self) -> Duration {
        Duration::from_millis(self.registration_delay_ms)
    }

    pub fn reply_delay_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.reply_delay_min_ms),
            Duration::from_millis(self.reply_delay_max_ms),
        )
    }

    pub fn device_for_width(&self, width: i32) -> DeviceClass {
        match self.device {
            DeviceSetting::Mobile => DeviceClass::Mobile,
            DeviceSetting::Desktop => DeviceClass::Desktop,
            DeviceSetting::Auto if width < self.mobile_breakpoint_px => DeviceClass::Mobile,
            DeviceSetting::Auto => DeviceClass::Desktop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").expect("empty config parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.reply_delay_range().0, Duration::from_millis(1000));
        assert_eq!(config.registration_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = Config::from_toml_str(
            r#"
            reply_delay_max_ms = 5000
            device = "mobile"
            "#,
        )
        .expect("valid config");
        assert_eq!(config.reply_delay_max_ms, 5000);
        assert_eq!(config.reply_delay_min_ms, 1000);
        assert_eq!(config.device_for_width(4000), DeviceClass::Mobile);
    }

    #[test]
    fn rejects_inverted_delay_window() {
        let err = Config::from_toml_str("reply_delay_min_ms = 3000\nreply_delay_max_ms = 3000")
            .expect_err("window is empty");
        assert!(matches!(err, ConfigError::InvalidValue { key: "reply_delay_max_ms", .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::from_toml_str("device = ").expect_err("not toml");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn auto_device_follows_breakpoint() {
        let config = Config::default();
        assert_eq!(config.device_for_width(767), DeviceClass::Mobile);
        assert_eq!(config.device_for_width(768), DeviceClass::Desktop);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("parley-config-that-does-not-exist.toml");
        assert_eq!(Config::load_from(&path).expect("defaults"), Config::default());
    }
}
