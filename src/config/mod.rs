//! User preferences stored as `config.json` in the data directory.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    currency::CurrencyStyle,
    errors::ConfigError,
    utils::persistence::DEFAULT_STORAGE_KEY,
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blob key the wish document is stored under.
    pub storage_key: String,
    pub grouping_separator: char,
    pub currency_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        let style = CurrencyStyle::default();
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            grouping_separator: style.grouping_separator,
            currency_suffix: style.suffix,
        }
    }
}

impl Config {
    pub fn currency_style(&self) -> CurrencyStyle {
        CurrencyStyle {
            grouping_separator: self.grouping_separator,
            suffix: self.currency_suffix.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }
        if self.grouping_separator.is_ascii_digit() || self.grouping_separator == '-' {
            return Err(ConfigError::Invalid(format!(
                "grouping_separator `{}` would be read back as part of a number",
                self.grouping_separator
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Missing file means defaults; a present but invalid file is an error.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "wish_matrix_v2");
        assert_eq!(config.currency_style(), CurrencyStyle::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            storage_key: "wishes_test".into(),
            grouping_separator: '.',
            currency_suffix: " JPY".into(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(config.currency_style().format_with_suffix(1234567), "1.234.567 JPY");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "currency_suffix": "yen" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency_suffix, "yen");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.grouping_separator, ',');
    }

    #[test]
    fn invalid_values_are_rejected() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "storage_key": "  " }"#).unwrap();
        assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));

        let digit_separator = Config {
            grouping_separator: '5',
            ..Config::default()
        };
        assert!(manager.save(&digit_separator).is_err());
        assert!(manager.load().is_err());
    }
}
