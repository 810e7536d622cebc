use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::core::{
    errors::LedgerError,
    ledger_store::DEFAULT_STORAGE_KEY,
    utils::{ensure_dir, write_atomic, PathResolver},
};
use crate::domain::CategoryFilter;

/// Screen shown after start-up and after each change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewTab {
    #[default]
    List,
    Chart,
    Stats,
}

impl fmt::Display for ViewTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewTab::List => "list",
            ViewTab::Chart => "chart",
            ViewTab::Stats => "stats",
        };
        f.write_str(label)
    }
}

impl FromStr for ViewTab {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(ViewTab::List),
            "chart" => Ok(ViewTab::Chart),
            "stats" | "statistics" => Ok(ViewTab::Stats),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown view `{}` (expected list, chart, or stats)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Suffix printed after every amount.
    pub currency: String,
    /// Store key holding the transaction snapshot.
    pub storage_key: String,
    pub default_filter: CategoryFilter,
    pub default_view: ViewTab,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "RWF".into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            default_filter: CategoryFilter::All,
            default_view: ViewTab::List,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = [
        "currency",
        "storage_key",
        "default_filter",
        "default_view",
    ];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "currency" => self.currency = value.trim().to_string(),
            "storage_key" => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(LedgerError::ConfigError("storage_key must not be empty".into()));
                }
                self.storage_key = trimmed.to_string();
            }
            "default_filter" => self.default_filter = value.parse()?,
            "default_view" => self.default_view = value.parse()?,
            other => {
                return Err(LedgerError::ConfigError(format!(
                    "unknown setting `{}` (expected one of {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency", self.currency.clone()),
            ("storage_key", self.storage_key.clone()),
            ("default_filter", self.default_filter.to_string()),
            ("default_view", self.default_view.to_string()),
        ]
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::ConfigError(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.currency, "RWF");
        assert_eq!(config.storage_key, "transactions");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("currency", "USD").unwrap();
        config.set("default_filter", "food").unwrap();
        config.set("default_view", "stats").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "USD");
        assert_eq!(loaded.default_filter, CategoryFilter::Only(Category::Food));
        assert_eq!(loaded.default_view, ViewTab::Stats);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"currency":"EUR"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "EUR");
        assert_eq!(loaded.storage_key, "transactions");
    }

    #[test]
    fn unknown_setting_is_rejected() {
        let mut config = Config::default();
        let err = config.set("theme", "dark").unwrap_err();
        assert!(matches!(err, LedgerError::ConfigError(_)));
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{not json").unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::ConfigError(_))));
    }
}
