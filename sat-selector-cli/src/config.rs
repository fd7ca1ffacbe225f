use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use sat_selector::ColumnFlags;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_true")]
    pub name: bool,

    #[serde(default = "default_true")]
    pub catnum: bool,

    #[serde(default = "default_true")]
    pub epoch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Directory holding `.sat` and `.cat` files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub columns: ColumnsConfig,
}

fn default_true() -> bool {
    true
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            name: true,
            catnum: true,
            epoch: true,
        }
    }
}

impl ColumnsConfig {
    /// All columns off falls back to the default set
    pub fn flags(&self) -> ColumnFlags {
        let mut bits = 0;
        if self.name {
            bits |= ColumnFlags::SHOW_NAME.bits();
        }
        if self.catnum {
            bits |= ColumnFlags::SHOW_CATNUM.bits();
        }
        if self.epoch {
            bits |= ColumnFlags::SHOW_EPOCH.bits();
        }
        ColumnFlags::from_bits(bits)
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_dir: default_log_dir(),
            log_level: default_log_level(),
            columns: ColumnsConfig::default(),
        }
    }
}

impl SelectorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: SelectorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Defaults,
}

pub static CONFIG: OnceLock<SelectorConfig> = OnceLock::new();

/// Load `path` into [`CONFIG`]. A missing file means defaults; a broken
/// file is an error.
pub fn read_config(
    path: impl AsRef<Path>,
) -> anyhow::Result<(&'static SelectorConfig, ConfigSource)> {
    let path = path.as_ref();
    let (config, source) = if path.exists() {
        (SelectorConfig::from_file(path)?, ConfigSource::File)
    } else {
        (SelectorConfig::default(), ConfigSource::Defaults)
    };

    let config = CONFIG.get_or_init(|| config);
    Ok((config, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: SelectorConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.log_dir, "logs");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.columns.flags(), ColumnFlags::DEFAULT);
    }

    #[test]
    fn test_parse_columns() {
        let config: SelectorConfig = toml::from_str(
            r#"
            data_dir = "/usr/share/gpredict/satdata"
            log_level = "debug"

            [columns]
            catnum = false
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, "/usr/share/gpredict/satdata");
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.columns.flags(),
            ColumnFlags::SHOW_NAME | ColumnFlags::SHOW_EPOCH
        );
    }

    #[test]
    fn test_all_columns_off_means_default() {
        let columns = ColumnsConfig {
            name: false,
            catnum: false,
            epoch: false,
        };
        assert_eq!(columns.flags(), ColumnFlags::DEFAULT);
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [not toml").unwrap();
        assert!(SelectorConfig::from_file(&path).is_err());

        std::fs::write(&path, "data_dir = \"sats\"\n").unwrap();
        assert_eq!(SelectorConfig::from_file(&path).unwrap().data_dir, "sats");
    }
}
