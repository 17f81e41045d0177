use gridedit_editor::ColumnRegular;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "gridedit.config.json";

/// Gridedit configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Forwarded to the editor host as `save_on_close`
    #[serde(default)]
    pub save_on_close: bool,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Column descriptors, indexed by column number
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnRegular>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_columns() -> Vec<ColumnRegular> {
    vec![ColumnRegular::new("name")]
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Descriptor for column `x`, if configured
    pub fn column(&self, x: usize) -> Option<ColumnRegular> {
        self.columns.get(x).cloned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_on_close: false,
            log_level: default_log_level(),
            columns: default_columns(),
        }
    }
}
