use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::paging::PagingConfig;
use self::suggest::SuggestConfig;
use self::ui::UiConfig;

pub mod network;
pub mod paging;
pub mod suggest;
pub mod ui;

pub use ui::Messages;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub paging: PagingConfig,
    pub ui: UiConfig,
    pub suggest: SuggestConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Config {
    /// Read `.env`, then an optional JSON file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(dotenv) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", dotenv.display());
        }

        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                let data = fs::read_to_string(path)?;
                serde_json::from_str(&data)?
            }
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.network.apply_env();
        self.paging.apply_env();
    }
}
