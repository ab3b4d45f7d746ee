use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://127.0.0.1:5002".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

/// Where the dictionary backend lives
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl NetworkConfig {
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("QAAMUUS_BASE_URL") {
            self.base_url = url;
        }

        if let Some(timeout) = env::var("QAAMUUS_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
