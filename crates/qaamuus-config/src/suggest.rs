use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_max_visible() -> usize {
    8
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SuggestConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_visible: default_max_visible(),
        }
    }
}
