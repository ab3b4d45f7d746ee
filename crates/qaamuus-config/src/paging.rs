use std::env;

use serde::{Deserialize, Serialize};

/// Backend clamps `limit` to this range
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 200;

fn default_page_size() -> u32 {
    40
}

fn default_scroll_threshold_px() -> f64 {
    300.0
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Distance from the bottom of the content at which the next page is requested
    #[serde(default = "default_scroll_threshold_px")]
    pub scroll_threshold_px: f64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            scroll_threshold_px: default_scroll_threshold_px(),
        }
    }
}

impl PagingConfig {
    pub fn apply_env(&mut self) {
        if let Some(size) = env::var("QAAMUUS_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.page_size = size;
        }
    }

    pub fn clamped_page_size(&self) -> u32 {
        self.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}
