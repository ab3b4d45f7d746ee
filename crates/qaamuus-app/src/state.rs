use std::sync::Arc;

use qaamuus_config::Config;
use qaamuus_core::{Browser, Regions};
use tokio::sync::{Mutex, RwLock};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub browser: Mutex<Browser>,
}

impl AppState {
    pub fn new(config: Config, regions: Regions) -> Self {
        let browser = Browser::new(&config, regions);
        Self {
            config: Arc::new(RwLock::new(config)),
            browser: Mutex::new(browser),
        }
    }
}
