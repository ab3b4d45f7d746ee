use serde::{Deserialize, Serialize};

fn default_preview_chars() -> usize {
    80
}

/// Localized strings shown by the results pane
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Messages {
    pub no_results: String,
    pub load_error: String,
    /// `{shown}` and `{total}` are substituted
    pub shown_of_total: String,
    /// Shown while the first page of a listing is in flight
    pub loading: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_results: "Natiijo lama helin.".to_string(),
            load_error: "Khalad ayaa dhacay. Fadlan isku day mar kale.".to_string(),
            shown_of_total: "{shown} / {total} erey".to_string(),
            loading: "Soo dejinaya…".to_string(),
        }
    }
}

impl Messages {
    pub fn format_shown(&self, shown: u64, total: u64) -> String {
        self.shown_of_total
            .replace("{shown}", &shown.to_string())
            .replace("{total}", &total.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    pub messages: Messages,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
            messages: Messages::default(),
        }
    }
}
