use serde::{Deserialize, Serialize};

use crate::entry::WireEntry;

/// `GET /index`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexResponse {
    #[serde(default)]
    pub letters: Vec<String>,
}

/// `GET /all_words`, `GET /words_by_letter`, `GET /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub results: Vec<WireEntry>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl PageResponse {
    /// Rows the server actually returned for this page
    pub fn returned(&self) -> u64 {
        self.results.len() as u64
    }

    /// Total rows for the mode/query across all pages.
    ///
    /// Falls back to `count`, then to the page length.
    pub fn total(&self) -> u64 {
        self.total_count
            .or(self.count)
            .unwrap_or_else(|| self.returned())
    }
}

/// `GET /suggest`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// `GET /entry`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub entry: Option<EntryDetail>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Full entry with its reference graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDetail {
    #[serde(default)]
    pub id: Option<i64>,
    pub word: String,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub column: Option<i64>,
    #[serde(default, rename = "crossRefs")]
    pub cross_refs: Vec<String>,
    #[serde(default, rename = "seeAlso")]
    pub see_also: Vec<String>,
    #[serde(default, rename = "referredBy")]
    pub referred_by: Vec<String>,
    #[serde(default)]
    pub similar: Vec<String>,
}
