mod client;

pub use client::HttpDictionary;

use qaamuus_types::{EntryResponse, IndexResponse, PageResponse, PageTarget, SuggestResponse};

/// Dictionary backend interface
#[async_trait::async_trait]
pub trait DictionaryApi: Send + Sync {
    /// Letters that have at least one headword
    async fn index(&self) -> Result<IndexResponse, ApiError>;

    /// One page of the listing selected by `target`
    async fn page(
        &self,
        target: &PageTarget,
        limit: u32,
        offset: u64,
    ) -> Result<PageResponse, ApiError>;

    /// Autocomplete candidates for a partial headword
    async fn suggest(&self, query: &str) -> Result<SuggestResponse, ApiError>;

    /// Full entry with its references
    async fn entry(&self, word: &str) -> Result<EntryResponse, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Failed to parse response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Entry not found: {0}")]
    NotFound(String),
}
