use std::time::Duration;

use async_trait::async_trait;
use qaamuus_config::network::NetworkConfig;
use qaamuus_types::{EntryResponse, IndexResponse, PageResponse, PageTarget, SuggestResponse};
use serde::de::DeserializeOwned;

use crate::{ApiError, DictionaryApi};

/// reqwest-backed client for the dictionary server
#[derive(Clone)]
pub struct HttpDictionary {
    network: NetworkConfig,
    client: reqwest::Client,
}

impl HttpDictionary {
    pub fn new(network: NetworkConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(network.timeout_seconds))
            .build()?;

        Ok(Self { network, client })
    }

    /// GET an endpoint and decode its JSON body
    async fn get<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.network.endpoint(path);
        tracing::debug!("[API] GET {} {:?}", url, params);

        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Parse {
            endpoint: path.to_string(),
            source,
        })
    }
}

/// Endpoint and query string for a page of `target`
pub(crate) fn page_request(
    target: &PageTarget,
    limit: u32,
    offset: u64,
) -> (&'static str, Vec<(&'static str, String)>) {
    let mut params = Vec::with_capacity(3);
    let path = match target {
        PageTarget::AllWords => "/all_words",
        PageTarget::Search(query) => {
            params.push(("q", query.clone()));
            "/search"
        }
        PageTarget::Letter(letter) => {
            params.push(("letter", letter.clone()));
            "/words_by_letter"
        }
    };
    params.push(("limit", limit.to_string()));
    params.push(("offset", offset.to_string()));
    (path, params)
}

#[async_trait]
impl DictionaryApi for HttpDictionary {
    async fn index(&self) -> Result<IndexResponse, ApiError> {
        self.get("/index", &[]).await
    }

    async fn page(
        &self,
        target: &PageTarget,
        limit: u32,
        offset: u64,
    ) -> Result<PageResponse, ApiError> {
        let (path, params) = page_request(target, limit, offset);
        self.get(path, &params).await
    }

    async fn suggest(&self, query: &str) -> Result<SuggestResponse, ApiError> {
        self.get("/suggest", &[("q", query.to_string())]).await
    }

    async fn entry(&self, word: &str) -> Result<EntryResponse, ApiError> {
        match self.get("/entry", &[("word", word.to_string())]).await {
            Err(ApiError::Status { status: 404, .. }) => Err(ApiError::NotFound(word.to_string())),
            other => other,
        }
    }
}
