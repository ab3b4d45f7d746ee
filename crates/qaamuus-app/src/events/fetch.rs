use std::sync::Arc;

use kanal::AsyncSender;
use qaamuus_api::DictionaryApi;
use qaamuus_core::{Action, PageRequest, SuggestRequest};

pub async fn fetch_page(api: Arc<dyn DictionaryApi>, request: PageRequest, tx: AsyncSender<Action>) {
    let outcome = api
        .page(&request.target, request.limit, request.offset)
        .await
        .map_err(|e| e.to_string());
    deliver(&tx, Action::PageLoaded { request, outcome }).await;
}

pub async fn fetch_suggestions(
    api: Arc<dyn DictionaryApi>,
    request: SuggestRequest,
    tx: AsyncSender<Action>,
) {
    let outcome = api
        .suggest(&request.query)
        .await
        .map(|response| response.suggestions)
        .map_err(|e| e.to_string());
    deliver(&tx, Action::SuggestionsLoaded { request, outcome }).await;
}

pub async fn fetch_letters(api: Arc<dyn DictionaryApi>, tx: AsyncSender<Action>) {
    let outcome = api
        .index()
        .await
        .map(|response| response.letters)
        .map_err(|e| e.to_string());
    deliver(&tx, Action::LettersLoaded(outcome)).await;
}

pub async fn fetch_entry(api: Arc<dyn DictionaryApi>, word: String, tx: AsyncSender<Action>) {
    let outcome = api.entry(&word).await.map_err(|e| e.to_string());
    deliver(&tx, Action::EntryLoaded { word, outcome }).await;
}

async fn deliver(tx: &AsyncSender<Action>, action: Action) {
    if let Err(e) = tx.send(action).await {
        tracing::error!("[FETCH] Failed to deliver result to event loop: {}", e);
    }
}
