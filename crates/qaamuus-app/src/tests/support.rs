//! Scripted backend and event-loop harness shared by the runtime tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use qaamuus_api::{ApiError, DictionaryApi};
use qaamuus_config::Config;
use qaamuus_core::{Action, Regions, Snapshot};
use qaamuus_types::{
    EntryDetail, EntryResponse, IndexResponse, PageResponse, PageTarget, SuggestResponse,
    WireEntry,
};
use serde_json::json;
use tokio::task::JoinSet;
use tokio::time::timeout;

use crate::controller::AppController;
use crate::state::AppState;
use crate::ui::UiEvent;

pub const WORDS: &[(&str, &str)] = &[
    ("aabo", "m. father, eeg aab"),
    ("aad", "g.f very much"),
    ("aar", "m. male lion"),
    ("baab", "m. gate"),
    ("bad", "f. sea"),
];

/// In-memory dictionary with per-request delays, keyed like `search:aa` or
/// `suggest:a`
#[derive(Default)]
pub struct ScriptedApi {
    pub delays: HashMap<String, Duration>,
    pub fail_pages: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, key: String) {
        self.calls.lock().unwrap().push(key.clone());
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl DictionaryApi for ScriptedApi {
    async fn index(&self) -> Result<IndexResponse, ApiError> {
        self.enter("index".to_string()).await;
        Ok(IndexResponse {
            letters: vec!["A".into(), "B".into()],
        })
    }

    async fn page(
        &self,
        target: &PageTarget,
        limit: u32,
        offset: u64,
    ) -> Result<PageResponse, ApiError> {
        self.enter(target.to_string()).await;
        if self.fail_pages {
            return Err(ApiError::Status {
                endpoint: "/words".into(),
                status: 500,
            });
        }

        let matches: Vec<_> = WORDS
            .iter()
            .filter(|(word, _)| match target {
                PageTarget::AllWords => true,
                PageTarget::Search(query) => word.contains(query.as_str()),
                PageTarget::Letter(letter) => word.to_uppercase().starts_with(letter.as_str()),
            })
            .collect();
        let results: Vec<WireEntry> = matches
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(word, definition)| WireEntry::Pair(vec![json!(word), json!(definition)]))
            .collect();

        Ok(PageResponse {
            count: Some(results.len() as u64),
            total_count: Some(matches.len() as u64),
            results,
        })
    }

    async fn suggest(&self, query: &str) -> Result<SuggestResponse, ApiError> {
        self.enter(format!("suggest:{query}")).await;
        Ok(SuggestResponse {
            suggestions: WORDS
                .iter()
                .filter(|(word, _)| word.starts_with(query))
                .map(|(word, _)| word.to_string())
                .collect(),
        })
    }

    async fn entry(&self, word: &str) -> Result<EntryResponse, ApiError> {
        self.enter(format!("entry:{word}")).await;
        let Some((word, definition)) = WORDS.iter().find(|(w, _)| *w == word) else {
            return Err(ApiError::NotFound(word.to_string()));
        };
        Ok(EntryResponse {
            ok: true,
            entry: Some(EntryDetail {
                word: word.to_string(),
                definition: definition.to_string(),
                page: Some(1),
                column: Some(2),
                cross_refs: vec!["aab".into()],
                ..EntryDetail::default()
            }),
            error: None,
        })
    }
}

/// Event loop wired to a scripted backend; the test plays the front end
pub struct Harness {
    pub api: Arc<ScriptedApi>,
    pub state: Arc<AppState>,
    controller: AppController,
    frames: AsyncReceiver<UiEvent>,
    _tasks: JoinSet<anyhow::Result<()>>,
}

impl Harness {
    pub fn new(api: ScriptedApi, page_size: u32) -> Self {
        let mut config = Config::default();
        config.paging.page_size = page_size;

        let api = Arc::new(api);
        let state = Arc::new(AppState::new(config, Regions::standard()));
        let controller = AppController::new(state.clone());
        let mut tasks = JoinSet::new();
        let frames = controller.spawn_event_loop(&mut tasks, api.clone());

        Self {
            api,
            state,
            controller,
            frames,
            _tasks: tasks,
        }
    }

    pub async fn send(&self, action: Action) {
        self.controller.actions().send(action).await.unwrap();
    }

    /// First rendered frame satisfying `pred`
    pub async fn wait_for(&self, pred: impl Fn(&Snapshot) -> bool) -> Snapshot {
        let frames = async {
            loop {
                match self.frames.recv().await.unwrap() {
                    UiEvent::Render(snapshot) if pred(&snapshot) => return snapshot,
                    _ => {}
                }
            }
        };
        timeout(Duration::from_secs(2), frames)
            .await
            .expect("timed out waiting for frame")
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.browser.lock().await.snapshot()
    }

    /// Drain frames until a scroll-to-top request shows up
    pub async fn wait_for_scroll_to_top(&self) {
        let frames = async {
            loop {
                if let UiEvent::ScrollToTop = self.frames.recv().await.unwrap() {
                    return;
                }
            }
        };
        timeout(Duration::from_secs(2), frames)
            .await
            .expect("timed out waiting for scroll to top");
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.controller.shutdown();
    }
}

pub fn headwords(snapshot: &Snapshot) -> Vec<&str> {
    snapshot.cards.iter().map(|c| c.headword.as_str()).collect()
}
