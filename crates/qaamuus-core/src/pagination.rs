//! Browse state and the page-load state machine.
//!
//! Loads are split into an issue step (`load_*` / [`PaginationController::maybe_load_next`])
//! returning a [`PageRequest`] for the runtime to fetch, and an apply step
//! ([`PaginationController::complete`]) fed with the outcome. Every reset bumps a
//! generation counter; outcomes carrying an older generation are dropped, so a
//! slow response for a previous mode never lands in the current listing.

use std::fmt;

use qaamuus_types::{PageResponse, PageTarget};

use crate::preprocess::normalize_letter;
use crate::render::{ResultRenderer, ResultsPane};

/// What the user is currently browsing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrowseMode {
    #[default]
    AllWords,
    Search {
        query: String,
    },
    Letter {
        letter: String,
    },
}

impl BrowseMode {
    pub fn target(&self) -> PageTarget {
        match self {
            BrowseMode::AllWords => PageTarget::AllWords,
            BrowseMode::Search { query } => PageTarget::Search(query.clone()),
            BrowseMode::Letter { letter } => PageTarget::Letter(letter.clone()),
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            BrowseMode::Search { query } => Some(query),
            _ => None,
        }
    }

    pub fn letter(&self) -> Option<&str> {
        match self {
            BrowseMode::Letter { letter } => Some(letter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    pub mode: BrowseMode,
    pub offset: u64,
    pub limit: u32,
    /// 0 while unknown or empty
    pub total: u64,
    pub loading: bool,
    pub generation: u64,
}

impl BrowseState {
    pub fn new(limit: u32) -> Self {
        Self {
            mode: BrowseMode::AllWords,
            offset: 0,
            limit: limit.max(1),
            total: 0,
            loading: false,
            generation: 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.total
    }
}

/// A page fetch issued by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub target: PageTarget,
    pub limit: u32,
    pub offset: u64,
    pub reset: bool,
}

/// What [`PaginationController::complete`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Applied { appended: usize },
    Failed,
    Stale,
}

pub struct PaginationController {
    state: BrowseState,
    renderer: ResultRenderer,
}

impl PaginationController {
    pub fn new(limit: u32, renderer: ResultRenderer) -> Self {
        Self {
            state: BrowseState::new(limit),
            renderer,
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn load_all(&mut self, reset: bool, pane: &mut ResultsPane) -> Option<PageRequest> {
        self.load(BrowseMode::AllWords, reset, pane)
    }

    /// Searching for nothing is browsing everything
    pub fn load_search(
        &mut self,
        query: &str,
        reset: bool,
        pane: &mut ResultsPane,
    ) -> Option<PageRequest> {
        let query = query.trim();
        if query.is_empty() {
            return self.load_all(reset, pane);
        }
        let mode = BrowseMode::Search {
            query: query.to_string(),
        };
        self.load(mode, reset, pane)
    }

    pub fn load_by_letter(
        &mut self,
        letter: &str,
        reset: bool,
        pane: &mut ResultsPane,
    ) -> Option<PageRequest> {
        let Some(letter) = normalize_letter(letter) else {
            tracing::warn!("[PAGINATION] Ignoring invalid letter {:?}", letter);
            return None;
        };
        self.load(BrowseMode::Letter { letter }, reset, pane)
    }

    /// Infinite-scroll entry point: continue the current listing if there is more
    pub fn maybe_load_next(&mut self, pane: &mut ResultsPane) -> Option<PageRequest> {
        if self.state.loading || self.state.is_exhausted() {
            return None;
        }

        match self.state.mode.clone() {
            BrowseMode::AllWords => self.load_all(false, pane),
            BrowseMode::Search { query } => self.load_search(&query, false, pane),
            BrowseMode::Letter { letter } => self.load_by_letter(&letter, false, pane),
        }
    }

    fn load(&mut self, mode: BrowseMode, reset: bool, pane: &mut ResultsPane) -> Option<PageRequest> {
        if reset {
            if self.state.loading && self.state.mode == mode && self.state.offset == 0 {
                tracing::debug!("[PAGINATION] First page of {:?} already loading", mode);
                return None;
            }

            self.state.generation += 1;
            self.state.mode = mode;
            self.state.offset = 0;
            self.state.total = 0;
            pane.clear();
        } else {
            if self.state.loading {
                tracing::debug!("[PAGINATION] Load in flight, dropping continuation");
                return None;
            }
            if self.state.mode != mode {
                tracing::debug!(
                    "[PAGINATION] Continuation for {:?} while browsing {:?}, ignoring",
                    mode,
                    self.state.mode
                );
                return None;
            }
            if self.state.total > 0 && self.state.offset >= self.state.total {
                return None;
            }
        }

        self.state.loading = true;

        let request = PageRequest {
            generation: self.state.generation,
            target: self.state.mode.target(),
            limit: self.state.limit,
            offset: self.state.offset,
            reset,
        };
        tracing::debug!(
            "[PAGINATION] Requesting {} offset={} limit={} reset={}",
            request.target,
            request.offset,
            request.limit,
            request.reset
        );
        Some(request)
    }

    /// Apply the outcome of `request` to the browse state and the results pane
    pub fn complete<E: fmt::Display>(
        &mut self,
        request: &PageRequest,
        outcome: Result<PageResponse, E>,
        pane: &mut ResultsPane,
    ) -> PageStatus {
        if request.generation != self.state.generation {
            tracing::warn!(
                "[PAGINATION] Dropping stale page for {} (generation {} != {})",
                request.target,
                request.generation,
                self.state.generation
            );
            return PageStatus::Stale;
        }

        self.state.loading = false;

        let page = match outcome {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("[PAGINATION] Failed to load {}: {}", request.target, e);
                pane.show_error(&self.renderer.messages().load_error);
                // the error replaced every card; the next scroll starts the listing over
                self.state.offset = 0;
                return PageStatus::Failed;
            }
        };

        if request.reset {
            self.state.total = page.total();
        }

        let returned = page.returned();
        self.state.offset += returned;
        if self.state.total > 0 {
            self.state.offset = self.state.offset.min(self.state.total);
        }
        if !request.reset && returned == 0 {
            // server has fewer rows than it reported; stop asking
            self.state.total = self.state.offset;
        }

        let query = self.state.mode.query().unwrap_or_default().to_string();
        let appended = self.renderer.render(pane, &page.results, &query);

        if self.state.total > 0 {
            pane.set_status(
                self.renderer
                    .messages()
                    .format_shown(self.state.offset, self.state.total),
            );
        }

        PageStatus::Applied { appended }
    }
}
