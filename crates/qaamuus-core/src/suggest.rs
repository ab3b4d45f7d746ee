use std::fmt;

use qaamuus_types::Key;

use crate::highlight::{emphasize, escape_html};

/// A candidate fetch issued for one input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestRequest {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Dropdown hidden or key not handled by it
    Ignored,
    Handled,
    /// A candidate was chosen; the caller runs a search for it
    Commit(String),
}

/// One dropdown row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    pub markup: String,
    pub selected: bool,
}

/// Autocomplete dropdown state.
///
/// Every input event gets a sequence number. A response is applied only if it
/// is newer than the list on screen and than the last dismissal, so a slow
/// response for an earlier keystroke cannot overwrite a later one.
#[derive(Debug, Default)]
pub struct SuggestionEngine {
    input: String,
    items: Vec<String>,
    selected: Option<usize>,
    visible: bool,
    max_visible: usize,
    next_seq: u64,
    applied_seq: u64,
    dismissed_seq: u64,
}

impl SuggestionEngine {
    pub fn new(max_visible: usize) -> Self {
        Self {
            max_visible: max_visible.max(1),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_input(&mut self, text: &str) -> Option<SuggestRequest> {
        self.next_seq += 1;
        self.input = text.to_string();
        self.selected = None;

        if text.trim().is_empty() {
            self.items.clear();
            self.visible = false;
            self.dismissed_seq = self.next_seq;
            return None;
        }

        Some(SuggestRequest {
            seq: self.next_seq,
            query: text.to_string(),
        })
    }

    /// Apply a candidate response; failures hide the dropdown without noise
    pub fn complete<E: fmt::Display>(
        &mut self,
        request: &SuggestRequest,
        outcome: Result<Vec<String>, E>,
    ) -> bool {
        if request.seq <= self.applied_seq || request.seq <= self.dismissed_seq {
            tracing::debug!(
                "[SUGGEST] Discarding out-of-order response #{} for {:?}",
                request.seq,
                request.query
            );
            return false;
        }
        self.applied_seq = request.seq;
        self.selected = None;

        match outcome {
            Ok(mut items) => {
                items.truncate(self.max_visible);
                self.visible = !items.is_empty();
                self.items = items;
            }
            Err(e) => {
                tracing::debug!("[SUGGEST] Fetch failed for {:?}: {}", request.query, e);
                self.items.clear();
                self.visible = false;
            }
        }
        true
    }

    pub fn on_key(&mut self, key: Key) -> KeyOutcome {
        if !self.visible || self.items.is_empty() {
            return KeyOutcome::Ignored;
        }

        let len = self.items.len();
        match key {
            Key::Down => {
                self.selected = Some(self.selected.map_or(0, |i| (i + 1) % len));
                KeyOutcome::Handled
            }
            Key::Up => {
                self.selected = Some(self.selected.map_or(len - 1, |i| (i + len - 1) % len));
                KeyOutcome::Handled
            }
            Key::Enter => match self.selected {
                Some(index) => self.commit(index),
                None => KeyOutcome::Ignored,
            },
            Key::Escape => {
                self.dismiss();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Pointer press on a candidate
    pub fn on_select(&mut self, index: usize) -> KeyOutcome {
        if !self.visible || index >= self.items.len() {
            return KeyOutcome::Ignored;
        }
        self.commit(index)
    }

    pub fn on_outside_click(&mut self) {
        if self.visible {
            self.dismiss();
        }
    }

    pub fn on_blur(&mut self) {
        self.dismiss();
    }

    /// Set the input without requesting candidates (reference links, commits)
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.dismiss();
    }

    pub fn rendered(&self) -> Vec<SuggestionView> {
        if !self.visible {
            return Vec::new();
        }
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| SuggestionView {
                markup: emphasize(&escape_html(item), &self.input),
                selected: self.selected == Some(i),
            })
            .collect()
    }

    fn commit(&mut self, index: usize) -> KeyOutcome {
        let word = self.items[index].clone();
        tracing::debug!("[SUGGEST] Committed {:?}", word);
        self.input = word.clone();
        self.dismiss();
        KeyOutcome::Commit(word)
    }

    fn dismiss(&mut self) {
        self.visible = false;
        self.selected = None;
        self.items.clear();
        self.dismissed_seq = self.next_seq;
    }
}
