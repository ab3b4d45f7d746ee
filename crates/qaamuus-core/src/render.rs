use qaamuus_config::Messages;
use qaamuus_types::{Entry, EntryError, WireEntry};

use crate::highlight::{emphasize, escape_html, highlight, link_references, truncate_markup};
use crate::pos::split_pos;

/// One rendered dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub headword: String,
    pub pos: Option<String>,
    /// Highlighted, truncated body
    pub preview: String,
    /// Highlighted, un-truncated definition behind the "view full definition" toggle
    pub full_definition: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    NoResults(String),
    Error(String),
}

/// The results container.
///
/// Cards are appended by [`ResultRenderer`]; only the pagination reset and
/// failure paths clear it.
#[derive(Debug, Default, Clone)]
pub struct ResultsPane {
    cards: Vec<Card>,
    placeholder: Option<Placeholder>,
    status: Option<String>,
}

impl ResultsPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Flip a card's "view full definition" state; returns the new state
    pub fn toggle_card(&mut self, index: usize) -> Option<bool> {
        let card = self.cards.get_mut(index)?;
        card.expanded = !card.expanded;
        Some(card.expanded)
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        self.placeholder = None;
        self.status = None;
    }

    pub(crate) fn show_error(&mut self, message: &str) {
        self.cards.clear();
        self.status = None;
        self.placeholder = Some(Placeholder::Error(message.to_string()));
    }

    pub(crate) fn set_status(&mut self, status: String) {
        self.status = Some(status);
    }

    fn append(&mut self, cards: Vec<Card>) {
        if !cards.is_empty() {
            self.placeholder = None;
        }
        self.cards.extend(cards);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// Turns result rows into cards
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    preview_chars: usize,
    messages: Messages,
}

impl ResultRenderer {
    pub fn new(preview_chars: usize, messages: Messages) -> Self {
        Self {
            preview_chars,
            messages,
        }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Append a page of rows to `pane`, returning how many cards were added.
    ///
    /// A row that fails to render is logged and skipped. If the pane ends up
    /// with no cards at all, it shows the "no results" placeholder instead.
    pub fn render(&self, pane: &mut ResultsPane, entries: &[WireEntry], query: &str) -> usize {
        let mut cards = Vec::with_capacity(entries.len());

        for (index, wire) in entries.iter().enumerate() {
            match self.build_card(wire, query) {
                Ok(Some(card)) => cards.push(card),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("[RENDER] Skipping entry #{}: {} ({:?})", index, e, wire);
                }
            }
        }

        let added = cards.len();
        pane.append(cards);

        if pane.is_empty() {
            pane.placeholder = Some(Placeholder::NoResults(self.messages.no_results.clone()));
        }

        tracing::debug!("[RENDER] {} of {} rows rendered", added, entries.len());
        added
    }

    pub fn build_card(&self, wire: &WireEntry, query: &str) -> Result<Option<Card>, RenderError> {
        let Some(entry) = Entry::from_wire(wire)? else {
            return Ok(None);
        };
        Ok(Some(self.card_for(&entry, query)))
    }

    pub fn card_for(&self, entry: &Entry, query: &str) -> Card {
        let parts = split_pos(&entry.definition);

        Card {
            headword: entry.headword.clone(),
            pos: parts.pos.map(str::to_string),
            // link before cutting so a reference is never split
            preview: emphasize(
                &truncate_markup(&link_references(&escape_html(parts.body)), self.preview_chars),
                query,
            ),
            full_definition: highlight(&entry.definition, query),
            expanded: false,
        }
    }
}
