//! The page as one state machine.
//!
//! Every user gesture and every finished fetch enters through
//! [`Browser::dispatch`]. Dispatch mutates state synchronously and returns the
//! fetches the runtime should start; their outcomes come back as further
//! actions.

use qaamuus_config::Config;
use qaamuus_types::{EntryResponse, Key, PageResponse, ScrollMetrics};

use crate::focus::{ElementId, FocusRegistry};
use crate::highlight::reference_targets;
use crate::overlay::{EntryModal, ModalContent, NavDrawer, Overlay, OverlayRegion};
use crate::pagination::{BrowseMode, PageRequest, PaginationController};
use crate::preprocess::normalize_input;
use crate::render::{Card, Placeholder, ResultRenderer, ResultsPane};
use crate::scroll::ScrollDriver;
use crate::suggest::{KeyOutcome, SuggestRequest, SuggestionEngine};

/// Element ids of the standard page layout
pub mod ids {
    pub const SEARCH_INPUT: &str = "search-input";
    pub const SUGGESTIONS: &str = "suggestions";
    pub const ENTRY_MODAL: &str = "entry-modal";
    pub const ENTRY_MODAL_CLOSE: &str = "entry-modal-close";
    pub const ENTRY_MODAL_BODY: &str = "entry-modal-body";
    pub const NAV_TOGGLE: &str = "nav-toggle";
    pub const NAV_DRAWER: &str = "nav-drawer";
    pub const NAV_CLOSE: &str = "nav-close";
    pub const NAV_HOME: &str = "nav-home";
    pub const NAV_DICTIONARY: &str = "nav-dictionary";

    /// "view full definition" button of the card at `index`
    pub fn card_more(index: usize) -> String {
        format!("card-{index}-more")
    }

    /// Link to another word inside the entry modal, in tab order
    pub fn modal_ref(index: usize) -> String {
        format!("entry-modal-ref-{index}")
    }
}

/// Optional parts of the page
#[derive(Debug, Clone, Default)]
pub struct Regions {
    pub modal: Option<OverlayRegion>,
    pub drawer: Option<OverlayRegion>,
    pub letter_index: bool,
}

impl Regions {
    /// The dictionary page: modal, drawer and letter index all present
    pub fn standard() -> Self {
        Self {
            modal: Some(OverlayRegion {
                root: ids::ENTRY_MODAL.into(),
                focusables: vec![ids::ENTRY_MODAL_CLOSE.into(), ids::ENTRY_MODAL_BODY.into()],
                fallback: ids::SEARCH_INPUT.into(),
            }),
            drawer: Some(OverlayRegion {
                root: ids::NAV_DRAWER.into(),
                focusables: vec![
                    ids::NAV_CLOSE.into(),
                    ids::NAV_HOME.into(),
                    ids::NAV_DICTIONARY.into(),
                ],
                fallback: ids::NAV_TOGGLE.into(),
            }),
            letter_index: true,
        }
    }

    /// Search box and results only
    pub fn minimal() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Page finished loading
    Start,
    ShowAll,
    /// Search box text changed
    Input(String),
    /// Search button or Enter without a highlighted suggestion
    Submit,
    LetterClicked(String),
    Scrolled(ScrollMetrics),
    LoadMore,
    Key(Key),
    SuggestionClicked(usize),
    /// Pointer press on an element
    Click(ElementId),
    Focus(ElementId),
    ReferenceActivated(String),
    OpenEntry(usize),
    /// Open the first card whose headword is `word`
    OpenWord(String),
    CloseEntry,
    ToggleCard(usize),
    OpenNav,
    CloseNav,
    PageLoaded {
        request: PageRequest,
        outcome: Result<PageResponse, String>,
    },
    SuggestionsLoaded {
        request: SuggestRequest,
        outcome: Result<Vec<String>, String>,
    },
    LettersLoaded(Result<Vec<String>, String>),
    EntryLoaded {
        word: String,
        outcome: Result<EntryResponse, String>,
    },
}

/// Side effects requested by [`Browser::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchPage(PageRequest),
    FetchSuggestions(SuggestRequest),
    FetchLetters,
    FetchEntry(String),
    ScrollToTop,
}

/// Read-only view of everything on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub mode: BrowseMode,
    pub offset: u64,
    pub total: u64,
    pub loading: bool,
    pub cards: Vec<Card>,
    pub placeholder: Option<Placeholder>,
    pub status: Option<String>,
    pub input: String,
    pub suggestions: Vec<String>,
    pub selected_suggestion: Option<usize>,
    pub letters: Vec<String>,
    pub modal: Option<ModalContent>,
    pub drawer_open: bool,
    pub focused: Option<String>,
}

pub struct Browser {
    pager: PaginationController,
    pane: ResultsPane,
    suggestions: SuggestionEngine,
    suggest_enabled: bool,
    modal: EntryModal,
    drawer: NavDrawer,
    /// `None` when the page has no letter index
    letters: Option<Vec<String>>,
    scroll: ScrollDriver,
    focus: FocusRegistry,
    attached_cards: usize,
}

impl Browser {
    pub fn new(config: &Config, regions: Regions) -> Self {
        let renderer = ResultRenderer::new(config.ui.preview_chars, config.ui.messages.clone());

        let mut focus = FocusRegistry::new();
        focus.attach(ids::SEARCH_INPUT.into());
        focus.attach(ids::SUGGESTIONS.into());
        for region in [&regions.modal, &regions.drawer].into_iter().flatten() {
            focus.attach(region.root.clone());
            focus.attach(region.fallback.clone());
            for id in &region.focusables {
                focus.attach(id.clone());
            }
        }

        Self {
            pager: PaginationController::new(config.paging.clamped_page_size(), renderer),
            pane: ResultsPane::new(),
            suggestions: SuggestionEngine::new(config.suggest.max_visible),
            suggest_enabled: config.suggest.enabled,
            modal: Overlay::new("entry modal", regions.modal),
            drawer: Overlay::new("navigation drawer", regions.drawer),
            letters: regions.letter_index.then(Vec::new),
            scroll: ScrollDriver::new(config.paging.scroll_threshold_px),
            focus,
            attached_cards: 0,
        }
    }

    pub fn pane(&self) -> &ResultsPane {
        &self.pane
    }

    pub fn pager(&self) -> &PaginationController {
        &self.pager
    }

    pub fn suggestions(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    pub fn modal(&self) -> &EntryModal {
        &self.modal
    }

    pub fn drawer(&self) -> &NavDrawer {
        &self.drawer
    }

    pub fn focus(&self) -> &FocusRegistry {
        &self.focus
    }

    pub fn letters(&self) -> Option<&[String]> {
        self.letters.as_deref()
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Command> {
        let commands = self.handle(action);
        self.sync_card_focusables();
        commands
    }

    fn handle(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Start => {
                let mut commands = Vec::new();
                if self.letters.is_some() {
                    commands.push(Command::FetchLetters);
                }
                commands.extend(self.pager.load_all(true, &mut self.pane).map(Command::FetchPage));
                commands
            }
            Action::ShowAll => {
                self.suggestions.set_input("");
                self.pager
                    .load_all(true, &mut self.pane)
                    .map(Command::FetchPage)
                    .into_iter()
                    .collect()
            }
            Action::Input(text) => {
                let text = normalize_input(&text);
                if !self.suggest_enabled {
                    self.suggestions.set_input(&text);
                    return Vec::new();
                }
                self.suggestions
                    .on_input(&text)
                    .map(Command::FetchSuggestions)
                    .into_iter()
                    .collect()
            }
            Action::Submit => {
                let query = self.suggestions.input().to_string();
                self.search_for(query)
            }
            Action::LetterClicked(letter) => {
                if self.letters.is_none() {
                    return Vec::new();
                }
                self.pager
                    .load_by_letter(&letter, true, &mut self.pane)
                    .map(Command::FetchPage)
                    .into_iter()
                    .collect()
            }
            Action::Scrolled(metrics) => {
                if !self.scroll.near_bottom(&metrics) {
                    return Vec::new();
                }
                self.load_next()
            }
            Action::LoadMore => self.load_next(),
            Action::Key(key) => self.on_key(key),
            Action::SuggestionClicked(index) => match self.suggestions.on_select(index) {
                KeyOutcome::Commit(word) => self.search_for(word),
                _ => Vec::new(),
            },
            Action::Click(target) => {
                if self.modal.on_click(&target, &mut self.focus)
                    || self.drawer.on_click(&target, &mut self.focus)
                {
                    return Vec::new();
                }
                if !is_search_area(&target) {
                    self.suggestions.on_outside_click();
                }
                Vec::new()
            }
            Action::Focus(target) => {
                if !is_search_area(&target) {
                    self.suggestions.on_blur();
                }
                self.focus.focus(&target);
                Vec::new()
            }
            Action::ReferenceActivated(word) => {
                tracing::debug!("[BROWSER] Following reference to {:?}", word);
                self.modal.close(&mut self.focus);
                let mut commands = self.search_for(word);
                commands.push(Command::ScrollToTop);
                commands
            }
            Action::OpenEntry(index) => self.open_entry(index),
            Action::OpenWord(word) => {
                match self.pane.cards().iter().position(|c| c.headword == word) {
                    Some(index) => self.open_entry(index),
                    None => Vec::new(),
                }
            }
            Action::CloseEntry => {
                self.modal.close(&mut self.focus);
                Vec::new()
            }
            Action::ToggleCard(index) => {
                self.pane.toggle_card(index);
                Vec::new()
            }
            Action::OpenNav => {
                self.drawer.open((), &mut self.focus);
                Vec::new()
            }
            Action::CloseNav => {
                self.drawer.close(&mut self.focus);
                Vec::new()
            }
            Action::PageLoaded { request, outcome } => {
                self.pager.complete(&request, outcome, &mut self.pane);
                Vec::new()
            }
            Action::SuggestionsLoaded { request, outcome } => {
                self.suggestions.complete(&request, outcome);
                Vec::new()
            }
            Action::LettersLoaded(outcome) => {
                if let Some(letters) = self.letters.as_mut() {
                    match outcome {
                        Ok(loaded) => *letters = loaded,
                        Err(e) => tracing::warn!("[BROWSER] Letter index unavailable: {}", e),
                    }
                }
                Vec::new()
            }
            Action::EntryLoaded { word, outcome } => {
                self.apply_entry_detail(&word, outcome);
                Vec::new()
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Vec<Command> {
        if key == Key::Enter {
            if let Some(word) = self.focused_modal_link() {
                return self.handle(Action::ReferenceActivated(word));
            }
        }
        if self.modal.on_key(key, &mut self.focus) || self.drawer.on_key(key, &mut self.focus) {
            return Vec::new();
        }
        if !self.focus.is_focused(&ids::SEARCH_INPUT.into()) {
            return Vec::new();
        }

        match self.suggestions.on_key(key) {
            KeyOutcome::Commit(word) => self.search_for(word),
            KeyOutcome::Ignored if key == Key::Enter => {
                let query = self.suggestions.input().to_string();
                self.search_for(query)
            }
            _ => Vec::new(),
        }
    }

    fn search_for(&mut self, query: String) -> Vec<Command> {
        self.suggestions.set_input(&query);
        self.pager
            .load_search(&query, true, &mut self.pane)
            .map(Command::FetchPage)
            .into_iter()
            .collect()
    }

    fn load_next(&mut self) -> Vec<Command> {
        self.pager
            .maybe_load_next(&mut self.pane)
            .map(Command::FetchPage)
            .into_iter()
            .collect()
    }

    fn open_entry(&mut self, index: usize) -> Vec<Command> {
        let Some(card) = self.pane.card(index) else {
            return Vec::new();
        };
        let content = ModalContent {
            headword: card.headword.clone(),
            pos: card.pos.clone(),
            definition: card.full_definition.clone(),
            detail: None,
        };

        self.focus.focus(&ElementId::new(ids::card_more(index)));
        let word = content.headword.clone();
        let links = link_focusables(modal_links(&content).len());
        if self.modal.open_with(content, links, &mut self.focus) {
            vec![Command::FetchEntry(word)]
        } else {
            Vec::new()
        }
    }

    fn apply_entry_detail(&mut self, word: &str, outcome: Result<EntryResponse, String>) {
        let Some(content) = self.modal.content_mut() else {
            return;
        };
        if content.headword != word {
            tracing::debug!("[BROWSER] Dropping details for {:?}, showing {:?}", word, content.headword);
            return;
        }

        match outcome {
            Ok(EntryResponse {
                ok: true,
                entry: Some(detail),
                ..
            }) => {
                content.detail = Some(detail);
                let links = link_focusables(modal_links(content).len());
                self.modal.set_content_focusables(links, &mut self.focus);
            }
            Ok(response) => tracing::debug!(
                "[BROWSER] No details for {:?}: {}",
                word,
                response.error.unwrap_or_default()
            ),
            Err(e) => tracing::warn!("[BROWSER] Entry lookup for {:?} failed: {}", word, e),
        }
    }

    /// Word behind the modal link that has focus
    fn focused_modal_link(&self) -> Option<String> {
        let content = self.modal.content()?;
        let focused = self.focus.current()?;
        let index = self
            .modal
            .content_focusables()
            .iter()
            .position(|id| id == focused)?;
        modal_links(content).into_iter().nth(index)
    }

    /// Keep one focusable per rendered card in the registry
    fn sync_card_focusables(&mut self) {
        let rendered = self.pane.cards().len();
        for index in rendered..self.attached_cards {
            self.focus.detach(&ElementId::new(ids::card_more(index)));
        }
        for index in self.attached_cards..rendered {
            self.focus.attach(ElementId::new(ids::card_more(index)));
        }
        self.attached_cards = rendered;
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.pager.state();
        Snapshot {
            mode: state.mode.clone(),
            offset: state.offset,
            total: state.total,
            loading: state.loading,
            cards: self.pane.cards().to_vec(),
            placeholder: self.pane.placeholder().cloned(),
            status: self.pane.status().map(str::to_string),
            input: self.suggestions.input().to_string(),
            suggestions: self.suggestions.items().to_vec(),
            selected_suggestion: self.suggestions.selected_index(),
            letters: self.letters.clone().unwrap_or_default(),
            modal: self.modal.content().cloned(),
            drawer_open: self.drawer.is_open(),
            focused: self.focus.current().map(|id| id.as_str().to_string()),
        }
    }
}

/// Words the modal links to: references in the definition, then the
/// cross-references, see-also, referred-by and similar lists
fn modal_links(content: &ModalContent) -> Vec<String> {
    let mut links = reference_targets(&content.definition);
    if let Some(detail) = &content.detail {
        for words in [
            &detail.cross_refs,
            &detail.see_also,
            &detail.referred_by,
            &detail.similar,
        ] {
            links.extend(words.iter().cloned());
        }
    }
    links
}

fn link_focusables(count: usize) -> Vec<ElementId> {
    (0..count).map(|i| ElementId::new(ids::modal_ref(i))).collect()
}

fn is_search_area(target: &ElementId) -> bool {
    target.as_str() == ids::SEARCH_INPUT || target.as_str() == ids::SUGGESTIONS
}

#[cfg(test)]
mod tests {
    use qaamuus_types::{EntryDetail, PageTarget};
    use serde_json::json;

    use super::*;

    fn browser(regions: Regions) -> Browser {
        Browser::new(&Config::default(), regions)
    }

    fn page(value: serde_json::Value) -> Result<PageResponse, String> {
        Ok(serde_json::from_value(value).unwrap())
    }

    fn fetch_page(commands: &[Command]) -> PageRequest {
        commands
            .iter()
            .find_map(|c| match c {
                Command::FetchPage(request) => Some(request.clone()),
                _ => None,
            })
            .expect("a page fetch")
    }

    fn started(regions: Regions) -> Browser {
        let mut b = browser(regions);
        let request = fetch_page(&b.dispatch(Action::Start));
        b.dispatch(Action::PageLoaded {
            request,
            outcome: page(json!({
                "results": [["aabo", "m. father, eeg aab"], ["hooyo", "f. mother"]],
                "count": 2,
                "total_count": 120
            })),
        });
        b
    }

    #[test]
    fn test_start_requests_letters_and_first_page() {
        let mut b = browser(Regions::standard());
        let commands = b.dispatch(Action::Start);

        assert_eq!(commands[0], Command::FetchLetters);
        let request = fetch_page(&commands);
        assert_eq!(request.target, PageTarget::AllWords);
        assert_eq!(request.offset, 0);
        assert_eq!(request.limit, 40);

        b.dispatch(Action::LettersLoaded(Ok(vec!["A".into(), "B".into()])));
        assert_eq!(b.letters(), Some(&["A".to_string(), "B".to_string()][..]));
    }

    #[test]
    fn test_minimal_page_degrades_to_noops() {
        let mut b = started(Regions::minimal());
        assert_eq!(b.letters(), None);

        assert!(b.dispatch(Action::LetterClicked("B".into())).is_empty());
        assert!(b.dispatch(Action::OpenEntry(0)).is_empty());
        assert!(!b.modal().is_open());
        assert!(b.dispatch(Action::OpenNav).is_empty());
        assert!(!b.drawer().is_open());
        assert!(b.dispatch(Action::Key(Key::Escape)).is_empty());
        assert_eq!(b.pane().cards().len(), 2);
    }

    #[test]
    fn test_scroll_near_bottom_continues_listing() {
        let mut b = started(Regions::standard());

        let far = ScrollMetrics {
            scroll_top: 0.0,
            viewport_height: 800.0,
            content_height: 5000.0,
        };
        assert!(b.dispatch(Action::Scrolled(far)).is_empty());

        let near = ScrollMetrics {
            scroll_top: 4100.0,
            ..far
        };
        let request = fetch_page(&b.dispatch(Action::Scrolled(near)));
        assert_eq!(request.offset, 2);
        assert!(!request.reset);

        // more scroll events while the page is in flight are dropped
        assert!(b.dispatch(Action::Scrolled(near)).is_empty());
        assert!(b.dispatch(Action::LoadMore).is_empty());
    }

    #[test]
    fn test_typing_then_arrow_enter_searches_candidate() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::Focus(ids::SEARCH_INPUT.into()));

        let commands = b.dispatch(Action::Input("aa".into()));
        let Some(Command::FetchSuggestions(request)) = commands.first().cloned() else {
            panic!("expected a suggestion fetch, got {commands:?}");
        };
        assert_eq!(request.query, "aa");

        b.dispatch(Action::SuggestionsLoaded {
            request,
            outcome: Ok(vec!["aabo".into(), "aad".into()]),
        });
        b.dispatch(Action::Key(Key::Down));
        b.dispatch(Action::Key(Key::Down));
        let search = fetch_page(&b.dispatch(Action::Key(Key::Enter)));

        assert_eq!(search.target, PageTarget::Search("aad".into()));
        assert!(search.reset);
        assert_eq!(b.snapshot().input, "aad");
        assert!(b.snapshot().suggestions.is_empty());
        assert!(b.pane().cards().is_empty());
    }

    #[test]
    fn test_enter_without_selection_submits_typed_text() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::Focus(ids::SEARCH_INPUT.into()));
        b.dispatch(Action::Input("geed".into()));

        let search = fetch_page(&b.dispatch(Action::Key(Key::Enter)));
        assert_eq!(search.target, PageTarget::Search("geed".into()));
    }

    #[test]
    fn test_submit_empty_box_browses_everything() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::Input("".into()));
        let request = fetch_page(&b.dispatch(Action::Submit));
        assert_eq!(request.target, PageTarget::AllWords);
        assert!(request.reset);
    }

    #[test]
    fn test_outside_click_hides_suggestions() {
        let mut b = started(Regions::standard());
        let commands = b.dispatch(Action::Input("h".into()));
        let Some(Command::FetchSuggestions(request)) = commands.first().cloned() else {
            panic!("expected a suggestion fetch");
        };
        b.dispatch(Action::SuggestionsLoaded {
            request,
            outcome: Ok(vec!["hooyo".into()]),
        });
        assert!(b.suggestions().is_visible());

        b.dispatch(Action::Click(ids::SUGGESTIONS.into()));
        assert!(b.suggestions().is_visible());
        b.dispatch(Action::Click("results".into()));
        assert!(!b.suggestions().is_visible());
        assert_eq!(b.snapshot().input, "h");
    }

    #[test]
    fn test_pointer_pick_searches_candidate() {
        let mut b = started(Regions::standard());
        let commands = b.dispatch(Action::Input("h".into()));
        let Some(Command::FetchSuggestions(request)) = commands.first().cloned() else {
            panic!("expected a suggestion fetch");
        };
        b.dispatch(Action::SuggestionsLoaded {
            request,
            outcome: Ok(vec!["hooyo".into(), "hal".into()]),
        });

        let search = fetch_page(&b.dispatch(Action::SuggestionClicked(1)));
        assert_eq!(search.target, PageTarget::Search("hal".into()));
    }

    #[test]
    fn test_reference_link_searches_and_scrolls_to_top() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::OpenEntry(0));
        assert!(b.modal().is_open());

        let commands = b.dispatch(Action::ReferenceActivated("aab".into()));
        assert_eq!(fetch_page(&commands).target, PageTarget::Search("aab".into()));
        assert_eq!(commands.last(), Some(&Command::ScrollToTop));
        assert!(!b.modal().is_open());
        assert_eq!(b.snapshot().input, "aab");
    }

    #[test]
    fn test_open_entry_fetches_details_for_current_word_only() {
        let mut b = started(Regions::standard());
        let commands = b.dispatch(Action::OpenEntry(0));
        assert_eq!(commands, vec![Command::FetchEntry("aabo".into())]);
        assert_eq!(b.snapshot().focused.as_deref(), Some(ids::ENTRY_MODAL_CLOSE));

        let detail = EntryDetail {
            word: "hooyo".into(),
            ..EntryDetail::default()
        };
        b.dispatch(Action::EntryLoaded {
            word: "hooyo".into(),
            outcome: Ok(EntryResponse {
                ok: true,
                entry: Some(detail),
                error: None,
            }),
        });
        assert_eq!(b.modal().content().and_then(|c| c.detail.clone()), None);

        let detail = EntryDetail {
            word: "aabo".into(),
            cross_refs: vec!["aab".into()],
            ..EntryDetail::default()
        };
        b.dispatch(Action::EntryLoaded {
            word: "aabo".into(),
            outcome: Ok(EntryResponse {
                ok: true,
                entry: Some(detail.clone()),
                error: None,
            }),
        });
        let content = b.modal().content().unwrap();
        assert_eq!(content.detail, Some(detail));
        assert_eq!(content.pos.as_deref(), Some("m."));
    }

    #[test]
    fn test_tab_reaches_reference_link_in_definition() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::OpenEntry(0));

        b.dispatch(Action::Key(Key::Tab));
        b.dispatch(Action::Key(Key::Tab));
        assert_eq!(b.snapshot().focused.as_deref(), Some("entry-modal-ref-0"));

        let commands = b.dispatch(Action::Key(Key::Enter));
        assert_eq!(fetch_page(&commands).target, PageTarget::Search("aab".into()));
        assert_eq!(commands.last(), Some(&Command::ScrollToTop));
        assert!(!b.modal().is_open());
        assert!(!b.focus().contains(&"entry-modal-ref-0".into()));
    }

    #[test]
    fn test_entry_details_extend_modal_tab_order() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::OpenEntry(0));
        let detail = EntryDetail {
            word: "aabo".into(),
            cross_refs: vec!["aabbe".into()],
            see_also: vec!["hooyo".into()],
            ..EntryDetail::default()
        };
        b.dispatch(Action::EntryLoaded {
            word: "aabo".into(),
            outcome: Ok(EntryResponse {
                ok: true,
                entry: Some(detail),
                error: None,
            }),
        });

        let mut order = Vec::new();
        for _ in 0..5 {
            b.dispatch(Action::Key(Key::Tab));
            order.push(b.snapshot().focused.unwrap_or_default());
        }
        assert_eq!(
            order,
            vec![
                ids::ENTRY_MODAL_BODY,
                "entry-modal-ref-0",
                "entry-modal-ref-1",
                "entry-modal-ref-2",
                ids::ENTRY_MODAL_CLOSE,
            ]
        );

        b.dispatch(Action::Key(Key::ShiftTab));
        assert_eq!(b.snapshot().focused.as_deref(), Some("entry-modal-ref-2"));
        let commands = b.dispatch(Action::Key(Key::Enter));
        assert_eq!(fetch_page(&commands).target, PageTarget::Search("hooyo".into()));
    }

    #[test]
    fn test_open_by_headword() {
        let mut b = started(Regions::standard());
        assert_eq!(
            b.dispatch(Action::OpenWord("hooyo".into())),
            vec![Command::FetchEntry("hooyo".into())]
        );
        assert_eq!(b.snapshot().focused.as_deref(), Some(ids::ENTRY_MODAL_CLOSE));
        b.dispatch(Action::CloseEntry);
        assert!(b.dispatch(Action::OpenWord("missing".into())).is_empty());
        assert!(!b.modal().is_open());
    }

    #[test]
    fn test_escape_closes_modal_and_returns_focus_to_card() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::OpenEntry(1));
        b.dispatch(Action::Key(Key::Tab));
        assert_eq!(b.snapshot().focused.as_deref(), Some(ids::ENTRY_MODAL_BODY));

        b.dispatch(Action::Key(Key::Escape));
        assert!(!b.modal().is_open());
        assert_eq!(b.snapshot().focused.as_deref(), Some("card-1-more"));
    }

    #[test]
    fn test_modal_close_after_reset_falls_back_to_search_input() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::OpenEntry(1));
        // card list replaced while the modal is up
        b.dispatch(Action::ShowAll);
        b.dispatch(Action::CloseEntry);
        assert_eq!(b.snapshot().focused.as_deref(), Some(ids::SEARCH_INPUT));
    }

    #[test]
    fn test_nav_drawer_lifecycle_is_independent() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::Focus(ids::NAV_TOGGLE.into()));
        b.dispatch(Action::OpenNav);
        assert!(b.drawer().is_open());
        assert_eq!(b.snapshot().focused.as_deref(), Some(ids::NAV_CLOSE));

        b.dispatch(Action::Key(Key::ShiftTab));
        assert_eq!(b.snapshot().focused.as_deref(), Some(ids::NAV_DICTIONARY));

        b.dispatch(Action::Click(ids::NAV_DRAWER.into()));
        assert!(!b.drawer().is_open());
        assert!(!b.modal().is_open());
        assert_eq!(b.snapshot().focused.as_deref(), Some(ids::NAV_TOGGLE));
    }

    #[test]
    fn test_slow_search_after_show_all_is_dropped() {
        let mut b = started(Regions::standard());
        b.dispatch(Action::Input("dog".into()));
        let search = fetch_page(&b.dispatch(Action::Submit));
        let all = fetch_page(&b.dispatch(Action::ShowAll));

        b.dispatch(Action::PageLoaded {
            request: search,
            outcome: page(json!({"results": [["dog", "m. eey"]], "count": 1, "total_count": 1})),
        });
        assert!(b.pane().cards().is_empty());
        assert_eq!(b.snapshot().mode, BrowseMode::AllWords);

        b.dispatch(Action::PageLoaded {
            request: all,
            outcome: page(json!({"results": [["aabo", "m. x"]], "count": 1, "total_count": 9})),
        });
        let cards = b.snapshot().cards;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].headword, "aabo");
        assert_eq!(b.snapshot().total, 9);
    }

    #[test]
    fn test_letter_click_filters() {
        let mut b = started(Regions::standard());
        let request = fetch_page(&b.dispatch(Action::LetterClicked("h".into())));
        assert_eq!(request.target, PageTarget::Letter("H".into()));
        assert_eq!(b.snapshot().mode.letter(), Some("H"));
    }

    #[test]
    fn test_page_failure_shows_localized_error() {
        let mut b = browser(Regions::standard());
        let request = fetch_page(&b.dispatch(Action::Start));
        b.dispatch(Action::PageLoaded {
            request,
            outcome: Err("connection refused".into()),
        });

        let snapshot = b.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(
            snapshot.placeholder,
            Some(Placeholder::Error(Config::default().ui.messages.load_error))
        );
    }
}
