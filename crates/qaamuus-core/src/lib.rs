pub mod browser;
pub mod focus;
pub mod highlight;
pub mod overlay;
pub mod pagination;
pub mod pos;
pub mod preprocess;
pub mod render;
pub mod scroll;
pub mod suggest;

pub use browser::{Action, Browser, Command, Regions, Snapshot};
pub use pagination::{BrowseMode, BrowseState, PageRequest, PageStatus, PaginationController};
pub use render::{Card, Placeholder, ResultRenderer, ResultsPane};
pub use suggest::{KeyOutcome, SuggestRequest, SuggestionEngine};
