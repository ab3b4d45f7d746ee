pub mod entry;
pub mod events;
pub mod wire;

pub use entry::{Entry, EntryError, WireEntry};
pub use events::{Key, PageTarget, ScrollMetrics};
pub use wire::{EntryDetail, EntryResponse, IndexResponse, PageResponse, SuggestResponse};
