use std::fmt;

/// Which listing a page request targets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageTarget {
    AllWords,
    Search(String),
    Letter(String),
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTarget::AllWords => write!(f, "all"),
            PageTarget::Search(query) => write!(f, "search:{query}"),
            PageTarget::Letter(letter) => write!(f, "letter:{letter}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    Tab,
    ShiftTab,
    Other,
}

/// Viewport geometry reported with each scroll event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> f64 {
        (self.content_height - (self.scroll_top + self.viewport_height)).max(0.0)
    }
}
