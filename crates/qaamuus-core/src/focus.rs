//! Keyboard focus bookkeeping for the page.

use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Which elements exist on the page and which one has focus
#[derive(Debug, Default, Clone)]
pub struct FocusRegistry {
    present: HashSet<ElementId>,
    current: Option<ElementId>,
}

impl FocusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, id: ElementId) {
        self.present.insert(id);
    }

    /// Remove an element; it loses focus if it had it
    pub fn detach(&mut self, id: &ElementId) {
        self.present.remove(id);
        if self.current.as_ref() == Some(id) {
            self.current = None;
        }
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.present.contains(id)
    }

    pub fn current(&self) -> Option<&ElementId> {
        self.current.as_ref()
    }

    pub fn is_focused(&self, id: &ElementId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Focus an attached element; returns whether focus moved there
    pub fn focus(&mut self, id: &ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.current = Some(id.clone());
        true
    }

    pub fn blur(&mut self) -> Option<ElementId> {
        self.current.take()
    }
}

/// Tab cycling confined to a fixed set of elements
#[derive(Debug, Clone)]
pub struct FocusTrap {
    members: Vec<ElementId>,
}

impl FocusTrap {
    pub fn new(members: Vec<ElementId>) -> Self {
        Self { members }
    }

    pub fn first(&self) -> Option<&ElementId> {
        self.members.first()
    }

    /// Next member in tab order from `current`, wrapping at both ends.
    /// Focus outside the trap re-enters at the first (or last) member.
    pub fn step(&self, current: Option<&ElementId>, forward: bool) -> Option<&ElementId> {
        let len = self.members.len();
        if len == 0 {
            return None;
        }

        let position = current.and_then(|id| self.members.iter().position(|m| m == id));
        let next = match (position, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.members.get(next)
    }
}
