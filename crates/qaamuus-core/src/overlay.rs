//! Accessible overlays: the entry modal and the navigation drawer.
//!
//! Both follow `Closed -> Open -> Closed`. While open, Tab and Shift+Tab cycle
//! inside the overlay and Escape closes it; closing hands focus back to
//! whatever had it before opening. A page without the overlay's region gets a
//! controller whose every operation is a no-op.

use qaamuus_types::{EntryDetail, Key};

use crate::focus::{ElementId, FocusRegistry, FocusTrap};

/// Elements making up an overlay on the page
#[derive(Debug, Clone)]
pub struct OverlayRegion {
    /// Backdrop element; a click landing exactly here closes the overlay
    pub root: ElementId,
    /// Focusable elements inside the overlay in tab order
    pub focusables: Vec<ElementId>,
    /// Receives focus on close when the opener no longer exists
    pub fallback: ElementId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OverlayState {
    Closed,
    Open { return_focus: Option<ElementId> },
}

#[derive(Debug)]
pub struct Overlay<C> {
    name: &'static str,
    region: Option<(OverlayRegion, FocusTrap)>,
    state: OverlayState,
    content: Option<C>,
    /// Focusables rendered from the current content, tabbed after the region's own
    content_focusables: Vec<ElementId>,
}

/// Content of the entry modal
#[derive(Debug, Clone, PartialEq)]
pub struct ModalContent {
    pub headword: String,
    pub pos: Option<String>,
    /// Highlighted full definition
    pub definition: String,
    /// Reference data from `/entry`, once it arrives
    pub detail: Option<EntryDetail>,
}

pub type EntryModal = Overlay<ModalContent>;
pub type NavDrawer = Overlay<()>;

impl<C> Overlay<C> {
    pub fn new(name: &'static str, region: Option<OverlayRegion>) -> Self {
        let region = region.map(|region| {
            let trap = FocusTrap::new(region.focusables.clone());
            (region, trap)
        });
        Self {
            name,
            region,
            state: OverlayState::Closed,
            content: None,
            content_focusables: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open { .. })
    }

    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut C> {
        self.content.as_mut()
    }

    /// Show the overlay with `content`; returns false when the page has no such region
    pub fn open(&mut self, content: C, focus: &mut FocusRegistry) -> bool {
        self.open_with(content, Vec::new(), focus)
    }

    /// Like [`Overlay::open`], with `focusables` rendered inside the content
    /// joining the tab cycle
    pub fn open_with(
        &mut self,
        content: C,
        focusables: Vec<ElementId>,
        focus: &mut FocusRegistry,
    ) -> bool {
        if self.region.is_none() {
            tracing::debug!("[OVERLAY] No {} on this page", self.name);
            return false;
        }

        if !self.is_open() {
            self.state = OverlayState::Open {
                return_focus: focus.current().cloned(),
            };
        }
        self.content = Some(content);
        self.set_content_focusables(focusables, focus);

        let first = self.region.as_ref().and_then(|(_, trap)| trap.first()).cloned();
        if let Some(first) = first {
            focus.focus(&first);
        }
        tracing::debug!("[OVERLAY] {} opened", self.name);
        true
    }

    /// Replace the content's focusables and rebuild the tab cycle around them.
    /// Ignored while closed.
    pub fn set_content_focusables(&mut self, focusables: Vec<ElementId>, focus: &mut FocusRegistry) {
        if !self.is_open() {
            return;
        }
        let Some((region, trap)) = &mut self.region else {
            return;
        };

        for stale in self.content_focusables.iter().filter(|id| !focusables.contains(id)) {
            focus.detach(stale);
        }
        for id in &focusables {
            focus.attach(id.clone());
        }

        let mut members = region.focusables.clone();
        members.extend(focusables.iter().cloned());
        *trap = FocusTrap::new(members);
        self.content_focusables = focusables;
    }

    pub fn content_focusables(&self) -> &[ElementId] {
        &self.content_focusables
    }

    pub fn close(&mut self, focus: &mut FocusRegistry) -> bool {
        let Some((region, trap)) = &mut self.region else {
            return false;
        };
        let OverlayState::Open { return_focus } =
            std::mem::replace(&mut self.state, OverlayState::Closed)
        else {
            return false;
        };
        self.content = None;

        for id in self.content_focusables.drain(..) {
            focus.detach(&id);
        }
        *trap = FocusTrap::new(region.focusables.clone());

        let restored = return_focus
            .filter(|id| focus.contains(id))
            .is_some_and(|id| focus.focus(&id));
        if !restored && !focus.focus(&region.fallback) {
            focus.blur();
        }

        tracing::debug!("[OVERLAY] {} closed", self.name);
        true
    }

    /// Tab trapping and Escape; returns whether the key was consumed
    pub fn on_key(&mut self, key: Key, focus: &mut FocusRegistry) -> bool {
        if !self.is_open() {
            return false;
        }

        match key {
            Key::Escape => self.close(focus),
            Key::Tab | Key::ShiftTab => {
                let next = self
                    .region
                    .as_ref()
                    .and_then(|(_, trap)| trap.step(focus.current(), key == Key::Tab))
                    .cloned();
                if let Some(next) = next {
                    focus.focus(&next);
                }
                true
            }
            _ => false,
        }
    }

    /// Close on a click that lands on the backdrop itself
    pub fn on_click(&mut self, target: &ElementId, focus: &mut FocusRegistry) -> bool {
        let on_backdrop = self
            .region
            .as_ref()
            .is_some_and(|(region, _)| &region.root == target);
        if self.is_open() && on_backdrop {
            return self.close(focus);
        }
        false
    }
}
