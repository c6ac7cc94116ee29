//! View composition: split, compare and markdown preview
//!
//! `ViewState` holds the three toggles; `layout` turns them and the tab list
//! into the set of panes to draw this frame.

use crate::state::{Tab, TabId};

/// Pane flags toggled from the View menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub split_view: bool,
    pub compare_mode: bool,
    pub markdown_preview: bool,
}

/// The second editor pane beside the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryPane {
    /// Editable view of the tab after the active one, if there is one.
    Split { neighbor: Option<TabId> },
    /// Read-only copy of the active tab.
    Compare { source: TabId },
}

/// What to draw in the central area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub primary: TabId,
    pub secondary: Option<SecondaryPane>,
    pub preview: bool,
}

impl ViewState {
    pub fn toggle_split_view(&mut self) {
        self.split_view = !self.split_view;
    }

    pub fn toggle_compare_mode(&mut self) {
        self.compare_mode = !self.compare_mode;
    }

    pub fn toggle_markdown_preview(&mut self) {
        self.markdown_preview = !self.markdown_preview;
    }

    /// Derive the pane layout for the current tabs.
    ///
    /// Compare takes precedence over split when both are on. Preview is only
    /// shown for markdown documents. Returns `None` if `active` is out of
    /// range.
    pub fn layout(&self, tabs: &[Tab], active: usize) -> Option<PaneLayout> {
        let primary = tabs.get(active)?;

        let secondary = if self.compare_mode {
            Some(SecondaryPane::Compare { source: primary.id })
        } else if self.split_view {
            Some(SecondaryPane::Split {
                neighbor: tabs.get(active + 1).map(|t| t.id),
            })
        } else {
            None
        };

        Some(PaneLayout {
            primary: primary.id,
            secondary,
            preview: self.markdown_preview && primary.language.is_markdown(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
