//! Application state management for Slate
//!
//! This module defines the central `AppState` struct that owns the open tabs,
//! view flags, menu state, settings and transient UI state. UI components
//! receive it by reference and return commands instead of mutating it
//! directly.

use crate::commands::MenuState;
use crate::config::Settings;
use crate::editor::Language;
use crate::view::ViewState;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Display name of a document that has never been saved.
pub const UNTITLED: &str = "Untitled";

// ─────────────────────────────────────────────────────────────────────────────
// Tab State
// ─────────────────────────────────────────────────────────────────────────────

/// Stable identity of a tab.
///
/// Ids are handed out monotonically and never reused within a session, so a
/// pending bridge reply can still find its tab after others were closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Runtime state for an open document tab.
#[derive(Debug, Clone)]
pub struct Tab {
    /// Unique identifier for this tab
    pub id: TabId,
    /// Final path segment, or "Untitled"
    pub name: String,
    /// Document content
    pub content: String,
    /// Content as last read from or written to disk
    saved_content: String,
    /// Backing file (None until the first successful open/save)
    pub path: Option<PathBuf>,
    /// Language derived from the file name
    pub language: Language,
}

impl Tab {
    /// Create an empty, never-saved tab.
    pub fn untitled(id: TabId) -> Self {
        Self {
            id,
            name: UNTITLED.to_string(),
            content: String::new(),
            saved_content: String::new(),
            path: None,
            language: Language::PlainText,
        }
    }

    /// Create a tab for a document that was just read from disk.
    pub fn from_opened(id: TabId, name: String, content: String, path: PathBuf) -> Self {
        let language = Language::from_path(&path);
        Self {
            id,
            name,
            saved_content: content.clone(),
            content,
            path: Some(path),
            language,
        }
    }

    /// Title for the tab bar: the name, with `*` if modified.
    pub fn title(&self) -> String {
        if self.is_modified() {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Check if the content differs from what is on disk.
    pub fn is_modified(&self) -> bool {
        self.content != self.saved_content
    }

    /// An untouched placeholder: untitled, no path, no content.
    pub fn is_pristine(&self) -> bool {
        self.path.is_none() && self.content.is_empty() && self.name == UNTITLED
    }

    /// Re-point the tab at `path`, updating name and language from it.
    pub fn set_path(&mut self, path: PathBuf) {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            self.name = name.to_string();
            self.language = Language::from_file_name(name);
        }
        self.path = Some(path);
    }

    /// Record `snapshot` as the content now on disk.
    pub fn mark_saved(&mut self, snapshot: String) {
        self.saved_content = snapshot;
    }

    /// Directory containing the backing file, if any.
    pub fn directory(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// Transient UI state: error modal and toast.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether to show error modal
    pub show_error_modal: bool,
    /// Error message for modal
    pub error_message: String,
    /// Temporary toast message (shown in center of status bar)
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
///
/// # Example
///
/// ```ignore
/// let mut state = AppState::new();
/// state.new_tab();
/// state.update_active_content("hello".to_string());
/// ```
#[derive(Debug)]
pub struct AppState {
    /// All open tabs, never empty
    tabs: Vec<Tab>,
    /// Index of the currently active tab
    active_tab_index: usize,
    /// Next tab ID (for unique identification)
    next_tab_id: u64,
    /// Split/compare/preview flags
    pub view: ViewState,
    /// Which menu is open
    pub menu: MenuState,
    /// In-memory user settings
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create a new AppState with default settings and one untitled tab.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a state from caller-built settings, clamped to valid ranges.
    pub fn with_settings(settings: Settings) -> Self {
        let mut state = Self {
            tabs: Vec::new(),
            active_tab_index: 0,
            next_tab_id: 0,
            view: ViewState::default(),
            menu: MenuState::default(),
            settings: settings.sanitized(),
            ui: UiState::default(),
        };
        state.new_tab();
        state
    }

    fn allocate_id(&mut self) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    /// Get all tabs (read-only).
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Get the active tab index.
    pub fn active_tab_index(&self) -> usize {
        self.active_tab_index
    }

    /// Get a reference to the active tab.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active_tab_index)
    }

    /// Get a mutable reference to the active tab.
    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active_tab_index)
    }

    pub fn tab_by_id(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_by_id_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tab Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new empty tab and make it active.
    ///
    /// Returns the index of the new tab.
    pub fn new_tab(&mut self) -> usize {
        let id = self.allocate_id();
        self.tabs.push(Tab::untitled(id));
        self.active_tab_index = self.tabs.len() - 1;
        debug!("Created new tab {} at index {}", id, self.active_tab_index);
        self.active_tab_index
    }

    /// Add a document read from disk and make it active.
    ///
    /// A lone pristine placeholder tab is replaced rather than kept beside
    /// the opened document. Returns the index of the document's tab.
    pub fn open_document(&mut self, name: String, content: String, path: PathBuf) -> usize {
        let id = self.allocate_id();
        let tab = Tab::from_opened(id, name, content, path);
        info!("Opened {} as tab {} ({})", tab.name, id, tab.language.tag());

        if self.tabs.len() == 1 && self.tabs[0].is_pristine() {
            self.tabs[0] = tab;
            self.active_tab_index = 0;
        } else {
            self.tabs.push(tab);
            self.active_tab_index = self.tabs.len() - 1;
        }
        self.active_tab_index
    }

    /// Replace the active tab's content, keeping its id, path and language.
    pub fn update_active_content(&mut self, content: String) {
        if let Some(tab) = self.active_tab_mut() {
            tab.content = content;
        }
    }

    /// Replace the content of the tab with `id`.
    ///
    /// Returns `false` if no such tab is open.
    pub fn update_tab_content(&mut self, id: TabId, content: String) -> bool {
        match self.tab_by_id_mut(id) {
            Some(tab) => {
                tab.content = content;
                true
            }
            None => false,
        }
    }

    /// Set the active tab by index.
    ///
    /// Returns `true` if the index was valid and the tab was switched.
    pub fn set_active_tab(&mut self, index: usize) -> bool {
        if index < self.tab_count() {
            self.active_tab_index = index;
            debug!("Switched to tab {}", index);
            true
        } else {
            warn!("Invalid tab index: {}", index);
            false
        }
    }

    /// Activate the next tab, wrapping around.
    pub fn next_tab(&mut self) {
        self.active_tab_index = (self.active_tab_index + 1) % self.tab_count();
    }

    /// Activate the previous tab, wrapping around.
    pub fn prev_tab(&mut self) {
        self.active_tab_index = self
            .active_tab_index
            .checked_sub(1)
            .unwrap_or(self.tab_count() - 1);
    }

    /// Close a tab by index.
    ///
    /// Closing the last remaining tab replaces it with a fresh untitled tab.
    /// Returns the id of the closed tab, or `None` for an invalid index.
    pub fn close_tab(&mut self, index: usize) -> Option<TabId> {
        if index >= self.tabs.len() {
            warn!("Invalid tab index: {}", index);
            return None;
        }

        let closed = self.tabs.remove(index);

        if self.tabs.is_empty() {
            self.active_tab_index = 0;
            self.new_tab();
        } else if index <= self.active_tab_index && self.active_tab_index > 0 {
            self.active_tab_index -= 1;
        }

        debug!(
            "Closed tab {} at index {}, active is now {}",
            closed.id, index, self.active_tab_index
        );
        Some(closed.id)
    }

    /// Apply a successful save to the tab with `id`.
    ///
    /// Returns `false` if the tab was closed while the save was in flight.
    pub fn complete_save(&mut self, id: TabId, path: PathBuf, snapshot: String) -> bool {
        match self.tab_by_id_mut(id) {
            Some(tab) => {
                tab.set_path(path);
                tab.mark_saved(snapshot);
                true
            }
            None => {
                warn!("Save finished for closed tab {}, ignoring", id);
                false
            }
        }
    }

    /// Check if any tabs have unsaved changes.
    pub fn has_unsaved_changes(&self) -> bool {
        self.tabs.iter().any(Tab::is_modified)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Error modal and toasts
    // ─────────────────────────────────────────────────────────────────────────

    /// Show an error in a modal dialog.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.ui.error_message = message.into();
        self.ui.show_error_modal = true;
    }

    /// Dismiss the error modal.
    pub fn dismiss_error(&mut self) {
        self.ui.show_error_modal = false;
        self.ui.error_message.clear();
    }

    /// Show a temporary toast message.
    ///
    /// `current_time` is the app time in seconds; the toast lasts for the
    /// configured duration.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + self.settings.toast_duration);
    }

    /// Clear the toast once it has expired. Call this each frame.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
