//! The code editor mounted in each pane
//!
//! `CodeEditor` wraps egui's `TextEdit` with a line-number gutter, syntax
//! highlighting, search match highlighting and per-tab undo history. One
//! instance serves every pane; document state is keyed by `TabId`.

use super::find_replace::{FindReplacePanel, FindState};
use super::highlight::highlighter;
use super::history::EditHistory;
use super::stats::count_lines;
use super::{EditorControl, Language};
use crate::config::Settings;
use crate::state::TabId;
use crate::theme;
use eframe::egui::{self, text::LayoutJob, FontId, ScrollArea, TextEdit, Ui};
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Result of showing one editor pane.
pub struct EditorOutput {
    /// Whether the user modified the content this frame.
    pub changed: bool,
}

/// How a pane should present its document.
#[derive(Debug, Clone, Copy)]
pub struct PaneOptions {
    /// Distinguishes panes that may show the same tab.
    pub id_salt: &'static str,
    /// Content is displayed but cannot be edited.
    pub read_only: bool,
    /// Draw search matches and follow the current one.
    pub focused: bool,
}

impl PaneOptions {
    pub fn primary() -> Self {
        Self {
            id_salt: "primary",
            read_only: false,
            focused: true,
        }
    }

    pub fn split() -> Self {
        Self {
            id_salt: "split",
            read_only: false,
            focused: false,
        }
    }

    pub fn compare() -> Self {
        Self {
            id_salt: "compare",
            read_only: true,
            focused: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    Undo,
    Redo,
}

/// One pane showing one tab.
type PaneKey = (&'static str, TabId);

/// Highlighted layout reused while the text is unchanged.
struct CachedLayout {
    key: u64,
    job: LayoutJob,
}

// ─────────────────────────────────────────────────────────────────────────────
// CodeEditor
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CodeEditor {
    histories: HashMap<TabId, EditHistory>,
    pending: Option<PendingAction>,
    find_state: FindState,
    find_panel: FindReplacePanel,
    show_find: bool,
    scroll_to_match: bool,
    /// Hash of the text the current matches were computed against.
    matched_key: u64,
    layouts: HashMap<PaneKey, CachedLayout>,
    /// Widget id of each pane whose text edit held keyboard focus last frame.
    focused_ids: HashMap<PaneKey, egui::Id>,
}

impl EditorControl for CodeEditor {
    fn undo(&mut self) {
        self.pending = Some(PendingAction::Undo);
    }

    fn redo(&mut self) {
        self.pending = Some(PendingAction::Redo);
    }

    fn find(&mut self) {
        self.open_find(false);
    }

    fn replace(&mut self) {
        self.open_find(true);
    }
}

impl CodeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_find(&mut self, replace_mode: bool) {
        self.show_find = true;
        self.find_state.is_replace_mode = replace_mode;
        self.find_panel.request_focus();
        // Force a fresh search against whatever document is focused now.
        self.matched_key = 0;
    }

    /// Drop all state kept for a closed tab.
    pub fn forget(&mut self, tab_id: TabId) {
        if self.histories.remove(&tab_id).is_some() {
            debug!("Dropped edit history for tab {}", tab_id);
        }
        self.layouts.retain(|(_, tab), _| *tab != tab_id);
        self.focused_ids.retain(|(_, tab), _| *tab != tab_id);
    }

    /// Record an edit of `tab_id` for undo.
    pub fn record_edit(&mut self, tab_id: TabId, old_content: String, current: &str) {
        self.histories
            .entry(tab_id)
            .or_default()
            .record(old_content, current);
    }

    pub fn can_undo(&self, tab_id: TabId) -> bool {
        self.histories.get(&tab_id).is_some_and(EditHistory::can_undo)
    }

    pub fn can_redo(&self, tab_id: TabId) -> bool {
        self.histories.get(&tab_id).is_some_and(EditHistory::can_redo)
    }

    /// Apply a queued undo or redo to the focused document.
    ///
    /// Returns `true` if `content` was rewritten.
    pub fn apply_pending(&mut self, tab_id: TabId, content: &mut String) -> bool {
        let Some(action) = self.pending.take() else {
            return false;
        };
        let Some(history) = self.histories.get_mut(&tab_id) else {
            return false;
        };

        let applied = match action {
            PendingAction::Undo => history.undo(content),
            PendingAction::Redo => history.redo(content),
        };
        if applied {
            debug!("Applied {:?} to tab {}", action, tab_id);
        }
        applied
    }

    fn content_version(&self, tab_id: TabId) -> u64 {
        self.histories.get(&tab_id).map_or(0, EditHistory::version)
    }

    /// Id of the text edit a pane shows for `tab_id`.
    ///
    /// The history version is part of the id so the `TextEdit` drops its
    /// cursor state after undo/redo rewrites the text.
    fn text_edit_id(&self, id_salt: &'static str, tab_id: TabId) -> egui::Id {
        egui::Id::new("code_editor")
            .with(id_salt)
            .with(tab_id)
            .with(self.content_version(tab_id))
    }

    /// Recompute matches if the focused text changed since the last search.
    fn refresh_matches(&mut self, text: &str) {
        let key = hash_of(&(text, &self.find_state.search_term));
        if key != self.matched_key {
            self.find_state.find_matches(text);
            self.matched_key = key;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Find panel
    // ─────────────────────────────────────────────────────────────────────────

    /// Show the find/replace window for the focused document.
    ///
    /// Returns the number of occurrences replaced when a replacement
    /// modified `content`.
    pub fn show_find_panel(
        &mut self,
        ctx: &egui::Context,
        tab_id: TabId,
        content: &mut String,
    ) -> Option<usize> {
        if !self.show_find {
            return None;
        }

        self.refresh_matches(content);
        let output = self.find_panel.show(ctx, &mut self.find_state);

        if output.close_requested {
            self.show_find = false;
            self.find_state.clear();
            return None;
        }

        if output.search_changed {
            self.find_state.find_matches(content);
            self.matched_key = hash_of(&(content.as_str(), &self.find_state.search_term));
            self.scroll_to_match = true;
        }
        if output.next_requested && self.find_state.next_match().is_some() {
            self.scroll_to_match = true;
        }
        if output.prev_requested && self.find_state.prev_match().is_some() {
            self.scroll_to_match = true;
        }

        let replaced = if output.replace_all_requested && self.find_state.has_matches() {
            let count = self.find_state.match_count();
            Some((self.find_state.replace_all(content), count))
        } else if output.replace_requested {
            self.find_state.replace_current(content).map(|text| (text, 1))
        } else {
            None
        };

        match replaced {
            Some((new_content, count)) if new_content != *content => {
                let old = std::mem::replace(content, new_content);
                self.record_edit(tab_id, old, content);
                self.find_state.find_matches(content);
                self.matched_key = hash_of(&(content.as_str(), &self.find_state.search_term));
                Some(count)
            }
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pane rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Show one pane editing `content`.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        tab_id: TabId,
        content: &mut String,
        language: Language,
        settings: &Settings,
        options: PaneOptions,
    ) -> EditorOutput {
        let pane = (options.id_salt, tab_id);
        let id = self.text_edit_id(options.id_salt, tab_id);
        // Focus stays with the pane when undo/redo swaps the widget id, unless
        // the user has moved it to another widget in the meantime.
        let carry_focus = self.focused_ids.get(&pane).is_some_and(|&previous| {
            previous != id && ui.memory(|m| m.focused().map_or(true, |f| f == previous))
        });

        let font_size = settings.font_size;
        let font_id = FontId::monospace(font_size);
        let word_wrap = settings.word_wrap;
        let highlight = settings.highlight_syntax;
        let show_line_numbers = settings.show_line_numbers;

        let search = if options.focused && self.show_find {
            Some((
                self.find_state.matches.clone(),
                self.find_state.current_match,
            ))
        } else {
            None
        };

        let mut target_scroll_offset = None;
        if options.focused && std::mem::take(&mut self.scroll_to_match) {
            if let Some((start, _)) = self.find_state.current_match_position() {
                let line = content
                    .get(..start)
                    .map_or(0, |before| before.matches('\n').count());
                let line_height = ui.fonts(|f| f.row_height(&font_id));
                let viewport_height = ui.available_height();
                target_scroll_offset =
                    Some((line as f32 * line_height - viewport_height / 3.0).max(0.0));
            }
        }

        let gutter_width = if show_line_numbers {
            let digits = count_lines(content).to_string().len();
            (font_size * 0.6 * digits as f32 + 20.0).max(30.0)
        } else {
            0.0
        };

        let layout_cache = &mut self.layouts;
        let mut layouter = move |ui: &Ui, text: &str, wrap_width: f32| -> Arc<egui::Galley> {
            let key = hash_of(&(text, language, font_size.to_bits(), highlight));
            let fallback = ui.visuals().text_color();
            let cached = layout_cache.entry(pane).or_insert_with(|| CachedLayout {
                key: 0,
                job: LayoutJob::default(),
            });
            if cached.key != key || cached.job.text != text {
                cached.job = if highlight {
                    highlighter().layout_document(text, language, font_id.clone(), fallback)
                } else {
                    highlighter().layout_job(text, None, font_id.clone(), fallback)
                };
                cached.key = key;
            }

            let mut job = cached.job.clone();
            job.wrap.max_width = if word_wrap { wrap_width } else { f32::INFINITY };
            ui.fonts(|f| f.layout_job(job))
        };

        let original = (!options.read_only).then(|| content.clone());

        let mut scroll_area = ScrollArea::both()
            .id_source(id.with("scroll"))
            .auto_shrink([false, false]);
        if let Some(offset) = target_scroll_offset {
            scroll_area = scroll_area.vertical_scroll_offset(offset);
        }

        let mut has_focus = false;
        scroll_area.show(ui, |ui| {
            ui.horizontal_top(|ui| {
                let gutter_rect = show_line_numbers.then(|| {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(gutter_width, ui.available_height()),
                        egui::Sense::hover(),
                    );
                    rect
                });

                let text_output = if options.read_only {
                    let mut view = content.as_str();
                    TextEdit::multiline(&mut view)
                        .id(id)
                        .frame(false)
                        .desired_width(f32::INFINITY)
                        .layouter(&mut layouter)
                        .show(ui)
                } else {
                    TextEdit::multiline(content)
                        .id(id)
                        .frame(false)
                        .desired_width(f32::INFINITY)
                        .layouter(&mut layouter)
                        .show(ui)
                };

                if carry_focus {
                    text_output.response.request_focus();
                }
                has_focus = text_output.response.has_focus();

                let galley = &text_output.galley;
                let galley_pos = text_output.galley_pos;
                let painter = ui.painter();

                if let Some((matches, current)) = &search {
                    for (idx, &(start, end)) in matches.iter().enumerate() {
                        // Matches are byte offsets; the galley is indexed by char.
                        let (Some(before), Some(matched)) =
                            (content.get(..start), content.get(start..end))
                        else {
                            continue;
                        };
                        let start_char = before.chars().count();
                        let end_char = start_char + matched.chars().count();
                        let color = if idx == *current {
                            theme::MATCH_CURRENT
                        } else {
                            theme::MATCH_OTHER
                        };

                        let start = galley
                            .from_ccursor(egui::text::CCursor::new(start_char))
                            .rcursor;
                        let end = galley
                            .from_ccursor(egui::text::CCursor::new(end_char))
                            .rcursor;

                        for row_idx in start.row..=end.row {
                            let Some(row) = galley.rows.get(row_idx) else {
                                continue;
                            };
                            let x_start = if row_idx == start.row {
                                row.x_offset(start.column)
                            } else {
                                0.0
                            };
                            let x_end = if row_idx == end.row {
                                row.x_offset(end.column)
                            } else {
                                row.rect.width()
                            };
                            let rect = egui::Rect::from_min_max(
                                egui::pos2(galley_pos.x + x_start, galley_pos.y + row.rect.min.y),
                                egui::pos2(galley_pos.x + x_end, galley_pos.y + row.rect.max.y),
                            );
                            painter.rect_filled(rect, 2.0, color);
                        }
                    }
                }

                if let Some(gutter_rect) = gutter_rect {
                    let gutter_rect = gutter_rect.with_max_y(
                        gutter_rect
                            .max
                            .y
                            .max(galley_pos.y + galley.rect.height()),
                    );
                    painter.rect_filled(gutter_rect, 0.0, theme::GUTTER);
                    painter.line_segment(
                        [
                            gutter_rect.right_top() + egui::vec2(-1.0, 0.0),
                            gutter_rect.right_bottom() + egui::vec2(-1.0, 0.0),
                        ],
                        egui::Stroke::new(1.0, theme::BORDER),
                    );

                    // With word wrap several rows share one logical line; number
                    // only the first row of each.
                    let number_font = FontId::monospace(font_size);
                    let mut logical_line = 1usize;
                    let mut numbered = false;
                    for row in galley.rows.iter() {
                        if !numbered {
                            painter.text(
                                egui::pos2(gutter_rect.right() - 12.0, galley_pos.y + row.min_y()),
                                egui::Align2::RIGHT_TOP,
                                logical_line.to_string(),
                                number_font.clone(),
                                theme::TEXT_MUTED,
                            );
                            numbered = true;
                        }
                        if row.ends_with_newline {
                            logical_line += 1;
                            numbered = false;
                        }
                    }
                }
            });
        });

        if has_focus {
            self.focused_ids.insert(pane, id);
        } else {
            self.focused_ids.remove(&pane);
        }

        let changed = match original {
            Some(old) if old != *content => {
                self.record_edit(tab_id, old, content);
                true
            }
            _ => false,
        };

        EditorOutput { changed }
    }
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(editor: &mut CodeEditor, tab: TabId, content: &mut String, new_content: &str) {
        let old = std::mem::replace(content, new_content.to_string());
        editor.record_edit(tab, old, content);
    }

    #[test]
    fn test_undo_is_applied_on_next_frame() {
        let mut editor = CodeEditor::new();
        let tab = TabId(1);
        let mut content = "hello".to_string();
        edit(&mut editor, tab, &mut content, "hello world");

        EditorControl::undo(&mut editor);
        assert_eq!(content, "hello world");
        assert!(editor.apply_pending(tab, &mut content));
        assert_eq!(content, "hello");

        // The request is consumed.
        assert!(!editor.apply_pending(tab, &mut content));
    }

    #[test]
    fn test_redo_after_undo() {
        let mut editor = CodeEditor::new();
        let tab = TabId(1);
        let mut content = String::new();
        edit(&mut editor, tab, &mut content, "a");

        editor.undo();
        editor.apply_pending(tab, &mut content);
        assert!(editor.can_redo(tab));

        editor.redo();
        assert!(editor.apply_pending(tab, &mut content));
        assert_eq!(content, "a");
        assert!(!editor.can_redo(tab));
    }

    #[test]
    fn test_histories_are_per_tab() {
        let mut editor = CodeEditor::new();
        let (a, b) = (TabId(1), TabId(2));
        let mut text_a = String::new();
        let mut text_b = String::new();
        edit(&mut editor, a, &mut text_a, "a1");
        edit(&mut editor, b, &mut text_b, "b1");

        editor.undo();
        editor.apply_pending(a, &mut text_a);
        assert_eq!(text_a, "");
        assert_eq!(text_b, "b1");
        assert!(editor.can_undo(b));
    }

    #[test]
    fn test_undo_without_history_is_noop() {
        let mut editor = CodeEditor::new();
        let mut content = "untouched".to_string();
        editor.undo();
        assert!(!editor.apply_pending(TabId(9), &mut content));
        assert_eq!(content, "untouched");
    }

    #[test]
    fn test_undo_bumps_widget_version() {
        let mut editor = CodeEditor::new();
        let tab = TabId(3);
        let mut content = String::new();
        edit(&mut editor, tab, &mut content, "x");
        assert_eq!(editor.content_version(tab), 0);

        editor.undo();
        editor.apply_pending(tab, &mut content);
        assert_eq!(editor.content_version(tab), 1);
    }

    #[test]
    fn test_find_and_replace_open_panel() {
        let mut editor = CodeEditor::new();
        assert!(!editor.show_find);

        editor.find();
        assert!(editor.show_find);
        assert!(!editor.find_state.is_replace_mode);

        editor.replace();
        assert!(editor.find_state.is_replace_mode);
    }

    #[test]
    fn test_forget_drops_history() {
        let mut editor = CodeEditor::new();
        let tab = TabId(5);
        let mut content = String::new();
        edit(&mut editor, tab, &mut content, "x");
        editor.forget(tab);
        assert!(!editor.can_undo(tab));
    }

    #[test]
    fn test_refresh_matches_tracks_text() {
        let mut editor = CodeEditor::new();
        editor.find_state.search_term = "a".to_string();
        editor.refresh_matches("aaa");
        assert_eq!(editor.find_state.match_count(), 3);

        editor.refresh_matches("ab");
        assert_eq!(editor.find_state.match_count(), 1);
    }

    #[test]
    fn test_pane_options() {
        assert!(PaneOptions::compare().read_only);
        assert!(!PaneOptions::split().read_only);
        assert!(PaneOptions::primary().focused);
        assert_ne!(PaneOptions::primary().id_salt, PaneOptions::split().id_salt);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frames
    // ─────────────────────────────────────────────────────────────────────────

    fn run_frame(ctx: &egui::Context, editor: &mut CodeEditor, tab: TabId, content: &mut String) {
        let settings = Settings {
            highlight_syntax: false,
            ..Settings::default()
        };
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                editor.show(
                    ui,
                    tab,
                    content,
                    Language::PlainText,
                    &settings,
                    PaneOptions::primary(),
                );
            });
        });
    }

    #[test]
    fn test_layout_cache_holds_one_entry_per_pane() {
        let ctx = egui::Context::default();
        let mut editor = CodeEditor::new();
        let tab = TabId(1);
        let mut content = "start".to_string();

        for round in 0..5 {
            edit(&mut editor, tab, &mut content, &format!("start {}", round));
            editor.undo();
            editor.apply_pending(tab, &mut content);
            run_frame(&ctx, &mut editor, tab, &mut content);
        }
        assert_eq!(editor.content_version(tab), 5);
        assert_eq!(editor.layouts.len(), 1);

        editor.forget(tab);
        assert!(editor.layouts.is_empty());
    }

    #[test]
    fn test_undo_keeps_keyboard_focus() {
        let ctx = egui::Context::default();
        let mut editor = CodeEditor::new();
        let tab = TabId(1);
        let mut content = "one".to_string();

        run_frame(&ctx, &mut editor, tab, &mut content);
        let before = editor.text_edit_id("primary", tab);
        ctx.memory_mut(|m| m.request_focus(before));
        run_frame(&ctx, &mut editor, tab, &mut content);

        edit(&mut editor, tab, &mut content, "one two");
        editor.undo();
        assert!(editor.apply_pending(tab, &mut content));
        let after = editor.text_edit_id("primary", tab);
        assert_ne!(before, after);

        run_frame(&ctx, &mut editor, tab, &mut content);
        assert!(ctx.memory(|m| m.has_focus(after)));
        assert_eq!(content, "one");
    }

    #[test]
    fn test_unfocused_pane_does_not_take_focus_after_undo() {
        let ctx = egui::Context::default();
        let mut editor = CodeEditor::new();
        let tab = TabId(1);
        let mut content = "one".to_string();
        run_frame(&ctx, &mut editor, tab, &mut content);

        edit(&mut editor, tab, &mut content, "one two");
        editor.undo();
        editor.apply_pending(tab, &mut content);
        run_frame(&ctx, &mut editor, tab, &mut content);

        let id = editor.text_edit_id("primary", tab);
        assert!(!ctx.memory(|m| m.has_focus(id)));
    }
}
