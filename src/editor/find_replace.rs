//! Find and Replace for the code editor
//!
//! Search runs over the focused document with literal, case-sensitive,
//! whole-word and regex modes. Every mode compiles down to one regex so that
//! match offsets always index the original text, including for case folding
//! of non-ASCII characters.

use eframe::egui::{self, Color32, Key, RichText, Ui, Vec2};
use log::debug;
use regex::{Regex, RegexBuilder};

// ─────────────────────────────────────────────────────────────────────────────
// Find State
// ─────────────────────────────────────────────────────────────────────────────

/// Search terms, options and the current result set.
#[derive(Debug, Clone, Default)]
pub struct FindState {
    /// Current search term
    pub search_term: String,
    /// Current replacement text
    pub replace_term: String,
    /// Whether search is case-sensitive
    pub case_sensitive: bool,
    /// Whether to match whole words only
    pub whole_word: bool,
    /// Whether the search term is a regular expression
    pub use_regex: bool,
    /// Whether the replacement row is shown
    pub is_replace_mode: bool,
    /// Index into `matches` of the highlighted match
    pub current_match: usize,
    /// All matches as (start, end) byte offsets
    pub matches: Vec<(usize, usize)>,
}

impl FindState {
    /// Build the regex for the current term and options.
    ///
    /// Returns `None` for an empty term or an invalid pattern.
    fn compile(&self) -> Option<Regex> {
        if self.search_term.is_empty() {
            return None;
        }

        let body = if self.use_regex {
            self.search_term.clone()
        } else {
            regex::escape(&self.search_term)
        };
        let pattern = if self.whole_word {
            format!(r"\b(?:{})\b", body)
        } else {
            body
        };

        match RegexBuilder::new(&pattern)
            .case_insensitive(!self.case_sensitive)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                debug!("Invalid search pattern '{}': {}", self.search_term, e);
                None
            }
        }
    }

    /// Recompute all matches in `text`.
    ///
    /// Zero-length regex matches are skipped. Returns the match count.
    pub fn find_matches(&mut self, text: &str) -> usize {
        self.matches = match self.compile() {
            Some(re) => re
                .find_iter(text)
                .filter(|m| !m.as_str().is_empty())
                .map(|m| (m.start(), m.end()))
                .collect(),
            None => Vec::new(),
        };

        if self.current_match >= self.matches.len() {
            self.current_match = 0;
        }

        self.matches.len()
    }

    /// Move to the next match, wrapping at the end.
    pub fn next_match(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        self.current_match = (self.current_match + 1) % self.matches.len();
        Some(self.current_match)
    }

    /// Move to the previous match, wrapping at the start.
    pub fn prev_match(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        self.current_match = self
            .current_match
            .checked_sub(1)
            .unwrap_or(self.matches.len() - 1);
        Some(self.current_match)
    }

    /// Byte range of the highlighted match.
    pub fn current_match_position(&self) -> Option<(usize, usize)> {
        self.matches.get(self.current_match).copied()
    }

    /// Replace the highlighted match.
    ///
    /// Returns the new text, or `None` if there is no current match.
    pub fn replace_current(&self, text: &str) -> Option<String> {
        let (start, end) = self.current_match_position()?;
        let mut new_text = String::with_capacity(text.len() + self.replace_term.len());
        new_text.push_str(&text[..start]);
        new_text.push_str(&self.replace_term);
        new_text.push_str(&text[end..]);
        Some(new_text)
    }

    /// Replace every match.
    pub fn replace_all(&self, text: &str) -> String {
        let mut new_text = String::with_capacity(text.len());
        let mut last_end = 0;
        for &(start, end) in &self.matches {
            new_text.push_str(&text[last_end..start]);
            new_text.push_str(&self.replace_term);
            last_end = end;
        }
        new_text.push_str(&text[last_end..]);
        new_text
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.current_match = 0;
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Label for the match counter, e.g. "2 of 5".
    pub fn counter_label(&self) -> String {
        if self.matches.is_empty() {
            if self.search_term.is_empty() {
                String::new()
            } else {
                "No matches".to_string()
            }
        } else {
            format!("{} of {}", self.current_match + 1, self.matches.len())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Find/Replace Panel
// ─────────────────────────────────────────────────────────────────────────────

/// Actions requested through the panel this frame.
#[derive(Debug, Clone, Default)]
pub struct FindReplacePanelOutput {
    /// The term or an option changed; matches must be recomputed
    pub search_changed: bool,
    pub next_requested: bool,
    pub prev_requested: bool,
    pub replace_requested: bool,
    pub replace_all_requested: bool,
    pub close_requested: bool,
}

/// Floating search window anchored to the top of the editor area.
pub struct FindReplacePanel {
    focus_search: bool,
}

impl Default for FindReplacePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FindReplacePanel {
    pub fn new() -> Self {
        Self { focus_search: true }
    }

    /// Focus the search field the next time the panel is drawn.
    pub fn request_focus(&mut self) {
        self.focus_search = true;
    }

    /// Show the panel and report what the user asked for.
    pub fn show(&mut self, ctx: &egui::Context, find_state: &mut FindState) -> FindReplacePanelOutput {
        let mut output = FindReplacePanelOutput::default();

        let muted = Color32::from_rgb(140, 140, 140);
        let accent = Color32::from_rgb(97, 218, 251);

        let frame = egui::Frame::none()
            .fill(Color32::from_rgb(45, 45, 45))
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(70, 70, 70)))
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .rounding(egui::Rounding::same(6.0))
            .shadow(egui::epaint::Shadow {
                offset: egui::vec2(0.0, 2.0),
                blur: 8.0,
                spread: 0.0,
                color: Color32::from_black_alpha(40),
            });

        egui::Window::new("Find and Replace")
            .id(egui::Id::new("find_replace_panel"))
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::RIGHT_TOP, [-24.0, 72.0])
            .frame(frame)
            .show(ctx, |ui| {
                ui.set_min_width(420.0);

                let (escape, enter, f3_next, f3_prev) = ui.input(|i| {
                    (
                        i.key_pressed(Key::Escape),
                        i.key_pressed(Key::Enter),
                        i.key_pressed(Key::F3) && !i.modifiers.shift,
                        i.key_pressed(Key::F3) && i.modifiers.shift,
                    )
                });
                output.next_requested |= f3_next;
                output.prev_requested |= f3_prev;

                ui.horizontal(|ui| {
                    let title = if find_state.is_replace_mode {
                        "Find and Replace"
                    } else {
                        "Find"
                    };
                    ui.label(RichText::new(title).size(14.0).strong());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(egui::Button::new(RichText::new("×").size(16.0).color(muted)).frame(false))
                            .on_hover_text("Close (Escape)")
                            .clicked()
                        {
                            output.close_requested = true;
                        }
                    });
                });

                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    let response = ui.add_sized(
                        Vec2::new(280.0, 24.0),
                        egui::TextEdit::singleline(&mut find_state.search_term)
                            .id(egui::Id::new("find_replace_search_input"))
                            .hint_text("Search..."),
                    );
                    if self.focus_search {
                        response.request_focus();
                        self.focus_search = false;
                    }
                    if response.changed() {
                        output.search_changed = true;
                    }
                    // A single-line edit gives up focus on Enter; take it back
                    // so Enter keeps stepping through matches.
                    if enter && response.lost_focus() {
                        output.next_requested = true;
                        self.focus_search = true;
                    }
                    if escape && owns_key(&response) {
                        output.close_requested = true;
                    }
                    ui.label(RichText::new(find_state.counter_label()).size(12.0).color(muted));
                });

                if find_state.is_replace_mode {
                    ui.add_space(4.0);
                    let response = ui.add_sized(
                        Vec2::new(280.0, 24.0),
                        egui::TextEdit::singleline(&mut find_state.replace_term)
                            .id(egui::Id::new("find_replace_replace_input"))
                            .hint_text("Replace with..."),
                    );
                    if escape && owns_key(&response) {
                        output.close_requested = true;
                    }
                }

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    for (label, tooltip, flag) in [
                        ("Aa", "Case Sensitive", &mut find_state.case_sensitive),
                        ("W", "Whole Word", &mut find_state.whole_word),
                        (".*", "Use Regex", &mut find_state.use_regex),
                    ] {
                        if ui.add(toggle_button(label, tooltip, *flag, accent)).clicked() {
                            *flag = !*flag;
                            output.search_changed = true;
                        }
                    }

                    ui.add_space(16.0);
                    let has_matches = find_state.has_matches();

                    if ui
                        .add_enabled(has_matches, egui::Button::new("◀").min_size(Vec2::new(28.0, 24.0)))
                        .on_hover_text("Previous (Shift+F3)")
                        .clicked()
                    {
                        output.prev_requested = true;
                    }
                    if ui
                        .add_enabled(has_matches, egui::Button::new("▶").min_size(Vec2::new(28.0, 24.0)))
                        .on_hover_text("Next (F3 or Enter)")
                        .clicked()
                    {
                        output.next_requested = true;
                    }

                    if find_state.is_replace_mode {
                        ui.add_space(8.0);
                        if ui
                            .add_enabled(has_matches, egui::Button::new("Replace"))
                            .clicked()
                        {
                            output.replace_requested = true;
                        }
                        if ui
                            .add_enabled(has_matches, egui::Button::new("Replace All"))
                            .clicked()
                        {
                            output.replace_all_requested = true;
                        }
                    }
                });
            });

        output
    }
}

/// Whether a key pressed this frame was meant for the field behind `response`.
fn owns_key(response: &egui::Response) -> bool {
    response.has_focus() || response.lost_focus()
}

/// A small framed toggle used for the search options.
fn toggle_button<'a>(
    label: &'a str,
    tooltip: &'a str,
    active: bool,
    accent: Color32,
) -> impl egui::Widget + 'a {
    move |ui: &mut Ui| -> egui::Response {
        let (text_color, fill, border) = if active {
            (accent, Color32::from_rgb(50, 70, 90), accent)
        } else {
            (
                Color32::from_rgb(160, 160, 160),
                Color32::TRANSPARENT,
                Color32::from_rgb(70, 70, 70),
            )
        };

        ui.add(
            egui::Button::new(RichText::new(label).size(12.0).color(text_color).strong())
                .fill(fill)
                .stroke(egui::Stroke::new(1.0, border))
                .min_size(Vec2::new(28.0, 24.0)),
        )
        .on_hover_text(tooltip)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn search(term: &str, text: &str) -> FindState {
        let mut state = FindState::default();
        state.search_term = term.to_string();
        state.find_matches(text);
        state
    }

    #[test]
    fn test_find_matches_empty_search() {
        let state = search("", "Hello, World!");
        assert!(state.matches.is_empty());
        assert_eq!(state.counter_label(), "");
    }

    #[test]
    fn test_find_matches_basic_is_case_insensitive_by_default() {
        let state = search("hello", "Hello, HELLO, hello!");
        assert_eq!(state.matches, vec![(0, 5), (7, 12), (14, 19)]);
    }

    #[test]
    fn test_find_matches_case_sensitive() {
        let mut state = FindState::default();
        state.search_term = "Hello".to_string();
        state.case_sensitive = true;
        assert_eq!(state.find_matches("Hello, HELLO, hello!"), 1);
        assert_eq!(state.matches, vec![(0, 5)]);
    }

    #[test]
    fn test_literal_search_escapes_metacharacters() {
        let state = search("a.b", "axb a.b");
        assert_eq!(state.matches, vec![(4, 7)]);
    }

    #[test]
    fn test_find_matches_whole_word() {
        let mut state = FindState::default();
        state.search_term = "test".to_string();
        state.whole_word = true;
        assert_eq!(state.find_matches("test testing tested test"), 2);
        assert_eq!(state.matches, vec![(0, 4), (20, 24)]);

        // Underscores are word characters.
        assert_eq!(state.find_matches("test test_case _test test"), 2);
    }

    #[test]
    fn test_find_matches_regex() {
        let mut state = FindState::default();
        state.search_term = r"\d+".to_string();
        state.use_regex = true;
        assert_eq!(state.find_matches("abc123def456ghi"), 2);
        assert_eq!(state.matches, vec![(3, 6), (9, 12)]);
    }

    #[test]
    fn test_find_matches_regex_invalid() {
        let mut state = FindState::default();
        state.search_term = "[invalid".to_string();
        state.use_regex = true;
        assert_eq!(state.find_matches("test text"), 0);
        assert_eq!(state.counter_label(), "No matches");
    }

    #[test]
    fn test_regex_zero_length_matches_skipped() {
        let mut state = FindState::default();
        state.search_term = "x*".to_string();
        state.use_regex = true;
        assert_eq!(state.find_matches("axxb"), 1);
        assert_eq!(state.matches, vec![(1, 3)]);
    }

    #[test]
    fn test_case_insensitive_offsets_index_original_text() {
        let text = "İstanbul istanbul";
        let state = search("istanbul", text);
        for &(start, end) in &state.matches {
            assert!(text.is_char_boundary(start));
            assert!(text.is_char_boundary(end));
        }
        assert!(state.matches.contains(&(10, 18)));
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut state = search("x", "axbxcx");
        assert_eq!(state.next_match(), Some(1));
        assert_eq!(state.next_match(), Some(2));
        assert_eq!(state.next_match(), Some(0));
        assert_eq!(state.prev_match(), Some(2));
        assert_eq!(state.counter_label(), "3 of 3");
    }

    #[test]
    fn test_next_prev_no_matches() {
        let mut state = FindState::default();
        assert!(state.next_match().is_none());
        assert!(state.prev_match().is_none());
    }

    #[test]
    fn test_replace_current_second_match() {
        let mut state = search("foo", "foo and foo");
        state.replace_term = "bar".to_string();
        state.next_match();
        assert_eq!(
            state.replace_current("foo and foo"),
            Some("foo and bar".to_string())
        );
    }

    #[test]
    fn test_replace_current_no_match() {
        assert!(FindState::default().replace_current("hello").is_none());
    }

    #[test]
    fn test_replace_all() {
        let mut state = search("a", "abracadabra");
        state.replace_term = "X".to_string();
        assert_eq!(state.replace_all("abracadabra"), "XbrXcXdXbrX");
    }

    #[test]
    fn test_replace_all_multiline() {
        let mut state = search("\n", "a\nb\nc");
        state.replace_term = " | ".to_string();
        assert_eq!(state.replace_all("a\nb\nc"), "a | b | c");
    }

    #[test]
    fn test_current_match_clamped_after_research() {
        let mut state = search("x", "xxxxx");
        state.current_match = 4;
        state.search_term = "y".to_string();
        state.find_matches("xy");
        assert_eq!(state.current_match, 0);
    }

    #[test]
    fn test_clear() {
        let mut state = search("t", "test");
        state.next_match();
        state.clear();
        assert!(!state.has_matches());
        assert_eq!(state.current_match, 0);
    }

    #[test]
    fn test_panel_request_focus() {
        let mut panel = FindReplacePanel::new();
        panel.focus_search = false;
        panel.request_focus();
        assert!(panel.focus_search);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panel keyboard handling
    // ─────────────────────────────────────────────────────────────────────────

    fn key_event(key: Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn run_panel(
        ctx: &egui::Context,
        panel: &mut FindReplacePanel,
        state: &mut FindState,
        events: Vec<egui::Event>,
    ) -> FindReplacePanelOutput {
        let mut output = FindReplacePanelOutput::default();
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            output = panel.show(ctx, state);
        });
        output
    }

    /// Panel with the search field focused and settled.
    fn focused_panel(ctx: &egui::Context, state: &mut FindState) -> FindReplacePanel {
        let mut panel = FindReplacePanel::new();
        for _ in 0..2 {
            run_panel(ctx, &mut panel, state, Vec::new());
        }
        ctx.memory_mut(|m| m.request_focus(egui::Id::new("find_replace_search_input")));
        run_panel(ctx, &mut panel, state, Vec::new());
        panel
    }

    #[test]
    fn test_panel_ignores_enter_and_escape_typed_elsewhere() {
        let ctx = egui::Context::default();
        let mut state = search("a", "a\na");
        let mut panel = FindReplacePanel::new();
        panel.focus_search = false;
        for _ in 0..2 {
            run_panel(&ctx, &mut panel, &mut state, Vec::new());
        }

        let output = run_panel(
            &ctx,
            &mut panel,
            &mut state,
            vec![key_event(Key::Enter), key_event(Key::Escape)],
        );
        assert!(!output.next_requested);
        assert!(!output.close_requested);
        assert_eq!(state.current_match, 0);
    }

    #[test]
    fn test_panel_enter_in_search_field_steps_to_next() {
        let ctx = egui::Context::default();
        let mut state = search("a", "a\na");
        let mut panel = focused_panel(&ctx, &mut state);

        let output = run_panel(&ctx, &mut panel, &mut state, vec![key_event(Key::Enter)]);
        assert!(output.next_requested);
        assert!(!output.close_requested);
        // Focus goes back to the field for the next Enter.
        assert!(panel.focus_search);
    }

    #[test]
    fn test_panel_escape_in_search_field_closes() {
        let ctx = egui::Context::default();
        let mut state = search("a", "a");
        let mut panel = focused_panel(&ctx, &mut state);

        let output = run_panel(&ctx, &mut panel, &mut state, vec![key_event(Key::Escape)]);
        assert!(output.close_requested);
    }
}
