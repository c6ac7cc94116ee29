//! Syntax highlighting backed by syntect
//!
//! Produces egui `LayoutJob`s for the editor's layouter and for fenced code
//! blocks in the markdown preview. The syntax and theme sets are expensive
//! to load, so a single global instance is shared.

use crate::editor::Language;
use eframe::egui::text::{LayoutJob, TextFormat};
use eframe::egui::{Color32, FontId};
use log::{debug, warn};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Built-in syntect theme matching the dark window chrome.
pub const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

// ─────────────────────────────────────────────────────────────────────────────
// Syntax Highlighter
// ─────────────────────────────────────────────────────────────────────────────

pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Load syntect's bundled syntaxes and themes.
    pub fn new() -> Self {
        debug!("Loading syntect syntax and theme sets");
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "Loaded {} syntaxes and {} themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );
        Self {
            syntax_set,
            theme_set,
        }
    }

    /// The highlight theme, or any bundled theme if it is missing.
    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(HIGHLIGHT_THEME)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Syntax definition for a document language.
    ///
    /// Plain text never gets a syntax so it renders in the default color.
    pub fn syntax_for_language(&self, language: Language) -> Option<&SyntaxReference> {
        let candidates: &[&str] = match language {
            Language::PlainText => return None,
            Language::JavaScript => &["js"],
            // No bundled TypeScript grammar; JavaScript is the closest match.
            Language::TypeScript => &["ts", "js"],
            Language::Html => &["html"],
            Language::Css => &["css"],
            Language::Json => &["json"],
            Language::Markdown => &["md"],
            Language::Python => &["py"],
            Language::Java => &["java"],
            Language::Cpp => &["cpp"],
            Language::C => &["c"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::Php => &["php"],
            Language::Ruby => &["rb"],
            Language::Sql => &["sql"],
            Language::Xml => &["xml"],
            Language::Yaml => &["yaml"],
        };

        candidates
            .iter()
            .find_map(|ext| self.syntax_set.find_syntax_by_extension(ext))
    }

    /// Syntax definition for a code fence info string such as `rust` or `py`.
    pub fn syntax_for_token(&self, token: &str) -> Option<&SyntaxReference> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let language = Language::from_extension(token);
        if language != Language::PlainText {
            return self.syntax_for_language(language);
        }

        let lower = token.to_lowercase();
        self.syntax_set
            .find_syntax_by_token(&lower)
            .or_else(|| {
                self.syntax_set
                    .syntaxes()
                    .iter()
                    .find(|syntax| syntax.name.to_lowercase() == lower)
            })
    }

    /// Lay out `text` with per-token colors.
    ///
    /// The job always contains exactly `text`; lines that fail to highlight
    /// fall back to `fallback_color`.
    pub fn layout_job(
        &self,
        text: &str,
        syntax: Option<&SyntaxReference>,
        font_id: FontId,
        fallback_color: Color32,
    ) -> LayoutJob {
        let mut job = LayoutJob::default();

        let (syntax, theme) = match (syntax, self.theme()) {
            (Some(syntax), Some(theme)) => (syntax, theme),
            _ => {
                job.append(text, 0.0, plain_format(font_id, fallback_color));
                return job;
            }
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        for line in LinesWithEndings::from(text) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    for (style, piece) in ranges {
                        job.append(piece, 0.0, styled_format(style, font_id.clone()));
                    }
                }
                Err(e) => {
                    warn!("Failed to highlight line: {}", e);
                    job.append(line, 0.0, plain_format(font_id.clone(), fallback_color));
                }
            }
        }

        job
    }

    /// Lay out a document in its language.
    pub fn layout_document(
        &self,
        text: &str,
        language: Language,
        font_id: FontId,
        fallback_color: Color32,
    ) -> LayoutJob {
        self.layout_job(text, self.syntax_for_language(language), font_id, fallback_color)
    }

    /// Lay out a fenced code block by its info string.
    pub fn layout_code_block(
        &self,
        code: &str,
        info: &str,
        font_id: FontId,
        fallback_color: Color32,
    ) -> LayoutJob {
        let token = info.split_whitespace().next().unwrap_or("");
        self.layout_job(code, self.syntax_for_token(token), font_id, fallback_color)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert syntect Color to egui Color32.
pub fn syntect_to_egui_color(color: syntect::highlighting::Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn plain_format(font_id: FontId, color: Color32) -> TextFormat {
    TextFormat {
        font_id,
        color,
        ..Default::default()
    }
}

fn styled_format(style: Style, font_id: FontId) -> TextFormat {
    let color = syntect_to_egui_color(style.foreground);
    let mut format = plain_format(font_id, color);
    format.italics = style.font_style.contains(FontStyle::ITALIC);
    if style.font_style.contains(FontStyle::UNDERLINE) {
        format.underline = eframe::egui::Stroke::new(1.0, color);
    }
    format
}

static HIGHLIGHTER: OnceLock<SyntaxHighlighter> = OnceLock::new();

/// Get or create the global syntax highlighter.
pub fn highlighter() -> &'static SyntaxHighlighter {
    HIGHLIGHTER.get_or_init(SyntaxHighlighter::new)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
