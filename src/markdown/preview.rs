//! Rendered markdown preview pane
//!
//! Draws a parsed `MarkdownDocument` with native egui widgets. The parse is
//! cached and only redone when the source text changes.

use super::parser::{parse_markdown, Alignment, Block, ListItem, MarkdownDocument, Span};
use crate::editor::highlight::highlighter;
use crate::theme;
use eframe::egui::{self, FontId, RichText, ScrollArea, Ui};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Default)]
pub struct MarkdownPreview {
    source_hash: Option<u64>,
    document: MarkdownDocument,
}

impl MarkdownPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-parse if `source` changed since the last call.
    ///
    /// Returns `true` when a new parse happened.
    pub fn update(&mut self, source: &str) -> bool {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);
        let hash = hasher.finish();

        if self.source_hash == Some(hash) {
            return false;
        }
        self.document = parse_markdown(source);
        self.source_hash = Some(hash);
        true
    }

    pub fn show(&mut self, ui: &mut Ui, source: &str, font_size: f32) {
        self.update(source);

        ScrollArea::vertical()
            .id_source("markdown_preview")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::none()
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        if self.document.blocks.is_empty() {
                            ui.label(RichText::new("Nothing to preview").color(theme::TEXT_MUTED));
                        }
                        for block in &self.document.blocks {
                            render_block(ui, block, font_size);
                        }
                    });
            });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn heading_size(level: u8, base: f32) -> f32 {
    match level {
        1 => base * 2.0,
        2 => base * 1.6,
        3 => base * 1.35,
        4 => base * 1.15,
        _ => base,
    }
}

fn render_block(ui: &mut Ui, block: &Block, font_size: f32) {
    match block {
        Block::Heading { level, spans } => {
            ui.add_space(font_size * 0.5);
            render_spans(ui, spans, heading_size(*level, font_size), true);
            if *level <= 2 {
                ui.separator();
            }
        }
        Block::Paragraph(spans) => {
            render_spans(ui, spans, font_size, false);
            ui.add_space(font_size * 0.5);
        }
        Block::List { ordered, items } => {
            for (i, item) in items.iter().enumerate() {
                let marker = match (item.task, ordered) {
                    (Some(true), _) => "☑".to_string(),
                    (Some(false), _) => "☐".to_string(),
                    (None, Some(start)) => format!("{}.", start + i),
                    (None, None) => "•".to_string(),
                };
                render_item(ui, &marker, item, font_size);
            }
            ui.add_space(font_size * 0.25);
        }
        Block::BlockQuote(blocks) => {
            egui::Frame::none()
                .fill(theme::PANEL)
                .inner_margin(egui::Margin {
                    left: 12.0,
                    right: 8.0,
                    top: 6.0,
                    bottom: 6.0,
                })
                .stroke(egui::Stroke::new(1.0, theme::BORDER))
                .show(ui, |ui| {
                    for block in blocks {
                        render_block(ui, block, font_size);
                    }
                });
            ui.add_space(font_size * 0.5);
        }
        Block::CodeBlock { info, literal } => {
            let job = highlighter().layout_code_block(
                literal.trim_end_matches('\n'),
                info,
                FontId::monospace(font_size * 0.9),
                theme::TEXT,
            );
            egui::Frame::none()
                .fill(theme::CODE_BACKGROUND)
                .rounding(egui::Rounding::same(4.0))
                .inner_margin(egui::Margin::same(8.0))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(job);
                });
            ui.add_space(font_size * 0.5);
        }
        Block::Table { alignments, rows } => {
            egui::Grid::new(ui.next_auto_id())
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for (row_idx, row) in rows.iter().enumerate() {
                        for (col, cell) in row.iter().enumerate() {
                            let align = alignments.get(col).copied().unwrap_or_default();
                            let layout = match align {
                                Alignment::Right => egui::Layout::right_to_left(egui::Align::Center),
                                Alignment::Center => {
                                    egui::Layout::top_down(egui::Align::Center)
                                }
                                Alignment::Left | Alignment::None => {
                                    egui::Layout::left_to_right(egui::Align::Center)
                                }
                            };
                            ui.with_layout(layout, |ui| {
                                render_spans(ui, cell, font_size, row_idx == 0);
                            });
                        }
                        ui.end_row();
                    }
                });
            ui.add_space(font_size * 0.5);
        }
        Block::Rule => {
            ui.separator();
        }
        Block::Html(html) => {
            ui.label(
                RichText::new(html.trim_end())
                    .font(FontId::monospace(font_size * 0.9))
                    .color(theme::TEXT_MUTED),
            );
        }
    }
}

fn render_item(ui: &mut Ui, marker: &str, item: &ListItem, font_size: f32) {
    ui.horizontal_top(|ui| {
        ui.add_space(font_size);
        ui.label(RichText::new(marker).size(font_size).color(theme::ACCENT));
        ui.vertical(|ui| {
            for block in &item.blocks {
                render_block(ui, block, font_size);
            }
        });
    });
}

fn span_text(span: &Span, size: f32, strong: bool) -> RichText {
    let mut text = RichText::new(&span.text).size(size);
    if span.style.code {
        text = text
            .font(FontId::monospace(size * 0.9))
            .background_color(theme::CODE_BACKGROUND);
    }
    if span.style.strong || strong {
        text = text.strong();
    }
    if span.style.emphasis {
        text = text.italics();
    }
    if span.style.strikethrough {
        text = text.strikethrough();
    }
    text
}

fn render_spans(ui: &mut Ui, spans: &[Span], size: f32, strong: bool) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let text = span_text(span, size, strong);
            match &span.link {
                Some(url) => {
                    ui.hyperlink_to(text.color(theme::ACCENT), url);
                }
                None => {
                    ui.label(text.color(theme::TEXT));
                }
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
