//! Theme for Slate
//!
//! A single dark palette. Components reach for these constants directly;
//! `dark::create_dark_visuals` maps them onto egui's `Visuals`.

pub mod dark;

use eframe::egui::{self, Color32};

// ─────────────────────────────────────────────────────────────────────────────
// Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Editor and window background
pub const BACKGROUND: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);
/// Menu bar, tab bar and status bar
pub const PANEL: Color32 = Color32::from_rgb(0x2d, 0x2d, 0x2d);
/// Hovered or inactive-tab fill
pub const PANEL_HOVER: Color32 = Color32::from_rgb(0x3a, 0x3a, 0x3a);
pub const BORDER: Color32 = Color32::from_rgb(0x44, 0x44, 0x44);
pub const TEXT: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xe0);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
pub const ACCENT: Color32 = Color32::from_rgb(0x61, 0xda, 0xfb);
pub const GUTTER: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);
pub const CODE_BACKGROUND: Color32 = Color32::from_rgb(0x25, 0x25, 0x25);
pub const ERROR: Color32 = Color32::from_rgb(0xe0, 0x6c, 0x75);

/// Highlight for the current search match
pub const MATCH_CURRENT: Color32 = Color32::from_rgba_premultiplied(150, 118, 0, 150);
/// Highlight for other search matches
pub const MATCH_OTHER: Color32 = Color32::from_rgba_premultiplied(56, 47, 16, 80);

/// Install the dark visuals on `ctx`.
pub fn apply(ctx: &egui::Context) {
    ctx.set_visuals(dark::create_dark_visuals());
}
