//! Dark visuals built from the palette

use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

use super::{ACCENT, BACKGROUND, BORDER, CODE_BACKGROUND, ERROR, PANEL, PANEL_HOVER, TEXT, TEXT_MUTED};

const ROUNDING: f32 = 4.0;

/// Create egui Visuals for the dark palette.
///
/// # Example
///
/// ```ignore
/// ctx.set_visuals(create_dark_visuals());
/// ```
pub fn create_dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    // ─────────────────────────────────────────────────────────────────────────
    // Window & Panel Background
    // ─────────────────────────────────────────────────────────────────────────
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = PANEL;
    visuals.extreme_bg_color = BACKGROUND;
    visuals.faint_bg_color = PANEL;
    visuals.code_bg_color = CODE_BACKGROUND;

    visuals.override_text_color = None;
    visuals.error_fg_color = ERROR;
    visuals.hyperlink_color = ACCENT;

    visuals.selection.bg_fill = Color32::from_rgb(0x26, 0x4f, 0x78);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    // ─────────────────────────────────────────────────────────────────────────
    // Widget Styling
    // ─────────────────────────────────────────────────────────────────────────
    visuals.widgets.noninteractive.bg_fill = PANEL;
    visuals.widgets.noninteractive.weak_bg_fill = PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT);
    visuals.widgets.noninteractive.rounding = Rounding::same(ROUNDING);

    visuals.widgets.inactive.bg_fill = PANEL;
    visuals.widgets.inactive.weak_bg_fill = PANEL;
    visuals.widgets.inactive.bg_stroke = Stroke::NONE;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.inactive.rounding = Rounding::same(ROUNDING);

    visuals.widgets.hovered.bg_fill = PANEL_HOVER;
    visuals.widgets.hovered.weak_bg_fill = PANEL_HOVER;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, BORDER);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, TEXT);
    visuals.widgets.hovered.rounding = Rounding::same(ROUNDING);

    visuals.widgets.active.bg_fill = PANEL_HOVER;
    visuals.widgets.active.weak_bg_fill = PANEL_HOVER;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(ROUNDING);

    visuals.widgets.open.bg_fill = PANEL_HOVER;
    visuals.widgets.open.weak_bg_fill = PANEL_HOVER;
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT);
    visuals.widgets.open.rounding = Rounding::same(ROUNDING);

    // ─────────────────────────────────────────────────────────────────────────
    // Window & Popup Styling
    // ─────────────────────────────────────────────────────────────────────────
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 16.0,
        spread: 0.0,
        color: Color32::from_black_alpha(80),
    };
    visuals.window_stroke = Stroke::new(1.0, BORDER);
    visuals.popup_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 6.0),
        blur: 20.0,
        spread: 0.0,
        color: Color32::from_black_alpha(100),
    };
    visuals.menu_rounding = Rounding::same(ROUNDING);

    visuals.striped = true;
    visuals.dark_mode = true;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_visuals_is_dark_mode() {
        assert!(create_dark_visuals().dark_mode);
    }

    #[test]
    fn test_dark_visuals_uses_palette() {
        let visuals = create_dark_visuals();
        assert_eq!(visuals.panel_fill, BACKGROUND);
        assert_eq!(visuals.hyperlink_color, ACCENT);
        assert_eq!(visuals.widgets.noninteractive.fg_stroke.color, TEXT);
    }

    #[test]
    fn test_dark_visuals_selection_visible() {
        let visuals = create_dark_visuals();
        assert_ne!(visuals.selection.bg_fill, visuals.panel_fill);
    }
}
