//! Modal error window

use crate::state::AppState;
use crate::theme;
use eframe::egui::{self, RichText};

/// Show the error window while `state.ui.show_error_modal` is set.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.ui.show_error_modal {
        return;
    }

    let mut dismissed = false;
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("⚠").size(24.0).color(theme::ERROR));
            ui.label(&state.ui.error_message);
            ui.separator();
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        state.dismiss_error();
    }
}
