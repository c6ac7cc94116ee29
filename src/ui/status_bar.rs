//! Bottom status bar: language, toast, document stats

use crate::editor::TextStats;
use crate::state::Tab;
use crate::theme;
use eframe::egui::{self, RichText, Ui};

pub fn show(ui: &mut Ui, tab: Option<&Tab>, toast: Option<&str>) {
    ui.horizontal(|ui| {
        let language = tab.map_or("Plain Text", |t| t.language.display_name());
        ui.label(RichText::new(language).color(theme::TEXT_MUTED));

        let stats = tab.map(|t| TextStats::from_text(&t.content));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(stats) = stats {
                ui.label(RichText::new(stats.format_status()).color(theme::TEXT_MUTED));
            }

            // Toast (temporary notifications) fills the middle.
            if let Some(toast) = toast {
                ui.with_layout(
                    egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                    |ui| {
                        ui.label(RichText::new(toast).italics().color(theme::TEXT));
                    },
                );
            }
        });
    });
}
