//! Tab strip under the menu bar

use crate::commands::Command;
use crate::state::Tab;
use crate::theme;
use eframe::egui::{self, RichText, Ui};

/// Draw one button per tab plus a trailing "+".
///
/// Returns `SwitchTab`, `CloseTab` or `NewTab` for whichever was clicked.
pub fn show(ui: &mut Ui, tabs: &[Tab], active: usize) -> Option<Command> {
    let mut action = None;

    egui::ScrollArea::horizontal()
        .id_source("tab_bar_scroll")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 2.0;

                for (index, tab) in tabs.iter().enumerate() {
                    let is_active = index == active;
                    let fill = if is_active {
                        theme::BACKGROUND
                    } else {
                        theme::PANEL_HOVER
                    };

                    egui::Frame::none()
                        .fill(fill)
                        .rounding(egui::Rounding {
                            nw: 4.0,
                            ne: 4.0,
                            sw: 0.0,
                            se: 0.0,
                        })
                        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                let color = if is_active {
                                    theme::TEXT
                                } else {
                                    theme::TEXT_MUTED
                                };
                                let title = ui
                                    .add(
                                        egui::Label::new(RichText::new(tab.title()).color(color))
                                            .sense(egui::Sense::click()),
                                    )
                                    .on_hover_text(tab_tooltip(tab));
                                if title.clicked() {
                                    action = Some(Command::SwitchTab(index));
                                }

                                let close = ui
                                    .add(
                                        egui::Button::new(
                                            RichText::new("×").color(theme::TEXT_MUTED),
                                        )
                                        .frame(false)
                                        .small(),
                                    )
                                    .on_hover_text("Close Tab");
                                if close.clicked() {
                                    action = Some(Command::CloseTab(index));
                                }
                            });
                        });
                }

                if ui
                    .add(egui::Button::new(RichText::new("+").color(theme::TEXT)).frame(false))
                    .on_hover_text("New Tab (Ctrl+T)")
                    .clicked()
                {
                    action = Some(Command::NewTab);
                }
            });
        });

    action
}

fn tab_tooltip(tab: &Tab) -> String {
    match &tab.path {
        Some(path) => path.display().to_string(),
        None => tab.name.clone(),
    }
}
