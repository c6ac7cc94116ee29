//! Top menu bar
//!
//! Three headers (File, Edit, View). Clicking a header toggles its dropdown;
//! clicking an item yields the item's `Command`. The dropdown is painted in a
//! foreground `Area` so it floats over the tab bar and editor.

use crate::commands::{Command, MenuKind, MenuState};
use crate::theme;
use crate::view::ViewState;
use eframe::egui::{self, RichText, Ui};

const ITEM_WIDTH: f32 = 220.0;

/// Whether a menu item is a toggle that is currently on.
fn is_checked(command: Command, view: &ViewState) -> bool {
    match command {
        Command::ToggleSplitView => view.split_view,
        Command::ToggleCompare => view.compare_mode,
        Command::ToggleMarkdownPreview => view.markdown_preview,
        _ => false,
    }
}

/// Draw the menu headers and any open dropdown.
///
/// Returns the command of a clicked item. Header clicks only change `menu`.
/// Undo and Redo are greyed out unless `can_undo` / `can_redo`.
pub fn show(
    ui: &mut Ui,
    menu: &mut MenuState,
    view: &ViewState,
    can_undo: bool,
    can_redo: bool,
) -> Option<Command> {
    let mut action = None;
    let mut header_clicked = false;
    let mut open_header_rect = None;

    ui.horizontal(|ui| {
        for kind in MenuKind::ALL {
            let open = menu.is_open(kind);
            let text = RichText::new(kind.title()).color(if open {
                theme::ACCENT
            } else {
                theme::TEXT
            });
            let response = ui.add(egui::Button::new(text).frame(open));
            if response.clicked() {
                menu.toggle(kind);
                header_clicked = true;
            }
            // Hovering another header while a menu is open switches to it.
            if response.hovered() && menu.open_menu().is_some_and(|k| k != kind) {
                menu.toggle(kind);
            }
            if menu.is_open(kind) {
                open_header_rect = Some(response.rect);
            }
        }
    });

    let (Some(kind), Some(header_rect)) = (menu.open_menu(), open_header_rect) else {
        return None;
    };

    let area = egui::Area::new(egui::Id::new("menu_dropdown").with(kind.title()))
        .order(egui::Order::Foreground)
        .fixed_pos(header_rect.left_bottom())
        .show(ui.ctx(), |ui| {
            egui::Frame::menu(ui.style()).show(ui, |ui| {
                ui.set_min_width(ITEM_WIDTH);
                for &command in kind.items() {
                    let enabled = match command {
                        Command::Undo => can_undo,
                        Command::Redo => can_redo,
                        _ => true,
                    };
                    if menu_item(ui, command, enabled, is_checked(command, view)) {
                        action = Some(command);
                    }
                }
            });
        });

    if action.is_some() {
        menu.close();
    } else if area.response.clicked_elsewhere() && !header_clicked {
        menu.close();
    }

    action
}

fn menu_item(ui: &mut Ui, command: Command, enabled: bool, checked: bool) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        let check = if checked { "✓" } else { " " };
        let label = format!("{} {}", check, command.label());
        let response = ui.add_enabled(
            enabled,
            egui::Button::new(RichText::new(label).color(theme::TEXT))
                .frame(false)
                .min_size(egui::vec2(ITEM_WIDTH - 80.0, 0.0)),
        );
        clicked = response.clicked();

        if let Some(shortcut) = command.shortcut_text() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(shortcut).small().color(theme::TEXT_MUTED));
            });
        }
    });
    clicked
}
