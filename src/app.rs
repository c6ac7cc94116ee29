//! Main application module for Slate
//!
//! This module implements the eframe App trait. Each frame it turns keyboard
//! shortcuts and UI clicks into `Command`s, folds bridge replies into the
//! state, and lays out the menu, tab bar, editor panes and status bar.

use crate::bridge::{BridgeClient, BridgeRequest, FileBridge, NativeDialogs};
use crate::commands::{apply_reply, dispatch, shortcut_bindings, Command, Flow};
use crate::config::Settings;
use crate::editor::{CodeEditor, PaneOptions};
use crate::error::{Error, Result};
use crate::markdown::MarkdownPreview;
use crate::state::{AppState, TabId};
use crate::theme;
use crate::ui::{error_modal, menu_bar, status_bar, tab_bar};
use crate::view::SecondaryPane;
use eframe::egui;
use log::{debug, info, warn};
use std::time::Duration;

/// Window title suffix.
pub const APP_NAME: &str = "Slate";

/// Used when the bridge worker could not be started.
struct OfflineBridge;

impl FileBridge for OfflineBridge {
    fn submit(&self, _request: BridgeRequest) -> Result<()> {
        Err(Error::BridgeUnavailable)
    }
}

/// The main application struct that holds all state and implements eframe::App.
pub struct SlateApp {
    /// Central application state
    state: AppState,
    /// Editor widget shared by every pane
    editor: CodeEditor,
    /// Handle to the file worker, `None` if it failed to start
    bridge: Option<BridgeClient>,
    /// Rendered markdown for the preview panel
    preview: MarkdownPreview,
    /// Last title sent to the viewport
    window_title: String,
}

impl SlateApp {
    /// Create a new SlateApp instance and start the file bridge.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing {}", APP_NAME);

        theme::apply(&cc.egui_ctx);

        let mut state = AppState::with_settings(Settings::default());
        let bridge = match BridgeClient::spawn(NativeDialogs, Some(cc.egui_ctx.clone())) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Failed to start file bridge: {}", e);
                state.show_error(format!("Could not start the file service: {}", e));
                None
            }
        };

        Self {
            state,
            editor: CodeEditor::new(),
            bridge,
            preview: MarkdownPreview::new(),
            window_title: String::new(),
        }
    }

    fn window_title(&self) -> String {
        match self.state.active_tab() {
            Some(tab) => format!("{} - {}", tab.title(), APP_NAME),
            None => APP_NAME.to_string(),
        }
    }

    /// Run one command and act on the resulting flow.
    fn run_command(&mut self, ctx: &egui::Context, command: Command) {
        let bridge: &dyn FileBridge = match &self.bridge {
            Some(client) => client,
            None => &OfflineBridge,
        };

        match dispatch(command, &mut self.state, Some(&mut self.editor), bridge) {
            Flow::Continue => {}
            Flow::TabClosed(id) => self.editor.forget(id),
            Flow::Exit => {
                info!("Exit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    /// Consume shortcut keys before any widget sees them.
    fn take_shortcuts(ctx: &egui::Context) -> Vec<Command> {
        let bindings = shortcut_bindings();
        ctx.input_mut(|i| {
            bindings
                .iter()
                .filter(|(modifiers, key, _)| i.consume_key(*modifiers, *key))
                .map(|(_, _, command)| *command)
                .collect()
        })
    }

    fn poll_bridge(&mut self, current_time: f64) {
        let Some(bridge) = &self.bridge else {
            return;
        };
        for reply in bridge.poll() {
            apply_reply(&mut self.state, reply, current_time);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panels
    // ─────────────────────────────────────────────────────────────────────────

    fn render_top_panel(&mut self, ctx: &egui::Context) -> Option<Command> {
        let active = self.state.active_tab().map(|t| t.id);
        let can_undo = active.is_some_and(|id| self.editor.can_undo(id));
        let can_redo = active.is_some_and(|id| self.editor.can_redo(id));

        let mut action = None;
        egui::TopBottomPanel::top("menu_and_tabs")
            .frame(
                egui::Frame::none()
                    .fill(theme::PANEL)
                    .inner_margin(egui::Margin {
                        left: 4.0,
                        right: 4.0,
                        top: 2.0,
                        bottom: 0.0,
                    }),
            )
            .show_separator_line(false)
            .show(ctx, |ui| {
                action = menu_bar::show(
                    ui,
                    &mut self.state.menu,
                    &self.state.view,
                    can_undo,
                    can_redo,
                );
                ui.add_space(2.0);
                let tab_action =
                    tab_bar::show(ui, self.state.tabs(), self.state.active_tab_index());
                action = action.or(tab_action);
            });
        action
    }

    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(theme::PANEL)
                    .inner_margin(egui::Margin::symmetric(8.0, 4.0)),
            )
            .show(ctx, |ui| {
                status_bar::show(
                    ui,
                    self.state.active_tab(),
                    self.state.ui.toast_message.as_deref(),
                );
            });
    }

    fn render_preview(&mut self, ctx: &egui::Context, tab_id: TabId) {
        let Some(tab) = self.state.tab_by_id(tab_id) else {
            return;
        };
        let font_size = self.state.settings.font_size;
        let preview = &mut self.preview;

        egui::SidePanel::right("markdown_preview_panel")
            .resizable(true)
            .default_width(ctx.screen_rect().width() * 0.4)
            .min_width(200.0)
            .show(ctx, |ui| {
                preview.show(ui, &tab.content, font_size);
            });
    }

    fn render_central(
        &mut self,
        ctx: &egui::Context,
        primary: TabId,
        secondary: Option<SecondaryPane>,
    ) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::BACKGROUND))
            .show(ctx, |ui| match secondary {
                None => self.show_pane(ui, primary, PaneOptions::primary()),
                Some(pane) => {
                    ui.columns(2, |columns| {
                        self.show_pane(&mut columns[0], primary, PaneOptions::primary());
                        match pane {
                            SecondaryPane::Split {
                                neighbor: Some(neighbor),
                            } => self.show_pane(&mut columns[1], neighbor, PaneOptions::split()),
                            SecondaryPane::Split { neighbor: None } => {
                                columns[1].centered_and_justified(|ui| {
                                    ui.label(
                                        egui::RichText::new("No other tab to show")
                                            .color(theme::TEXT_MUTED),
                                    );
                                });
                            }
                            SecondaryPane::Compare { source } => {
                                self.show_pane(&mut columns[1], source, PaneOptions::compare())
                            }
                        }
                    });
                }
            });
    }

    /// Show one editor pane and write edits back to the tab it displays.
    fn show_pane(&mut self, ui: &mut egui::Ui, tab_id: TabId, options: PaneOptions) {
        let Some(tab) = self.state.tab_by_id(tab_id) else {
            return;
        };
        let mut content = tab.content.clone();
        let language = tab.language;

        let mut changed = options.focused && self.editor.apply_pending(tab_id, &mut content);
        let output = self.editor.show(
            ui,
            tab_id,
            &mut content,
            language,
            &self.state.settings,
            options,
        );
        changed |= output.changed;

        if changed && !options.read_only {
            self.state.update_tab_content(tab_id, content);
        }
    }

    /// Find/replace always targets the active tab.
    fn render_find_panel(&mut self, ctx: &egui::Context, tab_id: TabId, current_time: f64) {
        let Some(tab) = self.state.tab_by_id(tab_id) else {
            return;
        };
        let mut content = tab.content.clone();

        if let Some(count) = self.editor.show_find_panel(ctx, tab_id, &mut content) {
            self.state.update_active_content(content);
            let noun = if count == 1 { "occurrence" } else { "occurrences" };
            self.state
                .show_toast(format!("Replaced {} {}", count, noun), current_time);
        }
    }
}

impl eframe::App for SlateApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let current_time = ctx.input(|i| i.time);

        // Shortcuts first so the text editor never sees them.
        for command in Self::take_shortcuts(ctx) {
            debug!("Keyboard shortcut: {:?}", command);
            self.run_command(ctx, command);
        }

        self.poll_bridge(current_time);
        self.state.update_toast(current_time);

        if let Some(command) = self.render_top_panel(ctx) {
            self.run_command(ctx, command);
        }
        self.render_status_bar(ctx);

        let layout = self
            .state
            .view
            .layout(self.state.tabs(), self.state.active_tab_index());
        if let Some(layout) = layout {
            if layout.preview {
                self.render_preview(ctx, layout.primary);
            }
            self.render_central(ctx, layout.primary, layout.secondary);
            self.render_find_panel(ctx, layout.primary, current_time);
        }

        error_modal::show(ctx, &mut self.state);

        let title = self.window_title();
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }

        // Wake up again to clear an expiring toast.
        if self.state.ui.toast_expires_at.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.state.has_unsaved_changes() {
            warn!("Exiting with unsaved changes");
        }
        info!("Application exiting");
    }
}
