//! Command and menu dispatch
//!
//! Every user action (menu item, tab click, keyboard shortcut) becomes a
//! `Command`. `dispatch` applies it to the `AppState`, forwards it to the
//! mounted editor, or submits a bridge request; `apply_reply` folds bridge
//! replies back into the state on a later frame.

use crate::bridge::{BridgeOp, BridgeReply, BridgeRequest, FileBridge, SaveJob};
use crate::editor::EditorControl;
use crate::state::{AppState, TabId, UNTITLED};
use eframe::egui::{Key, Modifiers};
use log::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open,
    Save,
    SaveAs,
    Exit,
    Undo,
    Redo,
    Find,
    Replace,
    NewTab,
    ToggleSplitView,
    ToggleCompare,
    ToggleMarkdownPreview,
    SwitchTab(usize),
    CloseTab(usize),
    CloseActiveTab,
    NextTab,
    PrevTab,
}

impl Command {
    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Save => "Save",
            Self::SaveAs => "Save As…",
            Self::Exit => "Exit",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Find => "Find",
            Self::Replace => "Replace",
            Self::NewTab => "New Tab",
            Self::ToggleSplitView => "Split View",
            Self::ToggleCompare => "Compare Files",
            Self::ToggleMarkdownPreview => "Markdown Preview",
            Self::SwitchTab(_) => "Switch Tab",
            Self::CloseTab(_) | Self::CloseActiveTab => "Close Tab",
            Self::NextTab => "Next Tab",
            Self::PrevTab => "Previous Tab",
        }
    }

    /// Shortcut hint shown beside the menu label.
    pub fn shortcut_text(&self) -> Option<&'static str> {
        match self {
            Self::Open => Some("Ctrl+O"),
            Self::Save => Some("Ctrl+S"),
            Self::SaveAs => Some("Ctrl+Shift+S"),
            Self::Undo => Some("Ctrl+Z"),
            Self::Redo => Some("Ctrl+Y"),
            Self::Find => Some("Ctrl+F"),
            Self::Replace => Some("Ctrl+H"),
            Self::NewTab => Some("Ctrl+T"),
            Self::CloseActiveTab => Some("Ctrl+W"),
            Self::NextTab => Some("Ctrl+Tab"),
            Self::PrevTab => Some("Ctrl+Shift+Tab"),
            _ => None,
        }
    }
}

/// Keyboard bindings, most specific first.
///
/// egui matches a binding without Shift even when Shift is held, so the
/// Shift variants must be consumed before their plain counterparts.
pub fn shortcut_bindings() -> Vec<(Modifiers, Key, Command)> {
    let ctrl = Modifiers::COMMAND;
    let ctrl_shift = Modifiers::COMMAND | Modifiers::SHIFT;
    vec![
        (ctrl_shift, Key::S, Command::SaveAs),
        (ctrl_shift, Key::Z, Command::Redo),
        (ctrl_shift, Key::Tab, Command::PrevTab),
        (ctrl, Key::O, Command::Open),
        (ctrl, Key::S, Command::Save),
        (ctrl, Key::Z, Command::Undo),
        (ctrl, Key::Y, Command::Redo),
        (ctrl, Key::F, Command::Find),
        (ctrl, Key::H, Command::Replace),
        (ctrl, Key::T, Command::NewTab),
        (ctrl, Key::W, Command::CloseActiveTab),
        (ctrl, Key::Tab, Command::NextTab),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Menus
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    File,
    Edit,
    View,
}

impl MenuKind {
    pub const ALL: [MenuKind; 3] = [MenuKind::File, MenuKind::Edit, MenuKind::View];

    pub fn title(&self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Edit => "Edit",
            Self::View => "View",
        }
    }

    pub fn items(&self) -> &'static [Command] {
        match self {
            Self::File => &[Command::Open, Command::Save, Command::SaveAs, Command::Exit],
            Self::Edit => &[Command::Undo, Command::Redo, Command::Find, Command::Replace],
            Self::View => &[
                Command::NewTab,
                Command::ToggleSplitView,
                Command::ToggleCompare,
                Command::ToggleMarkdownPreview,
            ],
        }
    }
}

/// Which top-level menu is open. At most one is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: Option<MenuKind>,
}

impl MenuState {
    /// Header click: open `kind`, switch to it, or close it if already open.
    pub fn toggle(&mut self, kind: MenuKind) {
        self.open = if self.open == Some(kind) {
            None
        } else {
            Some(kind)
        };
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn open_menu(&self) -> Option<MenuKind> {
        self.open
    }

    pub fn is_open(&self, kind: MenuKind) -> bool {
        self.open == Some(kind)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// What the frame loop must do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A tab went away; per-tab editor state can be dropped.
    TabClosed(TabId),
    Exit,
}

/// Apply `command`.
///
/// Editor verbs are no-ops without a mounted editor. Bridge submissions that
/// fail surface in the error modal.
pub fn dispatch(
    command: Command,
    state: &mut AppState,
    editor: Option<&mut dyn EditorControl>,
    bridge: &dyn FileBridge,
) -> Flow {
    debug!("Dispatching {:?}", command);
    state.menu.close();

    match command {
        Command::Open => submit(state, bridge, BridgeRequest::OpenFile),
        Command::Save => request_save(state, bridge, false),
        Command::SaveAs => request_save(state, bridge, true),
        Command::Exit => return Flow::Exit,

        Command::Undo | Command::Redo | Command::Find | Command::Replace => match editor {
            Some(editor) => match command {
                Command::Undo => editor.undo(),
                Command::Redo => editor.redo(),
                Command::Find => editor.find(),
                _ => editor.replace(),
            },
            None => debug!("No editor mounted, ignoring {:?}", command),
        },

        Command::NewTab => {
            state.new_tab();
        }
        Command::ToggleSplitView => state.view.toggle_split_view(),
        Command::ToggleCompare => state.view.toggle_compare_mode(),
        Command::ToggleMarkdownPreview => state.view.toggle_markdown_preview(),
        Command::SwitchTab(index) => {
            state.set_active_tab(index);
        }
        Command::NextTab => state.next_tab(),
        Command::PrevTab => state.prev_tab(),
        Command::CloseTab(index) => {
            if let Some(id) = state.close_tab(index) {
                return Flow::TabClosed(id);
            }
        }
        Command::CloseActiveTab => {
            if let Some(id) = state.close_tab(state.active_tab_index()) {
                return Flow::TabClosed(id);
            }
        }
    }

    Flow::Continue
}

fn submit(state: &mut AppState, bridge: &dyn FileBridge, request: BridgeRequest) {
    let op = request.op();
    if let Err(e) = bridge.submit(request) {
        warn!("Could not submit {:?} request: {}", op, e);
        state.show_error(e.to_string());
    }
}

/// File name proposed in the save dialog for a tab.
fn suggested_file_name(name: &str) -> String {
    if name == UNTITLED {
        format!("{}.txt", UNTITLED)
    } else {
        name.to_string()
    }
}

/// Save the active tab.
///
/// The target id and a content snapshot are captured now; the dialog is
/// shown only when `force_prompt` is set or the tab has no path yet.
pub fn request_save(state: &mut AppState, bridge: &dyn FileBridge, force_prompt: bool) {
    let Some(tab) = state.active_tab() else {
        return;
    };

    let job = SaveJob {
        target: tab.id,
        path: if force_prompt { None } else { tab.path.clone() },
        suggested_name: suggested_file_name(&tab.name),
        initial_dir: tab.directory().map(|dir| dir.to_path_buf()),
        content: tab.content.clone(),
    };
    submit(state, bridge, BridgeRequest::SaveFile(job));
}

/// Fold a bridge reply into the state.
pub fn apply_reply(state: &mut AppState, reply: BridgeReply, current_time: f64) {
    match reply {
        BridgeReply::Opened(file) => {
            state.open_document(file.file_name, file.content, file.file_path);
        }
        BridgeReply::Saved {
            target,
            path,
            content,
        } => {
            let message = format!("Saved: {}", path.display());
            if state.complete_save(target, path, content) {
                info!("{}", message);
                state.show_toast(message, current_time);
            }
        }
        BridgeReply::Cancelled(op) => debug!("{:?} cancelled", op),
        BridgeReply::Failed { op, target, error } => {
            warn!("{:?} failed for {:?}: {}", op, target, error);
            let action = match op {
                BridgeOp::Open => "opening",
                BridgeOp::Save => "saving",
            };
            state.show_error(format!("Error {} file: {}", action, error));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
