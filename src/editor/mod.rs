//! Editor module for Slate
//!
//! This module contains the code editor widget, its command surface, and the
//! per-document helpers it relies on (language detection, highlighting,
//! undo history, search and text statistics).

mod control;
mod find_replace;
pub mod highlight;
mod history;
mod language;
mod stats;
mod widget;

pub use control::EditorControl;
pub use language::Language;
pub use stats::TextStats;
pub use widget::{CodeEditor, PaneOptions};
