//! UI components for Slate
//!
//! Chrome around the editor panes. Interactive components return the
//! `Command` the user picked instead of mutating state themselves.

pub mod error_modal;
pub mod menu_bar;
pub mod status_bar;
pub mod tab_bar;
