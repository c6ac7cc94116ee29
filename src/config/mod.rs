//! Configuration module for Slate
//!
//! This module holds the editor's presentation settings. They are fixed
//! defaults built at startup; nothing in the UI changes them and they are
//! never persisted.

mod settings;

pub use settings::*;
