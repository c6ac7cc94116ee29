//! Markdown parsing and preview
//!
//! Uses comrak (CommonMark + GFM) to parse the active document and renders
//! the result natively in egui.

mod parser;
mod preview;

pub use preview::MarkdownPreview;
