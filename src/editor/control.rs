//! Command surface of the mounted editor
//!
//! The command dispatcher only ever talks to the editor through this trait,
//! so any editor implementation that provides these verbs can be mounted.

/// The verbs the application can forward to a live editor instance.
///
/// Each call only requests the action; the editor applies it on its own
/// schedule (for `CodeEditor`, on the next frame) and reports any resulting
/// content change through its normal change path.
pub trait EditorControl {
    /// Step back one edit in the focused document.
    fn undo(&mut self);

    /// Re-apply the last undone edit in the focused document.
    fn redo(&mut self);

    /// Open the search UI.
    fn find(&mut self);

    /// Open the search UI with replacement controls.
    fn replace(&mut self);
}
