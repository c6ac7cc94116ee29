//! Per-document undo/redo history
//!
//! The editor keeps one `EditHistory` per tab. Edits are recorded as whole
//! content snapshots; the stacks are bounded so a long session cannot grow
//! without limit.

/// Default maximum number of undo entries kept per document.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Undo and redo stacks for a single document.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
    max_undo_size: usize,
    /// Incremented whenever content is replaced from the history, so text
    /// widgets know to drop their cached cursor state.
    version: u64,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_UNDO)
    }

    pub fn with_capacity(max_undo_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_size: max_undo_size.max(1),
            version: 0,
        }
    }

    /// Record that `current` replaced `old_content`.
    ///
    /// Does nothing if the two are equal. A new edit invalidates redo.
    pub fn record(&mut self, old_content: String, current: &str) {
        if old_content == current {
            return;
        }
        self.undo_stack.push(old_content);
        if self.undo_stack.len() > self.max_undo_size {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Step back one edit, rewriting `content` in place.
    ///
    /// Returns `true` if undo was performed.
    pub fn undo(&mut self, content: &mut String) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(std::mem::replace(content, previous));
                self.version = self.version.wrapping_add(1);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit, rewriting `content` in place.
    ///
    /// Returns `true` if redo was performed.
    pub fn redo(&mut self, content: &mut String) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(std::mem::replace(content, next));
                self.version = self.version.wrapping_add(1);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Content version counter, bumped on every undo/redo.
    pub fn version(&self) -> u64 {
        self.version
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(history: &mut EditHistory, content: &mut String, new_content: &str) {
        let old = std::mem::replace(content, new_content.to_string());
        history.record(old, content);
    }

    #[test]
    fn test_undo_redo() {
        let mut history = EditHistory::new();
        let mut content = String::new();
        edit(&mut history, &mut content, "a");
        edit(&mut history, &mut content, "ab");

        assert!(history.undo(&mut content));
        assert_eq!(content, "a");
        assert!(history.undo(&mut content));
        assert_eq!(content, "");
        assert!(!history.undo(&mut content));

        assert!(history.redo(&mut content));
        assert_eq!(content, "a");
        assert!(history.redo(&mut content));
        assert_eq!(content, "ab");
        assert!(!history.redo(&mut content));
    }

    #[test]
    fn test_record_no_change() {
        let mut history = EditHistory::new();
        history.record("same".to_string(), "same");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = EditHistory::new();
        let mut content = String::new();
        edit(&mut history, &mut content, "one");
        edit(&mut history, &mut content, "two");
        history.undo(&mut content);
        assert!(history.can_redo());

        edit(&mut history, &mut content, "three");
        assert!(!history.can_redo());
        assert_eq!(history.undo_stack, vec!["".to_string(), "one".to_string()]);
    }

    #[test]
    fn test_version_bumps_on_undo_and_redo() {
        let mut history = EditHistory::new();
        let mut content = String::new();
        edit(&mut history, &mut content, "x");
        assert_eq!(history.version(), 0);

        history.undo(&mut content);
        assert_eq!(history.version(), 1);
        history.redo(&mut content);
        assert_eq!(history.version(), 2);

        // Failed undo/redo leaves the version alone.
        history.redo(&mut content);
        assert_eq!(history.version(), 2);
    }

    #[test]
    fn test_max_undo_size() {
        let mut history = EditHistory::with_capacity(3);
        let mut content = String::new();
        for i in 0..10 {
            edit(&mut history, &mut content, &i.to_string());
        }
        assert_eq!(history.undo_stack.len(), 3);

        while history.undo(&mut content) {}
        assert_eq!(content, "6");
        assert_eq!(history.redo_stack.len(), 3);
    }
}
