//! Text statistics for the status bar

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Count the number of lines in the given text.
///
/// Every `'\n'` starts a new line, so empty text is a single empty line and
/// a trailing newline adds an empty last line.
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

// ─────────────────────────────────────────────────────────────────────────────
// TextStats
// ─────────────────────────────────────────────────────────────────────────────

/// Line, character and word counts for a document.
///
/// # Example
///
/// ```ignore
/// let stats = TextStats::from_text("ab\ncd");
/// assert_eq!((stats.lines, stats.characters, stats.words), (2, 5, 2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of lines (including empty lines)
    pub lines: usize,
    /// Number of characters including whitespace and newlines
    pub characters: usize,
    /// Number of whitespace-delimited words
    pub words: usize,
}

impl TextStats {
    /// Calculate statistics from the given text in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut stats = Self {
            lines: 1,
            ..Self::default()
        };

        let mut in_word = false;
        for ch in text.chars() {
            stats.characters += 1;

            if ch == '\n' {
                stats.lines += 1;
            }

            if ch.is_whitespace() {
                in_word = false;
            } else if !in_word {
                in_word = true;
                stats.words += 1;
            }
        }

        stats
    }

    /// Format the statistics for the status bar.
    ///
    /// Returns a string like "Lines: 25 | Characters: 892 | Words: 150"
    pub fn format_status(&self) -> String {
        format!(
            "Lines: {} | Characters: {} | Words: {}",
            self.lines, self.characters, self.words
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("Hello, World!"), 1);
        assert_eq!(count_lines("Line 1\nLine 2\nLine 3"), 3);
        assert_eq!(count_lines("Line 1\n"), 2);
        assert_eq!(count_lines("\n\n\n"), 4);
    }

    #[test]
    fn test_stats_status_line_example() {
        let stats = TextStats::from_text("ab\ncd");
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.characters, 5);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_stats_empty_text() {
        let stats = TextStats::from_text("");
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.words, 0);
    }

    #[test]
    fn test_stats_only_whitespace() {
        let stats = TextStats::from_text("   \n\n   ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 8);
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn test_stats_mixed_whitespace() {
        let stats = TextStats::from_text("  word1  word2\t\tword3\n");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_stats_unicode() {
        let stats = TextStats::from_text("Привет мир! 你好世界");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 16);
    }

    #[test]
    fn test_stats_lines_agree_with_count_lines() {
        let text = "fn main() {\n    println!(\"hi\");\n}\n";
        assert_eq!(TextStats::from_text(text).lines, count_lines(text));
    }

    #[test]
    fn test_format_status() {
        let stats = TextStats {
            lines: 25,
            characters: 892,
            words: 150,
        };
        assert_eq!(
            stats.format_status(),
            "Lines: 25 | Characters: 892 | Words: 150"
        );
    }
}
