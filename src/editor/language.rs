//! Language detection for open documents
//!
//! Maps a file name's extension to the language tag used for syntax
//! highlighting and markdown preview eligibility.

use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────────────────────────────────────

/// Languages the editor knows how to highlight.
///
/// Anything unrecognized is `PlainText`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    JavaScript,
    TypeScript,
    Html,
    Css,
    Json,
    Markdown,
    Python,
    Java,
    Cpp,
    C,
    Go,
    Rust,
    Php,
    Ruby,
    Sql,
    Xml,
    Yaml,
    #[default]
    PlainText,
}

impl Language {
    /// Detect the language from a bare extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "md" => Self::Markdown,
            "py" => Self::Python,
            "java" => Self::Java,
            "cpp" => Self::Cpp,
            "c" => Self::C,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "php" => Self::Php,
            "rb" => Self::Ruby,
            "sql" => Self::Sql,
            "xml" => Self::Xml,
            "yaml" | "yml" => Self::Yaml,
            _ => Self::PlainText,
        }
    }

    /// Detect the language from a file name.
    ///
    /// The extension is whatever follows the last `.`; a name with no dot
    /// has no extension.
    pub fn from_file_name(name: &str) -> Self {
        name.rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or_default()
    }

    /// Detect the language from a path's final segment.
    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(Self::from_file_name)
            .unwrap_or_default()
    }

    /// Short identifier for this language.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Sql => "sql",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
            Self::PlainText => "plaintext",
        }
    }

    /// Human-readable name for the status bar.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::C => "C",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Php => "PHP",
            Self::Ruby => "Ruby",
            Self::Sql => "SQL",
            Self::Xml => "XML",
            Self::Yaml => "YAML",
            Self::PlainText => "Plain Text",
        }
    }

    /// Check if this is markdown (eligible for preview).
    pub fn is_markdown(&self) -> bool {
        matches!(self, Self::Markdown)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("js"), Language::JavaScript);
        assert_eq!(Language::from_extension("jsx"), Language::JavaScript);
        assert_eq!(Language::from_extension("tsx"), Language::TypeScript);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("md"), Language::Markdown);
        assert_eq!(Language::from_extension("MD"), Language::Markdown);
        assert_eq!(Language::from_extension("yml"), Language::Yaml);
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("txt"), Language::PlainText);
        assert_eq!(Language::from_extension("markdown"), Language::PlainText);
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(Language::from_file_name("a.py").tag(), "python");
        assert_eq!(Language::from_file_name("a.unknownext").tag(), "plaintext");
        assert_eq!(Language::from_file_name("noext").tag(), "plaintext");
        assert_eq!(Language::from_file_name("archive.tar.json"), Language::Json);
        assert_eq!(Language::from_file_name("README.Md"), Language::Markdown);
        assert_eq!(Language::from_file_name("trailing."), Language::PlainText);
        assert_eq!(Language::from_file_name(""), Language::PlainText);
    }

    #[test]
    fn test_from_file_name_is_pure() {
        for name in ["main.rs", "notes.md", "x", "y.zzz"] {
            assert_eq!(Language::from_file_name(name), Language::from_file_name(name));
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            Language::from_path(Path::new("/home/user/project/main.go")),
            Language::Go
        );
        assert_eq!(
            Language::from_path(Path::new("/home/user/Makefile")),
            Language::PlainText
        );
        assert_eq!(Language::from_path(Path::new("/")), Language::PlainText);
    }

    #[test]
    fn test_default_and_helpers() {
        assert_eq!(Language::default(), Language::PlainText);
        assert!(Language::Markdown.is_markdown());
        assert!(!Language::PlainText.is_markdown());
        assert_eq!(Language::PlainText.display_name(), "Plain Text");
        assert_eq!(Language::Cpp.tag(), "cpp");
    }
}
