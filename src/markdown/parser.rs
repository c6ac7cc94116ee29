//! Markdown parser implementation using comrak
//!
//! Parses markdown into a small block/span tree shaped for the preview
//! renderer. Parsing never fails; unknown node kinds are flattened into
//! their children.

use comrak::{
    nodes::{AstNode, ListType as ComrakListType, NodeValue, TableAlignment},
    parse_document, Arena, Options,
};

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Front matter delimiter; front matter is not rendered
    pub front_matter_delimiter: Option<String>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            footnotes: true,
            front_matter_delimiter: Some("---".to_string()),
        }
    }
}

impl MarkdownOptions {
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();
        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.footnotes = self.footnotes;
        options.extension.front_matter_delimiter = self.front_matter_delimiter.clone();
        options
    }
}

/// Inline styling flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// A run of inline text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
    /// Target URL when the span is part of a link or image
    pub link: Option<String>,
}

/// Column alignment for tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<TableAlignment> for Alignment {
    fn from(align: TableAlignment) -> Self {
        match align {
            TableAlignment::None => Alignment::None,
            TableAlignment::Left => Alignment::Left,
            TableAlignment::Center => Alignment::Center,
            TableAlignment::Right => Alignment::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// `Some(checked)` for task list items
    pub task: Option<bool>,
    pub blocks: Vec<Block>,
}

/// Block-level markdown element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    Paragraph(Vec<Span>),
    List {
        /// Start number for ordered lists
        ordered: Option<usize>,
        items: Vec<ListItem>,
    },
    BlockQuote(Vec<Block>),
    CodeBlock {
        info: String,
        literal: String,
    },
    Table {
        alignments: Vec<Alignment>,
        /// Rows of cells; the first row is the header
        rows: Vec<Vec<Vec<Span>>>,
    },
    Rule,
    Html(String),
}

/// A parsed markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub blocks: Vec<Block>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown text with the default options.
///
/// # Example
/// ```ignore
/// let doc = parse_markdown("# Hello\n\nWorld");
/// assert_eq!(doc.blocks.len(), 2);
/// ```
pub fn parse_markdown(markdown: &str) -> MarkdownDocument {
    parse_markdown_with_options(markdown, &MarkdownOptions::default())
}

pub fn parse_markdown_with_options(markdown: &str, options: &MarkdownOptions) -> MarkdownDocument {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options.to_comrak_options());
    MarkdownDocument {
        blocks: convert_blocks(root),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

fn convert_blocks<'a>(node: &'a AstNode<'a>) -> Vec<Block> {
    let mut blocks = Vec::new();

    for child in node.children() {
        let value = child.data.borrow().value.clone();
        match value {
            NodeValue::Paragraph => blocks.push(Block::Paragraph(inline_spans(child))),
            NodeValue::Heading(heading) => blocks.push(Block::Heading {
                level: heading.level,
                spans: inline_spans(child),
            }),
            NodeValue::List(list) => blocks.push(Block::List {
                ordered: match list.list_type {
                    ComrakListType::Ordered => Some(list.start),
                    ComrakListType::Bullet => None,
                },
                items: child.children().map(convert_item).collect(),
            }),
            NodeValue::BlockQuote => blocks.push(Block::BlockQuote(convert_blocks(child))),
            NodeValue::CodeBlock(code) => blocks.push(Block::CodeBlock {
                info: code.info,
                literal: code.literal,
            }),
            NodeValue::Table(table) => blocks.push(Block::Table {
                alignments: table.alignments.into_iter().map(Alignment::from).collect(),
                rows: child
                    .children()
                    .map(|row| row.children().map(inline_spans).collect())
                    .collect(),
            }),
            NodeValue::ThematicBreak => blocks.push(Block::Rule),
            NodeValue::HtmlBlock(html) => blocks.push(Block::Html(html.literal)),
            NodeValue::FrontMatter(_) => {}
            _ => blocks.extend(convert_blocks(child)),
        }
    }

    blocks
}

fn convert_item<'a>(node: &'a AstNode<'a>) -> ListItem {
    let task = match &node.data.borrow().value {
        NodeValue::TaskItem(mark) => Some(mark.map_or(false, |c| c == 'x' || c == 'X')),
        _ => None,
    };
    ListItem {
        task,
        blocks: convert_blocks(node),
    }
}

/// Flatten the inline children of `node` into styled spans.
fn inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<Span> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_spans(child, SpanStyle::default(), None, &mut spans);
    }
    spans
}

fn collect_spans<'a>(
    node: &'a AstNode<'a>,
    style: SpanStyle,
    link: Option<&str>,
    out: &mut Vec<Span>,
) {
    let value = node.data.borrow().value.clone();
    let mut push = |text: String, style: SpanStyle| {
        // Merge with the previous span when nothing about it differs.
        if let Some(last) = out.last_mut() {
            if last.style == style && last.link.as_deref() == link {
                last.text.push_str(&text);
                return;
            }
        }
        out.push(Span {
            text,
            style,
            link: link.map(str::to_string),
        });
    };

    let (child_style, child_link) = match value {
        NodeValue::Text(text) => return push(text, style),
        NodeValue::Code(code) => {
            return push(
                code.literal,
                SpanStyle {
                    code: true,
                    ..style
                },
            )
        }
        NodeValue::SoftBreak => return push(" ".to_string(), style),
        NodeValue::LineBreak => return push("\n".to_string(), style),
        NodeValue::HtmlInline(html) => return push(html, style),
        NodeValue::Emph => (
            SpanStyle {
                emphasis: true,
                ..style
            },
            link.map(str::to_string),
        ),
        NodeValue::Strong => (
            SpanStyle {
                strong: true,
                ..style
            },
            link.map(str::to_string),
        ),
        NodeValue::Strikethrough => (
            SpanStyle {
                strikethrough: true,
                ..style
            },
            link.map(str::to_string),
        ),
        NodeValue::Link(target) | NodeValue::Image(target) => (style, Some(target.url)),
        _ => (style, link.map(str::to_string)),
    };

    for child in node.children() {
        collect_spans(child, child_style, child_link.as_deref(), out);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
