use super::table::Table;

/// Bullet used for every item of an unordered list.
pub const UNORDERED_BULLET: &str = "• ";

/// One top-level renderable unit of a document.
///
/// The set of variants is closed: a renderer adapter matches on it
/// exhaustively and owns all drawing concerns. Blocks carry attributes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// An ATX or setext heading.
    Heading {
        /// Heading level, 1 through 6.
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    /// Fenced or indented code. Fence delimiter lines are not part of `code`
    /// and trailing newlines are trimmed.
    CodeBlock {
        /// Info string of a fenced block (e.g. `rust`), if any.
        lang: Option<String>,
        code: String,
    },
    ThematicBreak,
    BlockQuote {
        text: String,
    },
    ListGroup {
        items: Vec<ListItem>,
    },
    Table(Table),
    /// A run of non-table lines from the heuristic segmenter, handed to the
    /// renderer as unparsed markdown.
    Markdown {
        text: String,
    },
}

impl Block {
    /// Short variant name, used in logs and debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "Heading",
            Block::Paragraph { .. } => "Paragraph",
            Block::CodeBlock { .. } => "CodeBlock",
            Block::ThematicBreak => "ThematicBreak",
            Block::BlockQuote { .. } => "BlockQuote",
            Block::ListGroup { .. } => "ListGroup",
            Block::Table(_) => "Table",
            Block::Markdown { .. } => "Markdown",
        }
    }

    /// Plain text carried by the block, in source order.
    ///
    /// Lists join their items and tables join their cells with newlines.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::BlockQuote { text }
            | Block::Markdown { text } => text.clone(),
            Block::CodeBlock { code, .. } => code.clone(),
            Block::ThematicBreak => String::new(),
            Block::ListGroup { items } => items
                .iter()
                .map(|item| item.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Table(table) => std::iter::once(table.headers())
                .chain(table.rows().iter().map(Vec::as_slice))
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A single entry of a [`Block::ListGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Nesting depth, 0 for items of a top-level list.
    pub indent: usize,
    /// Rendered marker including its trailing space, e.g. `"• "` or `"2. "`.
    pub bullet: String,
    pub text: String,
}

impl ListItem {
    /// Builds the item at 1-based position `ordinal` of a list.
    ///
    /// Ordered lists are renumbered from 1 regardless of the numerals written
    /// in the source.
    pub fn new(indent: usize, ordered: bool, ordinal: usize, text: String) -> Self {
        let bullet = if ordered {
            format!("{ordinal}. ")
        } else {
            UNORDERED_BULLET.to_string()
        };
        Self {
            indent,
            bullet,
            text,
        }
    }
}
