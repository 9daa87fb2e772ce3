use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use super::{
    kinds::TableSeparator,
    table::Table,
    types::{Block, ListItem},
};

/// Plain-text accumulator for flattened inline content.
///
/// Inline markup contributes only its text. Line breaks become `\n`, and a
/// nested block starting after existing text is separated by one `\n`.
#[derive(Debug, Default)]
struct FlatText {
    buf: String,
}

impl FlatText {
    fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn line_break(&mut self) {
        self.buf.push('\n');
    }

    fn break_block(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    /// Cells of a table flattened into running text are space separated.
    fn break_cell(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with(['\n', ' ']) {
            self.buf.push(' ');
        }
    }

    fn finish(self) -> String {
        self.buf.trim().to_string()
    }
}

/// The top-level node currently being built.
#[derive(Debug)]
enum OpenNode {
    /// A node kind with no block mapping; its events are swallowed.
    Skip,
    Heading {
        level: u8,
        text: FlatText,
    },
    Paragraph(FlatText),
    Code {
        lang: Option<String>,
        code: String,
    },
    Quote(FlatText),
    List {
        ordered: bool,
        items: Vec<ListItem>,
        current: Option<FlatText>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        in_head: bool,
        row: Vec<String>,
        cell: Option<FlatText>,
        /// Byte offset where each row starts, header first.
        row_starts: Vec<usize>,
    },
}

fn is_block_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::BlockQuote(..)
            | Tag::CodeBlock(_)
            | Tag::HtmlBlock
            | Tag::List(_)
            | Tag::Item
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
    )
}

impl OpenNode {
    fn open(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Heading { level, .. } => OpenNode::Heading {
                level: level as u8,
                text: FlatText::default(),
            },
            Tag::Paragraph => OpenNode::Paragraph(FlatText::default()),
            Tag::CodeBlock(kind) => OpenNode::Code {
                lang: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                },
                code: String::new(),
            },
            Tag::BlockQuote(..) => OpenNode::Quote(FlatText::default()),
            Tag::List(start) => OpenNode::List {
                ordered: start.is_some(),
                items: Vec::new(),
                current: None,
            },
            Tag::Table(_) => OpenNode::Table {
                headers: Vec::new(),
                rows: Vec::new(),
                in_head: false,
                row: Vec::new(),
                cell: None,
                row_starts: Vec::new(),
            },
            _ => OpenNode::Skip,
        }
    }

    /// Text sink for inline content, if the node is collecting any right now.
    fn text_sink(&mut self) -> Option<&mut FlatText> {
        match self {
            OpenNode::Heading { text, .. } | OpenNode::Paragraph(text) | OpenNode::Quote(text) => {
                Some(text)
            }
            OpenNode::List { current, .. } => current.as_mut(),
            OpenNode::Table { cell, .. } => cell.as_mut(),
            OpenNode::Code { .. } | OpenNode::Skip => None,
        }
    }

    fn text(&mut self, s: &str) {
        match self {
            OpenNode::Code { code, .. } => code.push_str(s),
            other => {
                if let Some(sink) = other.text_sink() {
                    sink.push(s);
                }
            }
        }
    }

    fn line_break(&mut self) {
        if let Some(sink) = self.text_sink() {
            sink.line_break();
        }
    }

    /// A tag opened inside this node at byte `start`; `depth` is the nesting
    /// depth before it.
    fn nested_start(&mut self, tag: &Tag<'_>, depth: usize, start: usize) {
        if matches!(self, OpenNode::Quote(_) | OpenNode::List { .. }) {
            if let Some(sink) = self.text_sink() {
                if is_block_tag(tag) {
                    sink.break_block();
                } else if matches!(tag, Tag::TableCell) {
                    sink.break_cell();
                }
            }
        }

        match self {
            OpenNode::List { current, .. } if depth == 1 && matches!(tag, Tag::Item) => {
                *current = Some(FlatText::default());
            }
            OpenNode::Table {
                in_head,
                row,
                row_starts,
                ..
            } if depth == 1 => {
                *in_head = matches!(tag, Tag::TableHead);
                row.clear();
                row_starts.push(start);
            }
            OpenNode::Table { cell, .. } if depth == 2 => {
                *cell = Some(FlatText::default());
            }
            _ => {}
        }
    }

    /// A tag closed inside this node; `depth` is the nesting depth after it.
    fn nested_end(&mut self, depth: usize) {
        match self {
            OpenNode::List {
                ordered,
                items,
                current,
            } if depth == 1 => {
                if let Some(text) = current.take() {
                    let ordinal = items.len() + 1;
                    items.push(ListItem::new(0, *ordered, ordinal, text.finish()));
                }
            }
            OpenNode::Table { cell, row, .. } if depth == 2 => {
                if let Some(text) = cell.take() {
                    row.push(text.finish());
                }
            }
            OpenNode::Table {
                headers,
                rows,
                in_head,
                row,
                ..
            } if depth == 1 => {
                let cells = std::mem::take(row);
                if *in_head {
                    *headers = cells;
                    *in_head = false;
                } else {
                    rows.push(cells);
                }
            }
            _ => {}
        }
    }

    fn close(self) -> Option<Block> {
        match self {
            OpenNode::Skip => None,
            OpenNode::Heading { level, text } => Some(Block::Heading {
                level,
                text: text.finish(),
            }),
            OpenNode::Paragraph(text) => Some(Block::Paragraph {
                text: text.finish(),
            }),
            OpenNode::Code { lang, code } => Some(Block::CodeBlock {
                lang,
                code: code.trim_end_matches('\n').to_string(),
            }),
            OpenNode::Quote(text) => Some(Block::BlockQuote {
                text: text.finish(),
            }),
            OpenNode::List { items, .. } => Some(Block::ListGroup { items }),
            OpenNode::Table { headers, rows, .. } => {
                let table = Table::new(headers, rows);
                (table.num_cols() > 0).then_some(Block::Table(table))
            }
        }
    }
}

/// Parses `text` with pulldown-cmark and builds its top-level blocks.
pub fn build_blocks(text: &str, options: Options) -> Vec<Block> {
    let mut builder = BlockBuilder::new(text, options);
    for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
        builder.push(event, range);
    }
    builder.finish()
}

/// Builds top-level [`Block`]s from a pulldown-cmark offset event stream.
///
/// Tracks tag nesting depth; every tag opened at depth 0 starts a new
/// top-level node, and the node is emitted when the depth returns to 0.
///
/// pulldown-cmark pads or cuts table rows to the header width. When `source`
/// is known, each row is fitted back to the cells actually written in it.
pub struct BlockBuilder<'a> {
    source: Option<&'a str>,
    options: Options,
    depth: usize,
    node: Option<OpenNode>,
    out: Vec<Block>,
}

impl<'a> BlockBuilder<'a> {
    /// `source` must be the text the events were parsed from with `options`.
    pub fn new(source: &'a str, options: Options) -> Self {
        Self {
            source: Some(source),
            ..Self::unfitted(options)
        }
    }

    /// A builder that keeps table rows as pulldown-cmark reports them.
    fn unfitted(options: Options) -> Self {
        Self {
            source: None,
            options,
            depth: 0,
            node: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start(tag, range.start),
            Event::End(_) => self.end(),
            Event::Rule if self.depth == 0 => self.out.push(Block::ThematicBreak),
            Event::Text(text) | Event::Code(text) => {
                if let Some(node) = self.node.as_mut() {
                    node.text(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(node) = self.node.as_mut() {
                    node.line_break();
                }
            }
            // Raw HTML, footnote references and the like carry no preview text.
            _ => {}
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // Unbalanced stream: emit whatever was open.
        self.close_node();
        self.out
    }

    fn start(&mut self, tag: Tag<'_>, start: usize) {
        if self.depth == 0 {
            self.node = Some(OpenNode::open(tag));
        } else if let Some(node) = self.node.as_mut() {
            node.nested_start(&tag, self.depth, start);
        }
        self.depth += 1;
    }

    fn end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.close_node();
        } else if let Some(node) = self.node.as_mut() {
            node.nested_end(self.depth);
        }
    }

    fn close_node(&mut self) {
        let Some(mut node) = self.node.take() else {
            return;
        };
        if let (
            Some(source),
            OpenNode::Table {
                headers,
                rows,
                row_starts,
                ..
            },
        ) = (self.source, &mut node)
        {
            let lines = row_starts.iter().map(|&start| row_line(source, start));
            for (cells, line) in std::iter::once(headers).chain(rows.iter_mut()).zip(lines) {
                fit_row(cells, line, self.options);
            }
        }
        if let Some(block) = node.close() {
            self.out.push(block);
        }
    }
}

/// The source line a table row starts on.
fn row_line(source: &str, start: usize) -> &str {
    source
        .get(start..)
        .and_then(|rest| rest.lines().next())
        .unwrap_or_default()
}

/// Makes `cells` match the number of cells written in `line`.
///
/// Padding cells pulldown-cmark added to a short row are dropped. A row wider
/// than the header is parsed again on its own so no cell is lost.
fn fit_row(cells: &mut Vec<String>, line: &str, options: Options) {
    let width = TableSeparator::split_cells(line).len();
    while cells.len() > width && cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    if cells.len() < width
        && let Some(full) = reparse_row(line, width, options)
    {
        *cells = full;
    }
}

/// Parses `line` as the only data row under a header `width` cells wide.
fn reparse_row(line: &str, width: usize, options: Options) -> Option<Vec<String>> {
    let header = format!("{}|", "|x".repeat(width));
    let separator = format!("{}|", "|-".repeat(width));
    let text = format!("{header}\n{separator}\n{}", line.trim());

    let mut builder = BlockBuilder::unfitted(options);
    for (event, range) in Parser::new_ext(&text, options).into_offset_iter() {
        builder.push(event, range);
    }
    match builder.finish().into_iter().next()? {
        Block::Table(table) => table.rows().first().cloned(),
        _ => None,
    }
}
