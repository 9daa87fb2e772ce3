//! Maps preview blocks to styled terminal lines.
//!
//! This is the only place that knows how each [`Block`] variant looks.

use marknote_engine::{Block, ListItem, ParsedDoc, Table};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const QUOTE_GUTTER: &str = "▌ ";
const CODE_INDENT: &str = "    ";
const CELL_SEPARATOR: &str = " │ ";
const RULE: &str = "─";
const MIN_RULE_WIDTH: usize = 3;

fn heading_style(level: u8) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        1 => style.fg(Color::Cyan),
        2 => style.fg(Color::Blue),
        _ => style,
    }
}

fn code_style() -> Style {
    Style::default().fg(Color::Green)
}

fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Renders the whole document with a blank line between blocks.
pub fn render_doc(doc: &ParsedDoc, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, block) in doc.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(render_block(block, width));
    }
    lines
}

pub fn render_block(block: &Block, width: usize) -> Vec<Line<'static>> {
    match block {
        Block::Heading { level, text } => {
            let prefix = "#".repeat(usize::from(*level));
            vec![Line::styled(format!("{prefix} {text}"), heading_style(*level))]
        }
        Block::Paragraph { text } | Block::Markdown { text } => plain_lines(text),
        Block::CodeBlock { lang, code } => {
            let mut lines = Vec::new();
            if let Some(lang) = lang {
                lines.push(Line::styled(format!("{CODE_INDENT}{lang}"), dim_style()));
            }
            lines.extend(
                code.lines()
                    .map(|line| Line::styled(format!("{CODE_INDENT}{line}"), code_style())),
            );
            lines
        }
        Block::ThematicBreak => {
            vec![Line::styled(RULE.repeat(width.max(MIN_RULE_WIDTH)), dim_style())]
        }
        Block::BlockQuote { text } => text
            .lines()
            .map(|line| {
                Line::from(vec![
                    Span::styled(QUOTE_GUTTER, dim_style()),
                    Span::styled(
                        line.to_string(),
                        Style::default().add_modifier(Modifier::ITALIC),
                    ),
                ])
            })
            .collect(),
        Block::ListGroup { items } => items.iter().flat_map(render_list_item).collect(),
        Block::Table(table) => render_table(table),
    }
}

fn plain_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|line| Line::raw(line.to_string())).collect()
}

fn render_list_item(item: &ListItem) -> Vec<Line<'static>> {
    let indent = "  ".repeat(item.indent);
    // Continuation lines line up with the text after the bullet
    let hang = " ".repeat(item.bullet.chars().count());

    item.text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let marker = if i == 0 { item.bullet.clone() } else { hang.clone() };
            Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::raw(line.to_string()),
            ])
        })
        .collect()
}

fn render_table(table: &Table) -> Vec<Line<'static>> {
    let mut widths = vec![0; table.num_cols()];
    for row in std::iter::once(table.headers()).chain(table.rows().iter().map(Vec::as_slice)) {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| {
        table
            .padded_row(cells)
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(CELL_SEPARATOR)
    };

    let mut lines = vec![Line::styled(
        format_row(table.headers()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    lines.push(Line::styled(
        widths
            .iter()
            .map(|width| RULE.repeat(*width))
            .collect::<Vec<_>>()
            .join(&format!("{RULE}┼{RULE}")),
        dim_style(),
    ));
    lines.extend(
        table
            .rows()
            .iter()
            .map(|row| Line::raw(format_row(row.as_slice()))),
    );
    lines
}

/// Text of a line without styling, for `--print` output.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
