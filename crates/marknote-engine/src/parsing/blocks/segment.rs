use super::{
    classify::LineClass,
    table::parse_table,
    types::Block,
};

/// A maximal run of consecutive lines sharing the same table flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<'a> {
    pub is_table: bool,
    pub lines: Vec<&'a str>,
}

/// Flags every line that belongs to a table.
///
/// Each separator row is a table line. From there the extent grows upward and
/// downward over consecutive non-blank, non-fenced lines, which picks up the
/// header row above and the data rows below.
pub fn mark_table_lines(lines: &[LineClass<'_>]) -> Vec<bool> {
    let mut table = vec![false; lines.len()];
    let extends = |c: &LineClass<'_>| !c.is_blank && !c.in_fence;

    for (i, line) in lines.iter().enumerate() {
        if !line.is_separator {
            continue;
        }
        table[i] = true;

        for j in (0..i).rev() {
            if !extends(&lines[j]) {
                break;
            }
            table[j] = true;
        }
        for j in i + 1..lines.len() {
            if !extends(&lines[j]) {
                break;
            }
            table[j] = true;
        }
    }

    table
}

/// Partitions classified lines into table and non-table runs, in order.
pub fn segment_lines<'a>(lines: &[LineClass<'a>]) -> Vec<Run<'a>> {
    let flags = mark_table_lines(lines);
    let mut runs: Vec<Run<'a>> = Vec::new();

    for (line, is_table) in lines.iter().zip(flags) {
        match runs.last_mut() {
            Some(run) if run.is_table == is_table => run.lines.push(line.text),
            _ => runs.push(Run {
                is_table,
                lines: vec![line.text],
            }),
        }
    }

    runs
}

/// Turns runs into blocks.
///
/// Non-table runs become [`Block::Markdown`] with their joined, trimmed text;
/// empty runs and tables without cells are dropped.
pub fn runs_to_blocks(runs: Vec<Run<'_>>) -> Vec<Block> {
    runs.into_iter()
        .filter_map(|run| {
            if run.is_table {
                return parse_table(run.lines).map(Block::Table);
            }
            let text = run.lines.join("\n").trim().to_string();
            (!text.is_empty()).then_some(Block::Markdown { text })
        })
        .collect()
}
