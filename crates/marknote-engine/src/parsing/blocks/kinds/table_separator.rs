/// GFM table row syntax: the `|` delimiter and the `---|:--:` separator row.
///
/// All pipe-table knowledge lives here so the classifier and the table parser
/// agree on what a row and a separator are.
pub struct TableSeparator;

impl TableSeparator {
    pub const PIPE: char = '|';

    pub const ESCAPE: char = '\\';

    /// Trims `line` and strips at most one leading and one trailing pipe.
    /// An escaped trailing `\|` is cell content and stays.
    pub fn strip_outer_pipes(line: &str) -> &str {
        let t = line.trim();
        let t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        match t.strip_suffix(Self::PIPE) {
            Some(rest) if !rest.ends_with(Self::ESCAPE) => rest,
            _ => t,
        }
    }

    /// Splits a table row into trimmed cells.
    ///
    /// `\|` does not split; it becomes a literal `|` in the cell.
    pub fn split_cells(line: &str) -> Vec<String> {
        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut chars = Self::strip_outer_pipes(line).chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                Self::ESCAPE if chars.peek() == Some(&Self::PIPE) => {
                    cell.push(Self::PIPE);
                    chars.next();
                }
                Self::PIPE => cells.push(std::mem::take(&mut cell).trim().to_string()),
                _ => cell.push(c),
            }
        }
        cells.push(cell.trim().to_string());
        cells
    }

    /// Returns true if `line` is a separator row.
    ///
    /// Every cell must be non-empty, consist only of `-` and `:`, and contain
    /// at least one `-`. A bare `---` counts as a single-cell separator.
    pub fn is_row(line: &str) -> bool {
        let inner = Self::strip_outer_pipes(line);
        if inner.trim().is_empty() {
            return false;
        }
        inner.split(Self::PIPE).all(|cell| {
            let cell = cell.trim();
            !cell.is_empty()
                && cell.chars().all(|c| c == '-' || c == ':')
                && cell.contains('-')
        })
    }
}
