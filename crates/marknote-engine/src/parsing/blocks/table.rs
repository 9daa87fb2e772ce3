use super::kinds::TableSeparator;

/// A parsed pipe table.
///
/// Rows are stored exactly as parsed, so a row may have fewer cells than
/// [`Table::num_cols`]. Use [`Table::cell`] or [`Table::padded_row`] when
/// laying the table out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    num_cols: usize,
}

impl Table {
    /// Builds a table; the column count is the widest of the header and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let num_cols = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        Self {
            headers,
            rows,
            num_cols,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Data cell at `(row, col)`, or `""` for a missing trailing cell.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// `cells` extended with empty strings up to `num_cols`.
    pub fn padded_row<'a>(&self, cells: &'a [String]) -> Vec<&'a str> {
        (0..self.num_cols)
            .map(|i| cells.get(i).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// Parses the raw lines of one table run.
///
/// Lines without a pipe are ignored. The first non-separator row is the
/// header, separator rows are dropped, and every later row is data. Returns
/// `None` when no cells were found at all.
pub fn parse_table<'a>(lines: impl IntoIterator<Item = &'a str>) -> Option<Table> {
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for line in lines {
        if !line.contains(TableSeparator::PIPE) || TableSeparator::is_row(line) {
            continue;
        }
        let cells = TableSeparator::split_cells(line);
        if headers.is_none() {
            headers = Some(cells);
        } else {
            rows.push(cells);
        }
    }

    let table = Table::new(headers.unwrap_or_default(), rows);
    (table.num_cols() > 0).then_some(table)
}
