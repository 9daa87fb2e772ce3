use super::kinds::{CodeFence, FenceSig, TableSeparator};

/// Classification of a single line.
///
/// This is phase 1 of heuristic segmentation: fence state is the only fact
/// carried from one line to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass<'a> {
    /// Line text without its trailing `\r`.
    pub text: &'a str,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Whether the line lies in a fenced region, fence lines included.
    pub in_fence: bool,
    /// If the line opens or closes a fence.
    pub fence_sig: Option<FenceSig>,
    /// Whether the line is a table separator row. Never set inside a fence.
    pub is_separator: bool,
}

/// Classifies lines for heuristic segmentation.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownLineClassifier {
    /// Whether separator rows are recognised at all.
    pub tables: bool,
}

impl MarkdownLineClassifier {
    pub fn new(tables: bool) -> Self {
        Self { tables }
    }

    /// Classifies every line of `text`.
    ///
    /// A fence line toggles the state and is itself marked as fenced, so
    /// `|` characters between an opening and closing fence are never table
    /// syntax. An unclosed fence runs to the end of the document.
    pub fn classify<'a>(&self, text: &'a str) -> Vec<LineClass<'a>> {
        let mut in_fence = false;

        text.split('\n')
            .map(|raw| {
                let line = raw.strip_suffix('\r').unwrap_or(raw);
                let fence_sig = CodeFence::sig(line);
                let fenced = in_fence || fence_sig.is_some();
                if fence_sig.is_some() {
                    in_fence = !in_fence;
                }

                LineClass {
                    text: line,
                    is_blank: line.trim().is_empty(),
                    in_fence: fenced,
                    fence_sig,
                    is_separator: self.tables && !fenced && TableSeparator::is_row(line),
                }
            })
            .collect()
    }
}

/// Classifies `text` with tables enabled.
pub fn classify_lines(text: &str) -> Vec<LineClass<'_>> {
    MarkdownLineClassifier::new(true).classify(text)
}
