pub mod blocks;
pub mod options;

#[cfg(test)]
mod tests;

use blocks::{Block, MarkdownLineClassifier, build_blocks, runs_to_blocks, segment_lines};
pub use options::{Extensions, ParseOptions, Policy};

/// The block sequence of one document, rebuilt from scratch on every parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub blocks: Vec<Block>,
}

impl ParsedDoc {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Converts full document text into blocks.
///
/// Implementations are pure and hold no state besides their configuration, so
/// one instance may serve concurrent callers.
pub trait BlockParser: Send + Sync {
    fn parse(&self, text: &str) -> Vec<Block>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralParser {
    extensions: Extensions,
}

impl StructuralParser {
    pub fn new(extensions: Extensions) -> Self {
        Self { extensions }
    }
}

impl BlockParser for StructuralParser {
    fn parse(&self, text: &str) -> Vec<Block> {
        if text.trim().is_empty() {
            return vec![];
        }
        build_blocks(text, self.extensions.to_pulldown())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicParser {
    extensions: Extensions,
}

impl HeuristicParser {
    pub fn new(extensions: Extensions) -> Self {
        Self { extensions }
    }
}

impl BlockParser for HeuristicParser {
    fn parse(&self, text: &str) -> Vec<Block> {
        if text.trim().is_empty() {
            return vec![];
        }
        let lines = MarkdownLineClassifier::new(self.extensions.tables).classify(text);
        runs_to_blocks(segment_lines(&lines))
    }
}

/// Returns the parser selected by `options.policy`.
pub fn parser_for(options: &ParseOptions) -> Box<dyn BlockParser> {
    match options.policy {
        Policy::Structural => Box::new(StructuralParser::new(options.extensions)),
        Policy::Heuristic => Box::new(HeuristicParser::new(options.extensions)),
    }
}

pub fn parse_document(text: &str, options: &ParseOptions) -> ParsedDoc {
    let blocks = parser_for(options).parse(text);
    log::debug!(
        "parsed {} bytes into {} blocks ({:?} policy)",
        text.len(),
        blocks.len(),
        options.policy
    );
    ParsedDoc { blocks }
}

/// Convenience: parse with the default structural policy.
pub fn parse_markdown(text: &str) -> ParsedDoc {
    parse_document(text, &ParseOptions::default())
}
