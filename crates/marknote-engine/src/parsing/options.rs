use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};

/// Which text-to-blocks algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Full parse tree via pulldown-cmark; one block per top-level node.
    #[default]
    Structural,
    /// Line heuristic that only distinguishes tables from other text.
    Heuristic,
}

/// Markdown extensions enabled on top of CommonMark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    pub tables: bool,
    pub strikethrough: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
        }
    }
}

impl Extensions {
    pub fn to_pulldown(self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }
}

/// Read-only parser configuration shared across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub policy: Policy,
    pub extensions: Extensions,
}

impl ParseOptions {
    pub fn heuristic() -> Self {
        Self {
            policy: Policy::Heuristic,
            ..Self::default()
        }
    }
}
