//! # Block Parsing
//!
//! Turns markdown text into an ordered sequence of top-level [`Block`]s.
//!
//! ## Policies
//!
//! 1. **Structural** (`builder`): walks pulldown-cmark's event stream and maps
//!    each top-level node to one block. This is the canonical path.
//!
//! 2. **Heuristic** (`classify` + `segment` + `table`): a line scan that only
//!    separates pipe tables from everything else. Non-table runs are passed on
//!    as raw markdown. Kept as a degraded mode for renderers that draw markdown
//!    themselves and only need table detection.
//!
//! ## Modules
//!
//! - **`types`**: The block model (`Block`, `ListItem`)
//! - **`table`**: `Table` and the pipe-table row parser
//! - **`kinds`**: Syntax knowledge with owned delimiters (`CodeFence`, `TableSeparator`)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`segment`**: Table extent marking and run partitioning
//! - **`builder`**: `BlockBuilder` state machine over pulldown-cmark events
//!
//! ## Key Invariants
//!
//! - Blocks are emitted in source order and never reordered
//! - Fenced code is a raw zone: `|` inside a fence is never table syntax
//! - Table rows are stored ragged; padding is a rendering concern

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod segment;
pub mod table;
pub mod types;

pub use builder::{BlockBuilder, build_blocks};
pub use classify::{LineClass, MarkdownLineClassifier, classify_lines};
pub use segment::{Run, mark_table_lines, runs_to_blocks, segment_lines};
pub use table::{Table, parse_table};
pub use types::{Block, ListItem, UNORDERED_BULLET};
