pub mod io;
pub mod models;
pub mod parsing;
pub mod preview;
pub mod session;


// Re-export key types for easier usage
pub use io::*;
pub use models::{file_tree::*, markdown_file::*};
pub use parsing::{
    BlockParser, Extensions, HeuristicParser, ParseOptions, ParsedDoc, Policy, StructuralParser,
    blocks::{Block, ListItem, Table},
    parse_document, parse_markdown, parser_for,
};
pub use preview::Preview;
pub use session::Session;
