pub mod file_tree;
pub mod markdown_file;

pub use file_tree::{FileTree, FileTreeItem};
pub use markdown_file::{
    MarkdownFile, has_markdown_extension, normalize_note_name, strip_markdown_extension,
};
