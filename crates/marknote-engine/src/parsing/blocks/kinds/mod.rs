pub mod code_fence;
pub mod table_separator;

pub use code_fence::{CodeFence, FenceSig};
pub use table_separator::TableSeparator;
