// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **some** content.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"a | b\");\n}\n```\n\n";
    base.repeat(size)
}

/// Notes dominated by tables, the case the heuristic policy exists for.
#[allow(dead_code)]
pub fn generate_table_heavy(tables: usize, rows: usize) -> String {
    let mut content = String::new();

    for table in 0..tables {
        content.push_str(&format!("## Table {table}\n\nSummary line.\n\n"));
        content.push_str("| Name | Status | Owner | Notes |\n|:-----|:------:|------:|-------|\n");
        for row in 0..rows {
            // Every third row is short to exercise ragged handling
            if row % 3 == 2 {
                content.push_str(&format!("| item {row} | open |\n"));
            } else {
                content.push_str(&format!("| item {row} | done | sam | `code` |\n"));
            }
        }
        content.push('\n');
    }

    content
}
