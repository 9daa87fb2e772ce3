//! Parser tests over whole documents.
//!
//! Block sequences are checked with inline `insta` debug snapshots where the
//! full shape matters, and with targeted asserts elsewhere.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    Extensions, ParseOptions, Policy,
    blocks::{Block, ListItem, Table},
    parse_document, parse_markdown,
};

fn structural(text: &str) -> Vec<Block> {
    parse_markdown(text).blocks
}

fn heuristic(text: &str) -> Vec<Block> {
    parse_document(text, &ParseOptions::heuristic()).blocks
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph { text: text.into() }
}

#[test]
fn heading_paragraph_and_table() {
    let doc = parse_markdown("# Title\n\nSome text.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n");
    insta::assert_debug_snapshot!(doc.blocks, @r#"
    [
        Heading {
            level: 1,
            text: "Title",
        },
        Paragraph {
            text: "Some text.",
        },
        Table(
            Table {
                headers: [
                    "A",
                    "B",
                ],
                rows: [
                    [
                        "1",
                        "2",
                    ],
                ],
                num_cols: 2,
            },
        ),
    ]
    "#);
}

#[test]
fn pipes_inside_fence_stay_code() {
    let blocks = structural("```\na|b|c\n---|---\n```\n");
    assert_eq!(
        blocks,
        vec![Block::CodeBlock {
            lang: None,
            code: "a|b|c\n---|---".into()
        }]
    );
}

#[test]
fn ordered_list_is_renumbered_from_one() {
    let blocks = structural("3. foo\n7. bar\n");
    insta::assert_debug_snapshot!(blocks, @r#"
    [
        ListGroup {
            items: [
                ListItem {
                    indent: 0,
                    bullet: "1. ",
                    text: "foo",
                },
                ListItem {
                    indent: 0,
                    bullet: "2. ",
                    text: "bar",
                },
            ],
        },
    ]
    "#);
}

#[test]
fn ordered_list_bullets() {
    let blocks = structural("1. foo\n2. bar");
    let Block::ListGroup { items } = &blocks[0] else {
        panic!("expected a list, got {blocks:?}");
    };
    let bullets: Vec<_> = items.iter().map(|i| i.bullet.as_str()).collect();
    assert_eq!(bullets, vec!["1. ", "2. "]);
}

#[test]
fn unordered_list_uses_dot_bullets() {
    assert_eq!(
        structural("- a\n- b\n"),
        vec![Block::ListGroup {
            items: vec![
                ListItem::new(0, false, 1, "a".into()),
                ListItem::new(0, false, 2, "b".into()),
            ]
        }]
    );
}

#[test]
fn nested_list_is_flattened_into_parent_item() {
    let blocks = structural("- parent\n  - child\n- next\n");
    let Block::ListGroup { items } = &blocks[0] else {
        panic!("expected a list, got {blocks:?}");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text, "parent\nchild");
    assert_eq!(items[1].text, "next");
    assert!(items.iter().all(|i| i.indent == 0));
}

#[test]
fn loose_list_items() {
    let blocks = structural("- a\n\n- b\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].plain_text(), "a\nb");
}

#[rstest]
#[case("Some **bold** and *it* here", "Some bold and it here")]
#[case("call `cargo build` now", "call cargo build now")]
#[case("see [the docs](https://example.com)", "see the docs")]
#[case("a <span>b</span> c", "a b c")]
#[case("line one\nline two", "line one\nline two")]
#[case("hard\\\nbreak", "hard\nbreak")]
#[case("~~gone~~ kept", "gone kept")]
fn inline_markup_is_flattened(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(structural(input), vec![paragraph(expected)]);
}

#[test]
fn strikethrough_disabled_keeps_tildes() {
    let options = ParseOptions {
        policy: Policy::Structural,
        extensions: Extensions {
            tables: true,
            strikethrough: false,
        },
    };
    let doc = parse_document("~~gone~~ kept", &options);
    assert_eq!(doc.blocks, vec![paragraph("~~gone~~ kept")]);
}

#[test]
fn tables_disabled_leaves_a_paragraph() {
    let options = ParseOptions {
        policy: Policy::Structural,
        extensions: Extensions {
            tables: false,
            strikethrough: true,
        },
    };
    let doc = parse_document("| A | B |\n|---|---|\n| 1 | 2 |", &options);
    assert_eq!(doc.blocks.len(), 1);
    assert!(matches!(doc.blocks[0], Block::Paragraph { .. }));
}

#[rstest]
#[case("# One", 1, "One")]
#[case("###### Six", 6, "Six")]
#[case("Setext\n===", 1, "Setext")]
#[case("Setext two\n---", 2, "Setext two")]
#[case("## Use `cargo`", 2, "Use cargo")]
fn headings(#[case] input: &str, #[case] level: u8, #[case] text: &str) {
    assert_eq!(
        structural(input),
        vec![Block::Heading {
            level,
            text: text.into()
        }]
    );
}

#[test]
fn block_quote_joins_paragraphs() {
    assert_eq!(
        structural("> one\n> two\n>\n> three"),
        vec![Block::BlockQuote {
            text: "one\ntwo\nthree".into()
        }]
    );
}

#[test]
fn code_blocks_keep_language_and_strip_fences() {
    assert_eq!(
        structural("```rust\nfn main() {}\n\n```\n\n    indented\n"),
        vec![
            Block::CodeBlock {
                lang: Some("rust".into()),
                code: "fn main() {}".into()
            },
            Block::CodeBlock {
                lang: None,
                code: "indented".into()
            },
        ]
    );
}

#[test]
fn unbalanced_fence_swallows_rest_of_document() {
    assert_eq!(
        structural("text\n\n~~~\ncode | x\n---|---\n\n# not a heading"),
        vec![
            paragraph("text"),
            Block::CodeBlock {
                lang: None,
                code: "code | x\n---|---\n\n# not a heading".into()
            },
        ]
    );
}

#[test]
fn thematic_breaks() {
    assert_eq!(
        structural("a\n\n---\n\nb\n\n***"),
        vec![
            paragraph("a"),
            Block::ThematicBreak,
            paragraph("b"),
            Block::ThematicBreak,
        ]
    );
}

#[test]
fn html_blocks_are_skipped() {
    assert_eq!(
        structural("<div>\nhidden\n</div>\n\nshown"),
        vec![paragraph("shown")]
    );
}

#[test]
fn table_cells_are_flattened() {
    let blocks = structural("| **A** | `b` |\n|:--|--:|\n| [x](y) | 2 |");
    let Block::Table(table) = &blocks[0] else {
        panic!("expected a table, got {blocks:?}");
    };
    assert_eq!(table.headers(), ["A", "b"]);
    assert_eq!(table.rows(), [vec!["x".to_string(), "2".to_string()]]);
    assert_eq!(table.num_cols(), 2);
}

fn structural_table(text: &str) -> Table {
    match structural(text).into_iter().next() {
        Some(Block::Table(table)) => table,
        other => panic!("expected a table, got {other:?}"),
    }
}

#[test]
fn table_short_row_stays_ragged() {
    let table = structural_table("a|b|c\n---|---|---\nx|y");
    assert_eq!(table.rows(), [vec!["x".to_string(), "y".to_string()]]);
    assert_eq!(table.num_cols(), 3);
    assert_eq!(table.cell(0, 2), "");
}

#[test]
fn table_short_row_keeps_written_empty_cells() {
    let table = structural_table("| a | b | c |\n|---|---|---|\n| x | |");
    assert_eq!(table.rows()[0], ["x", ""]);
}

#[test]
fn table_wide_row_keeps_every_cell() {
    let table = structural_table("| h |\n|---|\n| 1 | 2 | 3 |\n| **4** | `5` |");
    assert_eq!(table.headers(), ["h"]);
    assert_eq!(table.rows()[0], ["1", "2", "3"]);
    assert_eq!(table.rows()[1], ["4", "5"]);
    assert_eq!(table.num_cols(), 3);
}

#[test]
fn table_escaped_pipe_is_cell_text() {
    let table = structural_table("| a | b |\n|---|---|\n| x \\| y | z |");
    assert_eq!(table.rows()[0], ["x | y", "z"]);
    assert_eq!(table.num_cols(), 2);
}

#[test]
fn table_inside_quote_keeps_cells_apart() {
    assert_eq!(
        structural("> | a | b |\n> |---|---|\n> | 1 | 2 |"),
        vec![Block::BlockQuote {
            text: "a b\n1 2".into()
        }]
    );
}

#[test]
fn table_inside_list_item_keeps_cells_apart() {
    let blocks = structural("- | a | b |\n  |---|---|\n  | 1 | 2 |");
    let Block::ListGroup { items } = &blocks[0] else {
        panic!("expected a list, got {blocks:?}");
    };
    assert_eq!(items[0].text, "a b\n1 2");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\n\t\n")]
fn blank_input_has_no_blocks(#[case] input: &str) {
    assert!(structural(input).is_empty());
    assert!(heuristic(input).is_empty());
}

#[test]
fn blocks_follow_source_order() {
    let text = "# alpha\n\nbravo\n\n- charlie\n- delta\n\n> echo\n\n```\nfoxtrot\n```\n\n| golf | hotel |\n|---|---|\n| india | juliet |\n";
    let blocks = structural(text);
    assert_eq!(blocks.len(), 6);

    let mut cursor = 0;
    for block in &blocks {
        let first = block.plain_text();
        let first = first.lines().next().unwrap_or_default();
        let found = text[cursor..]
            .find(first)
            .unwrap_or_else(|| panic!("{first:?} not found after byte {cursor}"));
        cursor += found + first.len();
    }
}

#[test]
fn parsing_is_deterministic() {
    let text = "# t\n\n| a | b |\n|---|---|\n| 1 |\n\n- x\n";
    assert_eq!(parse_markdown(text), parse_markdown(text));
    assert_eq!(heuristic(text), heuristic(text));

    for blocks in [structural(text), heuristic(text)] {
        let table = blocks
            .iter()
            .find_map(|block| match block {
                Block::Table(table) => Some(table),
                _ => None,
            })
            .unwrap_or_else(|| panic!("expected a table in {blocks:?}"));
        assert_eq!(table.rows(), [vec!["1".to_string()]]);
        assert_eq!(table.num_cols(), 2);
    }
}

// Heuristic policy

#[test]
fn heuristic_scenario_splits_table_from_text() {
    let blocks = heuristic("# Title\n\nSome text.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n");
    insta::assert_debug_snapshot!(blocks, @r##"
    [
        Markdown {
            text: "# Title\n\nSome text.",
        },
        Table(
            Table {
                headers: [
                    "A",
                    "B",
                ],
                rows: [
                    [
                        "1",
                        "2",
                    ],
                ],
                num_cols: 2,
            },
        ),
    ]
    "##);
}

#[test]
fn heuristic_keeps_fenced_pipes_as_text() {
    let text = "```\na|b|c\n---|---\n```";
    let blocks = heuristic(text);
    assert_eq!(
        blocks,
        vec![Block::Markdown {
            text: text.into()
        }]
    );
}

#[test]
fn heuristic_ragged_table() {
    let blocks = heuristic("a|b|c\n---|---|---\nx|y");
    let Block::Table(table) = &blocks[0] else {
        panic!("expected a table, got {blocks:?}");
    };
    assert_eq!(table.num_cols(), 3);
    assert_eq!(table.rows()[0].len(), 2);
}

#[test]
fn heuristic_malformed_separator_is_plain_text() {
    let text = "a|b\nabc|---\n1|2";
    assert_eq!(
        heuristic(text),
        vec![Block::Markdown {
            text: text.into()
        }]
    );
}

#[test]
fn heuristic_with_tables_disabled_is_one_markdown_block() {
    let options = ParseOptions {
        policy: Policy::Heuristic,
        extensions: Extensions {
            tables: false,
            strikethrough: true,
        },
    };
    let doc = parse_document("intro\n\nA|B\n-|-\n1|2", &options);
    assert_eq!(
        doc.blocks,
        vec![Block::Markdown {
            text: "intro\n\nA|B\n-|-\n1|2".into()
        }]
    );
}
