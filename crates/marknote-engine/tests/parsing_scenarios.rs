use marknote_engine::{Block, ParseOptions, parse_document, parse_markdown};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn kinds(blocks: &[Block]) -> Vec<&'static str> {
    blocks.iter().map(Block::kind_name).collect()
}

#[test]
fn weekly_review_structural() {
    let doc = parse_markdown(&fixture("weekly_review"));

    assert_eq!(
        kinds(&doc.blocks),
        vec![
            "Heading",
            "Paragraph",
            "Heading",
            "ListGroup",
            "ListGroup",
            "BlockQuote",
            "Table",
            "CodeBlock",
            "ThematicBreak",
            "Paragraph",
        ]
    );

    assert_eq!(
        doc.blocks[1],
        Block::Paragraph {
            text: "Things that went well this week.".into()
        }
    );

    let Block::ListGroup { items } = &doc.blocks[3] else {
        panic!("expected ordered list");
    };
    let bullets: Vec<_> = items.iter().map(|i| i.bullet.as_str()).collect();
    assert_eq!(bullets, vec!["1. ", "2. ", "3. "]);

    let Block::ListGroup { items } = &doc.blocks[4] else {
        panic!("expected unordered list");
    };
    assert_eq!(items[1].text, "follow up with design");

    assert_eq!(
        doc.blocks[5],
        Block::BlockQuote {
            text: "Keep the preview fast.\nParse on every keystroke.".into()
        }
    );

    let Block::Table(table) = &doc.blocks[6] else {
        panic!("expected table");
    };
    assert_eq!(table.headers(), ["Area", "Status", "Owner"]);
    assert_eq!(table.num_cols(), 3);
    assert_eq!(table.rows()[0], ["Parser", "done", "sam"]);
    assert_eq!(table.rows()[1], ["Tree", "in progress"]);
    assert_eq!(table.cell(1, 2), "");

    assert_eq!(
        doc.blocks[7],
        Block::CodeBlock {
            lang: Some("text".into()),
            code: "| not | a | table |\n|-----|---|-------|".into()
        }
    );
}

#[test]
fn weekly_review_heuristic() {
    let doc = parse_document(&fixture("weekly_review"), &ParseOptions::heuristic());

    // The bare `---` rule is a one-cell separator with no piped rows, so its
    // run is omitted and splits the trailing text in two.
    assert_eq!(
        kinds(&doc.blocks),
        vec!["Markdown", "Table", "Markdown", "Markdown"]
    );

    let Block::Markdown { text } = &doc.blocks[0] else {
        panic!("expected leading markdown");
    };
    assert!(text.starts_with("# Weekly review"));
    assert!(text.ends_with("> Parse on every keystroke."));

    let Block::Table(table) = &doc.blocks[1] else {
        panic!("expected table");
    };
    assert_eq!(table.headers(), ["Area", "Status", "Owner"]);
    assert_eq!(table.rows().len(), 2);
    // Short rows are kept as written
    assert_eq!(table.rows()[1], ["Tree", "in progress"]);
    assert_eq!(table.padded_row(&table.rows()[1]), vec!["Tree", "in progress", ""]);

    assert_eq!(
        doc.blocks[2],
        Block::Markdown {
            text: "```text\n| not | a | table |\n|-----|---|-------|\n```".into()
        }
    );
    assert_eq!(
        doc.blocks[3],
        Block::Markdown {
            text: "Notes end here.".into()
        }
    );
}

#[test]
fn unclosed_fence_hides_table_in_both_policies() {
    let text = fixture("unclosed_fence");

    let structural = parse_markdown(&text);
    assert_eq!(kinds(&structural.blocks), vec!["Paragraph", "CodeBlock"]);

    let heuristic = parse_document(&text, &ParseOptions::heuristic());
    assert_eq!(kinds(&heuristic.blocks), vec!["Markdown"]);
}

#[test]
fn text_survives_in_source_order() {
    let text = fixture("weekly_review");
    let doc = parse_markdown(&text);

    let mut cursor = 0;
    for block in &doc.blocks {
        let plain = block.plain_text();
        let Some(first_word) = plain.split_whitespace().next() else {
            continue;
        };
        let found = text[cursor..]
            .find(first_word)
            .unwrap_or_else(|| panic!("{first_word:?} out of order"));
        cursor += found;
    }
}
