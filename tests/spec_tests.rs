use litemark::markdown_to_html;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct DialectTest {
    name: String,
    markdown: String,
    html: String,
}

#[test]
fn dialect_fixture_tests() {
    let test_data = fs::read_to_string("tests/data/tests.json").expect("Failed to read tests.json");

    let tests: Vec<DialectTest> =
        serde_json::from_str(&test_data).expect("Failed to parse tests.json");

    let mut failures = Vec::new();

    for test in &tests {
        let result = markdown_to_html(&test.markdown);

        if result != test.html {
            failures.push(test.name.clone());
            eprintln!("\nFixture '{}' failed", test.name);
            eprintln!("  Input:    {:?}", test.markdown);
            eprintln!("  Expected: {:?}", test.html);
            eprintln!("  Got:      {:?}", result);
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} fixtures failed: {:?}",
        failures.len(),
        tests.len(),
        failures
    );
}

#[test]
fn raw_text_markup_never_leaks() {
    // Outside of fenced literals, every < > & in these inputs comes from
    // raw text and must come out entity-encoded
    let hostile = [
        "<b>raw</b>",
        "a & b < c > d",
        "# <h1>sneaky</h1>",
        "> <blockquote>",
        "- <li>item",
        "`<code>`",
    ];

    for input in hostile {
        let output = markdown_to_html(input);
        assert!(
            !output.contains("<b>")
                && !output.contains("<h1>sneaky")
                && !output.contains("<blockquote><blockquote")
                && !output.contains("<li><li"),
            "raw markup leaked for {:?}: {}",
            input,
            output
        );
    }
}
