/// Parser and HTML renderer for the restricted Markdown dialect used by
/// article content: headings, fenced code, blockquotes, flat lists,
/// paragraphs, and code/link/bold/italic inline spans.
pub mod ast;
pub mod parser;
pub mod renderer;

use parser::Parser;
use renderer::HtmlRenderer;

/// Convert article Markdown to an HTML fragment.
///
/// Total over its input: any string, including the empty one, yields a
/// string, and malformed constructs degrade to literal text. Raw `&`, `<`
/// and `>` never reach the output unescaped.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new();
    let document = parser.parse(markdown);
    let renderer = HtmlRenderer::new();
    renderer.render(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(markdown_to_html(""), "");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(markdown_to_html("# Heading"), "<h1>Heading</h1>");
        assert_eq!(markdown_to_html("## Heading"), "<h2>Heading</h2>");
        assert_eq!(markdown_to_html("### Heading"), "<h3>Heading</h3>");
    }

    #[test]
    fn test_heading_level_is_capped() {
        assert_eq!(markdown_to_html("#### Heading"), "<h3>Heading</h3>");
        assert_eq!(markdown_to_html("###### Heading"), "<h3>Heading</h3>");
    }

    #[test]
    fn test_code_span_content_is_escaped() {
        assert_eq!(markdown_to_html("`a<b`"), "<p><code>a&lt;b</code></p>");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            markdown_to_html("**bold** and *italic*"),
            "<p><strong>bold</strong> and <em>italic</em></p>"
        );
    }

    #[test]
    fn test_link_quote_is_neutralized() {
        assert_eq!(
            markdown_to_html("[x](y\"z)"),
            "<p><a href=\"y%22z\" target=\"_blank\" rel=\"noopener noreferrer\">x</a></p>"
        );
    }

    #[test]
    fn test_adjacent_lines_merge_into_one_paragraph() {
        assert_eq!(markdown_to_html("line1\nline2"), "<p>line1 line2</p>");
    }

    #[test]
    fn test_unterminated_fence_still_emits() {
        assert_eq!(
            markdown_to_html("```rust\nfn main() {}"),
            "<pre><code class=\"lang-rust\">fn main() {}</code></pre>"
        );
    }

    #[test]
    fn test_conversion_is_stateless() {
        let input = "# Title\n\nBody with `code` and [a](b).";
        assert_eq!(markdown_to_html(input), markdown_to_html(input));
    }
}
