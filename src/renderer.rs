/// HTML renderer for the article Markdown dialect
use crate::ast::Node;

pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer
    }

    pub fn render(&self, node: &Node) -> String {
        render_node(node)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_node(node: &Node) -> String {
    match node {
        // Blocks joined by newline, no trailing newline; the empty document
        // renders to the empty string
        Node::Document(children) => {
            let blocks: Vec<String> = children.iter().map(render_node).collect();
            blocks.join("\n")
        }
        Node::Paragraph(children) => format!("<p>{}</p>", render_children(children)),
        Node::Heading { level, children } => {
            format!("<h{}>{}</h{}>", level, render_children(children), level)
        }
        // The lang- class prefix is emitted even for an empty tag
        Node::CodeBlock { lang, literal } => format!(
            "<pre><code class=\"lang-{}\">{}</code></pre>",
            escape_html(lang),
            escape_html(literal)
        ),
        Node::BlockQuote(children) => {
            format!("<blockquote>{}</blockquote>", render_children(children))
        }
        Node::UnorderedList(children) => format!("<ul>{}</ul>", render_children(children)),
        Node::OrderedList(children) => format!("<ol>{}</ol>", render_children(children)),
        Node::ListItem(children) => format!("<li>{}</li>", render_children(children)),
        Node::Text(text) => escape_html(text),
        Node::Code(code) => format!("<code>{}</code>", escape_html(code)),
        Node::Strong(children) => format!("<strong>{}</strong>", render_children(children)),
        Node::Emphasis(children) => format!("<em>{}</em>", render_children(children)),
        Node::Link {
            destination,
            children,
        } => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_url(destination),
            render_children(children)
        ),
    }
}

fn render_children(children: &[Node]) -> String {
    children.iter().map(render_node).collect()
}

/// Escape raw text exactly once: `&`, `<`, `>` and nothing else
fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Escaped like text, then `"` collapsed to `%22` so the destination stays
/// inert inside the href attribute
fn escape_url(url: &str) -> String {
    escape_html(url).replace('"', "%22")
}
