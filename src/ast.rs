/// AST node types for the article Markdown dialect
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Document(Vec<Node>),
    // Block-level nodes
    Paragraph(Vec<Node>),
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    CodeBlock {
        lang: String,
        literal: String,
    },
    /// Children are one Paragraph per quoted source line
    BlockQuote(Vec<Node>),
    UnorderedList(Vec<Node>), // Contains ListItem nodes
    OrderedList(Vec<Node>),   // Contains ListItem nodes; source numbering is discarded
    ListItem(Vec<Node>),      // Inline content only, no nested blocks
    // Inline nodes
    Text(String),
    Code(String),        // Inline code span
    Strong(Vec<Node>),   // <strong> tag
    Emphasis(Vec<Node>), // <em> tag
    Link {
        destination: String,
        children: Vec<Node>,
    },
}
