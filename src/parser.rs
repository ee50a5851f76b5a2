/// Parser for the article Markdown dialect
use crate::ast::Node;

/// Marker family for contiguous list consumption
#[derive(Debug, Clone, Copy, PartialEq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Working unit for the inline passes: a bare character, or a node finished
/// by an earlier pass. Finished nodes are opaque to later pattern matching
/// except for the emphasis visible-text rule.
#[derive(Debug, Clone)]
enum Seg {
    Ch(char),
    Atom(Node),
}

pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parse an entire article into a document tree. Total over its input:
    /// malformed constructs fall back to literal text, never an error.
    pub fn parse(&self, input: &str) -> Node {
        // CRLF is normalized away before any line matching. A trailing
        // newline yields a final empty line, which only an unterminated
        // fence can observe.
        let input = input.replace("\r\n", "\n");
        let lines: Vec<&str> = input.split('\n').collect();
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            // Fenced code block
            if let Some(lang) = self.fence_open(line) {
                let (block, consumed) = self.parse_fenced_code_block(&lines[i..], lang);
                blocks.push(block);
                i += consumed;
            }
            // Heading
            else if let Some(heading) = self.parse_heading(line) {
                blocks.push(heading);
                i += 1;
            }
            // Blockquote
            else if self.is_blockquote_line(line) {
                let (block, consumed) = self.parse_blockquote(&lines[i..]);
                blocks.push(block);
                i += consumed;
            }
            // Lists (unordered before ordered, same as the line predicates)
            else if self.unordered_item(line).is_some() {
                let (block, consumed) = self.parse_list(&lines[i..], ListKind::Unordered);
                blocks.push(block);
                i += consumed;
            } else if self.ordered_item(line).is_some() {
                let (block, consumed) = self.parse_list(&lines[i..], ListKind::Ordered);
                blocks.push(block);
                i += consumed;
            }
            // Blank lines separate blocks and emit nothing
            else if line.trim().is_empty() {
                i += 1;
            }
            // Paragraph fallback
            else {
                let (paragraph, consumed) = self.parse_paragraph(&lines[i..]);
                if let Some(paragraph) = paragraph {
                    blocks.push(paragraph);
                }
                i += consumed;
            }
        }

        Node::Document(blocks)
    }

    /// Opening fence: ``` then an optional alphanumeric/underscore language
    /// tag, then only trailing whitespace. Returns the tag, possibly empty.
    fn fence_open(&self, line: &str) -> Option<String> {
        let rest = line.strip_prefix("```")?;
        let tag_len = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .count();
        let (tag, trailing) = rest.split_at(tag_len);
        if trailing.trim().is_empty() {
            Some(tag.to_string())
        } else {
            None
        }
    }

    /// Closing fence: ``` followed by whitespace only
    fn is_closing_fence(&self, line: &str) -> bool {
        line.strip_prefix("```")
            .is_some_and(|rest| rest.trim().is_empty())
    }

    fn parse_fenced_code_block(&self, lines: &[&str], lang: String) -> (Node, usize) {
        let mut code_lines = Vec::new();
        let mut i = 1; // past the opening fence

        while i < lines.len() {
            if self.is_closing_fence(lines[i]) {
                i += 1; // consume the closing fence
                break;
            }
            code_lines.push(lines[i]);
            i += 1;
        }
        // A fence left open at end of input still emits its block

        let literal = code_lines.join("\n");
        (Node::CodeBlock { lang, literal }, i)
    }

    /// One or more leading `#` (no indentation) then at least one whitespace
    /// character. Level is capped at 3 however many hashes are given.
    fn heading_parts<'a>(&self, line: &'a str) -> Option<(u8, &'a str)> {
        let hashes = line.chars().take_while(|&c| c == '#').count();
        if hashes == 0 {
            return None;
        }
        let text = line[hashes..].strip_prefix(|c: char| c.is_whitespace())?;
        Some((hashes.min(3) as u8, text.trim()))
    }

    fn parse_heading(&self, line: &str) -> Option<Node> {
        let (level, text) = self.heading_parts(line)?;
        Some(Node::Heading {
            level,
            children: self.parse_inline(text),
        })
    }

    fn is_blockquote_line(&self, line: &str) -> bool {
        line.trim_start().starts_with('>')
    }

    /// Drop indentation, the `>` marker, and one optional following space
    fn strip_blockquote_marker<'a>(&self, line: &'a str) -> &'a str {
        let rest = line.trim_start();
        let rest = rest.strip_prefix('>').unwrap_or(rest);
        rest.strip_prefix(|c: char| c.is_whitespace()).unwrap_or(rest)
    }

    /// Each quoted source line becomes its own paragraph, even when empty
    fn parse_blockquote(&self, lines: &[&str]) -> (Node, usize) {
        let mut paragraphs = Vec::new();
        let mut i = 0;

        while i < lines.len() && self.is_blockquote_line(lines[i]) {
            let text = self.strip_blockquote_marker(lines[i]).trim();
            paragraphs.push(Node::Paragraph(self.parse_inline(text)));
            i += 1;
        }

        (Node::BlockQuote(paragraphs), i)
    }

    /// `- text` or `* text`, with optional indentation
    fn unordered_item<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.trim_start();
        let rest = rest.strip_prefix(['-', '*'])?;
        let text = rest.strip_prefix(|c: char| c.is_whitespace())?;
        Some(text.trim())
    }

    /// `1. text` with optional indentation; the number itself is discarded
    fn ordered_item<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.trim_start();
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        let rest = rest[digits..].strip_prefix('.')?;
        let text = rest.strip_prefix(|c: char| c.is_whitespace())?;
        Some(text.trim())
    }

    /// One item per source line; no nesting, no multi-line items
    fn parse_list(&self, lines: &[&str], kind: ListKind) -> (Node, usize) {
        let mut items = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let text = match kind {
                ListKind::Unordered => self.unordered_item(lines[i]),
                ListKind::Ordered => self.ordered_item(lines[i]),
            };
            let Some(text) = text else { break };
            items.push(Node::ListItem(self.parse_inline(text)));
            i += 1;
        }

        let list = match kind {
            ListKind::Unordered => Node::UnorderedList(items),
            ListKind::Ordered => Node::OrderedList(items),
        };
        (list, i)
    }

    /// Returns None when the gathered text is empty after trimming, which
    /// emits no element
    fn parse_paragraph(&self, lines: &[&str]) -> (Option<Node>, usize) {
        let mut buf = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            if line.trim().is_empty() {
                break;
            }
            // The first line is always consumed; later lines end the
            // paragraph when they start another block
            if i > 0 && self.interrupts_paragraph(line) {
                break;
            }
            buf.push(line.trim());
            i += 1;
        }

        let text = buf.join(" ");
        let text = text.trim();
        if text.is_empty() {
            (None, i)
        } else {
            (Some(Node::Paragraph(self.parse_inline(text))), i)
        }
    }

    fn interrupts_paragraph(&self, line: &str) -> bool {
        line.starts_with("```")
            || self.heading_parts(line).is_some()
            || self.is_blockquote_line(line)
            || self.unordered_item(line).is_some()
            || self.ordered_item(line).is_some()
    }

    /// Inline passes in fixed precedence: code spans, then links, then bold,
    /// then italic. Each pass rewrites the segment list; characters left
    /// over at the end collapse back into text nodes.
    fn parse_inline(&self, text: &str) -> Vec<Node> {
        let segs = self.extract_code_spans(text);
        let segs = self.link_pass(segs);
        let segs = self.emphasis_pass(segs, 2);
        let segs = self.emphasis_pass(segs, 1);
        collapse(segs)
    }

    /// Code spans bind first: the first backtick after an opener closes it,
    /// and an empty pair is no span at all. Span content is opaque to every
    /// later pass.
    fn extract_code_spans(&self, text: &str) -> Vec<Seg> {
        let chars: Vec<char> = text.chars().collect();
        let mut segs = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == '`'
                && let Some(close) = chars[i + 1..]
                    .iter()
                    .position(|&c| c == '`')
                    .map(|p| i + 1 + p)
                && close > i + 1
            {
                let content: String = chars[i + 1..close].iter().collect();
                segs.push(Seg::Atom(Node::Code(content)));
                i = close + 1;
                continue;
            }
            segs.push(Seg::Ch(chars[i]));
            i += 1;
        }
        segs
    }

    fn link_pass(&self, segs: Vec<Seg>) -> Vec<Seg> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < segs.len() {
            if matches!(segs[i], Seg::Ch('['))
                && let Some((link, consumed)) = self.try_parse_link(&segs[i..])
            {
                out.push(Seg::Atom(link));
                i += consumed;
                continue;
            }
            out.push(segs[i].clone());
            i += 1;
        }
        out
    }

    /// `[text](url)` starting at a `[` segment. The text is one or more
    /// segments with no `]` (code spans are fine), `](` must be adjacent,
    /// and the url is one or more plain characters with no `)`. The url is
    /// kept verbatim; the renderer handles quoting.
    fn try_parse_link(&self, segs: &[Seg]) -> Option<(Node, usize)> {
        let text_start = 1;
        let mut i = text_start;
        while i < segs.len() && !matches!(segs[i], Seg::Ch(']')) {
            i += 1;
        }
        if i == text_start || i >= segs.len() {
            return None;
        }
        let text_end = i;

        if !matches!(segs.get(text_end + 1), Some(Seg::Ch('('))) {
            return None;
        }

        let url_start = text_end + 2;
        let mut url = String::new();
        let mut i = url_start;
        loop {
            match segs.get(i)? {
                Seg::Ch(')') => break,
                Seg::Ch(c) => {
                    url.push(*c);
                    i += 1;
                }
                Seg::Atom(_) => return None,
            }
        }
        if i == url_start {
            return None;
        }

        let children = collapse(segs[text_start..text_end].to_vec());
        Some((
            Node::Link {
                destination: url,
                children,
            },
            i + 1,
        ))
    }

    /// Emphasis over the segment list: `**` pairs on the first pass, single
    /// `*` on the second, so consumed pairs never leak into single-star
    /// matching. A failed opener retries from the very next segment.
    fn emphasis_pass(&self, segs: Vec<Seg>, marker_len: usize) -> Vec<Seg> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < segs.len() {
            if self.is_marker(&segs, i, marker_len)
                && let Some((span, consumed)) = self.try_parse_emphasis(&segs[i..], marker_len)
            {
                out.push(Seg::Atom(span));
                i += consumed;
                continue;
            }
            out.push(segs[i].clone());
            i += 1;
        }
        out
    }

    fn is_marker(&self, segs: &[Seg], at: usize, marker_len: usize) -> bool {
        (0..marker_len).all(|k| matches!(segs.get(at + k), Some(Seg::Ch('*'))))
    }

    /// The span content must be non-empty and free of `*` in its visible
    /// text. A stray star before the closing marker kills the whole match;
    /// the markers then stay literal.
    fn try_parse_emphasis(&self, segs: &[Seg], marker_len: usize) -> Option<(Node, usize)> {
        let content_start = marker_len;
        let mut i = content_start;

        loop {
            match segs.get(i)? {
                Seg::Ch('*') => {
                    if i > content_start && self.is_marker(segs, i, marker_len) {
                        let children = collapse(segs[content_start..i].to_vec());
                        let node = if marker_len == 2 {
                            Node::Strong(children)
                        } else {
                            Node::Emphasis(children)
                        };
                        return Some((node, i + marker_len));
                    }
                    return None;
                }
                Seg::Ch(_) => i += 1,
                Seg::Atom(node) => {
                    if contains_star(node) {
                        return None;
                    }
                    i += 1;
                }
            }
        }
    }
}

/// Visible-text star check for the emphasis passes. Code span content is
/// invisible to emphasis matching; link text and destinations are not.
fn contains_star(node: &Node) -> bool {
    match node {
        Node::Text(text) => text.contains('*'),
        Node::Code(_) => false,
        Node::Link {
            destination,
            children,
        } => destination.contains('*') || children.iter().any(contains_star),
        Node::Strong(children) | Node::Emphasis(children) => children.iter().any(contains_star),
        _ => false,
    }
}

/// Group leftover characters back into text nodes
fn collapse(segs: Vec<Seg>) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut run = String::new();
    for seg in segs {
        match seg {
            Seg::Ch(c) => run.push(c),
            Seg::Atom(node) => {
                if !run.is_empty() {
                    nodes.push(Node::Text(std::mem::take(&mut run)));
                }
                nodes.push(node);
            }
        }
    }
    if !run.is_empty() {
        nodes.push(Node::Text(run));
    }
    nodes
}
