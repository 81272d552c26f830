//! Parsed patch notes page, flattened into document order.
//!
//! The HTML tree is walked once and every element becomes a [`Node`] carrying
//! its tag and depth. The page text is stored once; an element's text is the
//! contiguous span of it covered by its subtree. Sibling and descendant
//! relations are recovered from depth alone:
//! - the siblings of node `i` at depth `d` are the later nodes at depth `d`
//!   that come before the first node shallower than `d`;
//! - its descendants are the nodes right after it that are deeper than `d`.

use std::ops::Range;

use scraper::{ElementRef, Html};
use tracing::debug;

/// One element of the flattened document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Lowercase tag name.
    pub tag: String,
    /// Distance from the `<html>` root element.
    pub depth: usize,
    /// Byte range of the element's text within [`Document::text_content`].
    pub span: Range<usize>,
}

impl Node {
    /// Whether this node has the given tag (ASCII case-insensitive).
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// Immutable, pre-order list of the elements of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    text: String,
}

/// Pending work while flattening.
enum Step<'a> {
    Enter(ElementRef<'a>, usize),
    Text(&'a str),
    Exit(usize),
}

/// Parse raw HTML into a [`Document`].
///
/// Never fails: malformed markup is repaired the way browsers do it.
pub fn parse(raw_html: &str) -> Document {
    let html = Html::parse_document(raw_html);
    if !html.errors.is_empty() {
        debug!(errors = html.errors.len(), "markup repaired while parsing");
    }
    Document::from_html(&html)
}

impl Document {
    /// Flatten an already parsed HTML tree.
    pub fn from_html(html: &Html) -> Self {
        let mut nodes: Vec<Node> = Vec::new();
        let mut text = String::new();
        let mut stack = vec![Step::Enter(html.root_element(), 0)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(el, depth) => {
                    let index = nodes.len();
                    nodes.push(Node {
                        tag: el.value().name().to_ascii_lowercase(),
                        depth,
                        span: text.len()..text.len(),
                    });
                    stack.push(Step::Exit(index));
                    // Reversed so the first child is popped first.
                    for child in el.children().rev() {
                        if let Some(child_el) = ElementRef::wrap(child) {
                            stack.push(Step::Enter(child_el, depth + 1));
                        } else if let Some(t) = child.value().as_text() {
                            stack.push(Step::Text(&**t));
                        }
                    }
                }
                Step::Text(t) => text.push_str(t),
                Step::Exit(index) => nodes[index].span.end = text.len(),
            }
        }

        debug!(nodes = nodes.len(), text_bytes = text.len(), "document flattened");
        Self { nodes, text }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Text of the element at `index` and everything below it (untrimmed).
    pub fn text(&self, index: usize) -> &str {
        &self.text[self.nodes[index].span.clone()]
    }

    /// All text of the page in document order.
    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indices of all nodes with `tag`, in document order.
    pub fn positions<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.is(tag))
            .map(|(i, _)| i)
    }

    /// Indices of the siblings following `index`, in document order.
    pub fn siblings(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let depth = self.nodes[index].depth;
        self.nodes[index + 1..]
            .iter()
            .enumerate()
            .take_while(move |(_, n)| n.depth >= depth)
            .filter(move |(_, n)| n.depth == depth)
            .map(move |(offset, _)| index + 1 + offset)
    }

    /// Indices of every node nested under `index`, in document order.
    pub fn descendants(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let depth = self.nodes[index].depth;
        self.nodes[index + 1..]
            .iter()
            .enumerate()
            .take_while(move |(_, n)| n.depth > depth)
            .map(move |(offset, _)| index + 1 + offset)
    }
}
