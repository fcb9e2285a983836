use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::html::parse_html;
use crate::node::{MarkupNode, NodeKind};

/// Parse markdown text into its top-level markup nodes.
///
/// Plain CommonMark only: tables, task-list markers and strikethrough are not
/// recognised and stay in the text verbatim.
pub fn parse(markdown: &str) -> Vec<MarkupNode> {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut state = TreeState::default();

    for event in parser {
        process_event(event, &mut state);
    }

    // Unbalanced events cannot come out of pulldown-cmark, but close anything
    // left open rather than lose it.
    while state.close().is_some() {}

    state.roots
}

#[derive(Default)]
struct TreeState {
    roots: Vec<MarkupNode>,
    // Block nodes currently open, innermost last
    open: Vec<MarkupNode>,
    // Text inside an image is alt text and never reaches the output
    image_depth: usize,
    // Raw source of the HTML block being read, if any
    html: Option<String>,
}

impl TreeState {
    fn open(&mut self, kind: NodeKind) {
        self.separate();
        self.open.push(MarkupNode::new(kind));
    }

    /// Keep a new block's text apart from what its parent already holds.
    fn separate(&mut self) {
        if let Some(parent) = self.open.last_mut() {
            if !parent.children.is_empty() {
                push_text(parent, "\n");
            }
        }
    }

    fn close_html(&mut self) {
        let Some(html) = self.html.take() else {
            return;
        };
        for node in parse_html(&html) {
            self.separate();
            self.attach(node);
        }
    }

    fn close(&mut self) -> Option<()> {
        let node = self.open.pop()?;
        self.attach(node);
        Some(())
    }

    fn attach(&mut self, node: MarkupNode) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn text(&mut self, text: &str) {
        if self.image_depth > 0 {
            return;
        }
        match self.open.last_mut() {
            Some(node) => push_text(node, text),
            None => self.roots.push(MarkupNode::text_run(text)),
        }
    }
}

/// Append text to a node, merging with a trailing text run.
fn push_text(node: &mut MarkupNode, text: &str) {
    if let Some(MarkupNode {
        kind: NodeKind::Text(existing),
        ..
    }) = node.children.last_mut()
    {
        existing.push_str(text);
    } else {
        node.children.push(MarkupNode::text_run(text));
    }
}

fn process_event(event: Event, state: &mut TreeState) {
    match event {
        Event::Start(tag) => match tag {
            Tag::Heading { level, .. } => {
                state.open(NodeKind::Heading(heading_level_to_u8(level)))
            }
            Tag::Paragraph => state.open(NodeKind::Paragraph),
            Tag::List(Some(_)) => state.open(NodeKind::OrderedList),
            Tag::List(None) => state.open(NodeKind::UnorderedList),
            Tag::Item => state.open(NodeKind::ListItem),
            Tag::BlockQuote { .. } => state.open(NodeKind::Other("blockquote")),
            Tag::CodeBlock(_) => state.open(NodeKind::Other("code")),
            Tag::HtmlBlock => state.html = Some(String::new()),
            Tag::Image { .. } => state.image_depth += 1,
            // Emphasis, strong, links and the like only carry inline formatting
            _ => {}
        },
        Event::End(tag_end) => match tag_end {
            TagEnd::Heading { .. }
            | TagEnd::Paragraph
            | TagEnd::List { .. }
            | TagEnd::Item
            | TagEnd::BlockQuote { .. }
            | TagEnd::CodeBlock => {
                state.close();
            }
            TagEnd::HtmlBlock => state.close_html(),
            TagEnd::Image => state.image_depth = state.image_depth.saturating_sub(1),
            _ => {}
        },

        Event::Text(text) | Event::Code(text) => state.text(&text),

        Event::SoftBreak | Event::HardBreak => state.text("\n"),

        Event::Rule => state.attach(MarkupNode::new(NodeKind::Other("rule"))),

        Event::Html(html) => {
            if let Some(buffer) = state.html.as_mut() {
                buffer.push_str(&html);
            }
        }

        // Inline tags are formatting; the text between them comes through as text
        Event::InlineHtml(_) => {}

        _ => {}
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
