use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::node::{MarkupNode, NodeKind};

/// Parse a raw HTML block into markup nodes.
///
/// Headings, paragraphs and lists keep their structure; any other element
/// becomes an `Other("html")` node that still carries its text. Text sitting
/// directly in the block becomes a loose text run. Whitespace between
/// top-level elements is dropped.
pub fn parse_html(html: &str) -> Vec<MarkupNode> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let Some(body) = find_body(&dom.document) else {
        return Vec::new();
    };
    let children = body.children.borrow();
    children
        .iter()
        .filter_map(convert)
        .filter(|node| !matches!(&node.kind, NodeKind::Text(text) if text.trim().is_empty()))
        .collect()
}

fn find_body(handle: &Handle) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == "body" {
                return Some(child.clone());
            }
        }
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

fn convert(handle: &Handle) -> Option<MarkupNode> {
    match &handle.data {
        NodeData::Text { contents } => {
            let contents = contents.borrow();
            let text: &str = &contents;
            Some(MarkupNode::text_run(text))
        }
        NodeData::Element { name, .. } if &*name.local == "br" => Some(MarkupNode::text_run("\n")),
        NodeData::Element { name, .. } => {
            let children = handle.children.borrow().iter().filter_map(convert).collect();
            Some(MarkupNode::with_children(element_kind(&name.local), children))
        }
        // Comments, doctypes and processing instructions carry no content
        _ => None,
    }
}

fn element_kind(tag: &str) -> NodeKind {
    match tag {
        "h1" => NodeKind::Heading(1),
        "h2" => NodeKind::Heading(2),
        "h3" => NodeKind::Heading(3),
        "h4" => NodeKind::Heading(4),
        "h5" => NodeKind::Heading(5),
        "h6" => NodeKind::Heading(6),
        "p" => NodeKind::Paragraph,
        "ul" => NodeKind::UnorderedList,
        "ol" => NodeKind::OrderedList,
        "li" => NodeKind::ListItem,
        _ => NodeKind::Other("html"),
    }
}
