use crate::config::CheckboxConfig;
use crate::flowable::{BULLET, CheckboxLine, Flowable, Spacer, TextBlock};
use crate::node::{MarkupNode, NodeKind};
use crate::style::{StyleName, StyleSet};

/// Gap after headings, paragraphs and loose text.
pub const BLOCK_SPACING: f64 = 12.0;
/// Gap after each list item; items sit close together.
pub const LIST_ITEM_SPACING: f64 = 1.0;

const UNCHECKED_PREFIX: &str = "[ ]";
const CHECKED_PREFIX: &str = "[x]";

/// Turns markup nodes into flowables.
///
/// Unsupported constructs (ordered lists, code blocks, quotes, rules, deep
/// headings) produce nothing rather than an error. Only direct list items of
/// an unordered list are visited; a nested list's text stays folded into its
/// parent item.
#[derive(Debug, Clone, Copy)]
pub struct ElementMapper<'a> {
    styles: &'a StyleSet,
    checkbox: CheckboxConfig,
}

impl<'a> ElementMapper<'a> {
    pub fn new(styles: &'a StyleSet, checkbox: CheckboxConfig) -> Self {
        Self { styles, checkbox }
    }

    /// Map a whole document in order.
    pub fn map_nodes(&self, nodes: &[MarkupNode]) -> Vec<Flowable> {
        let flowables: Vec<Flowable> = nodes.iter().flat_map(|node| self.map_node(node)).collect();
        log::debug!(
            "mapped {} markup nodes to {} flowables",
            nodes.len(),
            flowables.len()
        );
        flowables
    }

    pub fn map_node(&self, node: &MarkupNode) -> Vec<Flowable> {
        match &node.kind {
            NodeKind::Text(text) => self.block(text.trim(), StyleName::Normal),
            NodeKind::Heading(level) => match StyleName::for_heading(*level) {
                Some(style) => self.text_block(&node.text(), style),
                None => {
                    log::trace!("dropping unsupported h{} heading", level);
                    Vec::new()
                }
            },
            NodeKind::Paragraph => self.block(node.text().trim(), StyleName::Normal),
            NodeKind::UnorderedList => node
                .list_items()
                .flat_map(|item| {
                    [
                        self.list_item(item.text().trim()),
                        Flowable::Spacer(Spacer::new(LIST_ITEM_SPACING)),
                    ]
                })
                .collect(),
            NodeKind::OrderedList | NodeKind::ListItem => {
                log::trace!("dropping unsupported {:?} node", node.kind);
                Vec::new()
            }
            NodeKind::Other(name) => {
                log::trace!("dropping unsupported {} node", name);
                Vec::new()
            }
        }
    }

    fn text_block(&self, text: &str, style: StyleName) -> Vec<Flowable> {
        vec![
            Flowable::Text(TextBlock::new(text, self.styles.get(style))),
            Flowable::Spacer(Spacer::new(BLOCK_SPACING)),
        ]
    }

    /// A text block plus its trailing gap, or nothing for blank text.
    fn block(&self, text: &str, style: StyleName) -> Vec<Flowable> {
        if text.is_empty() {
            return Vec::new();
        }
        self.text_block(text, style)
    }

    fn list_item(&self, text: &str) -> Flowable {
        if let Some(label) = text.strip_prefix(UNCHECKED_PREFIX) {
            self.checkbox_line(false, label.trim())
        } else if let Some(label) = text.strip_prefix(CHECKED_PREFIX) {
            self.checkbox_line(true, label.trim())
        } else {
            Flowable::Text(TextBlock::new(
                format!("{} {}", BULLET, text),
                self.styles.get(StyleName::Normal),
            ))
        }
    }

    fn checkbox_line(&self, checked: bool, label: &str) -> Flowable {
        Flowable::Checkbox(CheckboxLine::new(
            checked,
            label,
            self.checkbox.font_size,
            self.checkbox.space_after,
        ))
    }
}
