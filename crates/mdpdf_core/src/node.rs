/// Structural classification of a parsed markup node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Untagged text run
    Text(String),
    Heading(u8),
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    /// Any block the mapper does not render (code block, quote, rule, html, image)
    Other(&'static str),
}

/// One node of the intermediate tree between Markdown source and layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupNode {
    pub kind: NodeKind,
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn text_run(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    pub fn with_children(kind: NodeKind, children: Vec<MarkupNode>) -> Self {
        Self { kind, children }
    }

    /// Flattened text of this node and all its descendants.
    ///
    /// Inline markers are already gone by the time nodes are built, so this is
    /// a plain concatenation. Images never carry text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text(text) = &self.kind {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Direct children that are list items.
    pub fn list_items(&self) -> impl Iterator<Item = &MarkupNode> {
        self.children
            .iter()
            .filter(|child| child.kind == NodeKind::ListItem)
    }
}
