//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the body of the parsed document into
//! detached nodes of our arena.

use fos_dom::{DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::HtmlError;

/// HTML5 fragment parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    /// Keep text nodes that contain only whitespace
    pub keep_whitespace_text: bool,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep_whitespace_text(mut self, keep: bool) -> Self {
        self.keep_whitespace_text = keep;
        self
    }

    /// Parse a fragment, returning its top-level nodes in order.
    ///
    /// The returned nodes are detached; the caller attaches them.
    pub fn parse_fragment(&self, tree: &mut DomTree, markup: &str) -> Result<Vec<NodeId>, HtmlError> {
        tracing::debug!("Parsing fragment ({} bytes)", markup.len());

        let dom = parse_document(RcDom::default(), Default::default()).one(markup);

        let mut roots = Vec::new();
        if let Some(body) = find_body(&dom.document) {
            for child in body.children.borrow().iter() {
                if let Some(id) = self.convert_node(child, tree)? {
                    roots.push(id);
                }
            }
        }

        tracing::debug!("Fragment produced {} top-level nodes", roots.len());
        Ok(roots)
    }

    /// Convert an RcDom node (and its subtree) into our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> Result<Option<NodeId>, HtmlError> {
        let id = match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !self.keep_whitespace_text && text.trim().is_empty() {
                    return Ok(None);
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(&contents.to_string()),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attr(id, &attr.name.local, &attr.value)?;
                }
                for child in handle.children.borrow().iter() {
                    if let Some(child_id) = self.convert_node(child, tree)? {
                        tree.append_child(id, child_id)?;
                    }
                }
                id
            }
            // Doctypes and processing instructions never show up inside <body>
            _ => return Ok(None),
        };
        Ok(Some(id))
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = element_child(document, "html")?;
    element_child(&html, "body")
}

fn element_child(parent: &Handle, tag: &str) -> Option<Handle> {
    parent.children.borrow().iter()
        .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if &*name.local == tag))
        .cloned()
}
