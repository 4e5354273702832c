//! Content updates and cloning

use std::ops::ControlFlow;

use fos_dom::NodeId;

use crate::builder::Segment;
use crate::{Binding, BindResult, ContainerId, Document};

/// New content for a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Replace everything inside the container with one text node
    Text(String),
    /// Replace the markup of named plain elements visible from the container
    Patch(Vec<(String, String)>),
}

impl From<&str> for Update {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl Document {
    /// Apply an update. `Text` returns the text node now holding the content.
    pub fn update(&mut self, container: ContainerId, update: Update) -> BindResult<Option<NodeId>> {
        match update {
            Update::Text(text) => {
                self.each(container, |document, child| {
                    if document.scope_of(child) == Some(container) {
                        document.relocate(child, None, None, None);
                    }
                    ControlFlow::<()>::Continue(())
                });
                let node = self.tree.set_text_content(self.node_of(container), &text)?;
                Ok(Some(node))
            }
            Update::Patch(patches) => {
                for (name, markup) in patches {
                    let Some(Binding::Node(node)) = self.binding(container, &name) else {
                        tracing::debug!("no plain element named {name} in {container:?}");
                        continue;
                    };
                    let nodes = self.parse_markup(&markup)?;
                    self.tree.remove_children(node);
                    for child in nodes {
                        self.tree.append_child(node, child)?;
                    }
                }
                Ok(None)
            }
        }
    }

    /// Copy a container's element and build the copy. Without `deep` only the
    /// element itself is copied. The copy is detached; returns `None` if the
    /// element carries no bound name.
    pub fn clone_container(&mut self, container: ContainerId, deep: bool) -> BindResult<Option<ContainerId>> {
        let node = self.tree.clone_node(self.node_of(container), deep)?;
        let mut segment = Segment::new(None);
        self.build(node, None, &mut segment);
        self.finish_segment(&segment);
        Ok(segment.roots.first().copied())
    }
}
