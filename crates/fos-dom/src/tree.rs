//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; detaching only unlinks them, so ids handed out
//! stay valid for the lifetime of the tree.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Default, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.option()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.option()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.last_child.option()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling.option()
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Direct element children, in order
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|&child| self.get(child).is_some_and(Node::is_element))
            .collect()
    }

    /// Inclusive ancestor check
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `a` comes before `b` in document order. An ancestor comes
    /// before its descendants; nodes of different trees are unordered.
    pub fn precedes(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        let path = |mut id: NodeId| {
            let mut path = vec![id];
            while let Some(parent) = self.parent(id) {
                path.push(parent);
                id = parent;
            }
            path.reverse();
            path
        };
        let (path_a, path_b) = (path(a), path(b));
        let shared = path_a.iter().zip(&path_b).take_while(|(x, y)| x == y).count();
        if shared == 0 {
            return false;
        }

        match (path_a.get(shared), path_b.get(shared)) {
            (None, _) => true,
            (_, None) => false,
            (Some(&a), Some(&b)) => {
                let mut sibling = self.next_sibling(a);
                while let Some(id) = sibling {
                    if id == b {
                        return true;
                    }
                    sibling = self.next_sibling(id);
                }
                false
            }
        }
    }

    /// Unlink a node from its parent; no-op when already detached
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if let Some(prev) = self.get_mut(prev) {
            prev.next_sibling = next;
        } else if let Some(parent) = self.get_mut(parent) {
            parent.first_child = next;
        }
        if let Some(next) = self.get_mut(next) {
            next.prev_sibling = prev;
        } else if let Some(parent) = self.get_mut(parent) {
            parent.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if !self.node(parent)?.is_element() {
            return Err(DomError::InvalidNodeType);
        }
        self.node(child)?;
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Append a child node, moving it out of its current position
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference`, or at the end when `reference` is `None`
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<()> {
        self.check_insertion(parent, child)?;
        if let Some(reference) = reference {
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild(reference));
            }
            if reference == child {
                return Ok(());
            }
        }

        self.detach(child);

        let prev = match reference {
            Some(reference) => self.node(reference)?.prev_sibling,
            None => self.node(parent)?.last_child,
        };
        let next = reference.unwrap_or(NodeId::NONE);

        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        match self.get_mut(prev) {
            Some(prev) => prev.next_sibling = child,
            None => self.node_mut(parent)?.first_child = child,
        }
        match self.get_mut(next) {
            Some(next) => next.prev_sibling = child,
            None => self.node_mut(parent)?.last_child = child,
        }
        Ok(())
    }

    /// Detach every child of a node
    pub fn remove_children(&mut self, id: NodeId) {
        while let Some(child) = self.first_child(id) {
            self.detach(child);
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element(_)) => {
                for child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    /// Replace the children of an element with a single text node.
    ///
    /// A lone existing text child is updated in place.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<NodeId> {
        if !self.node(id)?.is_element() {
            return Err(DomError::InvalidNodeType);
        }
        if let Some(only) = self.first_child(id) {
            if self.next_sibling(only).is_none() {
                if let Some(NodeData::Text(content)) = self.get_mut(only).map(|n| &mut n.data) {
                    content.clear();
                    content.push_str(text);
                    return Ok(only);
                }
            }
        }
        self.remove_children(id);
        let node = self.create_text(text);
        self.append_child(id, node)?;
        Ok(node)
    }

    /// Copy a node (and its descendants when `deep`) into a detached subtree
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let copy = self.node(id)?.shallow_copy();
        let copy = self.push(copy);
        if deep {
            let children: Vec<NodeId> = self.children(id).collect();
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(copy, child_copy)?;
            }
        }
        Ok(copy)
    }

    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)
            .ok_or(DomError::InvalidNodeType)?
            .set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.element_mut(id)
            .ok_or(DomError::InvalidNodeType)?
            .remove_attr(name))
    }

    /// Read one declaration out of the inline `style` attribute
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        parse_style(self.get_attr(id, "style")?)
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Set (or with `None`, drop) one declaration of the inline `style` attribute
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: Option<&str>) -> DomResult<()> {
        let mut decls = parse_style(self.get_attr(id, "style").unwrap_or(""));
        decls.retain(|(name, _)| name != property);
        if let Some(value) = value {
            decls.push((property.to_string(), value.to_string()));
        }

        if decls.is_empty() {
            self.remove_attr(id, "style")?;
            return Ok(());
        }
        let style = decls.iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr(id, "style", &style)
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style.split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

/// Iterator over the direct children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}
