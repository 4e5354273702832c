//! Tree builder
//!
//! Depth-first walk over an element subtree. The first bound name found on
//! an element creates its container; every name on the element (bound or
//! not) becomes visible from the enclosing scope unless that scope already
//! resolves it. After the children are built the new container inherits the
//! enclosing scope's own components.

use fos_dom::NodeId;
use fos_html::HtmlParser;

use crate::component::{ComponentSlot, RunContext};
use crate::container::Container;
use crate::{Binding, BindResult, ComponentId, ContainerId, Document, Names};

/// Containers produced by one build pass, already linked to each other
#[derive(Debug)]
pub(crate) struct Segment {
    /// Scope the pass was started from
    outer: Option<ContainerId>,
    first: Option<ContainerId>,
    last: Option<ContainerId>,
    /// Containers whose scope is `outer`
    pub(crate) roots: Vec<ContainerId>,
    /// Every container created, in document order
    pub(crate) created: Vec<ContainerId>,
}

impl Segment {
    pub(crate) fn new(outer: Option<ContainerId>) -> Self {
        Self {
            outer,
            first: None,
            last: None,
            roots: Vec::new(),
            created: Vec::new(),
        }
    }
}

impl Document {
    /// Build `node` and its descendants, binding into `parent`
    pub(crate) fn build(&mut self, node: NodeId, parent: Option<ContainerId>, segment: &mut Segment) {
        let Some(element) = self.tree.element(node) else {
            return;
        };
        let names = Names::new(element.id.as_deref(), element.class_name());

        let mut container = None;
        for name in names.iter().map(str::to_string).collect::<Vec<_>>() {
            let mut component = None;
            if self.registry.is_bound(&name) {
                let id = match container {
                    Some(id) => id,
                    None => {
                        let id = self.push_container(node, names.clone(), parent, segment);
                        container = Some(id);
                        id
                    }
                };
                component = self.instantiate(&name, id);
            }
            if let Some(parent) = parent {
                let binding = component.map_or(Binding::Node(node), Binding::Component);
                self.set(parent, &name, binding);
            }
        }

        let scope = container.or(parent);
        for child in self.tree.child_elements(node) {
            self.build(child, scope, segment);
        }

        if let (Some(parent), Some(container)) = (parent, container) {
            self.inherit(container, parent);
        }
    }

    fn push_container(
        &mut self,
        node: NodeId,
        names: Names,
        parent: Option<ContainerId>,
        segment: &mut Segment,
    ) -> ContainerId {
        let id = ContainerId(self.containers.len() as u32);
        let mut container = Container::new(node, names, parent);
        container.prev = segment.last;
        self.containers.push(container);

        if let Some(last) = segment.last {
            self.slot_mut(last).next = Some(id);
        }
        segment.first.get_or_insert(id);
        segment.last = Some(id);
        segment.created.push(id);
        if parent == segment.outer {
            segment.roots.push(id);
        }

        tracing::trace!("container {id:?} for node {node:?}");
        id
    }

    fn instantiate(&mut self, name: &str, container: ContainerId) -> Option<ComponentId> {
        let behavior = self.registry.instantiate(name, container)?;
        let id = ComponentId(self.components.len() as u32);
        self.components.push(ComponentSlot::new(name, container, behavior));
        self.slot_mut(container).components.push((name.to_string(), id));
        Some(id)
    }

    /// Make the scope's own components visible from `container`
    pub(crate) fn inherit(&mut self, container: ContainerId, scope: ContainerId) {
        for (name, component) in self.slot(scope).components.clone() {
            self.set(container, &name, Binding::Component(component));
        }
    }

    /// Link a built segment between `prev` and `next`
    pub(crate) fn splice(&mut self, segment: &Segment, prev: Option<ContainerId>, next: Option<ContainerId>) {
        let (Some(first), Some(last)) = (segment.first, segment.last) else {
            return;
        };
        self.slot_mut(first).prev = prev;
        if let Some(prev) = prev {
            self.slot_mut(prev).next = Some(first);
        }
        self.slot_mut(last).next = next;
        if let Some(next) = next {
            self.slot_mut(next).prev = Some(last);
        }
    }

    /// Run every component of one container
    pub fn run(&mut self, container: ContainerId) {
        for id in self.slot(container).component_ids() {
            let Some(mut behavior) = self.components[id.index()].behavior.take() else {
                continue;
            };
            behavior.run(&mut RunContext::new(self, id));
            self.components[id.index()].restore(behavior);
        }
    }

    pub(crate) fn finish_segment(&mut self, segment: &Segment) {
        tracing::debug!(
            "built {} containers ({} top-level)",
            segment.created.len(),
            segment.roots.len()
        );
        if self.config.run_on_load {
            for &container in &segment.created {
                self.run(container);
            }
        }
    }

    fn first_component(&self, segment: &Segment) -> Option<ComponentId> {
        let root = *segment.roots.first()?;
        self.slot(root).components.first().map(|&(_, id)| id)
    }

    pub(crate) fn parse_markup(&mut self, markup: &str) -> BindResult<Vec<NodeId>> {
        let parser = HtmlParser::new().keep_whitespace_text(self.config.keep_whitespace_text);
        Ok(parser.parse_fragment(&mut self.tree, markup)?)
    }

    /// Build markup outside of the document. The returned component's
    /// container can later be inserted with `append` or `insert`.
    pub fn load(&mut self, markup: &str) -> BindResult<Option<ComponentId>> {
        let nodes = self.parse_markup(markup)?;
        let mut segment = Segment::new(None);
        for node in nodes {
            self.build(node, None, &mut segment);
        }
        self.finish_segment(&segment);
        Ok(self.first_component(&segment))
    }

    /// Parse markup and append it at the end of `scope`
    pub fn append_markup(&mut self, scope: ContainerId, markup: &str) -> BindResult<Option<ComponentId>> {
        self.insert_markup(scope, markup, None)
    }

    /// Parse markup and insert it into `scope`, before `before` when given.
    ///
    /// Returns the first component created at the top level of the markup.
    pub fn insert_markup(
        &mut self,
        scope: ContainerId,
        markup: &str,
        before: Option<ContainerId>,
    ) -> BindResult<Option<ComponentId>> {
        if self.containers.get(scope.index()).is_none() {
            return Err(crate::BindError::UnknownContainer(scope));
        }
        if let Some(before) = before {
            if !self.contains(scope, before) {
                tracing::debug!("insert reference {before:?} is outside of {scope:?}");
                return Ok(None);
            }
        }

        let nodes = self.parse_markup(markup)?;

        let (parent_node, reference, bind_scope, prev, next) = match before {
            Some(before) => {
                let node = self.node_of(before);
                let parent_node = self.tree.parent(node)
                    .ok_or(fos_dom::DomError::NotAChild(node))?;
                let bind_scope = self.scope_of(before).unwrap_or(scope);
                (parent_node, Some(node), bind_scope, self.prev(before), Some(before))
            }
            None => {
                let prev = self.range_end(scope);
                (self.node_of(scope), None, scope, Some(prev), self.next(prev))
            }
        };

        for &node in &nodes {
            self.tree.insert_before(parent_node, node, reference)?;
        }

        let mut segment = Segment::new(Some(bind_scope));
        for &node in &nodes {
            self.build(node, Some(bind_scope), &mut segment);
        }
        self.splice(&segment, prev, next);
        for &root in &segment.roots {
            self.adopt(root, bind_scope);
        }

        self.finish_segment(&segment);
        Ok(self.first_component(&segment))
    }
}
