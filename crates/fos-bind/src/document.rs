//! Document - owner of the markup tree and the binding index
//!
//! Containers and components live in arenas indexed by `ContainerId` and
//! `ComponentId`. Ids stay valid after removal: a removed container is only
//! unlinked, so it can be inserted again.

use fos_dom::{DomTree, NodeId};

use crate::component::ComponentSlot;
use crate::container::Container;
use crate::effects::Transition;
use crate::{Binding, BindResult, ComponentId, Config, ContainerId, Generation, Names, Registry};

/// Flag applied to the container picked by `select`
pub(crate) const SELECTED: &str = "selected";

/// Bound markup document
pub struct Document {
    pub(crate) tree: DomTree,
    pub(crate) containers: Vec<Container>,
    pub(crate) components: Vec<ComponentSlot>,
    pub(crate) registry: Registry,
    pub(crate) config: Config,
    pub(crate) effects: Vec<Transition>,
    root: ContainerId,
}

impl Document {
    /// Create an empty document with a root scope
    pub fn new(registry: Registry) -> Self {
        Self::with_config(registry, Config::default())
    }

    pub fn with_config(registry: Registry, config: Config) -> Self {
        let mut tree = DomTree::new();
        let node = tree.create_element("body");
        Self {
            tree,
            containers: vec![Container::new(node, Names::default(), None)],
            components: Vec::new(),
            registry,
            config,
            effects: Vec::new(),
            root: ContainerId(0),
        }
    }

    /// Create a document and build `markup` into its root scope
    pub fn parse(registry: Registry, markup: &str) -> BindResult<Self> {
        let mut document = Self::new(registry);
        document.append_markup(document.root(), markup)?;
        Ok(document)
    }

    /// The document scope
    pub fn root(&self) -> ContainerId {
        self.root
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub(crate) fn slot(&self, id: ContainerId) -> &Container {
        &self.containers[id.index()]
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, id: ContainerId) -> &mut Container {
        &mut self.containers[id.index()]
    }

    // ---------------------------------------------------------------------
    // Containers
    // ---------------------------------------------------------------------

    pub fn node_of(&self, container: ContainerId) -> NodeId {
        self.slot(container).node
    }

    pub fn names(&self, container: ContainerId) -> &Names {
        &self.slot(container).names
    }

    /// Enclosing scope
    pub fn scope_of(&self, container: ContainerId) -> Option<ContainerId> {
        self.slot(container).container
    }

    pub fn next(&self, container: ContainerId) -> Option<ContainerId> {
        self.slot(container).next
    }

    pub fn prev(&self, container: ContainerId) -> Option<ContainerId> {
        self.slot(container).prev
    }

    pub fn generation(&self, container: ContainerId) -> Generation {
        self.slot(container).generation
    }

    /// Component bound on this container's own element
    pub fn component(&self, container: ContainerId, name: &str) -> Option<ComponentId> {
        self.slot(container).component(name)
    }

    pub fn components(&self, container: ContainerId) -> impl Iterator<Item = (&str, ComponentId)> {
        self.slot(container).components.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Name visible from this scope
    pub fn binding(&self, container: ContainerId, name: &str) -> Option<Binding> {
        self.slot(container).objects.get(name).copied()
    }

    /// Visible component for a name
    pub fn lookup(&self, container: ContainerId, name: &str) -> Option<ComponentId> {
        self.binding(container, name)?.component()
    }

    /// Number of names visible from this scope
    pub fn binding_count(&self, container: ContainerId) -> usize {
        self.slot(container).objects.len()
    }

    /// Make `name` visible from `container`. The first binding wins: an
    /// occupied name is left untouched and `false` is returned.
    pub fn set(&mut self, container: ContainerId, name: &str, binding: Binding) -> bool {
        if self.slot(container).objects.contains_key(name) {
            return false;
        }
        for id in self.slot(container).component_ids() {
            self.components[id.index()].set(name, binding);
        }
        self.slot_mut(container).objects.insert(name.to_string(), binding);
        true
    }

    /// Drop `name` from `container` and from its components
    pub fn unset(&mut self, container: ContainerId, name: &str) {
        for id in self.slot(container).component_ids() {
            self.components[id.index()].unset(name);
        }
        self.slot_mut(container).objects.remove(name);
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    pub fn container_of(&self, component: ComponentId) -> ContainerId {
        self.components[component.index()].container
    }

    pub fn component_name(&self, component: ComponentId) -> &str {
        &self.components[component.index()].name
    }

    pub fn component_node(&self, component: ComponentId) -> NodeId {
        self.node_of(self.container_of(component))
    }

    /// Look up a name in a component's binding table
    pub fn get(&self, component: ComponentId, name: &str) -> Option<Binding> {
        self.components[component.index()].bindings.get(name).copied()
    }

    pub fn get_component(&self, component: ComponentId, name: &str) -> Option<ComponentId> {
        self.get(component, name)?.component()
    }

    /// Set one entry of a single component's binding table
    pub fn set_component(&mut self, component: ComponentId, name: &str, binding: Binding) {
        self.components[component.index()].set(name, binding);
    }

    pub fn unset_component(&mut self, component: ComponentId, name: &str) {
        self.components[component.index()].unset(name);
    }

    /// Next component with the same name, in document order
    pub fn next_component(&self, component: ComponentId) -> Option<ComponentId> {
        self.get_next(self.container_of(component), self.component_name(component))
    }

    /// Previous component with the same name, in document order
    pub fn prev_component(&self, component: ComponentId) -> Option<ComponentId> {
        self.get_prev(self.container_of(component), self.component_name(component))
    }

    // ---------------------------------------------------------------------
    // Names
    // ---------------------------------------------------------------------

    pub fn has_name(&self, container: ContainerId, name: &str) -> bool {
        self.slot(container).names.contains(name)
    }

    /// Prepend a class name and write it back to the element
    pub fn add_name(&mut self, container: ContainerId, name: &str) -> bool {
        if !self.slot_mut(container).names.add(name) {
            return false;
        }
        self.write_class(container);
        true
    }

    /// Remove a class name; the element id cannot be removed
    pub fn remove_name(&mut self, container: ContainerId, name: &str) -> bool {
        if !self.slot_mut(container).names.remove(name) {
            tracing::debug!("remove_name({name}) ignored on {container:?}");
            return false;
        }
        self.write_class(container);
        true
    }

    /// Set a flag (a class name)
    pub fn apply(&mut self, container: ContainerId, flag: &str) -> bool {
        self.add_name(container, flag)
    }

    /// Clear a flag
    pub fn clear(&mut self, container: ContainerId, flag: &str) -> bool {
        self.remove_name(container, flag)
    }

    fn write_class(&mut self, container: ContainerId) {
        let node = self.node_of(container);
        let class = self.slot(container).names.class_attr();
        let result = if class.is_empty() {
            self.tree.remove_attr(node, "class").map(drop)
        } else {
            self.tree.set_attr(node, "class", &class)
        };
        if let Err(err) = result {
            tracing::warn!("could not write class of {container:?}: {err}");
        }
    }

    /// Track `target` as the one selected container of `scope`
    pub fn select(&mut self, scope: ContainerId, target: Option<ContainerId>) {
        if let Some(previous) = self.slot_mut(scope).selected.take() {
            self.remove_name(previous, SELECTED);
        }
        if let Some(target) = target {
            self.add_name(target, SELECTED);
            self.slot_mut(scope).selected = Some(target);
        }
    }

    pub fn selected(&self, scope: ContainerId) -> Option<ContainerId> {
        self.slot(scope).selected
    }

    // ---------------------------------------------------------------------
    // Structure and lookups
    // ---------------------------------------------------------------------

    /// Whether `container` lies (strictly) inside `scope`
    pub fn contains(&self, scope: ContainerId, container: ContainerId) -> bool {
        let mut current = self.scope_of(container);
        while let Some(id) = current {
            if id == scope {
                return true;
            }
            current = self.scope_of(id);
        }
        false
    }

    /// Whether the container is reachable from the document root
    pub fn is_attached(&self, container: ContainerId) -> bool {
        container == self.root || self.contains(self.root, container)
    }

    /// Every attached container in document order, root first
    pub fn containers(&self) -> Vec<ContainerId> {
        std::iter::once(self.root).chain(self.iter(self.root)).collect()
    }

    /// Last container of the scope's contained range
    pub fn last_descendant(&self, scope: ContainerId) -> Option<ContainerId> {
        self.iter(scope).last()
    }

    /// End of the contiguous range `[container ..= last descendant]`
    pub(crate) fn range_end(&self, container: ContainerId) -> ContainerId {
        self.last_descendant(container).unwrap_or(container)
    }

    /// First component named `name` inside the scope
    pub fn first(&self, scope: ContainerId, name: &str) -> Option<ComponentId> {
        self.iter(scope).find_map(|c| self.component(c, name))
    }

    /// Last component named `name` inside the scope
    pub fn last(&self, scope: ContainerId, name: &str) -> Option<ComponentId> {
        self.iter(scope).filter_map(|c| self.component(c, name)).last()
    }

    /// Every component named `name` inside the scope, in document order
    pub fn collect(&self, scope: ContainerId, name: &str) -> Vec<ComponentId> {
        self.iter(scope).filter_map(|c| self.component(c, name)).collect()
    }

    /// Walk the list backwards (past the scope) to the previous `name`
    pub fn get_prev(&self, container: ContainerId, name: &str) -> Option<ComponentId> {
        let mut current = self.prev(container);
        while let Some(id) = current {
            if let Some(component) = self.component(id, name) {
                return Some(component);
            }
            current = self.prev(id);
        }
        None
    }

    /// Walk the list forwards (past the scope) to the next `name`
    pub fn get_next(&self, container: ContainerId, name: &str) -> Option<ComponentId> {
        let mut current = self.next(container);
        while let Some(id) = current {
            if let Some(component) = self.component(id, name) {
                return Some(component);
            }
            current = self.next(id);
        }
        None
    }

    /// Element a binding points at
    pub(crate) fn binding_node(&self, binding: Binding) -> NodeId {
        match binding {
            Binding::Component(id) => self.component_node(id),
            Binding::Node(node) => node,
        }
    }

    pub fn inner_html(&self, container: ContainerId) -> String {
        fos_html::inner_html(&self.tree, self.node_of(container))
    }

    pub fn outer_html(&self, container: ContainerId) -> String {
        fos_html::outer_html(&self.tree, self.node_of(container))
    }

    pub fn text(&self, container: ContainerId) -> String {
        self.tree.text_content(self.node_of(container))
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.len())
            .field("containers", &self.containers.len())
            .field("components", &self.components.len())
            .field("effects", &self.effects.len())
            .finish()
    }
}
