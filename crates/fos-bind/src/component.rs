//! Components
//!
//! A component is the behavior instantiated for one bound name on one
//! container. The document owns every component in an arena; behaviors are
//! user code reached through the `Behavior` trait.

use std::collections::HashMap;

use fos_dom::NodeId;

use crate::{ContainerId, Document};

/// Component identifier (index into the document's component arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a name resolves to inside a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A component bound to that name
    Component(ComponentId),
    /// A plain element carrying that name but no component
    Node(NodeId),
}

impl Binding {
    pub fn component(self) -> Option<ComponentId> {
        match self {
            Self::Component(id) => Some(id),
            Self::Node(_) => None,
        }
    }

    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Component(_) => None,
        }
    }
}

/// Capability for behaviors that mirror their component's binding table
pub trait BindingPropagation {
    fn set(&mut self, name: &str, binding: Binding);
    fn unset(&mut self, name: &str);
}

/// User behavior attached to a component
pub trait Behavior {
    /// Called once after the tree holding the component has been built
    fn run(&mut self, _cx: &mut RunContext<'_>) {}

    /// Opt into binding change notifications
    fn propagation(&mut self) -> Option<&mut dyn BindingPropagation> {
        None
    }
}

/// Behavior used for names registered without a constructor
#[derive(Debug, Default)]
pub struct DefaultBehavior;

impl Behavior for DefaultBehavior {}

/// Access handed to a running behavior
pub struct RunContext<'a> {
    document: &'a mut Document,
    component: ComponentId,
}

impl<'a> RunContext<'a> {
    pub(crate) fn new(document: &'a mut Document, component: ComponentId) -> Self {
        Self { document, component }
    }

    pub fn component(&self) -> ComponentId {
        self.component
    }

    pub fn container(&self) -> ContainerId {
        self.document.container_of(self.component)
    }

    /// Look up a name in this component's binding table
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.document.get(self.component, name)
    }

    pub fn document(&mut self) -> &mut Document {
        &mut *self.document
    }
}

/// Binding change recorded while the behavior is out running
enum Change {
    Set(String, Binding),
    Unset(String),
}

/// Arena slot of one component
pub(crate) struct ComponentSlot {
    pub(crate) name: String,
    pub(crate) container: ContainerId,
    pub(crate) bindings: HashMap<String, Binding>,
    /// Taken out while the behavior runs
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    missed: Vec<Change>,
}

impl ComponentSlot {
    pub(crate) fn new(name: &str, container: ContainerId, behavior: Box<dyn Behavior>) -> Self {
        Self {
            name: name.to_string(),
            container,
            bindings: HashMap::new(),
            behavior: Some(behavior),
            missed: Vec::new(),
        }
    }

    pub(crate) fn set(&mut self, name: &str, binding: Binding) {
        self.bindings.insert(name.to_string(), binding);
        self.notify(Change::Set(name.to_string(), binding));
    }

    pub(crate) fn unset(&mut self, name: &str) {
        if self.bindings.remove(name).is_none() {
            return;
        }
        self.notify(Change::Unset(name.to_string()));
    }

    /// Put a behavior back after its run and replay what it missed
    pub(crate) fn restore(&mut self, behavior: Box<dyn Behavior>) {
        self.behavior = Some(behavior);
        for change in std::mem::take(&mut self.missed) {
            self.notify(change);
        }
    }

    fn notify(&mut self, change: Change) {
        let Some(behavior) = self.behavior.as_mut() else {
            self.missed.push(change);
            return;
        };
        if let Some(propagation) = behavior.propagation() {
            match change {
                Change::Set(name, binding) => propagation.set(&name, binding),
                Change::Unset(name) => propagation.unset(&name),
            }
        }
    }
}
