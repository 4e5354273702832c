//! Containers
//!
//! A container wraps one element that carries at least one bound name (or
//! the document root). Containers form a single list in document order;
//! `container` points at the enclosing scope.

use std::collections::HashMap;

use fos_dom::NodeId;

use crate::{Binding, ComponentId, Generation, Names};

/// Container identifier (index into the document's container arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub(crate) u32);

impl ContainerId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub(crate) struct Container {
    pub(crate) node: NodeId,
    pub(crate) names: Names,
    /// Components bound directly on this element, in name order
    pub(crate) components: Vec<(String, ComponentId)>,
    /// Names visible from this scope
    pub(crate) objects: HashMap<String, Binding>,
    /// Enclosing scope
    pub(crate) container: Option<ContainerId>,
    pub(crate) prev: Option<ContainerId>,
    pub(crate) next: Option<ContainerId>,
    pub(crate) generation: Generation,
    pub(crate) selected: Option<ContainerId>,
}

impl Container {
    pub(crate) fn new(node: NodeId, names: Names, container: Option<ContainerId>) -> Self {
        Self {
            node,
            names,
            components: Vec::new(),
            objects: HashMap::new(),
            container,
            prev: None,
            next: None,
            generation: Generation::INITIAL,
            selected: None,
        }
    }

    pub(crate) fn component(&self, name: &str) -> Option<ComponentId> {
        self.components.iter()
            .find(|(n, _)| n == name)
            .map(|&(_, id)| id)
    }

    pub(crate) fn component_ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(|&(_, id)| id).collect()
    }
}
