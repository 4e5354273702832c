//! Binding registry
//!
//! Maps names to component constructors. A name registered without a
//! constructor gets a `DefaultBehavior`.

use std::collections::HashMap;
use std::fmt;

use crate::{Behavior, ContainerId, DefaultBehavior};

/// Builds the behavior for a `(container, name)` pair
pub type Constructor = Box<dyn Fn(ContainerId, &str) -> Box<dyn Behavior>>;

enum Definition {
    Default,
    Custom(Constructor),
}

/// Name to constructor registry
#[derive(Default)]
pub struct Registry {
    definitions: HashMap<String, Definition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to the default behavior
    pub fn bind(&mut self, name: &str) -> &mut Self {
        self.definitions.insert(name.to_string(), Definition::Default);
        self
    }

    /// Bind a name to a constructor
    pub fn bind_with<F>(&mut self, name: &str, constructor: F) -> &mut Self
    where
        F: Fn(ContainerId, &str) -> Box<dyn Behavior> + 'static,
    {
        self.definitions.insert(name.to_string(), Definition::Custom(Box::new(constructor)));
        self
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Instantiate the behavior for a name, `None` if the name is unbound
    pub fn instantiate(&self, name: &str, container: ContainerId) -> Option<Box<dyn Behavior>> {
        match self.definitions.get(name)? {
            Definition::Default => Some(Box::new(DefaultBehavior)),
            Definition::Custom(constructor) => Some(constructor(container, name)),
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.definitions.keys()).finish()
    }
}
