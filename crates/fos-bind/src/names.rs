//! Element names
//!
//! The names of an element are its id (the identity, permanent) followed by
//! its class names, deduplicated with the first occurrence winning.

use std::fmt;

/// Ordered, duplicate-free names of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Names {
    identity: Option<String>,
    tags: Vec<String>,
}

impl Names {
    /// Build from an id and a raw class attribute
    pub fn new(identity: Option<&str>, class: &str) -> Self {
        let mut names = Self {
            identity: identity.filter(|id| !id.is_empty()).map(str::to_string),
            tags: Vec::new(),
        };
        for tag in class.split_whitespace() {
            if !names.contains(tag) {
                names.tags.push(tag.to_string());
            }
        }
        names
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Identity first, then class names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identity.as_deref().into_iter().chain(self.tags.iter().map(String::as_str))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.tags.len() + usize::from(self.identity.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prepend a class name. Returns `false` if it was already present or
    /// is not a single token.
    pub fn add(&mut self, name: &str) -> bool {
        if name.is_empty() || name.contains(char::is_whitespace) || self.contains(name) {
            return false;
        }
        self.tags.insert(0, name.to_string());
        true
    }

    /// Remove a class name. The identity is never removed.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.identity.as_deref() == Some(name) {
            return false;
        }
        match self.tags.iter().position(|t| t == name) {
            Some(pos) => {
                self.tags.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Value for the element's class attribute
    pub fn class_attr(&self) -> String {
        self.tags.join(" ")
    }
}

impl fmt::Display for Names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
