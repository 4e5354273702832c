//! Mutation-safe scope traversal
//!
//! A `Cursor` walks the contained range of a scope in document order. It
//! remembers the last container it stepped past (`prev`); if the container it
//! handed out is no longer `prev.next` when asked for the next one, that
//! container was moved or removed in the meantime and the walk resumes from
//! `prev.next`, which the mutation already re-linked.

use std::ops::ControlFlow;

use crate::{ContainerId, Document};

/// Cursor over the contained range of one scope
#[derive(Debug, Clone)]
pub struct Cursor {
    scope: ContainerId,
    prev: ContainerId,
    current: Option<ContainerId>,
    done: bool,
}

impl Cursor {
    pub fn new(scope: ContainerId) -> Self {
        Self {
            scope,
            prev: scope,
            current: None,
            done: false,
        }
    }

    pub fn scope(&self) -> ContainerId {
        self.scope
    }

    /// Step to the next container still inside the scope
    pub fn advance(&mut self, document: &Document) -> Option<ContainerId> {
        if self.done {
            return None;
        }

        let candidate = match self.current {
            Some(current) if document.next(self.prev) == Some(current) => {
                self.prev = current;
                document.next(current)
            }
            _ => document.next(self.prev),
        };

        match candidate.filter(|&c| document.contains(self.scope, c)) {
            Some(next) => {
                self.current = Some(next);
                Some(next)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Read-only iterator over a scope's contained range
pub struct ScopeIter<'a> {
    document: &'a Document,
    cursor: Cursor,
}

impl Iterator for ScopeIter<'_> {
    type Item = ContainerId;

    fn next(&mut self) -> Option<ContainerId> {
        self.cursor.advance(self.document)
    }
}

impl Document {
    /// Iterate over the containers inside `scope` (excluding the scope itself)
    pub fn iter(&self, scope: ContainerId) -> ScopeIter<'_> {
        ScopeIter {
            document: self,
            cursor: Cursor::new(scope),
        }
    }

    /// Visit every container inside `scope`, letting the callback mutate the
    /// document. Stops early when the callback breaks.
    pub fn each<R, F>(&mut self, scope: ContainerId, mut visit: F) -> Option<R>
    where
        F: FnMut(&mut Document, ContainerId) -> ControlFlow<R>,
    {
        let mut cursor = Cursor::new(scope);
        while let Some(container) = cursor.advance(self) {
            if let ControlFlow::Break(result) = visit(self, container) {
                return Some(result);
            }
        }
        None
    }

    /// `each` restricted to containers that carry a component named `name`
    pub fn each_named<R, F>(&mut self, scope: ContainerId, name: &str, mut visit: F) -> Option<R>
    where
        F: FnMut(&mut Document, ContainerId) -> ControlFlow<R>,
    {
        self.each(scope, |document, container| {
            if document.component(container, name).is_some() {
                visit(document, container)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}
