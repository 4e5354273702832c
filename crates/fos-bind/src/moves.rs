//! List/move engine
//!
//! Relocates the contiguous range `[container ..= last descendant]` of the
//! container list, patching the visible names of the old and new scopes.
//! `insert`, `append` and `remove` all funnel into `relocate`.

use crate::{Binding, ContainerId, Document};

impl Document {
    /// Move `target` and its descendants between `prev` and `next`, under
    /// `scope`. With all three `None` the range is just detached.
    pub(crate) fn relocate(
        &mut self,
        target: ContainerId,
        prev: Option<ContainerId>,
        scope: Option<ContainerId>,
        next: Option<ContainerId>,
    ) {
        let last = self.range_end(target);
        tracing::trace!("relocate {target:?}..={last:?} to {prev:?}/{next:?} under {scope:?}");

        if let Some(old) = self.scope_of(target) {
            self.release_scope(target, old);
            let mut ancestor = Some(old);
            while let Some(scope) = ancestor {
                self.promote_successors(target, last, scope);
                ancestor = self.scope_of(scope);
            }
        }

        // Detach from list
        let (before, after) = (self.prev(target), self.next(last));
        if let Some(before) = before {
            self.slot_mut(before).next = after;
        }
        if let Some(after) = after {
            self.slot_mut(after).prev = before;
        }

        // Re-attach in new position
        self.slot_mut(target).prev = prev;
        if let Some(prev) = prev {
            self.slot_mut(prev).next = Some(target);
        }
        self.slot_mut(last).next = next;
        if let Some(next) = next {
            self.slot_mut(next).prev = Some(last);
        }

        let slot = self.slot_mut(target);
        slot.container = scope;
        slot.generation = slot.generation.next();

        if let Some(scope) = scope {
            self.adopt(target, scope);
        }
    }

    /// Forget names that pointed at the scope being left
    fn release_scope(&mut self, target: ContainerId, old: ContainerId) {
        let old_node = self.node_of(old);
        let stale: Vec<String> = self.slot(target).objects.iter()
            .filter(|&(_, &binding)| self.binding_node(binding) == old_node)
            .map(|(name, _)| name.clone())
            .collect();
        for name in stale {
            self.unset(target, &name);
        }
    }

    /// Re-point names of `scope` that resolved into the moving range at the
    /// next same-named component still inside `scope`
    fn promote_successors(&mut self, target: ContainerId, last: ContainerId, scope: ContainerId) {
        let target_node = self.node_of(target);
        let moved: Vec<String> = self.slot(scope).objects.iter()
            .filter(|&(_, &binding)| self.tree.contains(target_node, self.binding_node(binding)))
            .map(|(name, _)| name.clone())
            .collect();

        for name in moved {
            self.unset(scope, &name);

            let mut current = self.next(last);
            let successor = loop {
                match current {
                    Some(id) => match self.component(id, &name) {
                        Some(component) => break Some((id, component)),
                        None => current = self.next(id),
                    },
                    None => break None,
                }
            };

            if let Some((id, component)) = successor {
                if self.contains(scope, id) {
                    self.set(scope, &name, Binding::Component(component));
                }
            }
        }
    }

    /// Bind `target` into `scope`: its components take over names the scope
    /// leaves unset, inherits from outside, or binds to something later in
    /// the document. `target` then inherits the scope's own components.
    pub(crate) fn adopt(&mut self, target: ContainerId, scope: ContainerId) {
        let (target_node, scope_node) = (self.node_of(target), self.node_of(scope));
        for (name, component) in self.slot(target).components.clone() {
            let takes_over = match self.binding(scope, &name) {
                None => true,
                Some(current) => {
                    let current = self.binding_node(current);
                    !self.tree.contains(scope_node, current) || self.tree.precedes(target_node, current)
                }
            };
            if takes_over {
                self.unset(scope, &name);
                self.set(scope, &name, Binding::Component(component));
            }
        }
        self.inherit(target, scope);
    }

    /// Whether `container` lies in the range `[target ..= last descendant]`
    fn in_range(&self, target: ContainerId, container: ContainerId) -> bool {
        container == target || self.contains(target, container)
    }

    fn can_move(&self, target: ContainerId, scope: ContainerId) -> bool {
        if target == self.root() {
            tracing::debug!("the root container cannot be moved");
            return false;
        }
        if self.in_range(target, scope) {
            tracing::debug!("{target:?} cannot move into its own range");
            return false;
        }
        true
    }

    /// Move `target` into `scope` right before `before`, or at the end of the
    /// scope when `before` is `None`. Returns `false` when nothing changed.
    pub fn insert(&mut self, scope: ContainerId, target: ContainerId, before: Option<ContainerId>) -> bool {
        let Some(before) = before else {
            return self.append(scope, target);
        };
        if !self.can_move(target, scope) {
            return false;
        }
        if self.in_range(target, before) || !self.contains(scope, before) {
            tracing::debug!("invalid insert reference {before:?} for {target:?}");
            return false;
        }

        let last = self.range_end(target);
        let new_scope = self.scope_of(before);
        let in_place = self.next(last) == Some(before);
        if in_place && self.scope_of(target) == new_scope {
            tracing::debug!("{target:?} is already before {before:?}");
            return false;
        }

        let before_node = self.node_of(before);
        let Some(parent_node) = self.tree.parent(before_node) else {
            tracing::warn!("insert reference {before:?} has no parent element");
            return false;
        };
        if let Err(err) = self.tree.insert_before(parent_node, self.node_of(target), Some(before_node)) {
            tracing::warn!("could not insert {target:?}: {err}");
            return false;
        }

        let prev = if in_place { self.prev(target) } else { self.prev(before) };
        self.relocate(target, prev, new_scope, Some(before));
        true
    }

    /// Move `target` to the end of `scope`
    pub fn append(&mut self, scope: ContainerId, target: ContainerId) -> bool {
        if !self.can_move(target, scope) {
            return false;
        }
        if let Err(err) = self.tree.append_child(self.node_of(scope), self.node_of(target)) {
            tracing::warn!("could not append {target:?}: {err}");
            return false;
        }

        let last = self.range_end(target);
        let prev = self.range_end(scope);

        if prev == last {
            // Already the tail of the scope's range
            if self.scope_of(target) != Some(scope) {
                let (before, after) = (self.prev(target), self.next(last));
                self.relocate(target, before, Some(scope), after);
            }
            return true;
        }

        let next = match self.next(prev) {
            Some(next) if next == target => self.next(last),
            other => other,
        };
        self.relocate(target, Some(prev), Some(scope), next);
        true
    }

    /// Detach `target` from the index and its element from the tree
    pub fn remove(&mut self, target: ContainerId) {
        if target == self.root() {
            tracing::debug!("the root container cannot be removed");
            return;
        }
        self.relocate(target, None, None, None);
        let node = self.node_of(target);
        self.tree.detach(node);
    }

    /// Remove the container that holds `component`
    pub fn remove_component(&mut self, component: crate::ComponentId) {
        self.remove(self.container_of(component));
    }
}
