//! # Tree Operations
//!
//! Structural operations over a [`ComponentTree`].
//!
//! ## Semantics
//!
//! - **Copy-on-write**: every mutating operation takes `&self` and returns a
//!   new tree. The input is never touched, so a caller holding the previous
//!   tree (history, an in-flight render) keeps a consistent snapshot.
//! - **No-op on bad input**: unknown ids, non-layout containers and the like
//!   return a structurally identical tree. Nothing here returns an error.
//! - **Sibling order is display order**: moves use remove-then-insert, so all
//!   other siblings keep their relative order.

use crate::id_generator::IdSource;
use crate::node::{ComponentNode, ComponentTree};
use crate::registry;
use crate::visitor::{IdCollector, IdReassigner, Visitor, VisitorMut};
use tracing::debug;

impl ComponentTree {
    /// Insert `node` at `index` among the roots, or append when `index` is
    /// `None`. Out-of-range indices append.
    pub fn insert_at_root(&self, node: ComponentNode, index: Option<usize>) -> Self {
        let mut next = self.clone();
        let at = index.unwrap_or(next.nodes.len()).min(next.nodes.len());
        next.nodes.insert(at, node);
        next
    }

    /// Append `node` to the children of the layout node `container_id`.
    pub fn insert_into_container(&self, container_id: &str, node: ComponentNode) -> Self {
        match self.find_node(container_id) {
            Some(container) if container.is_layout() => {}
            Some(container) => {
                debug!(container_id, kind = %container.kind, "Insert target is not a layout node");
                return self.clone();
            }
            None => {
                debug!(container_id, "Insert target not found");
                return self.clone();
            }
        }

        self.update_node(container_id, |container| {
            container.children.get_or_insert_with(Vec::new).push(node);
        })
    }

    /// Remove `id` and its whole subtree, wherever it lives.
    pub fn delete_by_id(&self, id: &str) -> Self {
        let mut next = self.clone();
        if remove_from(&mut next.nodes, id).is_none() {
            debug!(node_id = id, "Delete target not found");
        }
        next
    }

    /// Relocate `id` among its current siblings. `new_index` is clamped to
    /// the sibling range.
    pub fn move_within_siblings(&self, id: &str, new_index: usize) -> Self {
        let mut next = self.clone();
        if let Some(siblings) = siblings_containing_mut(&mut next.nodes, id) {
            if let Some(from) = siblings.iter().position(|n| n.id == id) {
                let node = siblings.remove(from);
                let to = new_index.min(siblings.len());
                siblings.insert(to, node);
            }
        }
        next
    }

    /// Depth-first search, roots first.
    pub fn find_node(&self, id: &str) -> Option<&ComponentNode> {
        find_in(&self.nodes, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// The exact sibling slice holding `id`.
    ///
    /// Two ids share a parent iff their slices are the same allocation, which
    /// callers check with [`std::ptr::eq`].
    pub fn find_siblings_of(&self, id: &str) -> Option<&[ComponentNode]> {
        siblings_containing(&self.nodes, id)
    }

    /// Parent of `id`, or `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&ComponentNode> {
        parent_in(&self.nodes, id)
    }

    /// Pre-order list of every id in the tree.
    pub fn flatten_ids(&self) -> Vec<String> {
        let mut collector = IdCollector::default();
        collector.visit_tree(self);
        collector.ids
    }

    /// Apply `f` to the node `id` on a copy of the tree. Unknown ids are a no-op.
    pub fn update_node(&self, id: &str, f: impl FnOnce(&mut ComponentNode)) -> Self {
        let mut next = self.clone();
        match find_in_mut(&mut next.nodes, id) {
            Some(node) => f(node),
            None => debug!(node_id = id, "Update target not found"),
        }
        next
    }

    /// Replace the subtree rooted at `id` wholesale.
    pub fn replace_node(&self, id: &str, replacement: ComponentNode) -> Self {
        self.update_node(id, |node| *node = replacement)
    }
}

/// Deep clone with a fresh id on every node.
pub fn clone_with_fresh_ids<S: IdSource>(node: &ComponentNode, ids: &mut S) -> ComponentNode {
    let mut copy = node.clone();
    IdReassigner { source: ids }.visit_node_mut(&mut copy);
    copy
}

/// [`clone_with_fresh_ids`] over a list, e.g. a whole template.
pub fn clone_list_with_fresh_ids<S: IdSource>(
    nodes: &[ComponentNode],
    ids: &mut S,
) -> Vec<ComponentNode> {
    nodes
        .iter()
        .map(|node| clone_with_fresh_ids(node, ids))
        .collect()
}

/// Create a node of type `key` from the registry, children included.
///
/// Returns `None` for unknown types.
pub fn instantiate<S: IdSource>(key: &str, ids: &mut S) -> Option<ComponentNode> {
    let definition = registry::lookup(key)?;
    Some(clone_with_fresh_ids(&definition.template(), ids))
}

fn find_in<'a>(nodes: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [ComponentNode], id: &str) -> Option<&'a mut ComponentNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn parent_in<'a>(nodes: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    for node in nodes {
        if node.children().iter().any(|c| c.id == id) {
            return Some(node);
        }
        if let Some(found) = parent_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn siblings_containing<'a>(nodes: &'a [ComponentNode], id: &str) -> Option<&'a [ComponentNode]> {
    if nodes.iter().any(|n| n.id == id) {
        return Some(nodes);
    }
    for node in nodes {
        if let Some(found) = siblings_containing(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn siblings_containing_mut<'a>(
    nodes: &'a mut Vec<ComponentNode>,
    id: &str,
) -> Option<&'a mut Vec<ComponentNode>> {
    if nodes.iter().any(|n| n.id == id) {
        return Some(nodes);
    }
    for node in nodes.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = siblings_containing_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<ComponentNode>, id: &str) -> Option<ComponentNode> {
    if let Some(pos) = nodes.iter().position(|n| n.id == id) {
        return Some(nodes.remove(pos));
    }
    for node in nodes.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(removed) = remove_from(children, id) {
                return Some(removed);
            }
        }
    }
    None
}
