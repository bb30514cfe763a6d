use crate::id_generator::IdSource;
use crate::node::{ComponentNode, ComponentTree};

/// Visitor pattern for traversing component trees immutably
///
/// Default implementations walk the whole tree depth-first, parents before
/// children. Override `visit_node` to act on nodes and call `walk_node` to
/// keep descending.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &ComponentTree) {
        walk_tree(self, tree);
    }

    fn visit_node(&mut self, node: &ComponentNode) {
        walk_node(self, node);
    }
}

/// Mutable visitor pattern for transforming component trees
pub trait VisitorMut: Sized {
    fn visit_tree_mut(&mut self, tree: &mut ComponentTree) {
        walk_tree_mut(self, tree);
    }

    fn visit_node_mut(&mut self, node: &mut ComponentNode) {
        walk_node_mut(self, node);
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &ComponentTree) {
    for node in &tree.nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &ComponentNode) {
    for child in node.children() {
        visitor.visit_node(child);
    }
}

pub fn walk_tree_mut<V: VisitorMut>(visitor: &mut V, tree: &mut ComponentTree) {
    for node in &mut tree.nodes {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut ComponentNode) {
    if let Some(children) = node.children_mut() {
        for child in children {
            visitor.visit_node_mut(child);
        }
    }
}

/// Collects ids in pre-order.
#[derive(Default)]
pub struct IdCollector {
    pub ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_node(&mut self, node: &ComponentNode) {
        self.ids.push(node.id.clone());
        walk_node(self, node);
    }
}

/// Replaces every id it visits with one drawn from `source`.
pub struct IdReassigner<'a, S: IdSource> {
    pub source: &'a mut S,
}

impl<S: IdSource> VisitorMut for IdReassigner<'_, S> {
    fn visit_node_mut(&mut self, node: &mut ComponentNode) {
        node.id = self.source.next_id();
        walk_node_mut(self, node);
    }
}
