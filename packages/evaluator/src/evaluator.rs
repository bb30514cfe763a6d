//! # Mailwright Evaluator
//!
//! Expands a component tree into the intermediate email element tree
//! ([`VNode`]) shared by the JSX and HTML targets.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Evaluation is fully deterministic.**
//!
//! For any tree and global styles, `evaluate()` produces identical output on
//! every call:
//!
//! - style maps and attributes are `BTreeMap`s, so key order never leaks
//! - composite expansions derive positions (list numbers, column padding)
//!   from input order only
//! - no time, randomness or environment dependence
//!
//! ## Unknown Types
//!
//! A node whose `type` is not registered evaluates to a
//! [`VNode::Placeholder`], which each target prints as a visible
//! "Unknown component: {type}" marker. Evaluation never fails and never drops
//! a node silently.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailwright_evaluator::Evaluator;
//! use mailwright_model::{ComponentTree, GlobalStyles};
//!
//! let tree = ComponentTree::from_json(source)?;
//! let doc = Evaluator::new().evaluate(&tree, &GlobalStyles::default());
//! ```

use crate::components::renderer_for;
use crate::global::wrap_document;
use crate::vdom::{VNode, VirtualEmailDocument};
use mailwright_model::{ComponentKind, ComponentNode, ComponentTree, GlobalStyles};
use tracing::{debug, info, instrument, warn};

/// Stateless tree-to-VDOM expander.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    _private: (),
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a whole document. Root-level `Preview` nodes are hoisted out
    /// of the content container so the inbox preview text leads the body.
    #[instrument(skip_all, fields(roots = tree.len()))]
    pub fn evaluate(&self, tree: &ComponentTree, globals: &GlobalStyles) -> VirtualEmailDocument {
        info!("Starting document evaluation");

        let (previews, content): (Vec<&ComponentNode>, Vec<&ComponentNode>) = tree
            .iter()
            .partition(|n| ComponentKind::from_key(&n.kind) == Some(ComponentKind::Preview));
        if !previews.is_empty() {
            debug!(count = previews.len(), "Hoisting preview text");
        }

        let previews = previews.into_iter().map(|n| self.evaluate_node(n)).collect();
        let content = content.into_iter().map(|n| self.evaluate_node(n)).collect();
        let root = wrap_document(previews, content, globals);

        info!("Document evaluation complete");
        VirtualEmailDocument { root }
    }

    /// Evaluate an ordered list of siblings.
    pub fn evaluate_nodes(&self, nodes: &[ComponentNode]) -> Vec<VNode> {
        nodes.iter().map(|n| self.evaluate_node(n)).collect()
    }

    /// Evaluate one node and its subtree.
    pub fn evaluate_node(&self, node: &ComponentNode) -> VNode {
        match ComponentKind::from_key(&node.kind) {
            Some(kind) => renderer_for(kind)(self, node),
            None => {
                warn!(kind = %node.kind, id = %node.id, "Unknown component type");
                VNode::placeholder(node.kind.clone(), Some(node.id.clone()))
            }
        }
    }
}
