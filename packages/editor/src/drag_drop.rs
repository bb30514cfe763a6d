//! # Drag and Drop
//!
//! State machine over one drag gesture: `Idle` → `Dragging` on drag start,
//! back to `Idle` on drag end, committing at most one tree change.
//!
//! | source \ target | `canvas`      | `container-{id}`      | `between-{n}`        | node id                   |
//! |-----------------|---------------|-----------------------|----------------------|---------------------------|
//! | palette         | append root   | insert into container | insert at root `n`   | no-op                     |
//! | canvas          | no-op         | no-op                 | move root to `n`     | reorder if same siblings  |
//!
//! A drag that ends over nothing, or a drag end with no drag in progress,
//! changes nothing.

use mailwright_model::{instantiate, ComponentTree, IdSource};
use serde::{Deserialize, Serialize};
use std::ptr;
use tracing::debug;

/// Where a dragged item came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "camelCase")]
pub enum DragSource {
    /// A new component from the palette, by registry key.
    Palette {
        #[serde(rename = "type")]
        kind: String,
    },
    /// An existing node on the canvas.
    Canvas { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSource),
}

/// Classified drop target id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The empty root drop zone.
    Canvas,
    /// `container-{id}`: drop into a layout node.
    Container(String),
    /// `between-{index}`: a gap in the root list.
    Between(usize),
    /// A bare node id.
    Node(String),
}

impl DropTarget {
    pub fn parse(target: &str) -> Self {
        if target == "canvas" {
            return DropTarget::Canvas;
        }
        if let Some(id) = target.strip_prefix("container-").filter(|id| !id.is_empty()) {
            return DropTarget::Container(id.to_string());
        }
        if let Some(index) = target
            .strip_prefix("between-")
            .and_then(|n| n.parse::<usize>().ok())
        {
            return DropTarget::Between(index);
        }
        DropTarget::Node(target.to_string())
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Begin a gesture. A second start replaces the first.
    pub fn on_drag_start(&mut self, source: DragSource) {
        debug!(?source, "Drag started");
        self.state = DragState::Dragging(source);
    }

    /// Finish the gesture over `over` (a drop target id, or `None` when
    /// released outside any target).
    ///
    /// Returns the new tree, or `None` when the drop changes nothing.
    pub fn on_drag_end<S: IdSource>(
        &mut self,
        tree: &ComponentTree,
        over: Option<&str>,
        ids: &mut S,
    ) -> Option<ComponentTree> {
        let DragState::Dragging(source) = std::mem::take(&mut self.state) else {
            debug!("Drag end without a drag in progress");
            return None;
        };
        let Some(over) = over else {
            debug!("Drag cancelled");
            return None;
        };

        match (source, DropTarget::parse(over)) {
            (DragSource::Palette { kind }, target) => drop_new(tree, &kind, target, ids),
            (DragSource::Canvas { id }, target) => drop_existing(tree, &id, target),
        }
    }

    /// Abandon the gesture without touching the tree.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

fn drop_new<S: IdSource>(
    tree: &ComponentTree,
    kind: &str,
    target: DropTarget,
    ids: &mut S,
) -> Option<ComponentTree> {
    // Validate the target before drawing ids for the new node.
    match &target {
        DropTarget::Container(id) => match tree.find_node(id) {
            Some(container) if container.is_layout() => {}
            _ => {
                debug!(container_id = %id, "Palette drop on invalid container");
                return None;
            }
        },
        DropTarget::Node(id) => {
            debug!(node_id = %id, "Palette drop on a node");
            return None;
        }
        DropTarget::Canvas | DropTarget::Between(_) => {}
    }

    let Some(node) = instantiate(kind, ids) else {
        debug!(kind, "Palette drop of unknown type");
        return None;
    };

    debug!(kind, node_id = %node.id, ?target, "Inserting palette item");
    match target {
        DropTarget::Canvas => Some(tree.insert_at_root(node, None)),
        DropTarget::Between(index) => Some(tree.insert_at_root(node, Some(index))),
        DropTarget::Container(id) => Some(tree.insert_into_container(&id, node)),
        DropTarget::Node(_) => None,
    }
}

fn drop_existing(tree: &ComponentTree, id: &str, target: DropTarget) -> Option<ComponentTree> {
    match target {
        DropTarget::Canvas | DropTarget::Container(_) => {
            debug!(node_id = id, ?target, "Canvas item drop ignored");
            None
        }

        DropTarget::Between(index) => {
            let Some(from) = tree.nodes.iter().position(|n| n.id == id) else {
                debug!(node_id = id, "Between drop of a non-root node");
                return None;
            };
            // The gap index counts the dragged node itself.
            let to = if index > from { index - 1 } else { index };
            let to = to.min(tree.len().saturating_sub(1));
            if to == from {
                return None;
            }
            debug!(node_id = id, from, to, "Moving root node");
            Some(tree.move_within_siblings(id, to))
        }

        DropTarget::Node(over) => {
            if over == id {
                return None;
            }
            let (Some(active), Some(target)) = (tree.find_siblings_of(id), tree.find_siblings_of(&over)) else {
                debug!(node_id = id, over = %over, "Reorder with unknown id");
                return None;
            };
            if !ptr::eq(active, target) {
                debug!(node_id = id, over = %over, "Cross-parent drop rejected");
                return None;
            }
            let to = target.iter().position(|n| n.id == over)?;
            debug!(node_id = id, to, "Reordering siblings");
            Some(tree.move_within_siblings(id, to))
        }
    }
}
