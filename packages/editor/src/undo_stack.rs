//! # Undo/Redo Stack
//!
//! Whole-tree snapshot history.
//!
//! - Before a change is committed, the tree it replaces is pushed
//! - Undo swaps the current tree for the last snapshot and keeps the
//!   current one for redo; redo does the reverse
//! - New changes clear the redo stack
//! - A batch records only the tree before its first change, so several
//!   changes undo as one step. Undo and redo close an open batch first
//!
//! Trees are copy-on-write values, so a snapshot is just the previous tree.

use mailwright_model::ComponentTree;

/// A tree to return to, with an optional label for the UI.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tree: ComponentTree,
    pub description: Option<String>,
}

/// Undo/redo stack for an edit session
#[derive(Debug)]
pub struct UndoStack {
    /// Trees before each change (most recent last)
    undo_stack: Vec<Snapshot>,

    /// Trees undone from (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Snapshot opened by `begin_batch`, and whether anything changed since
    current_batch: Option<(Snapshot, bool)>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record that `before` is about to be replaced.
    pub fn record(&mut self, before: &ComponentTree, description: Option<String>) {
        if let Some((_, changed)) = &mut self.current_batch {
            *changed = true;
            self.redo_stack.clear();
            return;
        }
        self.push(Snapshot {
            tree: before.clone(),
            description,
        });
    }

    /// Start a batch of changes that undo together. `current` is the tree
    /// the batch starts from.
    pub fn begin_batch(&mut self, current: &ComponentTree, description: impl Into<String>) {
        self.current_batch = Some((
            Snapshot {
                tree: current.clone(),
                description: Some(description.into()),
            },
            false,
        ));
    }

    /// End the current batch. Empty batches leave no trace.
    pub fn end_batch(&mut self) {
        if let Some((snapshot, true)) = self.current_batch.take() {
            self.push(snapshot);
        }
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Step back from `current`. Returns the tree to show, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self, current: &ComponentTree) -> Option<ComponentTree> {
        self.end_batch();
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            tree: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.tree)
    }

    /// Step forward again from `current`.
    pub fn redo(&mut self, current: &ComponentTree) -> Option<ComponentTree> {
        self.end_batch();
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            tree: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.tree)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().and_then(|s| s.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().and_then(|s| s.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailwright_model::ComponentNode;

    fn tree(ids: &[&str]) -> ComponentTree {
        ComponentTree::from_nodes(ids.iter().map(|id| ComponentNode::new(*id, "Text")).collect())
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut stack = UndoStack::new();
        let v1 = tree(&["a"]);
        let v2 = tree(&["a", "b"]);

        stack.record(&v1, Some("Add b".to_string()));
        assert_eq!(stack.undo_description(), Some("Add b"));

        let undone = stack.undo(&v2).unwrap();
        assert_eq!(undone, v1);
        assert_eq!(stack.redo_levels(), 1);
        assert_eq!(stack.redo_description(), Some("Add b"));

        let redone = stack.redo(&undone).unwrap();
        assert_eq!(redone, v2);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_empty_stacks() {
        let mut stack = UndoStack::new();
        assert!(stack.undo(&tree(&[])).is_none());
        assert!(stack.redo(&tree(&[])).is_none());
    }

    #[test]
    fn test_batched_changes() {
        let mut stack = UndoStack::new();
        let v1 = tree(&["a"]);
        let v2 = tree(&["a", "b"]);
        let v3 = tree(&["a", "b", "c"]);

        stack.begin_batch(&v1, "Add two");
        stack.record(&v1, None);
        stack.record(&v2, None);
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Add two"));
        assert_eq!(stack.undo(&v3), Some(v1));
    }

    #[test]
    fn test_empty_batch_is_dropped() {
        let mut stack = UndoStack::new();
        stack.begin_batch(&tree(&["a"]), "Nothing");
        stack.end_batch();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut stack = UndoStack::new();
        let v1 = tree(&["a"]);
        let v2 = tree(&["b"]);

        stack.record(&v1, None);
        stack.undo(&v2);
        assert_eq!(stack.redo_levels(), 1);

        stack.record(&v1, None);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_change_inside_batch_clears_redo() {
        let mut stack = UndoStack::new();
        let v1 = tree(&["a"]);
        let v2 = tree(&["b"]);

        stack.record(&v1, None);
        stack.undo(&v2);
        assert!(stack.can_redo());

        stack.begin_batch(&v1, "Edit");
        stack.record(&v1, None);
        assert!(!stack.can_redo());
        assert!(stack.redo(&tree(&["c"])).is_none());
    }

    #[test]
    fn test_undo_closes_open_batch() {
        let mut stack = UndoStack::new();
        let v1 = tree(&["a"]);
        let v2 = tree(&["a", "b"]);

        stack.begin_batch(&v1, "Add b");
        stack.record(&v1, None);
        assert_eq!(stack.undo(&v2), Some(v1.clone()));
        assert_eq!(stack.redo_description(), Some("Add b"));

        // The batch is gone; a later end_batch pushes nothing.
        stack.end_batch();
        assert!(!stack.can_undo());
        assert_eq!(stack.redo(&v1), Some(v2));
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(2);
        for i in 0..3 {
            let id = format!("t{}", i);
            stack.record(&tree(&[id.as_str()]), None);
        }
        assert_eq!(stack.undo_levels(), 2);

        // oldest dropped first
        let current = tree(&["now"]);
        assert_eq!(stack.undo(&current), Some(tree(&["t2"])));
        assert_eq!(stack.undo(&tree(&["t2"])), Some(tree(&["t1"])));
        assert!(stack.undo(&tree(&["t1"])).is_none());
    }
}
