//! # Edit Session
//!
//! One user's editing state: the tree, global styles, selection, the drag
//! gesture in progress and undo history. Every tree change goes through
//! [`EditSession::commit`] so history and selection stay consistent.

use crate::config::EditorConfig;
use crate::drag_drop::{DragController, DragSource, DragState};
use crate::inspector::{inspect, Inspection};
use crate::mutations::Mutation;
use crate::pipeline::{export_html, export_jsx};
use crate::store::TemplateStore;
use crate::undo_stack::UndoStack;
use crate::EditorError;
use mailwright_compiler_html::UtilityCompiler;
use mailwright_model::{
    clone_list_with_fresh_ids, ComponentNode, ComponentTree, GlobalStyles, IdGenerator, IdSource,
};
use std::collections::HashSet;
use tracing::{debug, info};

pub struct EditSession {
    tree: ComponentTree,
    globals: GlobalStyles,
    selection: Option<String>,
    drag: DragController,
    history: UndoStack,
    ids: IdGenerator,
    config: EditorConfig,
}

impl EditSession {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_tree(ComponentTree::new(), config)
    }

    pub fn with_tree(tree: ComponentTree, config: EditorConfig) -> Self {
        Self {
            tree,
            globals: GlobalStyles::default(),
            selection: None,
            drag: DragController::new(),
            history: UndoStack::with_max_levels(config.history_limit),
            ids: config.id_generator(),
            config,
        }
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn globals(&self) -> &GlobalStyles {
        &self.globals
    }

    pub fn set_globals(&mut self, globals: GlobalStyles) {
        self.globals = globals;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Apply a mutation. Returns whether the tree changed.
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        let mut ids = UnusedIds::new(&mut self.ids, &self.tree);
        match mutation.apply(&self.tree, &mut ids, &self.config) {
            Some(next) => {
                self.commit(next, mutation.name());
                true
            }
            None => false,
        }
    }

    pub fn drag_start(&mut self, source: DragSource) {
        self.drag.on_drag_start(source);
    }

    /// Finish the drag over `over` (`None` when released outside any
    /// target). Returns whether the tree changed.
    pub fn drag_end(&mut self, over: Option<&str>) -> bool {
        let mut ids = UnusedIds::new(&mut self.ids, &self.tree);
        match self.drag.on_drag_end(&self.tree, over, &mut ids) {
            Some(next) if next != self.tree => {
                self.commit(next, "Drag and drop");
                true
            }
            _ => false,
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Select a node. Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selection = id.filter(|id| self.tree.contains(id)).map(str::to_string);
    }

    /// The selected node, if it still exists.
    pub fn selected(&self) -> Option<&ComponentNode> {
        self.tree.find_node(self.selection.as_deref()?)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|node| node.id.as_str())
    }

    /// Property panel contents for the selection.
    pub fn inspect_selected(&self) -> Option<Inspection> {
        self.selected().map(inspect)
    }

    /// Group the following changes into one undo step, e.g. while a slider
    /// is being dragged.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch(&self.tree, description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.tree) {
            Some(previous) => {
                self.install(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.tree) {
            Some(next) => {
                self.install(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Replace the whole tree with one parsed from `json`, giving every
    /// node a fresh id. Invalid JSON leaves the session untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), EditorError> {
        let parsed = ComponentTree::from_json(json)?;
        let fresh = ComponentTree::from_nodes(clone_list_with_fresh_ids(&parsed.nodes, &mut self.ids));
        info!(nodes = fresh.flatten_ids().len(), "Loaded template");
        self.commit(fresh, "Load template");
        Ok(())
    }

    /// Persist the tree and return the store's id for it.
    pub async fn save(&self, store: &dyn TemplateStore) -> Result<String, EditorError> {
        let json = self.tree.to_json()?;
        let id = store.persist(&json).await?;
        info!(template_id = %id, "Saved template");
        Ok(id)
    }

    /// Replace the tree with template `id` from `store`.
    pub async fn load_template(
        &mut self,
        store: &dyn TemplateStore,
        id: &str,
    ) -> Result<(), EditorError> {
        let json = store.load(id).await?;
        self.load_json(&json)
    }

    pub fn export_jsx(&self) -> String {
        export_jsx(&self.tree, &self.globals, &self.config)
    }

    pub async fn export_html(&self, compiler: &dyn UtilityCompiler) -> String {
        export_html(&self.tree, &self.globals, compiler, &self.config).await
    }

    fn commit(&mut self, next: ComponentTree, description: &str) {
        debug!(change = description, "Committing tree change");
        self.history.record(&self.tree, Some(description.to_string()));
        self.install(next);
    }

    fn install(&mut self, tree: ComponentTree) {
        self.tree = tree;
        if self.selection.as_deref().is_some_and(|id| !self.tree.contains(id)) {
            debug!("Selected node is gone, clearing selection");
            self.selection = None;
        }
    }
}

/// Ids from the session generator, skipping any the tree already uses.
/// Nodes inserted with caller-chosen ids can otherwise collide with
/// generated ones.
struct UnusedIds<'a> {
    ids: &'a mut IdGenerator,
    taken: HashSet<String>,
}

impl<'a> UnusedIds<'a> {
    fn new(ids: &'a mut IdGenerator, tree: &ComponentTree) -> Self {
        Self {
            ids,
            taken: tree.flatten_ids().into_iter().collect(),
        }
    }
}

impl IdSource for UnusedIds<'_> {
    fn next_id(&mut self) -> String {
        loop {
            let id = self.ids.new_id();
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn session() -> EditSession {
        EditSession::new(EditorConfig {
            id_prefix: Some("s".into()),
            ..EditorConfig::default()
        })
    }

    #[test]
    fn test_noop_mutations_are_not_recorded() {
        let mut session = session();
        assert!(!session.apply(Mutation::Delete {
            node_id: "missing".into()
        }));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_drag_then_undo_redo() {
        let mut session = session();
        session.drag_start(DragSource::Palette {
            kind: "Heading".into(),
        });
        assert!(session.drag_end(Some("canvas")));
        assert_eq!(session.tree().len(), 1);
        assert_eq!(session.history().undo_description(), Some("Drag and drop"));

        assert!(session.undo());
        assert!(session.tree().is_empty());
        assert!(session.redo());
        assert_eq!(session.tree().len(), 1);
        assert!(!session.redo());
    }

    #[test]
    fn test_deleting_selection_clears_it() {
        let mut session = session();
        session.apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("t", "Text"),
            index: None,
        });
        session.select(Some("t"));
        assert_eq!(session.selected_id(), Some("t"));

        session.apply(Mutation::Delete { node_id: "t".into() });
        assert!(session.selected().is_none());

        session.undo();
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_generated_ids_skip_taken_ones() {
        let mut session = session();
        session.apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("s-1", "Text"),
            index: None,
        });
        session.drag_start(DragSource::Palette { kind: "Text".into() });
        session.drag_end(Some("canvas"));

        assert_eq!(session.tree().flatten_ids(), vec!["s-1", "s-2"]);
    }

    #[test]
    fn test_select_unknown_id() {
        let mut session = session();
        session.select(Some("ghost"));
        assert!(session.selected().is_none());
        assert!(session.inspect_selected().is_none());
    }

    #[test]
    fn test_batch_is_one_undo_step() {
        let mut session = session();
        session.apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("t", "Text"),
            index: None,
        });

        session.begin_batch("Resize");
        for size in [12, 13, 14] {
            session.apply(Mutation::SetProp {
                node_id: "t".into(),
                path: "style.fontSize".into(),
                value: json!(format!("{}px", size)),
            });
        }
        session.end_batch();

        assert_eq!(session.history().undo_levels(), 2);
        session.undo();
        assert!(session.tree().find_node("t").unwrap().style().is_none());
    }

    #[test]
    fn test_edit_inside_batch_discards_redo() {
        let mut session = session();
        session.apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("t", "Text"),
            index: None,
        });
        let set_text = |text: &str| Mutation::SetProp {
            node_id: "t".into(),
            path: "children".into(),
            value: json!(text),
        };
        let text = |session: &EditSession| {
            session
                .tree()
                .find_node("t")
                .and_then(|n| n.prop_str("children").map(str::to_string))
        };

        session.apply(set_text("old"));
        session.undo();
        assert!(session.can_redo());

        session.begin_batch("Typing");
        session.apply(set_text("new"));
        assert!(!session.can_redo());
        assert!(!session.redo());
        assert_eq!(text(&session).as_deref(), Some("new"));

        // Undo closes the batch and steps back over it.
        assert!(session.undo());
        assert_eq!(text(&session), None);
        session.end_batch();
        assert!(session.redo());
        assert_eq!(text(&session).as_deref(), Some("new"));
    }

    #[test]
    fn test_load_json_rejects_invalid_tree() {
        let mut session = session();
        let err = session
            .load_json(r#"[{ "id": "a", "type": "Text", "props": {} }, { "id": "a", "type": "Text", "props": {} }]"#)
            .unwrap_err();
        assert!(matches!(err, EditorError::Model(_)));
        assert!(session.tree().is_empty());
        assert!(!session.can_undo());
    }

    #[tokio::test]
    async fn test_save_and_load_template_regenerates_ids() {
        let store = MemoryStore::new();
        let mut session = session();
        session.apply(Mutation::InsertAtRoot {
            node: ComponentNode::new("orig", "Section")
                .with_children(vec![ComponentNode::new("inner", "Text")]),
            index: None,
        });

        let id = session.save(&store).await.unwrap();
        session.load_template(&store, &id).await.unwrap();

        let ids = session.tree().flatten_ids();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&"orig".to_string()));
        assert!(!ids.contains(&"inner".to_string()));
        assert_eq!(session.tree().nodes[0].children()[0].kind, "Text");
    }
}
