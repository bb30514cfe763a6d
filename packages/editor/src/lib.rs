//! # Mailwright Editor
//!
//! Editing engine for the email builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: ComponentTree + registry             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Drag and drop gestures                   │
//! │  - Mutations (props, columns, duplicate)    │
//! │  - Snapshot undo/redo                       │
//! │  - Template save/load through a store       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator → compiler-react / compiler-html  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is the source of truth**: renders are pure functions of the
//!    tree and global styles
//! 2. **Copy-on-write**: every change produces a new tree, history keeps
//!    the old ones
//! 3. **Gestures never fail**: invalid drops and edits are no-ops
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailwright_editor::{DragSource, EditSession, EditorConfig, Mutation};
//!
//! let mut session = EditSession::new(EditorConfig::load(".")?);
//!
//! session.drag_start(DragSource::Palette { kind: "Heading".into() });
//! session.drag_end(Some("canvas"));
//!
//! let id = session.tree().nodes[0].id.clone();
//! session.apply(Mutation::SetProp {
//!     node_id: id,
//!     path: "style.color".into(),
//!     value: "#ff0000".into(),
//! });
//!
//! let jsx = session.export_jsx();
//! ```

mod columns;
mod config;
mod drag_drop;
mod errors;
mod inspector;
mod mutations;
mod numeric_input;
mod pipeline;
mod props;
mod session;
mod store;
mod undo_stack;

pub use columns::{set_column_count, set_column_gap};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use drag_drop::{DragController, DragSource, DragState, DropTarget};
pub use errors::EditorError;
pub use inspector::{inspect, Inspection, UNKNOWN_COMPONENT};
pub use mutations::{duplicate, Mutation};
pub use numeric_input::{commit as commit_numeric, NumericValue};
pub use pipeline::{export_html, export_jsx, html_options, jsx_options};
pub use props::{get_prop, set_class_name, set_prop};
pub use session::EditSession;
pub use store::{MemoryStore, TemplateStore};
pub use undo_stack::{Snapshot, UndoStack};
