//! # Mailwright Model
//!
//! The component tree behind the email builder, and everything that is pure
//! data about it:
//!
//! - [`ComponentNode`] / [`ComponentTree`]: the recursive, ordered, typed tree
//! - [`registry`]: the closed catalog of component types
//! - [`tree`]: copy-on-write structural operations
//! - [`serializer`]: strict JSON load, lossless save
//! - [`GlobalStyles`]: document-wide settings with defaults
//! - [`IdGenerator`]: injectable id source

pub mod error;
pub mod id_generator;
pub mod node;
pub mod registry;
pub mod serializer;
pub mod styles;
pub mod tree;
pub mod visitor;

pub use error::{ModelError, ModelResult};
pub use id_generator::{get_seed, IdGenerator, IdSource};
pub use node::{ComponentNode, ComponentTree, Props};
pub use registry::{Category, ComponentDefinition, ComponentKind};
pub use serializer::{parse, serialize, serialize_pretty, validate};
pub use styles::GlobalStyles;
pub use tree::{clone_list_with_fresh_ids, clone_with_fresh_ids, instantiate};
pub use visitor::{walk_node, walk_node_mut, walk_tree, walk_tree_mut, Visitor, VisitorMut};
