//! Tree evaluation for Mailwright.
//!
//! - [`style_resolution`]: the three-layer style cascade used by the live
//!   preview. Evaluated elements keep the layers apart (inline `styles`,
//!   type `default_styles`, raw `class_name`) so each export target can put
//!   its utility compiler between them
//! - [`utility_classes`]: the small `className` grammar the live preview
//!   understands
//! - [`components`]: per-type expansion into email primitives
//! - [`evaluator`]: whole-document evaluation with the global wrapper

pub mod components;
pub mod evaluator;
pub mod global;
pub mod style_resolution;
pub mod utility_classes;
pub mod vdom;

pub use components::{platform, Platform, PLATFORMS, STACK_CLASS, STACK_STYLES};
pub use evaluator::Evaluator;
pub use style_resolution::{
    is_longhand_of, merge_layers, resolve_property, resolve_style, resolve_with_sources,
    ResolvedValue, StyleSource,
};
pub use utility_classes::parse_class_name;
pub use vdom::{AttributeMap, EmailTag, StyleMap, VNode, VirtualEmailDocument};
