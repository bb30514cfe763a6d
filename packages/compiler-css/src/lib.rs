//! # Mailwright Utility Inliner
//!
//! Email clients ignore most `<style>` blocks, so utility classes typed into
//! a node's `className` are compiled down to inline `style` attributes
//! before the HTML leaves the renderer.
//!
//! ## Covered
//! - **Spacing**: p-*, px-*, py-*, pt/r/b/l-*, m-*, mx-*, my-*, mt/r/b/l-*, negative margins
//! - **Sizing**: w-*, h-*, min/max-w-*, min/max-h-*, size-*, fractions
//! - **Colors**: bg-*, text-*, border-* with the default palette and `/NN` opacity
//! - **Typography**: text-xs..9xl, font weights, leading, tracking, case, decoration
//! - **Borders**: border widths per side, styles, rounded-*
//! - **Display**: block, inline-block, hidden, table parts, align-*
//!
//! Variant-prefixed classes (`sm:`, `hover:`) cannot be inlined and are left
//! on the element.
//!
//! Type defaults that only apply where no class or inline style sets the
//! property travel in a `data-mw-fallback` attribute and are merged by
//! [`apply_fallback_styles`] once classes are resolved.
//!
//! ## Usage
//! ```ignore
//! let html = mailwright_compiler_css::inline_classes(&rendered)?;
//! ```

pub mod colors;
pub mod error;
pub mod fallback;
pub mod inliner;
pub mod parser;
pub mod registry;

pub use error::{CompileError, CompileResult};
pub use fallback::{apply_fallback_styles, FALLBACK_ATTRIBUTE};
pub use inliner::{inline_classes, unresolved_classes};
pub use registry::{resolve_class, CssRule};
