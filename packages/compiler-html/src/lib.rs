//! HTML target for Mailwright.
//!
//! [`compile_to_html`] serializes an evaluated document into table-based
//! markup; [`render_html`] runs the full pipeline (evaluate, serialize,
//! inline utility classes) behind an async boundary that turns failures
//! into a comment instead of an error. [`PreviewRenderer`] keeps the most
//! recent result for a live preview.

mod compiler;
mod context;
mod error;
mod preview;
mod render;
mod utility;

pub use compiler::compile_to_html;
pub use context::CompileOptions;
pub use error::RenderError;
pub use preview::{Preview, PreviewRenderer};
pub use render::{failure_comment, render_html, try_render_html};
pub use utility::{NoUtilities, TailwindInliner, UtilityCompiler};

#[cfg(test)]
mod tests;
