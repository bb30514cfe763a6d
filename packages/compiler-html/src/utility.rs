use crate::error::RenderError;
use async_trait::async_trait;
use mailwright_compiler_css::inline_classes;
use tracing::debug;

/// Resolves utility class names in serialized HTML into inline styles.
///
/// The HTML target defers all `className` handling to an implementation
/// of this trait rather than reusing the live preview's class grammar.
#[async_trait]
pub trait UtilityCompiler: Send + Sync {
    async fn compile(&self, html: &str) -> Result<String, RenderError>;
}

/// [`UtilityCompiler`] backed by the Tailwind subset in
/// `mailwright-compiler-css`. Runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailwindInliner;

#[async_trait]
impl UtilityCompiler for TailwindInliner {
    async fn compile(&self, html: &str) -> Result<String, RenderError> {
        let html = html.to_string();
        let inlined = tokio::task::spawn_blocking(move || inline_classes(&html)).await??;
        debug!(bytes = inlined.len(), "Inlined utility classes");
        Ok(inlined)
    }
}

/// Leaves markup untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUtilities;

#[async_trait]
impl UtilityCompiler for NoUtilities {
    async fn compile(&self, html: &str) -> Result<String, RenderError> {
        Ok(html.to_string())
    }
}
