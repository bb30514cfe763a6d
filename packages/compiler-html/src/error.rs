use mailwright_compiler_css::CompileError;
use thiserror::Error;

/// Errors raised inside the HTML render pipeline.
///
/// These never leave [`render_html`](crate::render_html); they are logged
/// and turned into a comment placeholder there.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Compilation error: {0}")]
    Compile(String),

    #[error("Utility class compilation failed: {0}")]
    Utility(String),

    #[error("Render task failed: {0}")]
    Join(String),
}

impl From<CompileError> for RenderError {
    fn from(err: CompileError) -> Self {
        RenderError::Compile(err.to_string())
    }
}

impl From<tokio::task::JoinError> for RenderError {
    fn from(err: tokio::task::JoinError) -> Self {
        RenderError::Join(err.to_string())
    }
}
