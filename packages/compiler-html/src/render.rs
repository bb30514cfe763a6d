use crate::compiler::compile_to_html;
use crate::context::CompileOptions;
use crate::error::RenderError;
use crate::utility::UtilityCompiler;
use mailwright_compiler_css::apply_fallback_styles;
use mailwright_evaluator::Evaluator;
use mailwright_model::{ComponentTree, GlobalStyles};
use tracing::{error, info, instrument};

/// Render `tree` to final HTML.
///
/// Never fails: any error in evaluation, serialization or utility
/// compilation is logged and returned as an HTML comment so a preview
/// pane can keep showing something.
pub async fn render_html(
    tree: &ComponentTree,
    globals: &GlobalStyles,
    compiler: &dyn UtilityCompiler,
    options: CompileOptions,
) -> String {
    match try_render_html(tree, globals, compiler, options).await {
        Ok(html) => html,
        Err(err) => {
            error!(error = %err, "HTML render failed");
            failure_comment(&err)
        }
    }
}

/// [`render_html`] without failure containment.
#[instrument(skip_all, fields(roots = tree.len()))]
pub async fn try_render_html(
    tree: &ComponentTree,
    globals: &GlobalStyles,
    compiler: &dyn UtilityCompiler,
    options: CompileOptions,
) -> Result<String, RenderError> {
    info!("Rendering HTML");

    let tree = tree.clone();
    let globals = globals.clone();
    let html = tokio::task::spawn_blocking(move || {
        let doc = Evaluator::new().evaluate(&tree, &globals);
        compile_to_html(&doc, options)
    })
    .await?;

    let html = compiler.compile(&html).await?;
    let html = tokio::task::spawn_blocking(move || apply_fallback_styles(&html)).await??;
    info!(bytes = html.len(), "Rendered HTML");
    Ok(html)
}

/// `<!-- Render failed: ... -->`, with the message made safe for a comment.
pub fn failure_comment(err: &RenderError) -> String {
    let message = err.to_string().replace("--", "- -").replace('>', "&gt;");
    format!("<!-- Render failed: {} -->", message)
}
