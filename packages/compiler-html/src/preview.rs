use crate::context::CompileOptions;
use crate::render::render_html;
use crate::utility::UtilityCompiler;
use mailwright_model::{ComponentTree, GlobalStyles};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A rendered preview and the request it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub generation: u64,
    pub html: String,
}

/// Keeps the HTML shown in a preview pane.
///
/// Renders may overlap. Each request takes a generation number, and a
/// result is only applied when nothing newer has been applied yet, so a
/// slow stale render never replaces a fresher one.
pub struct PreviewRenderer {
    compiler: Arc<dyn UtilityCompiler>,
    options: CompileOptions,
    generation: AtomicU64,
    current: RwLock<Option<Preview>>,
}

impl PreviewRenderer {
    pub fn new(compiler: Arc<dyn UtilityCompiler>, options: CompileOptions) -> Self {
        Self {
            compiler,
            options,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    /// Render and apply. Returns whether the result was applied.
    pub async fn render(&self, tree: &ComponentTree, globals: &GlobalStyles) -> bool {
        let generation = self.next_generation();
        let html = render_html(tree, globals, self.compiler.as_ref(), self.options.clone()).await;
        self.apply(generation, html).await
    }

    /// Reserve the generation number for a new render request.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply `html` produced for `generation` unless a newer result is
    /// already showing.
    pub async fn apply(&self, generation: u64, html: String) -> bool {
        let mut current = self.current.write().await;
        if let Some(shown) = current.as_ref() {
            if shown.generation >= generation {
                debug!(generation, shown = shown.generation, "Dropping stale preview");
                return false;
            }
        }
        *current = Some(Preview { generation, html });
        true
    }

    pub async fn current(&self) -> Option<Preview> {
        self.current.read().await.clone()
    }

    pub async fn html(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|p| p.html.clone())
    }
}
