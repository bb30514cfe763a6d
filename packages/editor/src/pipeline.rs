//! # Export Pipeline
//!
//! Tree → evaluated document → target text, for both export targets.
//! Layout follows [`EditorConfig::render_pretty`].

use crate::config::EditorConfig;
use mailwright_compiler_html::{render_html, UtilityCompiler};
use mailwright_compiler_react::render_jsx;
use mailwright_model::{ComponentTree, GlobalStyles};

/// React-Email module source for `tree`.
pub fn export_jsx(tree: &ComponentTree, globals: &GlobalStyles, config: &EditorConfig) -> String {
    render_jsx(tree, globals, jsx_options(config))
}

/// Final HTML for `tree`. Failures come back as an HTML comment.
pub async fn export_html(
    tree: &ComponentTree,
    globals: &GlobalStyles,
    compiler: &dyn UtilityCompiler,
    config: &EditorConfig,
) -> String {
    render_html(tree, globals, compiler, html_options(config)).await
}

pub fn jsx_options(config: &EditorConfig) -> mailwright_compiler_react::CompileOptions {
    mailwright_compiler_react::CompileOptions {
        pretty: config.render_pretty,
        ..Default::default()
    }
}

pub fn html_options(config: &EditorConfig) -> mailwright_compiler_html::CompileOptions {
    if config.render_pretty {
        mailwright_compiler_html::CompileOptions::default()
    } else {
        mailwright_compiler_html::CompileOptions::compact()
    }
}
