//! JSX target: compiles an evaluated email document into a React-Email
//! module (`import {...} from "@react-email/components"` plus one exported
//! component).

mod compiler;
mod context;

pub use compiler::{compile_to_react, render_jsx};
pub use context::{CompileOptions, CompilerContext};

#[cfg(test)]
mod tests;
