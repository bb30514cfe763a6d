use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Markup the inliner could not tokenize. Offsets are byte positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag { offset: usize },

    #[error("unterminated attribute value in <{tag}> at byte {offset}")]
    UnterminatedAttribute { tag: String, offset: usize },

    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },
}
