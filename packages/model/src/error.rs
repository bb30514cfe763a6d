use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Reasons a serialized tree is refused at load time.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Malformed tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate node id '{id}'")]
    DuplicateId { id: String },

    #[error("Node at {path} has an empty id")]
    EmptyId { path: String },

    #[error("Node '{id}' has an empty type")]
    EmptyType { id: String },

    #[error("Node '{id}' of type '{kind}' cannot have children")]
    ChildrenOnLeaf { id: String, kind: String },
}
