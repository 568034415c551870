use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssignError {
    #[error("No template store supplied")]
    MissingTemplate,

    #[error("No targets registered")]
    EmptyTargetList,

    #[error("Target index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Entity not found: {0:?}")]
    EntityNotFound(crate::core::types::EntityId),

    #[error("Template document error: {0}")]
    DocumentError(String),

    #[error("Update check error: {0}")]
    UpdateError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AssignError>;
