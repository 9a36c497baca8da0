use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("Index rebuild already in progress")]
    RebuildInProgress,
}

pub type Result<T> = std::result::Result<T, IndexError>;
