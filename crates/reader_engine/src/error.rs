//! Error types for reader operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Story model error: {0}")]
    Story(#[from] story_model::StoryError),
}

pub type Result<T> = std::result::Result<T, ReaderError>;
