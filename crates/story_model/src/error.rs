//! Error types for story model operations

use crate::{EpisodeId, ParagraphId, ParagraphKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Episode not found: {0}")]
    EpisodeNotFound(EpisodeId),

    #[error("Paragraph {paragraph} not found in episode {episode}")]
    ParagraphNotFound {
        episode: EpisodeId,
        paragraph: ParagraphId,
    },

    #[error("Index {index} out of range for {len} paragraphs")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot replace {expected:?} content with {found:?} content")]
    KindMismatch {
        expected: ParagraphKind,
        found: ParagraphKind,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoryError {
    /// Whether this error is a stale id reference rather than a bad request
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            StoryError::EpisodeNotFound(_) | StoryError::ParagraphNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;
