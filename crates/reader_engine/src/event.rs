//! Events sent by the presentation layer and their outcomes

use serde::{Deserialize, Serialize};
use story_model::{
    CharacterId, EpisodeId, EpisodePatch, ParagraphId, ParagraphKind, ParagraphPatch, StoryError,
};

/// A discrete user interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ReaderEvent {
    // Reading
    Next,
    Prev,
    ToggleBookmark,
    /// Open the bookmark at this position in the bookmark list
    SelectBookmark { index: usize },
    ShowCharacter { character_id: CharacterId },
    HideCharacter,

    // Authoring panel
    OpenAuthoring,
    CloseAuthoring,
    EditEpisode { episode_id: EpisodeId },
    AddEpisode,
    UpdateEpisode { episode_id: EpisodeId, patch: EpisodePatch },
    DeleteEpisode { episode_id: EpisodeId },
    AddParagraph { episode_id: EpisodeId, kind: ParagraphKind },
    /// Append a text paragraph typed into the authoring form
    AddTextParagraph { episode_id: EpisodeId, text: String },
    UpdateParagraph {
        episode_id: EpisodeId,
        paragraph_id: ParagraphId,
        patch: ParagraphPatch,
    },
    DeleteParagraph { episode_id: EpisodeId, paragraph_id: ParagraphId },
    MoveParagraph { episode_id: EpisodeId, from: usize, to: usize },

    // Drag-and-drop
    DragStart { paragraph_id: ParagraphId },
    DragOver,
    Drop { episode_id: EpisodeId, target_index: usize },
}

/// Why an event changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Navigation past the first or last paragraph
    AtBoundary,
    /// No paragraph under the cursor to bookmark
    NoCurrentParagraph,
    /// An id that no longer resolves
    Unresolved,
    /// A reorder index outside the paragraph list
    OutOfRange,
    /// Replacement content of the wrong paragraph kind
    KindMismatch,
    /// Blank text submitted from the paragraph form
    BlankText,
    /// A drop with no drag in progress
    NoDragInProgress,
    /// Malformed story data
    Invalid,
}

impl From<&StoryError> for IgnoreReason {
    fn from(err: &StoryError) -> Self {
        match err {
            StoryError::EpisodeNotFound(_) | StoryError::ParagraphNotFound { .. } => {
                IgnoreReason::Unresolved
            }
            StoryError::IndexOutOfRange { .. } => IgnoreReason::OutOfRange,
            StoryError::KindMismatch { .. } => IgnoreReason::KindMismatch,
            StoryError::Serialization(_) => IgnoreReason::Invalid,
        }
    }
}

/// Outcome of dispatching an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl EventOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EventOutcome::Applied)
    }
}
