//! Drag-and-drop reordering of paragraphs
//!
//! A reorder is spread over three events: drag start records which
//! paragraph is being dragged, drag over (fired repeatedly) only allows the
//! drop, and drop performs the move and ends the drag.

use story_model::{ContentStore, EpisodeId, ParagraphId, StoryError};

/// What the presentation layer should signal while hovering a drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    /// Dropping here moves the paragraph
    Move,
}

/// A completed move within one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphMove {
    pub from: usize,
    pub to: usize,
}

/// Transient drag state owned by the authoring panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<ParagraphId>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging a paragraph
    pub fn start(&mut self, paragraph_id: ParagraphId) {
        tracing::trace!(paragraph = %paragraph_id, "drag started");
        self.dragged = Some(paragraph_id);
    }

    /// Hovering a candidate target; permits the drop and changes nothing
    pub fn over(&self) -> DropEffect {
        DropEffect::Move
    }

    pub fn dragged(&self) -> Option<&ParagraphId> {
        self.dragged.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Abandon the drag without moving anything
    pub fn cancel(&mut self) {
        self.dragged = None;
    }

    /// Drop the dragged paragraph at `target_index` of an episode.
    ///
    /// Returns `Ok(None)` when no drag is in progress. The drag ends whether
    /// or not the move succeeds.
    pub fn drop_on(
        &mut self,
        store: &mut ContentStore,
        episode_id: &EpisodeId,
        target_index: usize,
    ) -> story_model::Result<Option<ParagraphMove>> {
        let Some(dragged) = self.dragged.take() else {
            return Ok(None);
        };

        let from = store
            .episode(episode_id)
            .ok_or_else(|| StoryError::EpisodeNotFound(episode_id.clone()))?
            .position_of(&dragged)
            .ok_or_else(|| StoryError::ParagraphNotFound {
                episode: episode_id.clone(),
                paragraph: dragged.clone(),
            })?;

        store.move_paragraph(episode_id, from, target_index)?;
        Ok(Some(ParagraphMove {
            from,
            to: target_index,
        }))
    }
}
