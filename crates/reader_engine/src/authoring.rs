//! Authoring panel state: visibility, the episode being edited, and the
//! in-flight paragraph drag

use crate::DragState;
use story_model::{ContentStore, Episode, EpisodeId};

#[derive(Debug, Clone, Default)]
pub struct AuthoringPanel {
    open: bool,
    /// Episode selected for editing; a non-owning reference
    editing: Option<EpisodeId>,
    pub drag: DragState,
}

impl AuthoringPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the panel and abandon any drag in progress
    pub fn close(&mut self) {
        self.open = false;
        self.drag.cancel();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn select(&mut self, episode_id: EpisodeId) {
        self.editing = Some(episode_id);
    }

    pub fn clear_selection(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&EpisodeId> {
        self.editing.as_ref()
    }

    /// The selected episode, if it still exists
    pub fn editing_episode<'a>(&self, store: &'a ContentStore) -> Option<&'a Episode> {
        self.editing.as_ref().and_then(|id| store.episode(id))
    }
}
