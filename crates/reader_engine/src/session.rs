//! Reader session - owner of all reader state
//!
//! The session holds the content store, the character registry, the
//! cursor, the bookmarks, and the authoring panel. The presentation layer
//! reads plain data from it and feeds user interactions back through
//! [`ReaderSession::dispatch`]. Failed lookups never escape `dispatch`;
//! they are logged and reported as [`EventOutcome::Ignored`].

use crate::{
    AuthoringPanel, Cursor, DropEffect, EventOutcome, IgnoreReason, ParagraphMove, ReaderEvent,
    ReaderSettings, Step,
};
use story_model::{
    sample, Bookmark, BookmarkSet, BookmarkToggle, Character, CharacterId, CharacterRegistry,
    ContentStore, Episode, EpisodeId, EpisodePatch, Paragraph, ParagraphId, ParagraphKind,
    ParagraphPatch, StoryError,
};

pub struct ReaderSession {
    store: ContentStore,
    characters: CharacterRegistry,
    cursor: Cursor,
    bookmarks: BookmarkSet,
    authoring: AuthoringPanel,
    /// Character whose detail card is open
    selected_character: Option<CharacterId>,
    settings: ReaderSettings,
}

impl ReaderSession {
    /// Create a session positioned at the first paragraph
    pub fn new(store: ContentStore, characters: CharacterRegistry, settings: ReaderSettings) -> Self {
        tracing::info!(
            episodes = store.len(),
            characters = characters.len(),
            "reader session started"
        );
        Self {
            store,
            characters,
            cursor: Cursor::default(),
            bookmarks: BookmarkSet::new(),
            authoring: AuthoringPanel::new(),
            selected_character: None,
            settings,
        }
    }

    /// Session over the bundled demo story
    pub fn demo(settings: ReaderSettings) -> Self {
        Self::new(sample::story(), sample::characters(), settings)
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn characters(&self) -> &CharacterRegistry {
        &self.characters
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn authoring(&self) -> &AuthoringPanel {
        &self.authoring
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.cursor.episode(&self.store)
    }

    pub fn current_paragraph(&self) -> Option<&Paragraph> {
        self.cursor.paragraph(&self.store)
    }

    /// Scene image for the current paragraph
    pub fn backdrop(&self) -> Option<&str> {
        self.current_episode()?
            .backdrop_for(self.cursor.paragraph_index)
    }

    /// 1-based paragraph number and paragraph count in the current episode
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.cursor.progress(&self.store)
    }

    pub fn can_advance(&self) -> bool {
        self.cursor.can_advance(&self.store)
    }

    pub fn can_retreat(&self) -> bool {
        self.cursor.can_retreat(&self.store)
    }

    pub fn is_current_bookmarked(&self) -> bool {
        match (self.current_episode(), self.current_paragraph()) {
            (Some(episode), Some(paragraph)) => {
                self.bookmarks.is_bookmarked(&episode.id, &paragraph.id)
            }
            _ => false,
        }
    }

    pub fn selected_character(&self) -> Option<&Character> {
        self.selected_character
            .as_ref()
            .and_then(|id| self.characters.get(id))
    }

    /// Gallery images shown for a character in the character list
    pub fn gallery_preview<'a>(&self, character: &'a Character) -> &'a [String] {
        character.gallery_preview(self.settings.reading.gallery_preview)
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Apply one user interaction
    pub fn dispatch(&mut self, event: ReaderEvent) -> EventOutcome {
        tracing::trace!(?event, "dispatch");
        match event {
            ReaderEvent::Next => step_outcome(self.next()),
            ReaderEvent::Prev => step_outcome(self.prev()),
            ReaderEvent::ToggleBookmark => match self.toggle_bookmark() {
                Some(_) => EventOutcome::Applied,
                None => EventOutcome::Ignored(IgnoreReason::NoCurrentParagraph),
            },
            ReaderEvent::SelectBookmark { index } => absorb(self.open_bookmark(index)),
            ReaderEvent::ShowCharacter { character_id } => {
                if self.characters.get(&character_id).is_some() {
                    self.selected_character = Some(character_id);
                    EventOutcome::Applied
                } else {
                    tracing::warn!(character = %character_id, "unknown character");
                    EventOutcome::Ignored(IgnoreReason::Unresolved)
                }
            }
            ReaderEvent::HideCharacter => {
                self.selected_character = None;
                EventOutcome::Applied
            }
            ReaderEvent::OpenAuthoring => {
                self.authoring.open();
                EventOutcome::Applied
            }
            ReaderEvent::CloseAuthoring => {
                self.authoring.close();
                EventOutcome::Applied
            }
            ReaderEvent::EditEpisode { episode_id } => absorb(self.edit_episode(episode_id)),
            ReaderEvent::AddEpisode => {
                self.add_episode();
                EventOutcome::Applied
            }
            ReaderEvent::UpdateEpisode { episode_id, patch } => {
                absorb(self.update_episode(&episode_id, patch))
            }
            ReaderEvent::DeleteEpisode { episode_id } => absorb(self.delete_episode(&episode_id)),
            ReaderEvent::AddParagraph { episode_id, kind } => {
                absorb(self.add_paragraph(&episode_id, kind))
            }
            ReaderEvent::AddTextParagraph { episode_id, text } => {
                match self.add_text_paragraph(&episode_id, &text) {
                    Ok(Some(_)) => EventOutcome::Applied,
                    Ok(None) => EventOutcome::Ignored(IgnoreReason::BlankText),
                    Err(e) => ignored(&e),
                }
            }
            ReaderEvent::UpdateParagraph {
                episode_id,
                paragraph_id,
                patch,
            } => absorb(self.update_paragraph(&episode_id, &paragraph_id, patch)),
            ReaderEvent::DeleteParagraph {
                episode_id,
                paragraph_id,
            } => absorb(self.delete_paragraph(&episode_id, &paragraph_id)),
            ReaderEvent::MoveParagraph {
                episode_id,
                from,
                to,
            } => absorb(self.move_paragraph(&episode_id, from, to)),
            ReaderEvent::DragStart { paragraph_id } => {
                self.drag_start(paragraph_id);
                EventOutcome::Applied
            }
            ReaderEvent::DragOver => {
                self.drag_over();
                EventOutcome::Applied
            }
            ReaderEvent::Drop {
                episode_id,
                target_index,
            } => match self.drop_on(&episode_id, target_index) {
                Ok(Some(_)) => EventOutcome::Applied,
                Ok(None) => EventOutcome::Ignored(IgnoreReason::NoDragInProgress),
                Err(e) => ignored(&e),
            },
        }
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    pub fn next(&mut self) -> Step {
        self.cursor.next(&self.store)
    }

    pub fn prev(&mut self) -> Step {
        self.cursor.prev(&self.store)
    }

    /// Toggle the bookmark on the current paragraph. Returns `None` when
    /// there is no paragraph under the cursor.
    pub fn toggle_bookmark(&mut self) -> Option<BookmarkToggle> {
        let episode = self.cursor.episode(&self.store)?;
        let paragraph = self.cursor.paragraph(&self.store)?;
        let note = self
            .settings
            .reading
            .bookmark_note(&episode.title, self.cursor.paragraph_index + 1);
        let toggle = self.bookmarks.toggle(&episode.id, &paragraph.id, note);
        tracing::debug!(episode = %episode.id, paragraph = %paragraph.id, ?toggle, "bookmark toggled");
        Some(toggle)
    }

    /// Jump to the bookmark at `index` in the bookmark list
    pub fn open_bookmark(&mut self, index: usize) -> story_model::Result<()> {
        let Bookmark {
            episode_id,
            paragraph_id,
            ..
        } = self
            .bookmarks
            .get(index)
            .ok_or(StoryError::IndexOutOfRange {
                index,
                len: self.bookmarks.len(),
            })?;
        self.cursor.jump_to(&self.store, episode_id, paragraph_id)
    }

    // ------------------------------------------------------------------
    // Authoring
    // ------------------------------------------------------------------

    /// Select an episode for editing
    pub fn edit_episode(&mut self, episode_id: EpisodeId) -> story_model::Result<()> {
        if self.store.episode(&episode_id).is_none() {
            return Err(StoryError::EpisodeNotFound(episode_id));
        }
        self.authoring.select(episode_id);
        Ok(())
    }

    /// Append an episode with the default title and background and select
    /// it for editing
    pub fn add_episode(&mut self) -> EpisodeId {
        let title = self.settings.authoring.episode_title(self.store.len() + 1);
        let background = self.settings.authoring.default_background.clone();
        let anchor = self.cursor.anchor(&self.store);
        let id = self.store.add_episode(title, background);
        self.follow(anchor);
        self.authoring.select(id.clone());
        id
    }

    pub fn update_episode(&mut self, episode_id: &EpisodeId, patch: EpisodePatch) -> story_model::Result<()> {
        self.mutate(|store| store.update_episode(episode_id, patch))
    }

    /// Delete an episode. The authoring selection is cleared whichever
    /// episode it pointed at.
    pub fn delete_episode(&mut self, episode_id: &EpisodeId) -> story_model::Result<Episode> {
        self.authoring.clear_selection();
        self.mutate(|store| store.delete_episode(episode_id))
    }

    pub fn add_paragraph(&mut self, episode_id: &EpisodeId, kind: ParagraphKind) -> story_model::Result<ParagraphId> {
        self.mutate(|store| store.add_paragraph(episode_id, kind))
    }

    /// Append a text paragraph from the authoring form. Returns `Ok(None)`
    /// when blank text is refused.
    pub fn add_text_paragraph(
        &mut self,
        episode_id: &EpisodeId,
        text: &str,
    ) -> story_model::Result<Option<ParagraphId>> {
        if self.settings.authoring.reject_blank_paragraphs && text.trim().is_empty() {
            tracing::debug!(episode = %episode_id, "blank paragraph refused");
            return Ok(None);
        }
        let paragraph = Paragraph::text(ParagraphId::generate(), text);
        self.mutate(|store| store.push_paragraph(episode_id, paragraph))
            .map(Some)
    }

    pub fn update_paragraph(
        &mut self,
        episode_id: &EpisodeId,
        paragraph_id: &ParagraphId,
        patch: ParagraphPatch,
    ) -> story_model::Result<()> {
        self.mutate(|store| store.update_paragraph(episode_id, paragraph_id, patch))
    }

    pub fn delete_paragraph(&mut self, episode_id: &EpisodeId, paragraph_id: &ParagraphId) -> story_model::Result<Paragraph> {
        self.mutate(|store| store.delete_paragraph(episode_id, paragraph_id))
    }

    pub fn move_paragraph(&mut self, episode_id: &EpisodeId, from: usize, to: usize) -> story_model::Result<()> {
        self.mutate(|store| store.move_paragraph(episode_id, from, to))
    }

    // ------------------------------------------------------------------
    // Drag-and-drop
    // ------------------------------------------------------------------

    pub fn drag_start(&mut self, paragraph_id: ParagraphId) {
        self.authoring.drag.start(paragraph_id);
    }

    pub fn drag_over(&self) -> DropEffect {
        self.authoring.drag.over()
    }

    /// Finish a drag by dropping at `target_index` of an episode
    pub fn drop_on(&mut self, episode_id: &EpisodeId, target_index: usize) -> story_model::Result<Option<ParagraphMove>> {
        let anchor = self.cursor.anchor(&self.store);
        let result = self
            .authoring
            .drag
            .drop_on(&mut self.store, episode_id, target_index);
        if matches!(result, Ok(Some(_))) {
            self.follow(anchor);
        }
        result
    }

    /// Run a store mutation and keep the cursor on the same paragraph
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut ContentStore) -> story_model::Result<T>,
    ) -> story_model::Result<T> {
        let anchor = self.cursor.anchor(&self.store);
        let result = op(&mut self.store);
        if result.is_ok() {
            self.follow(anchor);
        }
        result
    }

    fn follow(&mut self, anchor: Option<crate::Anchor>) {
        match anchor {
            Some(anchor) => self.cursor.restore(&self.store, &anchor),
            None => self.cursor.clamp(&self.store),
        }
    }
}

fn step_outcome(step: Step) -> EventOutcome {
    match step {
        Step::Moved => EventOutcome::Applied,
        Step::AtBoundary => EventOutcome::Ignored(IgnoreReason::AtBoundary),
    }
}

fn ignored(err: &StoryError) -> EventOutcome {
    tracing::warn!(error = %err, "event ignored");
    EventOutcome::Ignored(IgnoreReason::from(err))
}

fn absorb<T>(result: story_model::Result<T>) -> EventOutcome {
    match result {
        Ok(_) => EventOutcome::Applied,
        Err(e) => ignored(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ReaderSession {
        ReaderSession::demo(ReaderSettings::default())
    }

    fn ep(id: &str) -> EpisodeId {
        EpisodeId::new(id)
    }

    fn para(id: &str) -> ParagraphId {
        ParagraphId::new(id)
    }

    #[test]
    fn test_opens_at_first_paragraph() {
        let session = session();
        assert_eq!(session.current_paragraph().unwrap().id.as_str(), "1-1");
        assert_eq!(session.progress(), Some((1, 4)));
        assert!(!session.can_retreat());
        assert!(session.can_advance());
        // First paragraph carries its own image
        assert!(session.backdrop().unwrap().contains("photo-1464207687429"));
    }

    #[test]
    fn test_bookmark_toggle_uses_note_template() {
        let mut session = session();
        session.dispatch(ReaderEvent::Next);
        assert_eq!(session.dispatch(ReaderEvent::ToggleBookmark), EventOutcome::Applied);
        assert!(session.is_current_bookmarked());
        assert_eq!(
            session.bookmarks().get(0).unwrap().note,
            "Chapter 1. Arrival - Paragraph 2"
        );

        session.dispatch(ReaderEvent::ToggleBookmark);
        assert!(!session.is_current_bookmarked());
        assert!(session.bookmarks().is_empty());
    }

    #[test]
    fn test_select_bookmark_jumps() {
        let mut session = session();
        for _ in 0..4 {
            session.dispatch(ReaderEvent::Next);
        }
        session.dispatch(ReaderEvent::ToggleBookmark);
        session.dispatch(ReaderEvent::Prev);
        assert_eq!(session.cursor(), Cursor::new(0, 3));

        assert_eq!(
            session.dispatch(ReaderEvent::SelectBookmark { index: 0 }),
            EventOutcome::Applied
        );
        assert_eq!(session.cursor(), Cursor::new(1, 0));

        assert_eq!(
            session.dispatch(ReaderEvent::SelectBookmark { index: 5 }),
            EventOutcome::Ignored(IgnoreReason::OutOfRange)
        );
    }

    #[test]
    fn test_dangling_bookmark_is_unresolved() {
        let mut session = session();
        session.dispatch(ReaderEvent::Next);
        session.dispatch(ReaderEvent::Next);
        session.dispatch(ReaderEvent::ToggleBookmark);
        session.dispatch(ReaderEvent::Prev);

        session.delete_paragraph(&ep("1"), &para("1-3")).unwrap();
        let before = session.cursor();
        assert_eq!(
            session.dispatch(ReaderEvent::SelectBookmark { index: 0 }),
            EventOutcome::Ignored(IgnoreReason::Unresolved)
        );
        assert_eq!(session.cursor(), before);
        assert_eq!(session.bookmarks().len(), 1);
    }

    #[test]
    fn test_add_episode_selects_it() {
        let mut session = session();
        session.dispatch(ReaderEvent::OpenAuthoring);
        let id = session.add_episode();

        let episode = session.store().episode(&id).unwrap();
        assert_eq!(episode.title, "Episode 3");
        assert_eq!(
            episode.background_image,
            session.settings().authoring.default_background
        );
        assert_eq!(session.authoring().editing(), Some(&id));
    }

    #[test]
    fn test_delete_episode_clears_any_selection() {
        let mut session = session();
        session.dispatch(ReaderEvent::EditEpisode { episode_id: ep("1") });
        assert_eq!(session.authoring().editing(), Some(&ep("1")));

        let outcome = session.dispatch(ReaderEvent::DeleteEpisode { episode_id: ep("2") });
        assert_eq!(outcome, EventOutcome::Applied);
        assert!(session.authoring().editing().is_none());
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_edit_unknown_episode_is_ignored() {
        let mut session = session();
        assert_eq!(
            session.dispatch(ReaderEvent::EditEpisode { episode_id: ep("nope") }),
            EventOutcome::Ignored(IgnoreReason::Unresolved)
        );
        assert!(session.authoring().editing().is_none());
    }

    #[test]
    fn test_blank_text_paragraph_refused() {
        let mut session = session();
        let outcome = session.dispatch(ReaderEvent::AddTextParagraph {
            episode_id: ep("2"),
            text: "   \n\t".to_string(),
        });
        assert_eq!(outcome, EventOutcome::Ignored(IgnoreReason::BlankText));
        assert_eq!(session.store().episode(&ep("2")).unwrap().len(), 1);

        let outcome = session.dispatch(ReaderEvent::AddTextParagraph {
            episode_id: ep("2"),
            text: "The lighthouse keeper waved.".to_string(),
        });
        assert_eq!(outcome, EventOutcome::Applied);
        assert_eq!(session.store().episode(&ep("2")).unwrap().len(), 2);
    }

    #[test]
    fn test_blank_text_allowed_when_guard_disabled() {
        let mut settings = ReaderSettings::default();
        settings.authoring.reject_blank_paragraphs = false;
        let mut session = ReaderSession::demo(settings);
        assert!(session.add_text_paragraph(&ep("2"), "").unwrap().is_some());
    }

    #[test]
    fn test_cursor_follows_paragraph_through_edits() {
        let mut session = session();
        session.dispatch(ReaderEvent::Next);
        session.dispatch(ReaderEvent::Next);
        assert_eq!(session.current_paragraph().unwrap().id.as_str(), "1-3");

        // Deleting an earlier paragraph shifts indices under the cursor
        session.delete_paragraph(&ep("1"), &para("1-1")).unwrap();
        assert_eq!(session.current_paragraph().unwrap().id.as_str(), "1-3");
        assert_eq!(session.cursor(), Cursor::new(0, 1));

        // Deleting the paragraph under the cursor keeps a valid position
        session.delete_paragraph(&ep("1"), &para("1-3")).unwrap();
        assert!(session.cursor().is_valid(session.store()));
        assert_eq!(session.current_paragraph().unwrap().id.as_str(), "1-4");
    }

    #[test]
    fn test_cursor_survives_deleting_current_episode() {
        let mut session = session();
        for _ in 0..4 {
            session.next();
        }
        session.delete_episode(&ep("2")).unwrap();
        assert!(session.cursor().is_valid(session.store()));
        assert_eq!(session.current_episode().unwrap().id, ep("1"));

        session.delete_episode(&ep("1")).unwrap();
        assert!(session.current_episode().is_none());
        assert_eq!(session.dispatch(ReaderEvent::Next), EventOutcome::Ignored(IgnoreReason::AtBoundary));
        assert_eq!(
            session.dispatch(ReaderEvent::ToggleBookmark),
            EventOutcome::Ignored(IgnoreReason::NoCurrentParagraph)
        );

        session.add_episode();
        assert_eq!(session.cursor(), Cursor::default());
        assert!(session.current_episode().is_some());
    }

    #[test]
    fn test_drag_and_drop_reorders() {
        let mut session = session();
        session.dispatch(ReaderEvent::DragStart { paragraph_id: para("1-1") });
        assert_eq!(session.dispatch(ReaderEvent::DragOver), EventOutcome::Applied);
        let outcome = session.dispatch(ReaderEvent::Drop {
            episode_id: ep("1"),
            target_index: 2,
        });
        assert_eq!(outcome, EventOutcome::Applied);

        let order: Vec<&str> = session
            .store()
            .episode(&ep("1"))
            .unwrap()
            .paragraphs
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(order, ["1-2", "1-3", "1-1", "1-4"]);
        // Reader was on 1-1 and stays on it
        assert_eq!(session.current_paragraph().unwrap().id.as_str(), "1-1");

        assert_eq!(
            session.dispatch(ReaderEvent::Drop {
                episode_id: ep("1"),
                target_index: 0
            }),
            EventOutcome::Ignored(IgnoreReason::NoDragInProgress)
        );
    }

    #[test]
    fn test_update_paragraph_kind_mismatch_ignored() {
        let mut session = session();
        let outcome = session.dispatch(ReaderEvent::UpdateParagraph {
            episode_id: ep("1"),
            paragraph_id: para("1-2"),
            patch: ParagraphPatch::new().with_text("prose"),
        });
        assert_eq!(outcome, EventOutcome::Ignored(IgnoreReason::KindMismatch));
    }

    #[test]
    fn test_character_card() {
        let mut session = session();
        session.dispatch(ReaderEvent::ShowCharacter {
            character_id: CharacterId::new("2"),
        });
        let max = session.selected_character().unwrap();
        assert_eq!(max.name, "Max");
        assert_eq!(session.gallery_preview(max).len(), 2);

        assert_eq!(
            session.dispatch(ReaderEvent::ShowCharacter {
                character_id: CharacterId::new("7"),
            }),
            EventOutcome::Ignored(IgnoreReason::Unresolved)
        );
        session.dispatch(ReaderEvent::HideCharacter);
        assert!(session.selected_character().is_none());
    }
}
