//! Characters and the read-only character registry

use crate::{CharacterId, DialogLine};
use serde::{Deserialize, Serialize};

/// A character that can speak in dialog paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    /// Avatar image locator
    pub avatar: String,
    /// Gallery image locators, in display order
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl Character {
    /// Create a character with an empty gallery
    pub fn new(
        id: impl Into<CharacterId>,
        name: impl Into<String>,
        description: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            avatar: avatar.into(),
            gallery: Vec::new(),
        }
    }

    /// Add a gallery image
    pub fn with_gallery_image(mut self, image: impl Into<String>) -> Self {
        self.gallery.push(image.into());
        self
    }

    /// First letter of the name, shown when the avatar cannot be displayed
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }

    /// The first `count` gallery images
    pub fn gallery_preview(&self, count: usize) -> &[String] {
        &self.gallery[..count.min(self.gallery.len())]
    }
}

/// Display identity of the speaker of a dialog line.
///
/// Every field is absent when the line names a character that is not in
/// the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Speaker<'a> {
    pub name: Option<&'a str>,
    pub avatar: Option<&'a str>,
    pub initial: Option<char>,
}

/// Fixed lookup table of characters, created once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRegistry {
    characters: Vec<Character>,
}

impl CharacterRegistry {
    /// Build a registry from characters in display order
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Look up a character by id
    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    /// Resolve the speaker of a dialog line
    pub fn speaker(&self, line: &DialogLine) -> Speaker<'_> {
        match self.get(&line.character_id) {
            Some(character) => Speaker {
                name: Some(&character.name),
                avatar: Some(&character.avatar),
                initial: character.initial(),
            },
            None => Speaker::default(),
        }
    }

    /// All characters in display order
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
