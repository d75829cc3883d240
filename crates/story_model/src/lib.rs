//! Story Model - Episodes, paragraphs, characters, and bookmarks
//!
//! This crate owns the narrative content of the reader: an ordered list of
//! episodes, each an ordered list of paragraphs, plus the fixed character
//! registry and the set of reader bookmarks that point into the content.

mod ids;
mod error;
mod character;
mod paragraph;
mod episode;
mod content_store;
mod bookmark;
pub mod sample;

pub use ids::*;
pub use error::*;
pub use character::*;
pub use paragraph::*;
pub use episode::*;
pub use content_store::*;
pub use bookmark::*;
