//! Reader Engine - Navigation, authoring, and event dispatch
//!
//! This crate drives a story from the `story_model` crate: it tracks the
//! reader's position, applies authoring edits, handles drag-and-drop
//! reordering, and routes presentation-layer events through a single
//! `ReaderSession`.

mod error;
mod settings;
mod navigation;
mod reorder;
mod authoring;
mod event;
mod session;

pub use error::*;
pub use settings::*;
pub use navigation::*;
pub use reorder::*;
pub use authoring::*;
pub use event::*;
pub use session::*;
