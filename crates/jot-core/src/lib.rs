//! Core editing engine for jot.
//!
//! Everything here is state and arithmetic, no I/O: the text buffer and
//! its mutation primitives, the bounded undo history, the mode state
//! machine driven by logical input events, and the viewport scroll
//! model. The terminal and file storage live in the `jot-tui` crate,
//! behind the [`DocumentStore`] seam.

pub mod buffer;
pub mod editor;
pub mod history;
pub mod keymap;
pub mod viewport;

pub use buffer::{BufferSnapshot, Cursor, TextBuffer};
pub use editor::{DocumentStore, Editor, EditorAction, Mode};
pub use keymap::{Input, map_key};
pub use viewport::{Viewport, gutter_width};
