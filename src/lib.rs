// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditError)
    clippy::module_name_repetitions
)]

//! # Gridpad
//!
//! A small terminal text editor over a fixed grid of lines.
//!
//! Gridpad edits plain ASCII text held in a bounded buffer: at most a fixed
//! number of lines, each shorter than a fixed capacity. Edits that would
//! break a bound are refused with a message and leave the text untouched.
//!
//! ## Architecture
//!
//! Gridpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`editor`]: The bounded text buffer and cursor
//! - [`document`]: Reading and writing flat text files
//! - [`input`]: Key bindings
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Persisted command-line defaults

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod input;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Cursor, EditError, Limits, Motion, TextBuffer};
    pub use crate::ui::viewport::Viewport;
}
