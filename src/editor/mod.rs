//! Line-grid text buffer with cursor management.
//!
//! The buffer holds a bounded sequence of bounded ASCII lines and keeps
//! the cursor consistent across every edit. Capacity violations are
//! reported as [`EditError`] and never change the buffer.

mod buffer;
mod error;

pub use buffer::{
    Cursor, DEFAULT_LINE_CAPACITY, DEFAULT_MAX_LINES, Limits, LoadReport, Motion, TextBuffer,
};
pub use error::EditError;
