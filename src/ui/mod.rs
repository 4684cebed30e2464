//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - the text area with its line-number gutter and bar cursor
//! - the status, toast and prompt bars, and the help overlay

pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{cursor_screen_position, gutter_width, line_number_width, render};
