//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{FileOp, Model, Prompt, PromptKind, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::editor::Limits;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    limits: Limits,
    scroll_lines: usize,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application, optionally editing `file_path`.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            limits: Limits::default(),
            scroll_lines: 3,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set the buffer size caps.
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set how many lines one mouse wheel notch scrolls.
    pub fn with_scroll_lines(mut self, lines: usize) -> Self {
        self.scroll_lines = lines.max(1);
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
