use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::editor::{LoadReport, TextBuffer};
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What the bottom-line path prompt is collecting a path for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs,
}

impl PromptKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::SaveAs => "Save as",
        }
    }
}

/// An in-progress path prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// File I/O requested by `update` and carried out by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOp {
    Open(PathBuf),
    Save(PathBuf),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The text being edited
    pub buffer: TextBuffer,
    /// Which lines are on screen
    pub viewport: Viewport,
    /// Target of Ctrl+S; `None` until a file is opened or saved
    pub file_path: Option<PathBuf>,
    /// Active path prompt, if any
    pub prompt: Option<Prompt>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Lines moved per mouse wheel notch
    pub scroll_lines: usize,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Quit was pressed once with unsaved changes
    pub quit_confirmed: bool,
    /// Open was requested once with unsaved changes
    pub open_confirmed: bool,
    pub(super) pending_file_op: Option<FileOp>,
    toast: Option<Toast>,
    terminal_size: (u16, u16),
}

impl Model {
    /// Create a model around `buffer` for a terminal of the given size.
    ///
    /// The bottom terminal row is reserved for the status bar. The toast and
    /// prompt bars take further rows off the text area while they show.
    pub fn new(buffer: TextBuffer, file_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        let total_lines = buffer.line_count();
        Self {
            buffer,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(1),
                total_lines,
            ),
            file_path,
            prompt: None,
            help_visible: false,
            scroll_lines: 3,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            quit_confirmed: false,
            open_confirmed: false,
            pending_file_op: None,
            toast: None,
            terminal_size,
        }
    }

    /// Name shown in the status bar.
    pub fn display_name(&self) -> String {
        self.file_path.as_deref().map_or_else(
            || "[No Name]".to_string(),
            |path| {
                path.file_name()
                    .unwrap_or(path.as_os_str())
                    .to_string_lossy()
                    .into_owned()
            },
        )
    }

    /// Keep the viewport in step with the buffer and the cursor on screen.
    pub(super) fn follow_cursor(&mut self) {
        self.viewport.set_total_lines(self.buffer.line_count());
        self.viewport.ensure_visible(self.buffer.cursor().line);
    }

    /// Rows above the status bar taken by the prompt and toast bars.
    pub fn footer_rows(&self) -> u16 {
        u16::from(self.prompt.is_some()) + u16::from(self.toast.is_some())
    }

    pub(super) fn resize_terminal(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.sync_layout();
    }

    /// Fit the viewport to the rows left over by the status and footer bars.
    ///
    /// A cursor that was on screen stays on screen when the text area
    /// shrinks; one scrolled away by the wheel is left where it is.
    pub(super) fn sync_layout(&mut self) {
        let (width, height) = self.terminal_size;
        let rows = height.saturating_sub(1 + self.footer_rows());
        if (width, rows) == (self.viewport.width(), self.viewport.height()) {
            return;
        }
        let cursor_line = self.buffer.cursor().line;
        let was_visible = self.viewport.visible_range().contains(&cursor_line);
        self.viewport.resize(width, rows);
        if was_visible {
            self.viewport.ensure_visible(cursor_line);
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
        self.sync_layout();
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            self.sync_layout();
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub fn pending_file_op(&self) -> Option<&FileOp> {
        self.pending_file_op.as_ref()
    }

    /// Replace the buffer with the contents of `path`.
    ///
    /// The file is read in full before the buffer is touched, so a failed
    /// read leaves the current text, cursor and path unchanged.
    pub(super) fn load_file(&mut self, path: &Path) -> Result<LoadReport> {
        let lines = crate::document::read_lines(path)?;
        let report = self.buffer.load_lines(lines);
        self.file_path = Some(path.to_path_buf());
        self.viewport.set_total_lines(self.buffer.line_count());
        self.viewport.go_to_top();
        Ok(report)
    }

    /// Write the buffer to `path` and make it the save target.
    pub(super) fn save_to(&mut self, path: &Path) -> Result<()> {
        crate::document::save_lines(path, &self.buffer.serialize())?;
        self.buffer.mark_clean();
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(TextBuffer::default(), None, (80, 24))
    }
}
