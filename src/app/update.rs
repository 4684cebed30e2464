use std::path::PathBuf;

use crate::app::model::{FileOp, Prompt, PromptKind};
use crate::app::{Model, ToastLevel};
use crate::editor::{EditError, Motion};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert typed text at the cursor
    InsertText(String),
    /// Insert pasted text, splitting lines at each newline
    Paste(String),
    /// Split line at cursor (Enter)
    SplitLine,
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character at cursor (Delete)
    DeleteForward,

    // Cursor
    /// Move cursor by a motion
    Move(Motion),
    /// Move cursor to a buffer position, clamped (mouse click)
    MoveTo(usize, usize),

    // Scrolling
    /// Scroll view up by n lines without moving the cursor
    ScrollUp(usize),
    /// Scroll view down by n lines without moving the cursor
    ScrollDown(usize),
    PageUp,
    PageDown,

    // Files
    /// Ask for a file to open
    Open,
    /// Save to the current path, or ask for one
    Save,
    /// Ask for a path and save there
    SaveAs,
    /// Replace the prompt's text
    PromptInput(String),
    /// Accept the prompt's path
    PromptSubmit,
    /// Dismiss the prompt without choosing a file
    PromptCancel,

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File I/O is only requested here, through `pending_file_op`; the event
/// loop performs it after `update` returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::Open) {
        model.open_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertText(text) => {
            let result = model.buffer.insert_text(&text);
            report_edit(&mut model, result);
            model.follow_cursor();
        }
        Message::Paste(text) => {
            paste(&mut model, &text);
            model.follow_cursor();
        }
        Message::SplitLine => {
            let result = model.buffer.split_line();
            report_edit(&mut model, result);
            model.follow_cursor();
        }
        Message::DeleteBackward => {
            let result = model.buffer.delete_backward().map(|_| ());
            report_edit(&mut model, result);
            model.follow_cursor();
        }
        Message::DeleteForward => {
            let result = model.buffer.delete_forward().map(|_| ());
            report_edit(&mut model, result);
            model.follow_cursor();
        }

        // Cursor
        Message::Move(motion) => {
            model.buffer.move_cursor(motion);
            model.follow_cursor();
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            model.follow_cursor();
        }

        // Scrolling
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),

        // Files
        Message::Open => {
            if model.buffer.is_dirty() && !model.open_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+O again to open another file anyway",
                );
                model.open_confirmed = true;
            } else {
                model.open_confirmed = false;
                start_prompt(&mut model, PromptKind::Open);
            }
        }
        Message::Save => match model.file_path.clone() {
            Some(path) => model.pending_file_op = Some(FileOp::Save(path)),
            None => start_prompt(&mut model, PromptKind::SaveAs),
        },
        Message::SaveAs => start_prompt(&mut model, PromptKind::SaveAs),
        Message::PromptInput(input) => {
            if let Some(prompt) = model.prompt.as_mut() {
                prompt.input = input;
            }
        }
        Message::PromptSubmit => {
            if let Some(prompt) = model.prompt.take() {
                let input = prompt.input.trim();
                if input.is_empty() {
                    no_file_selected(&mut model);
                } else {
                    let path = PathBuf::from(input);
                    model.pending_file_op = Some(match prompt.kind {
                        PromptKind::Open => FileOp::Open(path),
                        PromptKind::SaveAs => FileOp::Save(path),
                    });
                }
            }
        }
        Message::PromptCancel => {
            if model.prompt.take().is_some() {
                no_file_selected(&mut model);
            }
        }

        // Window
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Resize(width, height) => {
            model.resize_terminal(width, height);
            model.follow_cursor();
        }

        // Application
        Message::Quit => {
            if model.buffer.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    // Opening or closing the prompt changes the rows left for text.
    model.sync_layout();
    model
}

fn start_prompt(model: &mut Model, kind: PromptKind) {
    let input = match kind {
        PromptKind::Open => String::new(),
        PromptKind::SaveAs => model
            .file_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
    };
    model.help_visible = false;
    model.prompt = Some(Prompt { kind, input });
}

fn no_file_selected(model: &mut Model) {
    tracing::info!("file prompt dismissed");
    model.show_toast(ToastLevel::Info, "No file selected");
}

/// Surface a rejected edit. The buffer is already unchanged.
fn report_edit(model: &mut Model, result: Result<(), EditError>) {
    if let Err(err) = result {
        tracing::warn!(error = %err, cursor = ?model.buffer.cursor(), "edit rejected");
        model.show_toast(ToastLevel::Warning, capitalize(&err.to_string()));
    }
}

/// Apply pasted text as a run of inserts and splits, stopping at the
/// first rejected step. Steps applied before the rejection are kept.
fn paste(model: &mut Model, text: &str) {
    let text = text.replace('\t', " ");
    for (idx, segment) in text.split('\n').enumerate() {
        let segment = segment.strip_suffix('\r').unwrap_or(segment);
        let step = if idx == 0 {
            Ok(())
        } else {
            model.buffer.split_line()
        }
        .and_then(|()| model.buffer.insert_text(segment));
        if step.is_err() {
            report_edit(model, step);
            return;
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
