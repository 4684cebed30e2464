use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::model::Prompt;
use crate::app::{App, Message, Model};
use crate::input::{self, Command};

impl App {
    pub(super) fn handle_event(&self, event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, model),
            Event::Mouse(mouse) => self.handle_mouse(mouse, model),
            Event::Paste(text) => self.handle_paste(text, model),
            Event::Resize(w, h) => Some(Message::Resize(w, h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if let Some(prompt) = &model.prompt {
            return prompt_key(key, prompt);
        }
        if let Some(ch) = input::text_for_key(key.code, key.modifiers) {
            return Some(Message::InsertText(ch.to_string()));
        }
        input::lookup(key.code, key.modifiers).map(command_message)
    }

    pub(super) fn handle_mouse(&self, mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.prompt.is_some() {
            return None;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(model.scroll_lines)),
            MouseEventKind::ScrollUp => model
                .viewport
                .can_scroll_up()
                .then_some(Message::ScrollUp(model.scroll_lines)),
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row >= model.viewport.height() {
                    return None;
                }
                let line = model.viewport.offset() + mouse.row as usize;
                let gutter = crate::ui::gutter_width(model.buffer.line_count());
                let col = mouse.column.saturating_sub(gutter) as usize;
                Some(Message::MoveTo(line, col))
            }
            _ => None,
        }
    }

    pub(super) fn handle_paste(&self, text: String, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        if let Some(prompt) = &model.prompt {
            // Paths are single-line; keep the first line of the paste.
            let first = text.lines().next().unwrap_or_default();
            return Some(Message::PromptInput(format!("{}{first}", prompt.input)));
        }
        (!text.is_empty()).then_some(Message::Paste(text))
    }
}

fn prompt_key(key: KeyEvent, prompt: &Prompt) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::PromptCancel),
        KeyCode::Enter => Some(Message::PromptSubmit),
        KeyCode::Backspace => {
            let mut next = prompt.input.clone();
            next.pop();
            Some(Message::PromptInput(next))
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::PromptCancel)
        }
        KeyCode::Char(c) if input::text_for_key(key.code, key.modifiers).is_some() => {
            let mut next = prompt.input.clone();
            next.push(c);
            Some(Message::PromptInput(next))
        }
        _ => None,
    }
}

const fn command_message(command: Command) -> Message {
    match command {
        Command::Move(motion) => Message::Move(motion),
        Command::SplitLine => Message::SplitLine,
        Command::DeleteBackward => Message::DeleteBackward,
        Command::DeleteForward => Message::DeleteForward,
        Command::PageUp => Message::PageUp,
        Command::PageDown => Message::PageDown,
        Command::Open => Message::Open,
        Command::Save => Message::Save,
        Command::SaveAs => Message::SaveAs,
        Command::Help => Message::ToggleHelp,
        Command::Quit => Message::Quit,
    }
}
