use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, Prompt, ToastLevel};

/// Text shown before the prompt's input.
pub fn prompt_prefix(prompt: &Prompt) -> String {
    format!("{}: ", prompt.kind.label())
}

pub fn render_prompt_bar(prompt: &Prompt, frame: &mut Frame, area: Rect) {
    let text = format!(
        "{}{}  Enter: confirm  Esc: cancel",
        prompt_prefix(prompt),
        prompt.input
    );
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let dirty_indicator = if model.buffer.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let cursor = model.buffer.cursor();
    let limits = model.buffer.limits();

    let status = format!(
        " {}{}  Ln {}, Col {}  {}/{} lines  F1:help",
        model.display_name(),
        dirty_indicator,
        cursor.line + 1,
        cursor.col + 1,
        model.buffer.line_count(),
        limits.max_lines()
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
