use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;

use super::{overlays, status};

/// Render the complete UI.
///
/// The bottom row is the status bar. A toast and the path prompt, when
/// present, sit directly above it and the text area ends above them.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let (body, status_area) = split_status_row(area);

    let mut footer_bottom = body.y + body.height;
    let mut prompt_row = None;
    if let Some(prompt) = &model.prompt
        && let Some(row) = footer_row(body, &mut footer_bottom)
    {
        status::render_prompt_bar(prompt, frame, row);
        prompt_row = Some(row);
    }
    if model.active_toast().is_some()
        && let Some(row) = footer_row(body, &mut footer_bottom)
    {
        status::render_toast_bar(model, frame, row);
    }
    let text_area = Rect {
        height: footer_bottom - body.y,
        ..body
    };
    render_text(model, frame, text_area);
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
        return;
    }

    let cursor = match (&model.prompt, prompt_row) {
        (Some(prompt), Some(row)) => {
            let typed = status::prompt_prefix(prompt).len() + prompt.input.len();
            Some(Position::new(clamp_column(row, typed), row.y))
        }
        (Some(_), None) => None,
        (None, _) => cursor_screen_position(model, text_area),
    };
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

fn split_status_row(area: Rect) -> (Rect, Rect) {
    let status_height = area.height.min(1);
    let text_area = Rect {
        height: area.height - status_height,
        ..area
    };
    let status_area = Rect {
        y: area.y + text_area.height,
        height: status_height,
        ..area
    };
    (text_area, status_area)
}

/// Claim the next free row above `bottom` inside `area`.
fn footer_row(area: Rect, bottom: &mut u16) -> Option<Rect> {
    if *bottom <= area.y {
        return None;
    }
    *bottom -= 1;
    Some(Rect {
        y: *bottom,
        height: 1,
        ..area
    })
}

/// Draw the visible lines with their line-number gutter.
///
/// Only lines inside the viewport are laid out.
fn render_text(model: &Model, frame: &mut Frame, area: Rect) {
    let total_lines = model.buffer.line_count();
    let number_width = line_number_width(total_lines) as usize;
    let range = model.viewport.visible_range();

    let content: Vec<Line> = range
        .take(area.height as usize)
        .map(|line_idx| {
            let line_num = format!("{:>number_width$} ", line_idx + 1);
            let text = model.buffer.line(line_idx).unwrap_or_default();
            Line::from(vec![
                Span::styled(line_num, Style::default().fg(Color::DarkGray)),
                Span::raw(text),
            ])
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Screen cell for the bar cursor, or `None` when its line is scrolled away.
///
/// Columns past the right edge are pinned to the last column.
pub fn cursor_screen_position(model: &Model, area: Rect) -> Option<Position> {
    let cursor = model.buffer.cursor();
    let range = model.viewport.visible_range();
    if !range.contains(&cursor.line) {
        return None;
    }
    let row = u16::try_from(cursor.line - range.start).ok()?;
    if row >= area.height {
        return None;
    }
    let col = gutter_width(model.buffer.line_count()) as usize + cursor.col;
    Some(Position::new(clamp_column(area, col), area.y + row))
}

fn clamp_column(area: Rect, col: usize) -> u16 {
    let last = area.width.saturating_sub(1);
    area.x + u16::try_from(col).unwrap_or(u16::MAX).min(last)
}

/// Columns taken by the line numbers plus their separator.
pub const fn gutter_width(total_lines: usize) -> u16 {
    line_number_width(total_lines) + 1
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else {
        5
    }
}
