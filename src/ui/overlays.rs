use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    let limits = model.buffer.limits();

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    // Editing
    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(Line::raw("  Type / paste        Insert text"));
    all_lines.push(Line::raw("  Enter               Split line"));
    all_lines.push(Line::raw("  Backspace / Delete  Delete or join lines"));
    all_lines.push(Line::raw(""));

    // Cursor
    all_lines.push(Line::styled("Cursor", section_style));
    all_lines.push(Line::raw("  Arrows              Move"));
    all_lines.push(Line::raw("  Ctrl/Alt+Left/Right Word left / right"));
    all_lines.push(Line::raw("  Cmd+Left/Right      Line start / end"));
    all_lines.push(Line::raw("  Home / End          Line start / end"));
    all_lines.push(Line::raw("  Click               Place cursor"));
    all_lines.push(Line::raw("  Wheel, PgUp/PgDn    Scroll view"));
    all_lines.push(Line::raw(""));

    // Files
    all_lines.push(Line::styled("Files", section_style));
    all_lines.push(Line::raw("  Ctrl-o              Open file"));
    all_lines.push(Line::raw("  Ctrl-s              Save"));
    all_lines.push(Line::raw("  F12 / Ctrl-Shift-s  Save as"));
    all_lines.push(Line::raw("  Esc (in prompt)     Cancel"));
    all_lines.push(Line::raw(""));

    // Other
    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw("  Ctrl-q / Ctrl-c     Quit"));
    all_lines.push(Line::raw(""));

    // Config
    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!(
        "  Limits: {} lines, {} chars per line",
        limits.max_lines(),
        limits.max_line_len()
    )));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .take(content_height as usize)
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("Any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
