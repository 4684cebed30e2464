use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tempfile::tempdir;

use crate::editor::{Cursor, Limits, Motion, TextBuffer};

use super::model::FileOp;
use super::{App, Message, Model, Prompt, PromptKind, ToastLevel, update};

fn create_test_model() -> Model {
    let (buffer, _) = TextBuffer::from_lines(["hello world", "second"], Limits::default());
    Model::new(buffer, Some(PathBuf::from("test.txt")), (80, 24))
}

fn create_long_test_model() -> Model {
    let lines: Vec<String> = (0..100).map(|i| format!("Line {i}")).collect();
    let (buffer, _) = TextBuffer::from_lines(lines, Limits::default());
    Model::new(buffer, Some(PathBuf::from("long.txt")), (80, 24))
}

fn model_with_limits(lines: &[&str], max_lines: usize, line_capacity: usize) -> Model {
    let limits = Limits::new(max_lines, line_capacity).unwrap();
    let (buffer, _) = TextBuffer::from_lines(lines.iter().copied(), limits);
    Model::new(buffer, None, (80, 24))
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn wheel(kind: MouseEventKind) -> MouseEvent {
    MouseEvent {
        kind,
        column: 10,
        row: 5,
        modifiers: KeyModifiers::NONE,
    }
}

// --- Editing ---

#[test]
fn test_insert_text_updates_buffer_and_marks_dirty() {
    let model = update(create_test_model(), Message::InsertText("Hi ".to_string()));
    assert_eq!(model.buffer.line(0), Some("Hi hello world"));
    assert_eq!(model.buffer.cursor(), Cursor::at(0, 3));
    assert!(model.buffer.is_dirty());
    assert!(model.active_toast().is_none());
}

#[test]
fn test_rejected_insert_leaves_buffer_and_warns() {
    let model = model_with_limits(&["abcdefg"], 10, 8);
    let model = update(model, Message::InsertText("x".to_string()));

    assert_eq!(model.buffer.line(0), Some("abcdefg"));
    assert!(!model.buffer.is_dirty());
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);
    assert!(message.contains("capacity 8"), "toast: {message}");
}

#[test]
fn test_split_line_moves_cursor_to_new_line() {
    let mut model = create_test_model();
    model.buffer.move_to(0, 5);
    let model = update(model, Message::SplitLine);

    assert_eq!(model.buffer.lines(), ["hello", " world", "second"]);
    assert_eq!(model.buffer.cursor(), Cursor::at(1, 0));
    assert_eq!(model.viewport.total_lines(), 3);
}

#[test]
fn test_delete_backward_at_line_start_joins() {
    let mut model = create_test_model();
    model.buffer.move_to(1, 0);
    let model = update(model, Message::DeleteBackward);

    assert_eq!(model.buffer.lines(), ["hello worldsecond"]);
    assert_eq!(model.buffer.cursor(), Cursor::at(0, 11));
}

#[test]
fn test_delete_forward_join_overflow_is_reported() {
    let mut model = model_with_limits(&["abcd", "efgh"], 10, 8);
    model.buffer.move_to(0, 4);
    let model = update(model, Message::DeleteForward);

    assert_eq!(model.buffer.lines(), ["abcd", "efgh"]);
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Warning)
    );
}

#[test]
fn test_paste_splits_lines_and_normalizes_whitespace() {
    let model = model_with_limits(&[""], 10, 32);
    let model = update(model, Message::Paste("one\r\ntwo\tthree\nfour".to_string()));

    assert_eq!(model.buffer.lines(), ["one", "two three", "four"]);
    assert_eq!(model.buffer.cursor(), Cursor::at(2, 4));
}

#[test]
fn test_paste_stops_at_first_rejection() {
    let model = model_with_limits(&[""], 2, 32);
    let model = update(model, Message::Paste("a\nb\nc".to_string()));

    assert_eq!(model.buffer.lines(), ["a", "b"]);
    let (message, _) = model.active_toast().unwrap();
    assert!(message.contains("2 lines"), "toast: {message}");
}

#[test]
fn test_paste_with_trailing_newline_ends_on_fresh_line() {
    let model = model_with_limits(&[""], 10, 32);
    let model = update(model, Message::Paste("abc\n".to_string()));

    assert_eq!(model.buffer.lines(), ["abc", ""]);
    assert_eq!(model.buffer.cursor(), Cursor::at(1, 0));
}

// --- Cursor and scrolling ---

#[test]
fn test_cursor_motion_scrolls_to_keep_cursor_visible() {
    let mut model = create_long_test_model();
    for _ in 0..30 {
        model = update(model, Message::Move(Motion::Down));
    }
    assert_eq!(model.buffer.cursor().line, 30);
    // 23 text rows: line 30 sits on the bottom row
    assert_eq!(model.viewport.offset(), 8);

    for _ in 0..30 {
        model = update(model, Message::Move(Motion::Up));
    }
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_scroll_moves_view_not_cursor() {
    let model = update(create_long_test_model(), Message::ScrollDown(10));
    assert_eq!(model.viewport.offset(), 10);
    assert_eq!(model.buffer.cursor(), Cursor::at(0, 0));

    let model = update(model, Message::ScrollUp(4));
    assert_eq!(model.viewport.offset(), 6);
}

#[test]
fn test_typing_after_scroll_brings_cursor_back() {
    let model = update(create_long_test_model(), Message::ScrollDown(50));
    let model = update(model, Message::InsertText("x".to_string()));
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_page_down_and_up() {
    let model = update(create_long_test_model(), Message::PageDown);
    assert_eq!(model.viewport.offset(), 23);
    let model = update(model, Message::PageUp);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_move_to_clamps_into_document() {
    let model = update(create_test_model(), Message::MoveTo(9, 99));
    assert_eq!(model.buffer.cursor(), Cursor::at(1, 6));
}

#[test]
fn test_resize_reserves_status_row() {
    let model = update(create_long_test_model(), Message::Resize(100, 40));
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), 39);
}

#[test]
fn test_toast_shrinks_text_rows_and_keeps_cursor_on_screen() {
    let lines: Vec<String> = (0..30).map(|i| format!("full{i:03}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let model = model_with_limits(&refs, 30, 8);
    let model = update(model, Message::MoveTo(22, 7));
    assert_eq!(model.viewport.offset(), 0);

    let mut model = update(model, Message::InsertText("x".to_string()));
    assert_eq!(model.footer_rows(), 1);
    assert_eq!(model.viewport.height(), 22);
    assert_eq!(model.viewport.offset(), 1);
    assert!(model.viewport.visible_range().contains(&22));

    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert_eq!(model.viewport.height(), 23);
    assert_eq!(model.viewport.offset(), 1);
}

#[test]
fn test_toast_leaves_scrolled_view_alone() {
    let mut model = create_long_test_model();
    model.buffer.insert_text("x").unwrap();
    let model = update(model, Message::ScrollDown(50));
    let model = update(model, Message::Quit);
    assert_eq!(model.viewport.height(), 22);
    assert_eq!(model.viewport.offset(), 50);
}

#[test]
fn test_prompt_takes_a_text_row_until_closed() {
    let model = update(create_long_test_model(), Message::Open);
    assert_eq!(model.viewport.height(), 22);
    let model = update(model, Message::PromptInput("x.txt".to_string()));
    assert_eq!(model.viewport.height(), 22);
    // Cancelling swaps the prompt for a toast
    let model = update(model, Message::PromptCancel);
    assert_eq!(model.viewport.height(), 22);
}

// --- Files ---

#[test]
fn test_open_starts_prompt() {
    let model = update(create_test_model(), Message::Open);
    assert_eq!(
        model.prompt,
        Some(Prompt {
            kind: PromptKind::Open,
            input: String::new(),
        })
    );
}

#[test]
fn test_open_with_unsaved_changes_needs_confirmation() {
    let model = update(create_test_model(), Message::InsertText("x".to_string()));
    let model = update(model, Message::Open);
    assert!(model.prompt.is_none());
    assert!(model.open_confirmed);

    let model = update(model, Message::Open);
    assert_eq!(model.prompt.as_ref().map(|p| p.kind), Some(PromptKind::Open));
}

#[test]
fn test_prompt_submit_requests_open() {
    let model = update(create_test_model(), Message::Open);
    let model = update(model, Message::PromptInput("other.txt".to_string()));
    let model = update(model, Message::PromptSubmit);

    assert!(model.prompt.is_none());
    assert_eq!(
        model.pending_file_op(),
        Some(&FileOp::Open(PathBuf::from("other.txt")))
    );
}

#[test]
fn test_prompt_cancel_reports_no_file_selected() {
    let model = update(create_test_model(), Message::Open);
    let model = update(model, Message::PromptCancel);

    assert!(model.prompt.is_none());
    assert!(model.pending_file_op().is_none());
    assert_eq!(
        model.active_toast(),
        Some(("No file selected", ToastLevel::Info))
    );
}

#[test]
fn test_prompt_submit_empty_is_cancel() {
    let model = update(create_test_model(), Message::Open);
    let model = update(model, Message::PromptInput("   ".to_string()));
    let model = update(model, Message::PromptSubmit);

    assert!(model.pending_file_op().is_none());
    assert_eq!(
        model.active_toast(),
        Some(("No file selected", ToastLevel::Info))
    );
}

#[test]
fn test_save_with_path_requests_save() {
    let model = update(create_test_model(), Message::Save);
    assert_eq!(
        model.pending_file_op(),
        Some(&FileOp::Save(PathBuf::from("test.txt")))
    );
}

#[test]
fn test_save_without_path_prompts() {
    let model = Model::new(TextBuffer::default(), None, (80, 24));
    let model = update(model, Message::Save);
    assert!(model.pending_file_op().is_none());
    assert_eq!(model.prompt.as_ref().map(|p| p.kind), Some(PromptKind::SaveAs));
}

#[test]
fn test_save_as_prefills_current_path() {
    let model = update(create_test_model(), Message::SaveAs);
    assert_eq!(
        model.prompt,
        Some(Prompt {
            kind: PromptKind::SaveAs,
            input: "test.txt".to_string(),
        })
    );
}

#[test]
fn test_side_effect_saves_and_marks_clean() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let app = App::new(None);

    let mut model = update(create_test_model(), Message::InsertText("A".to_string()));
    model.pending_file_op = Some(FileOp::Save(path.clone()));
    app.handle_message_side_effects(&mut model);

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Ahello world\nsecond\n"
    );
    assert!(!model.buffer.is_dirty());
    assert_eq!(model.file_path.as_deref(), Some(path.as_path()));
    assert!(model.pending_file_op().is_none());
    assert_eq!(
        model.active_toast().map(|(_, level)| level),
        Some(ToastLevel::Info)
    );
}

#[test]
fn test_side_effect_opens_file_and_resets_cursor() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, "alpha\nbeta\ngamma\n").unwrap();
    let app = App::new(None);

    let mut model = create_test_model();
    model.buffer.move_to(1, 3);
    model.pending_file_op = Some(FileOp::Open(path.clone()));
    app.handle_message_side_effects(&mut model);

    assert_eq!(model.buffer.lines(), ["alpha", "beta", "gamma"]);
    assert_eq!(model.buffer.cursor(), Cursor::new());
    assert!(!model.buffer.is_dirty());
    assert_eq!(model.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(model.viewport.total_lines(), 3);
}

#[test]
fn test_failed_open_keeps_current_document() {
    let dir = tempdir().unwrap();
    let app = App::new(None);

    let mut model = update(create_test_model(), Message::InsertText("x".to_string()));
    let before = model.buffer.clone();
    model.pending_file_op = Some(FileOp::Open(dir.path().join("missing.txt")));
    app.handle_message_side_effects(&mut model);

    assert_eq!(model.buffer, before);
    assert_eq!(model.file_path, Some(PathBuf::from("test.txt")));
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.contains("missing.txt"), "toast: {message}");
}

#[test]
fn test_lossy_open_warns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.txt");
    std::fs::write(&path, "a\tb\n0123456789abc\n").unwrap();
    let app = App::new(None);

    let mut model = model_with_limits(&[""], 10, 8);
    model.pending_file_op = Some(FileOp::Open(path));
    app.handle_message_side_effects(&mut model);

    assert_eq!(model.buffer.lines(), ["a b", "0123456"]);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);
    assert!(message.contains("1 truncated"), "toast: {message}");
}

#[test]
fn test_initial_missing_file_becomes_save_target() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("new.txt");
    let app = App::new(Some(path.clone()));

    let mut model = Model::default();
    app.open_initial_file(&mut model);

    assert_eq!(model.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(model.buffer.lines(), [""]);
    assert!(!path.exists());
}

// --- Quit and help ---

#[test]
fn test_quit_clean_buffer_exits_immediately() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_dirty_buffer_needs_second_press() {
    let model = update(create_test_model(), Message::InsertText("x".to_string()));
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_other_message_resets_quit_confirmation() {
    let model = update(create_test_model(), Message::InsertText("x".to_string()));
    let model = update(model, Message::Quit);
    let model = update(model, Message::Move(Motion::Left));
    assert!(!model.quit_confirmed);

    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
}

#[test]
fn test_save_preserves_quit_confirmation() {
    let model = update(create_test_model(), Message::InsertText("x".to_string()));
    let model = update(model, Message::Quit);
    let model = update(model, Message::Save);
    assert!(model.quit_confirmed);
}

#[test]
fn test_toggle_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_toast_expires() {
    let mut model = update(create_test_model(), Message::Open);
    model = update(model, Message::PromptCancel);
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

// --- Input mapping ---

#[test]
fn test_printable_key_inserts_text() {
    let app = App::new(None);
    let model = create_test_model();
    assert_eq!(
        app.handle_key(key(KeyCode::Char('a'), KeyModifiers::NONE), &model),
        Some(Message::InsertText("a".to_string()))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT), &model),
        Some(Message::InsertText("A".to_string()))
    );
}

#[test]
fn test_modified_keys_dispatch_through_bindings() {
    let app = App::new(None);
    let model = create_test_model();
    assert_eq!(
        app.handle_key(key(KeyCode::Left, KeyModifiers::CONTROL), &model),
        Some(Message::Move(Motion::WordLeft))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Right, KeyModifiers::SUPER), &model),
        Some(Message::Move(Motion::LineEnd))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL), &model),
        Some(Message::Save)
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Char('o'), KeyModifiers::CONTROL), &model),
        Some(Message::Open)
    );
    assert_eq!(
        app.handle_key(key(KeyCode::F(1), KeyModifiers::NONE), &model),
        Some(Message::ToggleHelp)
    );
    assert_eq!(
        app.handle_key(key(KeyCode::F(12), KeyModifiers::NONE), &model),
        Some(Message::SaveAs)
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL), &model),
        None
    );
}

#[test]
fn test_any_key_closes_help() {
    let app = App::new(None);
    let mut model = create_test_model();
    model.help_visible = true;
    assert_eq!(
        app.handle_key(key(KeyCode::Char('a'), KeyModifiers::NONE), &model),
        Some(Message::HideHelp)
    );
}

#[test]
fn test_prompt_captures_keys() {
    let app = App::new(None);
    let mut model = create_test_model();
    model.prompt = Some(Prompt {
        kind: PromptKind::Open,
        input: "ab".to_string(),
    });

    assert_eq!(
        app.handle_key(key(KeyCode::Char('c'), KeyModifiers::NONE), &model),
        Some(Message::PromptInput("abc".to_string()))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Backspace, KeyModifiers::NONE), &model),
        Some(Message::PromptInput("a".to_string()))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Enter, KeyModifiers::NONE), &model),
        Some(Message::PromptSubmit)
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::PromptCancel)
    );
    assert_eq!(
        app.handle_key(key(KeyCode::Left, KeyModifiers::NONE), &model),
        None
    );
}

#[test]
fn test_key_release_is_ignored() {
    let app = App::new(None);
    let model = create_test_model();
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('a'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert_eq!(app.handle_event(Event::Key(release), &model), None);
}

#[test]
fn test_click_maps_to_buffer_position() {
    let app = App::new(None);
    let model = create_test_model();
    // Gutter is "N " (2 columns) for a two-line buffer
    assert_eq!(
        app.handle_mouse(click(5, 1), &model),
        Some(Message::MoveTo(1, 3))
    );
    assert_eq!(
        app.handle_mouse(click(0, 0), &model),
        Some(Message::MoveTo(0, 0))
    );
}

#[test]
fn test_click_accounts_for_scroll_offset() {
    let app = App::new(None);
    let mut model = create_long_test_model();
    model.viewport.scroll_down(40);
    assert_eq!(
        app.handle_mouse(click(3, 2), &model),
        Some(Message::MoveTo(42, 0))
    );
}

#[test]
fn test_click_on_status_row_is_ignored() {
    let app = App::new(None);
    let model = create_test_model();
    assert_eq!(app.handle_mouse(click(5, 23), &model), None);
}

#[test]
fn test_click_on_toast_row_is_ignored() {
    let app = App::new(None);
    let model = update(create_long_test_model(), Message::Open);
    let model = update(model, Message::PromptCancel);
    assert_eq!(app.handle_mouse(click(5, 22), &model), None);
    assert_eq!(
        app.handle_mouse(click(5, 21), &model),
        Some(Message::MoveTo(21, 1))
    );
}

#[test]
fn test_wheel_scrolls_by_configured_lines() {
    let app = App::new(None);
    let mut model = create_long_test_model();
    model.scroll_lines = 5;
    assert_eq!(
        app.handle_mouse(wheel(MouseEventKind::ScrollDown), &model),
        Some(Message::ScrollDown(5))
    );
    assert_eq!(
        app.handle_mouse(wheel(MouseEventKind::ScrollUp), &model),
        None
    );
}

#[test]
fn test_wheel_on_short_buffer_is_ignored() {
    let app = App::new(None);
    let model = create_test_model();
    assert_eq!(
        app.handle_mouse(wheel(MouseEventKind::ScrollDown), &model),
        None
    );
}

#[test]
fn test_paste_event_maps_to_paste_message() {
    let app = App::new(None);
    let model = create_test_model();
    assert_eq!(
        app.handle_event(Event::Paste("a\nb".to_string()), &model),
        Some(Message::Paste("a\nb".to_string()))
    );
}

#[test]
fn test_paste_into_prompt_keeps_first_line() {
    let app = App::new(None);
    let mut model = create_test_model();
    model.prompt = Some(Prompt {
        kind: PromptKind::SaveAs,
        input: "dir/".to_string(),
    });
    assert_eq!(
        app.handle_event(Event::Paste("file.txt\nextra".to_string()), &model),
        Some(Message::PromptInput("dir/file.txt".to_string()))
    );
}
