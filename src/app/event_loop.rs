use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::supports_keyboard_enhancement;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::TextBuffer;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or the event
    /// loop hits an I/O failure. File open and save failures are shown in
    /// the UI and do not end the loop.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        // Initialize terminal
        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; gridpad requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        // Create initial model
        let mut model = Model::new(
            TextBuffer::new(self.limits),
            None,
            (size.width, size.height),
        );
        model.scroll_lines = self.scroll_lines;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        tracing::info!(
            width = size.width,
            height = size.height,
            max_lines = self.limits.max_lines(),
            line_capacity = self.limits.line_capacity(),
            "editor started"
        );
        self.open_initial_file(&mut model);

        // Lets Ctrl+Shift+S be told apart from Ctrl+S where the terminal can.
        let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .is_ok();
        tracing::debug!(enhanced_keys, "keyboard enhancement");

        // Main loop
        let result = execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBar
        )
        .context("Failed to configure terminal")
        .and_then(|()| self.event_loop(&mut terminal, &mut model));

        // Restore terminal
        if enhanced_keys {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
        ratatui::restore();

        result
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = self.handle_event(event::read()?, model) {
                    crate::perf::log_event("event.message", || {
                        format!("frame={frame_idx} msg={msg:?}")
                    });
                    self.dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = self.handle_event(event::read()?, model) {
                        drained += 1;
                        self.dispatch(model, msg);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event("event.drain", || {
                        format!("frame={frame_idx} drained={drained}")
                    });
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event("frame.draw", || {
                    format!(
                        "frame={} draw_ms={:.3} viewport={:?}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.viewport.visible_range()
                    )
                });
                needs_render = false;
            }

            if model.should_quit {
                tracing::info!(frames = frame_idx, "editor exiting");
                break;
            }
        }
        Ok(())
    }

    /// Apply one message: pure update, then any I/O it requested.
    fn dispatch(&self, model: &mut Model, msg: Message) {
        *model = update(std::mem::take(model), msg);
        self.handle_message_side_effects(model);
    }
}
