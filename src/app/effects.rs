use std::path::Path;

use crate::app::model::FileOp;
use crate::app::{App, Model, ToastLevel};
use crate::editor::LoadReport;

impl App {
    /// Carry out any file I/O `update` asked for.
    pub(super) fn handle_message_side_effects(&self, model: &mut Model) {
        let Some(op) = model.pending_file_op.take() else {
            return;
        };
        match op {
            FileOp::Open(path) => open_file(model, &path),
            FileOp::Save(path) => save_file(model, &path),
        }
    }

    /// Load the file named on the command line.
    ///
    /// A missing file starts an empty buffer that will be saved there.
    pub(super) fn open_initial_file(&self, model: &mut Model) {
        let Some(path) = self.file_path.as_deref() else {
            return;
        };
        if path.exists() {
            open_file(model, path);
        } else {
            tracing::info!(path = %path.display(), "starting new file");
            model.file_path = Some(path.to_path_buf());
            model.show_toast(ToastLevel::Info, format!("New file {}", path.display()));
        }
    }
}

pub(super) fn open_file(model: &mut Model, path: &Path) {
    let _scope = crate::perf::scope("file.open");
    match model.load_file(path) {
        Ok(report) => {
            tracing::info!(
                path = %path.display(),
                lines = report.lines,
                truncated = report.truncated,
                sanitized = report.sanitized,
                dropped = report.dropped,
                "opened file"
            );
            let level = if report.is_lossy() {
                ToastLevel::Warning
            } else {
                ToastLevel::Info
            };
            model.show_toast(level, open_summary(path, &report));
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "open failed");
            model.show_toast(ToastLevel::Error, format!("Open failed: {err:#}"));
        }
    }
}

pub(super) fn save_file(model: &mut Model, path: &Path) {
    let _scope = crate::perf::scope("file.save");
    match model.save_to(path) {
        Ok(()) => {
            let lines = model.buffer.line_count();
            tracing::info!(path = %path.display(), lines, "saved file");
            model.show_toast(
                ToastLevel::Info,
                format!("Saved {} ({lines} lines)", path.display()),
            );
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "save failed");
            model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
        }
    }
}

fn open_summary(path: &Path, report: &LoadReport) -> String {
    let mut summary = format!("Opened {} ({} lines)", path.display(), report.lines);
    if report.is_lossy() {
        let mut notes = Vec::new();
        if report.dropped > 0 {
            notes.push(format!("{} lines dropped", report.dropped));
        }
        if report.truncated > 0 {
            notes.push(format!("{} truncated", report.truncated));
        }
        if report.sanitized > 0 {
            notes.push(format!("{} with replaced characters", report.sanitized));
        }
        summary.push_str(": ");
        summary.push_str(&notes.join(", "));
    }
    summary
}
