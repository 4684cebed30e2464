//! Flat-text persistence.
//!
//! A document on disk is its lines joined by `\n`, each line terminated.
//! Reading never touches an editor buffer, so a failed read leaves the
//! open document as it was.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a file as a list of lines.
///
/// A final line terminator does not produce an extra empty line; an empty
/// file is one empty line. Invalid UTF-8 is decoded lossily.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(split_lines(&bytes))
}

/// Write lines to a file, each followed by `\n`.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, join_lines(lines))
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Split raw file bytes into lines.
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}

/// Join lines into the on-disk text form.
pub fn join_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
