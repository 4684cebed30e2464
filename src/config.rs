use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::editor::{DEFAULT_LINE_CAPACITY, DEFAULT_MAX_LINES, Limits};

/// Lines scrolled per mouse wheel notch when nothing is configured.
pub const DEFAULT_SCROLL_LINES: usize = 3;

/// Flags that can be persisted in a config file.
///
/// Config files hold the same `--flag value` tokens as the command line,
/// one or more per line, with `#` comments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub max_lines: Option<usize>,
    pub line_capacity: Option<usize>,
    pub scroll_lines: Option<usize>,
    pub perf: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Values set in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            max_lines: other.max_lines.or(self.max_lines),
            line_capacity: other.line_capacity.or(self.line_capacity),
            scroll_lines: other.scroll_lines.or(self.scroll_lines),
            perf: self.perf || other.perf,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Buffer limits with defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured limits leave no room to edit.
    pub fn limits(&self) -> Result<Limits> {
        let max_lines = self.max_lines.unwrap_or(DEFAULT_MAX_LINES);
        let line_capacity = self.line_capacity.unwrap_or(DEFAULT_LINE_CAPACITY);
        Limits::new(max_lines, line_capacity).context("Invalid buffer limits")
    }

    pub fn scroll_lines(&self) -> usize {
        self.scroll_lines.unwrap_or(DEFAULT_SCROLL_LINES).max(1)
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("gridpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("gridpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("gridpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("gridpad")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".gridpadrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# gridpad defaults (saved with --save)".to_string());
    if let Some(max_lines) = flags.max_lines {
        lines.push(format!("--max-lines {max_lines}"));
    }
    if let Some(line_capacity) = flags.line_capacity {
        lines.push(format!("--line-capacity {line_capacity}"));
    }
    if let Some(scroll_lines) = flags.scroll_lines {
        lines.push(format!("--scroll-lines {scroll_lines}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick persisted flags out of a token list. Unknown tokens and values
/// that fail to parse are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--perf" {
            flags.perf = true;
        } else if let Some((name, inline)) = split_valued(token) {
            let value = match inline {
                Some(value) => Some(value),
                None => {
                    i += 1;
                    tokens.get(i).map(String::as_str)
                }
            };
            if let Some(value) = value {
                apply_value(&mut flags, name, value);
            }
        }
        i += 1;
    }
    flags
}

const VALUED_FLAGS: [&str; 4] = ["--max-lines", "--line-capacity", "--scroll-lines", "--log-file"];

/// Match `--name value` and `--name=value` forms of a valued flag.
fn split_valued(token: &str) -> Option<(&str, Option<&str>)> {
    VALUED_FLAGS.iter().find_map(|&name| {
        if token == name {
            Some((name, None))
        } else {
            token
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|value| (name, Some(value)))
        }
    })
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--max-lines" => flags.max_lines = value.parse().ok(),
        "--line-capacity" => flags.line_capacity = value.parse().ok(),
        "--scroll-lines" => flags.scroll_lines = value.parse().ok(),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
