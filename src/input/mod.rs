//! Key bindings.
//!
//! Modifiers are collapsed into a [`ModifierClass`] and looked up together
//! with the key code in a single dispatch table, once per key-down event.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::editor::Motion;

/// How a key's modifiers change its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierClass {
    /// No modifier, or Shift only.
    Plain,
    /// Ctrl or Alt: word-wise motions and application shortcuts.
    Word,
    /// Super, Hyper or Meta: line-boundary motions.
    Line,
}

impl ModifierClass {
    pub const fn from_modifiers(modifiers: KeyModifiers) -> Self {
        let line = KeyModifiers::SUPER
            .union(KeyModifiers::HYPER)
            .union(KeyModifiers::META);
        let word = KeyModifiers::CONTROL.union(KeyModifiers::ALT);
        if modifiers.intersects(line) {
            Self::Line
        } else if modifiers.intersects(word) {
            Self::Word
        } else {
            Self::Plain
        }
    }
}

/// Editor command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Motion),
    SplitLine,
    DeleteBackward,
    DeleteForward,
    PageUp,
    PageDown,
    Open,
    Save,
    SaveAs,
    Help,
    Quit,
}

use ModifierClass::{Line, Plain, Word};

const BINDINGS: &[(KeyCode, ModifierClass, Command)] = &[
    // Character and line steps
    (KeyCode::Left, Plain, Command::Move(Motion::Left)),
    (KeyCode::Right, Plain, Command::Move(Motion::Right)),
    (KeyCode::Up, Plain, Command::Move(Motion::Up)),
    (KeyCode::Down, Plain, Command::Move(Motion::Down)),
    // Word steps
    (KeyCode::Left, Word, Command::Move(Motion::WordLeft)),
    (KeyCode::Right, Word, Command::Move(Motion::WordRight)),
    // Line boundaries
    (KeyCode::Left, Line, Command::Move(Motion::LineStart)),
    (KeyCode::Right, Line, Command::Move(Motion::LineEnd)),
    (KeyCode::Home, Plain, Command::Move(Motion::LineStart)),
    (KeyCode::End, Plain, Command::Move(Motion::LineEnd)),
    // Editing
    (KeyCode::Enter, Plain, Command::SplitLine),
    (KeyCode::Backspace, Plain, Command::DeleteBackward),
    (KeyCode::Delete, Plain, Command::DeleteForward),
    // Scrolling
    (KeyCode::PageUp, Plain, Command::PageUp),
    (KeyCode::PageDown, Plain, Command::PageDown),
    // Files
    (KeyCode::Char('o'), Word, Command::Open),
    (KeyCode::Char('o'), Line, Command::Open),
    (KeyCode::Char('s'), Word, Command::Save),
    (KeyCode::Char('s'), Line, Command::Save),
    (KeyCode::Char('S'), Word, Command::SaveAs),
    (KeyCode::Char('S'), Line, Command::SaveAs),
    // Legacy terminals send Ctrl+Shift+S as plain Ctrl+S
    (KeyCode::F(12), Plain, Command::SaveAs),
    // Application
    (KeyCode::F(1), Plain, Command::Help),
    (KeyCode::Char('q'), Word, Command::Quit),
    (KeyCode::Char('c'), Word, Command::Quit),
];

/// Look up the command bound to a key-down event.
///
/// Terminals with the keyboard enhancement protocol report Ctrl+Shift+S as
/// a lowercase `s` with SHIFT set, so shifted letters are uppercased first.
pub fn lookup(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    let code = match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::SHIFT) => {
            KeyCode::Char(c.to_ascii_uppercase())
        }
        other => other,
    };
    let class = ModifierClass::from_modifiers(modifiers);
    BINDINGS
        .iter()
        .find(|(key, bound_class, _)| *key == code && *bound_class == class)
        .map(|(_, _, command)| *command)
}

/// The character a key types, if it is plain text input.
pub fn text_for_key(code: KeyCode, modifiers: KeyModifiers) -> Option<char> {
    match code {
        KeyCode::Char(c) if ModifierClass::from_modifiers(modifiers) == Plain => Some(c),
        _ => None,
    }
}
