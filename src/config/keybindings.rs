//! Keyboard bindings.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Vim-style defaults plus arrows and paging keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Uppercase letters are matched with or without an explicit SHIFT modifier, since
    /// terminals disagree on whether they report it.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let normalized = match key.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                KeyEvent::new(key.code, key.modifiers | KeyModifiers::SHIFT)
            }
            _ => KeyEvent::new(key.code, key.modifiers),
        };
        self.bindings.get(&normalized).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let table = [
            (KeyCode::Char('j'), none, KeyAction::ScrollDown),
            (KeyCode::Down, none, KeyAction::ScrollDown),
            (KeyCode::Char('k'), none, KeyAction::ScrollUp),
            (KeyCode::Up, none, KeyAction::ScrollUp),
            (KeyCode::Char('d'), ctrl, KeyAction::PageDown),
            (KeyCode::PageDown, none, KeyAction::PageDown),
            (KeyCode::Char(' '), none, KeyAction::PageDown),
            (KeyCode::Char('u'), ctrl, KeyAction::PageUp),
            (KeyCode::PageUp, none, KeyAction::PageUp),
            (KeyCode::Char('g'), none, KeyAction::ScrollToTop),
            (KeyCode::Home, none, KeyAction::ScrollToTop),
            (KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom),
            (KeyCode::End, none, KeyAction::ScrollToBottom),
            (KeyCode::Char('t'), none, KeyAction::CycleTheme),
            (KeyCode::Char('q'), none, KeyAction::Close),
            (KeyCode::Esc, none, KeyAction::Close),
            (KeyCode::Char('c'), ctrl, KeyAction::Close),
        ];

        let bindings = table
            .into_iter()
            .map(|(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();
        Self { bindings }
    }
}
