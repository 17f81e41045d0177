//! Key events routed from the grid into the active editor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    Enter,
    Tab,
    Escape,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    pub code: KeyCode,

    /// True while an input method composition is in progress
    #[serde(default)]
    pub is_composing: bool,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            is_composing: false,
        }
    }

    pub fn composing(code: KeyCode) -> Self {
        Self {
            code,
            is_composing: true,
        }
    }

    /// One event per character of `text`
    pub fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(|c| KeyEvent::new(KeyCode::Char(c))).collect()
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        KeyEvent::new(code)
    }
}
