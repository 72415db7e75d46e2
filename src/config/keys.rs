//! Keybinding types and vim-style key notation ("C-x", "<CR>", "<Space>")

use std::collections::HashMap;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::action::Action;
use crate::ui::events::Focus;

/// A key code plus modifiers, as stored in the binding maps
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalize a terminal key event to the parsed form.
    ///
    /// Uppercase letters become lowercase + SHIFT whether or not the
    /// terminal reported SHIFT, so "R" in a binding matches both Shift+r
    /// and Caps Lock.
    pub fn from_key_event(event: &KeyEvent) -> Self {
        match event.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self::new(
                KeyCode::Char(c.to_ascii_lowercase()),
                event.modifiers | KeyModifiers::SHIFT,
            ),
            code => Self::new(code, event.modifiers),
        }
    }
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_notation(s)
    }
}

/// Binding table selected by which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Playback shortcuts
    Transcript,
    /// Text editing
    Composer,
}

impl KeyContext {
    pub fn from_focus(focus: Focus) -> Self {
        match focus {
            Focus::Transcript => KeyContext::Transcript,
            Focus::Composer => KeyContext::Composer,
        }
    }
}

/// Global bindings plus one map per context
#[derive(Debug, Clone, Default)]
pub struct KeybindingConfig {
    pub global: HashMap<KeyCombo, Action>,
    pub context: HashMap<KeyContext, HashMap<KeyCombo, Action>>,
}

impl KeybindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bindings shadow global ones
    pub fn get_action(&self, key: &KeyCombo, context: KeyContext) -> Option<&Action> {
        self.context
            .get(&context)
            .and_then(|bindings| bindings.get(key))
            .or_else(|| self.global.get(key))
    }

    /// Overlay `other` on top of these bindings
    pub fn merge(&mut self, other: KeybindingConfig) {
        self.global.extend(other.global);
        for (ctx, bindings) in other.context {
            self.context.entry(ctx).or_default().extend(bindings);
        }
    }
}

/// Error type for key parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("no key specified")]
    NoKey,
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),
}

/// Parse vim-style key notation into a [`KeyCombo`].
///
/// `C-`, `M-` and `S-` prefixes add Ctrl, Alt and Shift. Named keys may be
/// bracketed (`<CR>`, `<C-Up>`) or bare (`Tab`). A single uppercase letter
/// implies Shift, so `"R"` is Shift+r.
pub fn parse_key_notation(notation: &str) -> Result<KeyCombo, KeyParseError> {
    let notation = notation.trim();
    if notation.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let body = notation
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(notation);

    let (prefixes, key) = match body.rsplit_once('-') {
        Some((prefixes, key)) => (Some(prefixes), key),
        None => (None, body),
    };
    if key.is_empty() {
        return Err(KeyParseError::NoKey);
    }

    let mut modifiers = KeyModifiers::NONE;
    for prefix in prefixes.into_iter().flat_map(|p| p.split('-')) {
        modifiers |= match prefix {
            "C" => KeyModifiers::CONTROL,
            "M" => KeyModifiers::ALT,
            "S" => KeyModifiers::SHIFT,
            other => return Err(KeyParseError::InvalidModifier(other.to_string())),
        };
    }

    let (code, shifted) = parse_key_code(key)?;
    if shifted {
        modifiers |= KeyModifiers::SHIFT;
    }
    Ok(KeyCombo::new(code, modifiers))
}

/// Returns the key code and whether an uppercase letter implied Shift
fn parse_key_code(key: &str) -> Result<(KeyCode, bool), KeyParseError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok((KeyCode::Char(c.to_ascii_lowercase()), c.is_ascii_uppercase()));
    }

    let upper = key.to_ascii_uppercase();
    let code = match upper.as_str() {
        "CR" | "ENTER" | "RETURN" => KeyCode::Enter,
        "ESC" | "ESCAPE" => KeyCode::Esc,
        "TAB" => KeyCode::Tab,
        "BS" | "BACKSPACE" => KeyCode::Backspace,
        "DEL" | "DELETE" => KeyCode::Delete,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "PAGEUP" | "PGUP" => KeyCode::PageUp,
        "PAGEDOWN" | "PGDN" => KeyCode::PageDown,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "SPACE" => KeyCode::Char(' '),
        _ => match upper.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(KeyParseError::InvalidKey(key.to_string())),
        },
    };
    Ok((code, false))
}
