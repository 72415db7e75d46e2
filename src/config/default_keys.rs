//! Default keybindings
//!
//! Used as-is when the config file has no `[keys]` table, and as the base
//! that user bindings are merged over.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::keys::{KeyCombo, KeyContext, KeybindingConfig};
use crate::ui::action::Action;

/// Helper to insert a keybinding
fn bind(map: &mut HashMap<KeyCombo, Action>, key: &str, action: Action) {
    if let Ok(combo) = key.parse() {
        map.insert(combo, action);
    }
}

/// Create the default keybindings configuration
pub fn default_keybindings() -> KeybindingConfig {
    let mut config = KeybindingConfig::new();

    // ========== Global Keybindings ==========
    bind(&mut config.global, "C-q", Action::Quit);
    bind(&mut config.global, "C-c", Action::Quit);
    bind(&mut config.global, "<PageUp>", Action::ScrollPageUp);
    bind(&mut config.global, "<PageDown>", Action::ScrollPageDown);
    config.global.insert(
        KeyCombo::new(KeyCode::Up, KeyModifiers::CONTROL),
        Action::ScrollUp(1),
    );
    config.global.insert(
        KeyCombo::new(KeyCode::Down, KeyModifiers::CONTROL),
        Action::ScrollDown(1),
    );

    // ========== Transcript ==========
    let transcript = config.context.entry(KeyContext::Transcript).or_default();

    bind(transcript, "<CR>", Action::Advance);
    bind(transcript, "<Space>", Action::Advance);
    bind(transcript, "<BS>", Action::Retreat);
    bind(transcript, "<Del>", Action::Retreat);
    bind(transcript, "r", Action::Restart);
    bind(transcript, "R", Action::Restart);
    bind(transcript, "e", Action::OpenReport);
    bind(transcript, "<Tab>", Action::FocusComposer);
    bind(transcript, "i", Action::FocusComposer);
    bind(transcript, "q", Action::Quit);
    bind(transcript, "1", Action::SelectAnomaly(1));
    bind(transcript, "2", Action::SelectAnomaly(2));
    bind(transcript, "k", Action::ScrollUp(1));
    bind(transcript, "j", Action::ScrollDown(1));
    transcript.insert(KeyCombo::new(KeyCode::Up, KeyModifiers::NONE), Action::ScrollUp(1));
    transcript.insert(KeyCombo::new(KeyCode::Down, KeyModifiers::NONE), Action::ScrollDown(1));
    bind(transcript, "g", Action::ScrollToTop);
    bind(transcript, "G", Action::ScrollToBottom);

    // ========== Composer ==========
    let composer = config.context.entry(KeyContext::Composer).or_default();

    bind(composer, "<CR>", Action::Submit);
    bind(composer, "<Esc>", Action::FocusTranscript);
    bind(composer, "<Tab>", Action::FocusTranscript);
    bind(composer, "<BS>", Action::Backspace);
    bind(composer, "<Del>", Action::Delete);
    bind(composer, "<Left>", Action::MoveCursorLeft);
    bind(composer, "<Right>", Action::MoveCursorRight);
    bind(composer, "<Home>", Action::MoveCursorStart);
    bind(composer, "<End>", Action::MoveCursorEnd);
    bind(composer, "C-a", Action::MoveCursorStart);
    bind(composer, "C-e", Action::MoveCursorEnd);
    bind(composer, "C-w", Action::DeleteWordBack);
    bind(composer, "C-u", Action::DeleteToStart);
    bind(composer, "C-k", Action::DeleteToEnd);

    config
}
