use ratatui::{buffer::Buffer, layout::Rect};

use super::key_hints::{render_key_hints, KeyHint, KeyHintBarStyle};
use super::theme::{FOOTER_BG, KEY_HINT_BG};
use crate::playback::ControlState;
use crate::ui::events::Focus;

/// Footer showing the shortcuts for the focused pane
pub struct GlobalFooter {
    hints: Vec<KeyHint>,
}

impl GlobalFooter {
    pub fn from_state(focus: Focus, controls: ControlState) -> Self {
        let hints = match focus {
            Focus::Transcript => Self::transcript_hints(controls),
            Focus::Composer => Self::composer_hints(),
        };
        Self { hints }
    }

    /// Navigation hints; advance and back grey out when unusable
    pub fn transcript_hints(controls: ControlState) -> Vec<KeyHint> {
        vec![
            KeyHint::new("enter", "next").enabled(controls.can_advance && !controls.playing),
            KeyHint::new("bksp", "back").enabled(controls.can_retreat),
            KeyHint::new("r", "restart"),
            KeyHint::new("e", "example report"),
            KeyHint::new("1/2", "anomaly"),
            KeyHint::new("i", "ask"),
            KeyHint::new("q", "quit"),
        ]
    }

    pub fn composer_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("enter", "send"),
            KeyHint::new("esc", "back to chat"),
            KeyHint::new("C-w", "delete word"),
            KeyHint::new("C-q", "quit"),
        ]
    }

    pub fn hints(&self) -> &[KeyHint] {
        &self.hints
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        render_key_hints(
            area,
            buf,
            &self.hints,
            KeyHintBarStyle::footer_bar(KEY_HINT_BG, FOOTER_BG),
        );
    }
}
