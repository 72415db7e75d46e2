//! Vertical scrollbar shared by scrollable panes.

use ratatui::prelude::StatefulWidget;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
};

/// Render a vertical scrollbar on the right edge of `area` if the content
/// overflows. `offset` counts lines from the top.
pub fn render_vertical_scrollbar(
    area: Rect,
    buf: &mut Buffer,
    total: usize,
    visible: usize,
    offset: usize,
) {
    if total <= visible {
        return;
    }

    let max_scroll = total.saturating_sub(visible);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));

    let mut state = ScrollbarState::new(max_scroll).position(offset.min(max_scroll));
    scrollbar.render(area, buf, &mut state);
}
