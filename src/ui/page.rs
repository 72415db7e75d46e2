//! The terminal page: chat transcript, composer, thinking placeholder and
//! illustration panel, driven through [`Renderer`].

use ratatui::{buffer::Buffer, layout::Rect};

use crate::config::Config;
use crate::playback::{Bubble, ControlState, NodeId, Renderer};
use crate::script::Illustration;
use crate::ui::components::{ChatView, Composer, Dashboard, IllustrationPanel, IllustrationSource, ThinkingIndicator};

pub struct Page {
    chat: ChatView,
    next_id: u64,
    thinking: Option<ThinkingIndicator>,
    composer: Composer,
    panel: IllustrationPanel,
    controls: ControlState,
}

impl Page {
    pub fn new(source: IllustrationSource, dashboard: Dashboard) -> Self {
        Self {
            chat: ChatView::new(),
            next_id: 0,
            thinking: None,
            composer: Composer::new(),
            panel: IllustrationPanel::new(source, dashboard),
            controls: ControlState::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            IllustrationSource::new(config.pa_image.clone(), config.assets_dir.clone()),
            Dashboard::new(config.chart_seed),
        )
    }

    pub fn chat(&self) -> &ChatView {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatView {
        &mut self.chat
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn panel_mut(&mut self) -> &mut IllustrationPanel {
        &mut self.panel
    }

    pub fn bubbles(&self) -> impl Iterator<Item = &Bubble> {
        self.chat.bubbles()
    }

    pub fn node_count(&self) -> usize {
        self.chat.len()
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    pub fn illustration(&self) -> Illustration {
        self.panel.current()
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    /// Advance the thinking spinner
    pub fn tick(&mut self) {
        if let Some(indicator) = self.thinking.as_mut() {
            indicator.tick();
        }
    }

    pub fn render_chat(&mut self, area: Rect, buf: &mut Buffer) {
        let thinking_line = self.thinking.as_ref().map(ThinkingIndicator::render);
        self.chat.render_with_indicator(area, buf, thinking_line);
    }

    pub fn render_panel(&mut self, area: Rect, buf: &mut Buffer) {
        self.panel.render(area, buf);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(IllustrationSource::default(), Dashboard::new(None))
    }
}

impl Renderer for Page {
    fn append(&mut self, bubble: Bubble) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.chat.push(id, bubble);
        id
    }

    fn remove(&mut self, node: NodeId) {
        if !self.chat.remove(node) {
            tracing::debug!(?node, "Remove of unknown chat row");
        }
    }

    fn clear(&mut self) {
        self.chat.clear();
        self.thinking = None;
    }

    fn show_thinking(&mut self) {
        self.thinking = Some(ThinkingIndicator::new());
    }

    fn hide_thinking(&mut self) {
        self.thinking = None;
    }

    fn set_composer_text(&mut self, text: &str) {
        self.composer.set_text(text);
    }

    fn set_illustration(&mut self, illustration: Illustration) {
        self.panel.set(illustration);
    }

    fn set_controls(&mut self, controls: ControlState) {
        self.controls = controls;
    }

    fn scroll_to_latest(&mut self) {
        self.chat.scroll_to_bottom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique_after_clear() {
        let mut page = Page::default();
        let first = page.append(Bubble::user("a"));
        page.clear();
        let second = page.append(Bubble::user("b"));
        assert_ne!(first, second);
        assert_eq!(page.node_count(), 1);
    }

    #[test]
    fn test_clear_hides_thinking() {
        let mut page = Page::default();
        page.show_thinking();
        assert!(page.is_thinking());
        page.clear();
        assert!(!page.is_thinking());
    }

    #[test]
    fn test_remove_twice_is_harmless() {
        let mut page = Page::default();
        let id = page.append(Bubble::assistant("x"));
        page.remove(id);
        page.remove(id);
        assert_eq!(page.node_count(), 0);
    }

    #[test]
    fn test_scroll_to_latest_resets_offset() {
        let mut page = Page::default();
        page.append(Bubble::assistant("x"));
        page.chat_mut().scroll_up(4);
        page.scroll_to_latest();
        assert_eq!(page.chat().scroll_offset(), 0);
    }
}
