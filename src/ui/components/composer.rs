use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::theme::{INPUT_BG, PANEL_BORDER, PANEL_BORDER_FOCUSED, TEXT_FAINT, TEXT_PRIMARY};

const PLACEHOLDER: &str = "Ask about your cluster's performance...";

/// Single-line message composer.
///
/// `cursor_pos` is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    input: String,
    cursor_pos: usize,
    focused: bool,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor_pos
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Replace the whole text and park the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.input = text.replace(['\n', '\r'], " ");
        self.cursor_pos = self.input.len();
    }

    /// Take the text out, leaving the composer empty
    pub fn take(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    pub fn insert_char(&mut self, c: char) {
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input.remove(prev);
            self.cursor_pos = prev;
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_pos = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.input[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    pub fn move_start(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Delete the word before the cursor (Ctrl+W)
    pub fn delete_word_back(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let before_cursor = &self.input[..self.cursor_pos];
        let trimmed = before_cursor.trim_end();
        let word_start = trimmed
            .rfind(char::is_whitespace)
            .map(|i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        self.input.replace_range(word_start..self.cursor_pos, "");
        self.cursor_pos = word_start;
    }

    /// Delete from cursor to start of line (Ctrl+U)
    pub fn delete_to_start(&mut self) {
        self.input.replace_range(..self.cursor_pos, "");
        self.cursor_pos = 0;
    }

    /// Delete from cursor to end of line (Ctrl+K)
    pub fn delete_to_end(&mut self) {
        self.input.truncate(self.cursor_pos);
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// Text to show in an area `width` columns wide, scrolled so the cursor
    /// stays visible, and the cursor column within it
    fn visible_window(&self, width: usize) -> (String, usize) {
        let before = &self.input[..self.cursor_pos];
        let cursor_col = UnicodeWidthStr::width(before);
        if width == 0 || cursor_col < width {
            return (self.input.clone(), cursor_col);
        }

        // Drop leading chars until the cursor fits
        let mut skip_width = cursor_col + 1 - width;
        let mut start = 0;
        for (i, c) in self.input.char_indices() {
            if skip_width == 0 {
                start = i;
                break;
            }
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            skip_width = skip_width.saturating_sub(w);
            start = i + c.len_utf8();
        }
        let shown = &self.input[start..];
        let col = UnicodeWidthStr::width(&self.input[start..self.cursor_pos]);
        (shown.to_string(), col)
    }

    fn inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    /// Terminal position of the cursor when focused
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.focused {
            return None;
        }
        let inner = Self::inner_area(area);
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let (_, col) = self.visible_window(inner.width as usize);
        Some((inner.x + col as u16, inner.y))
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            PANEL_BORDER_FOCUSED
        } else {
            PANEL_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(INPUT_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.input.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(TEXT_FAINT)))
        } else {
            let (shown, _) = self.visible_window(inner.width as usize);
            Line::from(Span::styled(shown, Style::default().fg(TEXT_PRIMARY)))
        };
        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer_with(text: &str) -> Composer {
        let mut composer = Composer::new();
        composer.set_text(text);
        composer
    }

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut composer = Composer::new();
        composer.insert_str("añb");
        composer.move_left();
        composer.backspace();
        assert_eq!(composer.text(), "ab");
        assert_eq!(composer.cursor(), 1);
    }

    #[test]
    fn test_delete_word_back() {
        let mut composer = composer_with("show top queries  ");
        composer.delete_word_back();
        assert_eq!(composer.text(), "show top ");
        composer.delete_word_back();
        assert_eq!(composer.text(), "show ");
        composer.delete_word_back();
        assert_eq!(composer.text(), "");
    }

    #[test]
    fn test_delete_to_start_and_end() {
        let mut composer = composer_with("hello world");
        for _ in 0..5 {
            composer.move_left();
        }
        composer.delete_to_end();
        assert_eq!(composer.text(), "hello ");
        composer.move_left();
        composer.delete_to_start();
        assert_eq!(composer.text(), " ");
        assert_eq!(composer.cursor(), 0);
    }

    #[test]
    fn test_take_clears() {
        let mut composer = composer_with("question");
        assert_eq!(composer.take(), "question");
        assert!(composer.is_empty());
        assert_eq!(composer.cursor(), 0);
    }

    #[test]
    fn test_newlines_become_spaces() {
        let composer = composer_with("a\nb");
        assert_eq!(composer.text(), "a b");
    }

    #[test]
    fn test_cursor_scrolls_into_view() {
        let mut composer = composer_with("0123456789");
        composer.set_focused(true);
        let area = Rect::new(0, 0, 8, 3);
        // 6 inner columns; cursor sits after the last char
        assert_eq!(composer.cursor_position(area), Some((6, 1)));
        let (shown, col) = composer.visible_window(6);
        assert_eq!(shown, "56789");
        assert_eq!(col, 5);
    }

    #[test]
    fn test_unfocused_has_no_cursor() {
        let composer = composer_with("x");
        assert_eq!(composer.cursor_position(Rect::new(0, 0, 10, 3)), None);
    }
}
