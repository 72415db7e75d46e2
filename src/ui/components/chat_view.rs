use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::markdown::MarkdownRenderer;
use super::scrollbar::render_vertical_scrollbar;
use super::theme::{ASSISTANT_ACCENT, TEXT_FAINT, USER_ACCENT};
use crate::playback::{Bubble, BubbleBody, NodeId};
use crate::script::{reports, Role};

const USER_PREFIX: &str = "❯ ";
const ASSISTANT_PREFIX: &str = "• ";
const CONTINUATION_PREFIX: &str = "  ";

#[derive(Debug, Clone)]
struct ChatRow {
    id: NodeId,
    bubble: Bubble,
}

/// Scrollable chat transcript
pub struct ChatView {
    rows: Vec<ChatRow>,
    /// Lines scrolled up from the bottom; 0 follows the latest row
    scroll_offset: usize,
    /// Formatted lines of every row
    line_cache: Vec<Line<'static>>,
    /// Width the cache was built for
    cache_width: Option<u16>,
    cache_dirty: bool,
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            scroll_offset: 0,
            line_cache: Vec::new(),
            cache_width: None,
            cache_dirty: true,
        }
    }

    /// Content area leaves a left margin and a scrollbar column
    fn content_area(area: Rect) -> Option<Rect> {
        let content = Rect {
            x: area.x.saturating_add(1),
            y: area.y,
            width: area.width.saturating_sub(3),
            height: area.height,
        };
        if content.width < 3 || content.height < 1 {
            return None;
        }
        Some(content)
    }

    fn scrollbar_area(area: Rect) -> Rect {
        Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y,
            width: 1,
            height: area.height,
        }
    }

    pub fn push(&mut self, id: NodeId, bubble: Bubble) {
        self.rows.push(ChatRow { id, bubble });
        self.cache_dirty = true;
    }

    /// Remove the row with `id`; unknown ids are ignored
    pub fn remove(&mut self, id: NodeId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        let removed = self.rows.len() != before;
        if removed {
            self.cache_dirty = true;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.line_cache.clear();
        self.scroll_offset = 0;
        self.cache_dirty = true;
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    pub fn scroll_to_top(&mut self) {
        // Clamped during render
        self.scroll_offset = usize::MAX;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn bubbles(&self) -> impl Iterator<Item = &Bubble> {
        self.rows.iter().map(|row| &row.bubble)
    }

    fn ensure_cache(&mut self, width: u16) {
        if !self.cache_dirty && self.cache_width == Some(width) {
            return;
        }
        let mut lines = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            format_bubble(&row.bubble, width as usize, &mut lines);
        }
        self.line_cache = lines;
        self.cache_width = Some(width);
        self.cache_dirty = false;
    }

    /// Render the transcript with an optional thinking line after the last row
    pub fn render_with_indicator(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        thinking_line: Option<Line<'static>>,
    ) {
        let Some(content) = Self::content_area(area) else {
            return;
        };
        self.ensure_cache(content.width);

        let mut all_lines = self.line_cache.clone();
        if let Some(indicator) = thinking_line {
            if !all_lines.is_empty() {
                all_lines.push(Line::from(""));
            }
            all_lines.push(indicator);
        }

        let total_lines = all_lines.len();
        let visible_height = content.height as usize;

        let max_scroll = total_lines.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        let start_line = max_scroll - self.scroll_offset;

        let visible: Vec<Line<'static>> = all_lines
            .into_iter()
            .skip(start_line)
            .take(visible_height)
            .collect();
        Paragraph::new(visible).render(content, buf);

        render_vertical_scrollbar(
            Self::scrollbar_area(area),
            buf,
            total_lines,
            visible_height,
            start_line,
        );
    }
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

fn format_bubble(bubble: &Bubble, width: usize, lines: &mut Vec<Line<'static>>) {
    match bubble.role {
        Role::User => format_user_bubble(bubble, width, lines),
        Role::Assistant => format_assistant_bubble(bubble, width, lines),
    }
    let who = match bubble.role {
        Role::User => "you",
        Role::Assistant => "advisor",
    };
    lines.push(Line::from(Span::styled(
        format!("{}{} · {}", CONTINUATION_PREFIX, who, bubble.timestamp),
        Style::default().fg(TEXT_FAINT),
    )));
}

/// User text is bold with a chevron on the first line
fn format_user_bubble(bubble: &Bubble, width: usize, lines: &mut Vec<Line<'static>>) {
    let text_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let prefix = Span::styled(USER_PREFIX, Style::default().fg(USER_ACCENT));
    let content: Vec<Vec<Span<'static>>> = bubble
        .text()
        .lines()
        .map(|line| vec![Span::styled(line.to_string(), text_style)])
        .collect();
    push_prefixed(content, prefix, width, lines);
}

fn format_assistant_bubble(bubble: &Bubble, width: usize, lines: &mut Vec<Line<'static>>) {
    let prefix = Span::styled(ASSISTANT_PREFIX, Style::default().fg(ASSISTANT_ACCENT));
    let text_style = Style::default().fg(Color::Rgb(220, 220, 220));

    let content: Vec<Vec<Span<'static>>> = match &bubble.body {
        BubbleBody::Text(text) => text
            .lines()
            .map(|line| vec![Span::styled(line.to_string(), text_style)])
            .collect(),
        BubbleBody::Markdown(markdown) => MarkdownRenderer::new()
            .with_callouts(reports::REPORT_RED_CALLOUTS, reports::REPORT_YELLOW_CALLOUTS)
            .render(markdown)
            .lines
            .into_iter()
            .map(|line| line.spans)
            .collect(),
    };
    push_prefixed(content, prefix, width, lines);
}

/// Wrap each content line to `width`, putting `first_prefix` before the very
/// first line and indenting everything else.
fn push_prefixed(
    content: Vec<Vec<Span<'static>>>,
    first_prefix: Span<'static>,
    width: usize,
    lines: &mut Vec<Line<'static>>,
) {
    let prefix_width = UnicodeWidthStr::width(first_prefix.content.as_ref())
        .max(UnicodeWidthStr::width(CONTINUATION_PREFIX));
    let content_width = width.saturating_sub(prefix_width).max(1);

    let mut first = Some(first_prefix);
    for spans in content {
        if spans.iter().all(|s| s.content.is_empty()) {
            lines.push(Line::from(""));
            continue;
        }
        for wrapped in wrap_spans(spans, content_width) {
            let prefix = first
                .take()
                .unwrap_or_else(|| Span::raw(CONTINUATION_PREFIX));
            let mut line_spans = vec![prefix];
            line_spans.extend(wrapped);
            lines.push(Line::from(line_spans));
        }
    }
}

/// Word-wrap styled spans to `max_width` display columns
fn wrap_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Vec<Span<'static>>> {
    if max_width == 0 {
        return vec![Vec::new()];
    }

    let chars: Vec<(char, Style)> = spans
        .iter()
        .flat_map(|span| {
            let style = span.style;
            span.content
                .chars()
                .filter(|ch| !ch.is_control())
                .map(move |ch| (ch, style))
        })
        .collect();
    if chars.is_empty() {
        return vec![Vec::new()];
    }

    let mut lines: Vec<Vec<(char, Style)>> = Vec::new();
    let mut current: Vec<(char, Style)> = Vec::new();
    let mut line_width = 0usize;
    // (index after the last whitespace, width up to it)
    let mut last_break: Option<(usize, usize)> = None;

    for (ch, style) in chars {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);

        if line_width + ch_width > max_width && !current.is_empty() {
            match last_break {
                Some((break_idx, _)) if break_idx < current.len() => {
                    let next_line = current.split_off(break_idx);
                    lines.push(current);
                    current = next_line;
                }
                _ => lines.push(std::mem::take(&mut current)),
            }
            line_width = current
                .iter()
                .map(|(c, _)| UnicodeWidthChar::width(*c).unwrap_or(0))
                .sum();
            last_break = None;
            let mut width = 0usize;
            for (idx, (c, _)) in current.iter().enumerate() {
                width += UnicodeWidthChar::width(*c).unwrap_or(0);
                if c.is_whitespace() {
                    last_break = Some((idx + 1, width));
                }
            }
        }

        current.push((ch, style));
        line_width += ch_width;
        if ch.is_whitespace() {
            last_break = Some((current.len(), line_width));
        }
    }
    lines.push(current);

    lines.into_iter().map(chars_to_spans).collect()
}

/// Merge runs of equally styled chars back into spans
fn chars_to_spans(chars: Vec<(char, Style)>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let mut current_style: Option<Style> = None;

    for (ch, style) in chars {
        if current_style != Some(style) {
            if let Some(previous) = current_style {
                spans.push(Span::styled(std::mem::take(&mut buffer), previous));
            }
            current_style = Some(style);
        }
        buffer.push(ch);
    }
    if let Some(style) = current_style {
        spans.push(Span::styled(buffer, style));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn render_lines(view: &mut ChatView, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        view.render_with_indicator(area, &mut buf, None);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_wrap_spans_breaks_on_whitespace() {
        let wrapped = wrap_spans(vec![Span::raw("alpha beta gamma")], 11);
        let texts: Vec<String> = wrapped.iter().map(|l| text_of(l)).collect();
        assert_eq!(texts, vec!["alpha beta ", "gamma"]);
    }

    #[test]
    fn test_wrap_spans_splits_long_words() {
        let wrapped = wrap_spans(vec![Span::raw("abcdefgh")], 3);
        let texts: Vec<String> = wrapped.iter().map(|l| text_of(l)).collect();
        assert_eq!(texts, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_chars_to_spans_merges_styles() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let spans = chars_to_spans(vec![
            ('a', bold),
            ('b', bold),
            ('c', Style::default()),
        ]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "ab");
        assert_eq!(spans[1].content, "c");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut view = ChatView::new();
        view.push(NodeId(1), Bubble::user("hi"));
        assert!(!view.remove(NodeId(7)));
        assert!(view.remove(NodeId(1)));
        assert!(view.is_empty());
    }

    #[test]
    fn test_render_prefixes_and_meta() {
        let mut view = ChatView::new();
        let mut user = Bubble::user("How is my cluster?");
        user.timestamp = "09:15".to_string();
        let mut reply = Bubble::assistant("Fine.");
        reply.timestamp = "09:16".to_string();
        view.push(NodeId(1), user);
        view.push(NodeId(2), reply);

        let lines = render_lines(&mut view, 40, 10);
        assert_eq!(lines[0], " ❯ How is my cluster?");
        assert_eq!(lines[1], "   you · 09:15");
        assert_eq!(lines[3], " • Fine.");
        assert_eq!(lines[4], "   advisor · 09:16");
    }

    #[test]
    fn test_scroll_offset_clamped_to_content() {
        let mut view = ChatView::new();
        for i in 0..10 {
            view.push(NodeId(i), Bubble::assistant(format!("message {}", i)));
        }
        view.scroll_to_top();
        let lines = render_lines(&mut view, 30, 4);
        assert!(lines[0].contains("message 0"));

        // 10 rows of 2 lines plus 9 separators, 4 visible
        assert_eq!(view.scroll_offset(), 29 - 4);
    }

    #[test]
    fn test_bottom_shows_latest() {
        let mut view = ChatView::new();
        for i in 0..10 {
            view.push(NodeId(i), Bubble::assistant(format!("message {}", i)));
        }
        let lines = render_lines(&mut view, 30, 2);
        assert!(lines[0].contains("message 9"));
    }

    #[test]
    fn test_thinking_line_rendered_last() {
        let mut view = ChatView::new();
        view.push(NodeId(1), Bubble::user("q"));
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        view.render_with_indicator(area, &mut buf, Some(Line::from("Thinking ... ")));
        let row: String = (0..30).map(|x| buf[(x, 3)].symbol().to_string()).collect();
        assert!(row.contains("Thinking"));
    }
}
