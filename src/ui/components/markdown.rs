use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::{CALLOUT_RED_BG, CALLOUT_YELLOW_BG, MARKDOWN_CODE_BG};

/// Markdown renderer for assistant reports.
///
/// Lines whose text contains a callout phrase get a red or yellow
/// background so findings and fixes stand out.
pub struct MarkdownRenderer {
    base_style: Style,
    red_callouts: &'static [&'static str],
    yellow_callouts: &'static [&'static str],
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            base_style: Style::default().fg(Color::White),
            red_callouts: &[],
            yellow_callouts: &[],
        }
    }

    pub fn with_callouts(
        mut self,
        red: &'static [&'static str],
        yellow: &'static [&'static str],
    ) -> Self {
        self.red_callouts = red;
        self.yellow_callouts = yellow;
        self
    }

    /// Render markdown string to ratatui Text
    pub fn render(&self, markdown: &str) -> Text<'static> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut current_spans: Vec<Span<'static>> = Vec::new();
        let mut style_stack: Vec<Style> = vec![self.base_style];

        let mut list_depth: usize = 0;
        // 0 marks an unordered list
        let mut ordered_list_counters: Vec<u64> = Vec::new();

        let mut in_code_block = false;
        let mut code_block_content = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Heading { level, .. } => style_stack.push(self.heading_style(level)),
                    Tag::BlockQuote(_) => {
                        current_spans
                            .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                        style_stack.push(
                            Style::default()
                                .fg(Color::Gray)
                                .add_modifier(Modifier::ITALIC),
                        );
                    }
                    Tag::CodeBlock(_) => {
                        in_code_block = true;
                        code_block_content.clear();
                    }
                    Tag::List(start) => {
                        list_depth += 1;
                        ordered_list_counters.push(start.unwrap_or(0));
                    }
                    Tag::Item => {
                        // Nested lists start inside a still-open item
                        if !current_spans.is_empty() {
                            lines.push(Line::from(std::mem::take(&mut current_spans)));
                        }
                        let indent = "  ".repeat(list_depth.saturating_sub(1));
                        let bullet = match ordered_list_counters.last_mut() {
                            Some(counter) if *counter > 0 => {
                                let bullet = format!("{}{}. ", indent, counter);
                                *counter += 1;
                                bullet
                            }
                            _ => format!("{}• ", indent),
                        };
                        current_spans.push(Span::styled(bullet, Style::default().fg(Color::Cyan)));
                    }
                    Tag::Emphasis => {
                        let current = *style_stack.last().unwrap_or(&self.base_style);
                        style_stack.push(current.add_modifier(Modifier::ITALIC));
                    }
                    Tag::Strong => {
                        let current = *style_stack.last().unwrap_or(&self.base_style);
                        style_stack.push(current.add_modifier(Modifier::BOLD));
                    }
                    Tag::Link { .. } => {
                        style_stack.push(
                            Style::default()
                                .fg(Color::Blue)
                                .add_modifier(Modifier::UNDERLINED),
                        );
                    }
                    _ => {}
                },
                Event::End(tag_end) => match tag_end {
                    TagEnd::Paragraph => {
                        if !current_spans.is_empty() {
                            lines.push(Line::from(std::mem::take(&mut current_spans)));
                        }
                        if list_depth == 0 {
                            lines.push(Line::from(""));
                        }
                    }
                    TagEnd::Heading(_) => {
                        style_stack.pop();
                        if !current_spans.is_empty() {
                            lines.push(Line::from(std::mem::take(&mut current_spans)));
                        }
                        lines.push(Line::from(""));
                    }
                    TagEnd::BlockQuote(_) => {
                        style_stack.pop();
                        if !current_spans.is_empty() {
                            lines.push(Line::from(std::mem::take(&mut current_spans)));
                        }
                    }
                    TagEnd::CodeBlock => {
                        in_code_block = false;
                        let code_style = Style::default().fg(Color::Green).bg(MARKDOWN_CODE_BG);
                        for code_line in code_block_content.lines() {
                            lines.push(Line::from(Span::styled(
                                format!(" {} ", code_line),
                                code_style,
                            )));
                        }
                        lines.push(Line::from(""));
                    }
                    TagEnd::List(_) => {
                        list_depth = list_depth.saturating_sub(1);
                        ordered_list_counters.pop();
                        if list_depth == 0 {
                            lines.push(Line::from(""));
                        }
                    }
                    TagEnd::Item => {
                        if !current_spans.is_empty() {
                            lines.push(Line::from(std::mem::take(&mut current_spans)));
                        }
                    }
                    TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link => {
                        style_stack.pop();
                    }
                    _ => {}
                },
                Event::Text(text) => {
                    if in_code_block {
                        code_block_content.push_str(&text);
                    } else {
                        let style = *style_stack.last().unwrap_or(&self.base_style);
                        current_spans.push(Span::styled(text.to_string(), style));
                    }
                }
                Event::Code(code) => {
                    current_spans.push(Span::styled(
                        code.to_string(),
                        Style::default().fg(Color::Yellow).bg(MARKDOWN_CODE_BG),
                    ));
                }
                Event::SoftBreak => current_spans.push(Span::raw(" ")),
                Event::HardBreak => {
                    lines.push(Line::from(std::mem::take(&mut current_spans)));
                }
                Event::Rule => {
                    lines.push(Line::from(Span::styled(
                        "─".repeat(40),
                        Style::default().fg(Color::DarkGray),
                    )));
                    lines.push(Line::from(""));
                }
                _ => {}
            }
        }

        if !current_spans.is_empty() {
            lines.push(Line::from(current_spans));
        }

        // Drop the trailing blank line left by the last block
        while lines.last().is_some_and(|line| line.spans.is_empty() || line_text(line).is_empty()) {
            lines.pop();
        }

        for line in &mut lines {
            self.highlight_callout(line);
        }

        Text::from(lines)
    }

    fn highlight_callout(&self, line: &mut Line<'static>) {
        let text = line_text(line);
        let bg = if self.red_callouts.iter().any(|needle| text.contains(needle)) {
            CALLOUT_RED_BG
        } else if self.yellow_callouts.iter().any(|needle| text.contains(needle)) {
            CALLOUT_YELLOW_BG
        } else {
            return;
        };
        for span in &mut line.spans {
            span.style = span.style.bg(bg);
        }
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        match level {
            HeadingLevel::H1 => Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            HeadingLevel::H2 => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            HeadingLevel::H3 => Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            _ => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
