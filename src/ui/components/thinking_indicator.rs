use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

const LABEL: &str = "Thinking ... ";

const SPINNER_FRAMES: &[&str] = &["·", "✢", "✳", "∗", "✻", "✽"];

/// Shimmer gradient endpoints
const SHIMMER_BRIGHT: (u8, u8, u8) = (150, 190, 235);
const SHIMMER_DIM: (u8, u8, u8) = (45, 60, 80);

/// Width of the shimmer "wave" in characters
const SHIMMER_WIDTH: f32 = 3.0;

/// Placeholder shown while the assistant is "thinking"
#[derive(Debug, Clone)]
pub struct ThinkingIndicator {
    spinner_frame: usize,
    shimmer_offset: f32,
}

impl ThinkingIndicator {
    pub fn new() -> Self {
        Self {
            spinner_frame: 0,
            shimmer_offset: -SHIMMER_WIDTH,
        }
    }

    /// Advance the spinner and shimmer animations
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        self.shimmer_offset += 1.0;
        let wrap_point = LABEL.chars().count() as f32 + SHIMMER_WIDTH * 2.0;
        if self.shimmer_offset > wrap_point {
            self.shimmer_offset = -SHIMMER_WIDTH;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn shimmer_color(&self, char_index: usize) -> Color {
        let wave_pos = (char_index as f32 - self.shimmer_offset) / SHIMMER_WIDTH;
        let highlight = (-wave_pos * wave_pos).exp();
        let brightness = (0.25 + highlight * 0.75).clamp(0.0, 1.0);

        Color::Rgb(
            lerp(SHIMMER_DIM.0, SHIMMER_BRIGHT.0, brightness),
            lerp(SHIMMER_DIM.1, SHIMMER_BRIGHT.1, brightness),
            lerp(SHIMMER_DIM.2, SHIMMER_BRIGHT.2, brightness),
        )
    }

    /// Render as a Line for display in the chat view
    pub fn render(&self) -> Line<'static> {
        let spinner = SPINNER_FRAMES[self.spinner_frame];
        let mut spans = vec![
            Span::styled("• ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} ", spinner), Style::default().fg(Color::Gray)),
        ];
        spans.extend(LABEL.chars().enumerate().map(|(i, c)| {
            Span::styled(c.to_string(), Style::default().fg(self.shimmer_color(i)))
        }));
        Line::from(spans)
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (a as f32 + (b as f32 - a as f32) * t) as u8
}

impl Default for ThinkingIndicator {
    fn default() -> Self {
        Self::new()
    }
}
