//! The seam between the playback controller and whatever draws the chat.

use chrono::Local;

use crate::script::{reports, Illustration, Presentation, Role};

/// Handle to one rendered chat row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Content of a chat bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BubbleBody {
    /// Literal text, wrapped as-is
    Text(String),
    /// Markdown rendered with headings, lists and code blocks
    Markdown(String),
}

impl BubbleBody {
    pub fn as_str(&self) -> &str {
        match self {
            BubbleBody::Text(text) | BubbleBody::Markdown(text) => text,
        }
    }
}

/// A chat bubble ready to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub role: Role,
    pub body: BubbleBody,
    /// Local `HH:MM` captured when the bubble was built
    pub timestamp: String,
}

impl Bubble {
    pub fn new(role: Role, body: BubbleBody) -> Self {
        Self {
            role,
            body,
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, BubbleBody::Text(text.into()))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, BubbleBody::Text(text.into()))
    }

    pub fn assistant_markdown(markdown: impl Into<String>) -> Self {
        Self::new(Role::Assistant, BubbleBody::Markdown(markdown.into()))
    }

    pub fn text(&self) -> &str {
        self.body.as_str()
    }
}

/// Which navigation controls are currently usable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub can_advance: bool,
    pub can_retreat: bool,
    /// A step is still animating
    pub playing: bool,
}

/// Output side of the demo.
///
/// Implementations must tolerate `remove` of an id they no longer hold.
pub trait Renderer {
    fn append(&mut self, bubble: Bubble) -> NodeId;
    fn remove(&mut self, node: NodeId);
    /// Drop every chat row and the thinking placeholder
    fn clear(&mut self);
    fn show_thinking(&mut self);
    fn hide_thinking(&mut self);
    fn set_composer_text(&mut self, text: &str);
    fn set_illustration(&mut self, illustration: Illustration);
    fn set_controls(&mut self, controls: ControlState);
    fn scroll_to_latest(&mut self);
}

/// Body of an assistant bubble for a step's presentation
pub fn assistant_body(presentation: Presentation, text: &str) -> BubbleBody {
    match reports::fragment(presentation) {
        Some(markdown) => BubbleBody::Markdown(markdown.to_string()),
        None => BubbleBody::Text(text.to_string()),
    }
}
