//! Scripted playback: cursor, undo history and the animation tasks that
//! render each step.

mod controller;
mod history;
mod pacing;
mod player;
mod renderer;

pub use controller::Controller;
pub use history::{History, HistoryEntry};
pub use pacing::{pause, Pacing};
pub use player::{Origin, Player, PlayerMessage, RenderOp, COMPOSER_ACK};
pub use renderer::{assistant_body, Bubble, BubbleBody, ControlState, NodeId, Renderer};
