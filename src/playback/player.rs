//! Timed animation of one step (or one composer echo).
//!
//! A player runs as a spawned task and never touches the renderer directly.
//! It streams [`RenderOp`]s tagged with its [`Origin`] back to the
//! controller, which applies them on the UI thread and drops anything from
//! a run it has since cancelled.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::pacing::{pause, Pacing};
use super::renderer::{assistant_body, Bubble};
use crate::script::{Illustration, Role, Step};

/// Fixed reply to anything typed into the composer
pub const COMPOSER_ACK: &str = "Thanks! I will analyze those details and update the insights.";

/// Which run produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Step { generation: u64 },
    Composer { generation: u64 },
}

impl Origin {
    pub fn generation(&self) -> u64 {
        match self {
            Origin::Step { generation } | Origin::Composer { generation } => *generation,
        }
    }
}

/// A single change to apply to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    ComposerText(String),
    ShowThinking,
    HideThinking,
    Illustrate(Illustration),
    Append(Bubble),
    /// The run rendered everything it had
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMessage {
    pub origin: Origin,
    pub op: RenderOp,
}

pub struct Player {
    origin: Origin,
    pacing: Pacing,
    cancel: CancellationToken,
    tx: mpsc::UnboundedSender<PlayerMessage>,
}

impl Player {
    pub fn new(
        origin: Origin,
        pacing: Pacing,
        cancel: CancellationToken,
        tx: mpsc::UnboundedSender<PlayerMessage>,
    ) -> Self {
        Self {
            origin,
            pacing,
            cancel,
            tx,
        }
    }

    /// Render every message of `step` in order, then report `Finished`
    pub async fn play_step(self, step: Step) {
        for message in &step.messages {
            let played = match message.role {
                Role::User => self.type_user_message(&message.text).await,
                Role::Assistant => self.reveal_answer(&step, &message.text).await,
            };
            if !played {
                tracing::debug!(origin = ?self.origin, "Step playback cancelled");
                return;
            }
        }
        self.send(RenderOp::Finished);
    }

    /// Echo a composer submission followed by the fixed acknowledgment
    pub async fn play_composer_echo(self, text: String) {
        if !self.type_user_message(&text).await {
            return;
        }
        if !self.send(RenderOp::Append(Bubble::assistant(COMPOSER_ACK))) {
            return;
        }
        self.send(RenderOp::Finished);
    }

    async fn type_user_message(&self, text: &str) -> bool {
        let mut typed = String::with_capacity(text.len());
        for ch in text.chars() {
            typed.push(ch);
            if !self.send(RenderOp::ComposerText(typed.clone())) {
                return false;
            }
            if !pause(self.pacing.keystroke_delay(ch), &self.cancel).await {
                return false;
            }
        }
        self.send(RenderOp::ComposerText(String::new()))
            && self.send(RenderOp::Append(Bubble::user(text)))
    }

    async fn reveal_answer(&self, step: &Step, text: &str) -> bool {
        if step.thinking {
            if !self.send(RenderOp::ShowThinking) {
                return false;
            }
            if !pause(self.pacing.thinking_delay(text), &self.cancel).await {
                return false;
            }
            if !self.send(RenderOp::HideThinking) {
                return false;
            }
        }
        if let Some(illustration) = step.illustration {
            if !self.send(RenderOp::Illustrate(illustration)) {
                return false;
            }
        }
        let body = assistant_body(step.presentation, text);
        self.send(RenderOp::Append(Bubble::new(Role::Assistant, body)))
    }

    /// Returns `false` once the run is cancelled or nobody is listening
    fn send(&self, op: RenderOp) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.tx
            .send(PlayerMessage {
                origin: self.origin,
                op,
            })
            .is_ok()
    }
}
