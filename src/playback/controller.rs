//! Step-playback state machine.
//!
//! The controller owns the cursor and the history of rendered steps. It is
//! only ever mutated from the UI loop: animations run in spawned [`Player`]
//! tasks and come back as [`PlayerMessage`]s through [`Controller::apply`].
//!
//! Input while a step is still animating:
//! - `advance` is ignored until the step finishes;
//! - `retreat` and `restart` cancel the animation, and anything it already
//!   queued is dropped because its generation no longer matches.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::history::History;
use super::pacing::Pacing;
use super::player::{Origin, Player, PlayerMessage, RenderOp};
use super::renderer::{Bubble, ControlState, Renderer};
use crate::script::{reports, Script};

#[derive(Debug)]
struct Run {
    generation: u64,
    cancel: CancellationToken,
}

impl Run {
    fn stop(self) {
        self.cancel.cancel();
    }
}

pub struct Controller<R: Renderer> {
    script: Script,
    pacing: Pacing,
    renderer: R,
    /// Index of the last step started; `None` before the first one
    cursor: Option<usize>,
    history: History,
    generation: u64,
    step_run: Option<Run>,
    composer_run: Option<Run>,
    tx: mpsc::UnboundedSender<PlayerMessage>,
}

impl<R: Renderer> Controller<R> {
    pub fn new(
        script: Script,
        pacing: Pacing,
        renderer: R,
        tx: mpsc::UnboundedSender<PlayerMessage>,
    ) -> Self {
        let mut controller = Self {
            script,
            pacing,
            renderer,
            cursor: None,
            history: History::new(),
            generation: 0,
            step_run: None,
            composer_run: None,
            tx,
        };
        controller.sync_controls();
        controller
    }

    /// Start playing the next step.
    ///
    /// Returns `false` when at the end of the script or while a step is
    /// still animating.
    pub fn advance(&mut self) -> bool {
        if self.step_run.is_some() {
            debug!("Ignoring advance while a step is playing");
            return false;
        }
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        let Some(step) = self.script.step(next).cloned() else {
            debug!(cursor = ?self.cursor, "Already at the last step");
            return false;
        };

        self.cursor = Some(next);
        self.history.open(next);

        let (generation, cancel) = self.next_run();
        let player = Player::new(
            Origin::Step { generation },
            self.pacing,
            cancel.clone(),
            self.tx.clone(),
        );
        tokio::spawn(player.play_step(step));
        self.step_run = Some(Run { generation, cancel });

        info!(step = next, generation, "Playing step");
        self.sync_controls();
        true
    }

    /// Undo the most recent step, cancelling it if still animating
    pub fn retreat(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            debug!("Nothing to retreat");
            return false;
        };

        if let Some(run) = self.step_run.take() {
            debug!(generation = run.generation, "Cancelling step playback");
            run.stop();
            self.renderer.hide_thinking();
            if self.composer_run.is_none() {
                self.renderer.set_composer_text("");
            }
        }

        for node in &entry.nodes {
            self.renderer.remove(*node);
        }
        self.cursor = self.cursor.and_then(|cursor| cursor.checked_sub(1));

        info!(step = entry.step, removed = entry.nodes.len(), "Retreated");
        self.sync_controls();
        true
    }

    /// Clear everything back to the initial state
    pub fn restart(&mut self) {
        if let Some(run) = self.step_run.take() {
            run.stop();
        }
        if let Some(run) = self.composer_run.take() {
            run.stop();
        }
        self.renderer.clear();
        self.renderer.set_composer_text("");
        self.history.clear();
        self.cursor = None;

        info!("Restarted");
        self.sync_controls();
    }

    /// Handle a composer submission.
    ///
    /// Blank text advances the script; anything else is echoed with a fixed
    /// acknowledgment and leaves the history alone.
    pub fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return self.advance();
        }
        if self.composer_run.is_some() {
            debug!("Ignoring submission while the previous echo is playing");
            return false;
        }

        let (generation, cancel) = self.next_run();
        let player = Player::new(
            Origin::Composer { generation },
            self.pacing,
            cancel.clone(),
            self.tx.clone(),
        );
        tokio::spawn(player.play_composer_echo(text.to_string()));
        self.composer_run = Some(Run { generation, cancel });
        true
    }

    /// Append the example Query Analysis Report.
    ///
    /// Not part of any step, so `retreat` never removes it.
    pub fn open_report(&mut self) {
        self.renderer.append(Bubble::assistant(reports::REPORT_LEAD_IN));
        self.renderer.scroll_to_latest();
        self.renderer
            .append(Bubble::assistant_markdown(reports::EXAMPLE_REPORT));
        self.renderer.scroll_to_latest();
        info!("Opened example report");
    }

    /// Apply one message from a player task
    pub fn apply(&mut self, message: PlayerMessage) {
        let current = match message.origin {
            Origin::Step { .. } => self.step_run.as_ref(),
            Origin::Composer { .. } => self.composer_run.as_ref(),
        };
        if current.map(|run| run.generation) != Some(message.origin.generation()) {
            debug!(origin = ?message.origin, "Dropping stale render op");
            return;
        }

        let from_step = matches!(message.origin, Origin::Step { .. });
        match message.op {
            RenderOp::ComposerText(text) => self.renderer.set_composer_text(&text),
            RenderOp::ShowThinking => {
                self.renderer.show_thinking();
                self.renderer.scroll_to_latest();
            }
            RenderOp::HideThinking => self.renderer.hide_thinking(),
            RenderOp::Illustrate(illustration) => self.renderer.set_illustration(illustration),
            RenderOp::Append(bubble) => {
                let node = self.renderer.append(bubble);
                if from_step {
                    self.history.record(node);
                }
                self.renderer.scroll_to_latest();
            }
            RenderOp::Finished if from_step => {
                self.history.complete_last();
                self.step_run = None;
                debug!(cursor = ?self.cursor, "Step finished");
                self.sync_controls();
            }
            RenderOp::Finished => {
                self.composer_run = None;
            }
        }
    }

    /// Apply player messages until nothing is animating
    pub async fn settle(&mut self, rx: &mut mpsc::UnboundedReceiver<PlayerMessage>) {
        while self.is_busy() {
            match rx.recv().await {
                Some(message) => self.apply(message),
                None => break,
            }
        }
    }

    pub fn controls(&self) -> ControlState {
        ControlState {
            can_advance: self.step_run.is_none() && self.has_next(),
            can_retreat: !self.history.is_empty(),
            playing: self.step_run.is_some(),
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn is_playing(&self) -> bool {
        self.step_run.is_some()
    }

    /// A step or composer echo is still animating
    pub fn is_busy(&self) -> bool {
        self.step_run.is_some() || self.composer_run.is_some()
    }

    fn has_next(&self) -> bool {
        match (self.cursor, self.script.last_index()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(cursor), Some(last)) => cursor < last,
        }
    }

    fn next_run(&mut self) -> (u64, CancellationToken) {
        self.generation += 1;
        (self.generation, CancellationToken::new())
    }

    fn sync_controls(&mut self) {
        let controls = self.controls();
        self.renderer.set_controls(controls);
    }
}
