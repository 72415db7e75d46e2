//! Play a script to completion without a terminal and collect the
//! transcript as plain text. Backs `advisor --print`.

use tokio::sync::mpsc;

use crate::playback::{Bubble, ControlState, Controller, NodeId, Pacing, Renderer};
use crate::script::{Illustration, Script};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Bubble(NodeId, Bubble),
    Illustration(Illustration),
}

/// Renderer that records appended bubbles and illustration swaps in order
#[derive(Debug, Default)]
pub struct TranscriptRenderer {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TranscriptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One line per entry; multi-line bodies keep their line breaks
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Bubble(_, bubble) => format!(
                    "{} [{}]: {}",
                    bubble.role.as_str(),
                    bubble.timestamp,
                    bubble.text()
                ),
                Entry::Illustration(illustration) => {
                    format!("[illustration: {}]", illustration.caption())
                }
            })
            .collect()
    }
}

impl Renderer for TranscriptRenderer {
    fn append(&mut self, bubble: Bubble) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.entries.push(Entry::Bubble(id, bubble));
        id
    }

    fn remove(&mut self, node: NodeId) {
        self.entries
            .retain(|entry| !matches!(entry, Entry::Bubble(id, _) if *id == node));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn show_thinking(&mut self) {}

    fn hide_thinking(&mut self) {}

    fn set_composer_text(&mut self, _text: &str) {}

    fn set_illustration(&mut self, illustration: Illustration) {
        self.entries.push(Entry::Illustration(illustration));
    }

    fn set_controls(&mut self, _controls: ControlState) {}

    fn scroll_to_latest(&mut self) {}
}

/// Play every step (and optionally the example report) and return the
/// transcript lines
pub async fn transcript(script: Script, pacing: Pacing, with_report: bool) -> Vec<String> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = Controller::new(script, pacing, TranscriptRenderer::new(), tx);

    while controller.advance() {
        controller.settle(&mut rx).await;
    }
    if with_report {
        controller.open_report();
    }
    tracing::info!(steps = controller.history().len(), "Headless playback done");

    controller.renderer().lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Message, Step};

    #[tokio::test]
    async fn test_transcript_of_builtin_script() {
        let lines = transcript(Script::performance_advisor(), Pacing::instant(), false).await;

        assert!(lines[0].starts_with("assistant ["));
        assert!(lines[0].contains("Performance Advisor assistant"));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("user [") && l.contains("Any anomalies in the last hour?")));
        assert!(lines.iter().any(|l| l == "[illustration: Anomalies]"));
        assert!(lines.last().unwrap().contains("SQL Optimization Recommendation"));
    }

    #[tokio::test]
    async fn test_report_appended_last() {
        let script = Script::new(vec![Step::new(vec![Message::assistant("Hi")])]);
        let lines = transcript(script, Pacing::instant(), true).await;
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("Opened example Query Analysis Report below."));
        assert!(lines[2].contains("# Query Analysis Report"));
    }

    #[tokio::test]
    async fn test_empty_script_prints_nothing() {
        let lines = transcript(Script::default(), Pacing::instant(), false).await;
        assert!(lines.is_empty());
    }

    #[test]
    fn test_remove_drops_only_that_bubble() {
        let mut renderer = TranscriptRenderer::new();
        let a = renderer.append(Bubble::user("a"));
        renderer.set_illustration(Illustration::Queries);
        renderer.append(Bubble::assistant("b"));
        renderer.remove(a);
        let lines = renderer.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[illustration: Queries]");
    }
}
