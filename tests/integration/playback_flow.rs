//! Step playback through the terminal page

use std::time::Duration;

use advisor::{Controller, Illustration, Pacing, Page, PlayerMessage, Role};
use proptest::prelude::*;
use tokio::sync::mpsc;

use super::common::fixtures::{illustrated_script, two_step_script};

type Rx = mpsc::UnboundedReceiver<PlayerMessage>;

fn controller_with(script: advisor::Script, pacing: Pacing) -> (Controller<Page>, Rx) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Controller::new(script, pacing, Page::default(), tx), rx)
}

fn drain(controller: &mut Controller<Page>, rx: &mut Rx) {
    while let Ok(message) = rx.try_recv() {
        controller.apply(message);
    }
}

fn roles(page: &Page) -> Vec<(Role, String)> {
    page.bubbles()
        .map(|b| (b.role, b.text().to_string()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_two_step_walkthrough() {
    let (mut controller, mut rx) = controller_with(two_step_script(), Pacing::default());

    assert!(controller.advance());
    controller.settle(&mut rx).await;
    assert_eq!(
        roles(controller.renderer()),
        vec![(Role::Assistant, "Hi".to_string())]
    );
    assert!(controller.controls().can_advance);

    assert!(controller.advance());
    controller.settle(&mut rx).await;
    assert_eq!(
        roles(controller.renderer()),
        vec![
            (Role::Assistant, "Hi".to_string()),
            (Role::User, "Q".to_string()),
            (Role::Assistant, "A".to_string()),
        ]
    );
    assert!(!controller.controls().can_advance);
    assert!(!controller.renderer().is_thinking());
    assert!(controller.renderer().composer().is_empty());

    // Past the end nothing happens
    assert!(!controller.advance());

    assert!(controller.retreat());
    assert_eq!(controller.renderer().node_count(), 1);
    assert_eq!(controller.cursor(), Some(0));

    assert!(controller.retreat());
    assert_eq!(controller.renderer().node_count(), 0);
    assert_eq!(controller.cursor(), None);
    assert!(!controller.controls().can_retreat);
}

#[tokio::test(start_paused = true)]
async fn test_user_message_is_typed_into_composer_first() {
    let (mut controller, mut rx) = controller_with(two_step_script(), Pacing::default());
    controller.advance();
    controller.settle(&mut rx).await;

    controller.advance();
    // "Q" takes one keystroke
    tokio::time::sleep(Duration::from_millis(10)).await;
    drain(&mut controller, &mut rx);
    assert_eq!(controller.renderer().composer().text(), "Q");
    assert_eq!(controller.renderer().node_count(), 1);

    tokio::time::sleep(Duration::from_millis(100)).await;
    drain(&mut controller, &mut rx);
    assert!(controller.renderer().composer().is_empty());
    assert!(controller.renderer().is_thinking());
    assert_eq!(controller.renderer().node_count(), 2);

    controller.settle(&mut rx).await;
    assert!(!controller.renderer().is_thinking());
    assert_eq!(controller.renderer().node_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retreat_while_thinking_discards_answer() {
    let (mut controller, mut rx) = controller_with(two_step_script(), Pacing::default());
    controller.advance();
    controller.settle(&mut rx).await;

    controller.advance();
    tokio::time::sleep(Duration::from_millis(200)).await;
    drain(&mut controller, &mut rx);
    assert!(controller.renderer().is_thinking());

    assert!(controller.retreat());
    assert!(!controller.renderer().is_thinking());
    assert_eq!(controller.renderer().node_count(), 1);

    // Let the cancelled player run out; its ops must not land
    tokio::time::sleep(Duration::from_secs(5)).await;
    drain(&mut controller, &mut rx);
    assert_eq!(controller.renderer().node_count(), 1);
    assert!(!controller.is_playing());
    assert!(controller.advance());
}

#[tokio::test]
async fn test_illustration_follows_answer_and_survives_retreat() {
    let (mut controller, mut rx) = controller_with(illustrated_script(), Pacing::instant());
    while controller.advance() {
        controller.settle(&mut rx).await;
    }
    assert_eq!(controller.renderer().illustration(), Illustration::Anomalies);

    controller.retreat();
    assert_eq!(controller.renderer().illustration(), Illustration::Anomalies);

    controller.restart();
    assert_eq!(controller.renderer().node_count(), 0);
    assert_eq!(controller.history().len(), 0);
    assert_eq!(controller.cursor(), None);
}

#[tokio::test]
async fn test_report_is_not_undone_by_retreat() {
    let (mut controller, mut rx) = controller_with(two_step_script(), Pacing::instant());
    controller.advance();
    controller.settle(&mut rx).await;
    controller.open_report();
    assert_eq!(controller.renderer().node_count(), 3);

    controller.retreat();
    let texts: Vec<String> = roles(controller.renderer()).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts.len(), 2);
    assert!(texts[1].contains("Query Analysis Report"));
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Advance,
    Retreat,
    Restart,
    Yield,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Advance),
        2 => Just(Op::Retreat),
        1 => Just(Op::Restart),
        3 => Just(Op::Yield),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_history_tracks_cursor_and_page(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let (mut controller, mut rx) = controller_with(illustrated_script(), Pacing::instant());

            for op in ops {
                match op {
                    Op::Advance => {
                        controller.advance();
                    }
                    Op::Retreat => {
                        controller.retreat();
                        assert!(!controller.renderer().is_thinking());
                    }
                    Op::Restart => {
                        controller.restart();
                        assert_eq!(controller.renderer().node_count(), 0);
                    }
                    Op::Yield => {
                        tokio::task::yield_now().await;
                        drain(&mut controller, &mut rx);
                    }
                }

                let expected_len = controller.cursor().map_or(0, |c| c + 1);
                assert_eq!(controller.history().len(), expected_len);
                assert_eq!(controller.renderer().node_count(), controller.history().node_count());
                assert!(controller.history().len() <= controller.script().len());
            }

            controller.settle(&mut rx).await;
            assert!(!controller.is_busy());
            assert!(!controller.renderer().is_thinking());
            assert_eq!(controller.renderer().node_count(), controller.history().node_count());
        });
    }
}
