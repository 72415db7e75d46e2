//! Composer submissions through the app

use std::time::Duration;

use advisor::ui::{Action, Focus};
use advisor::{App, Role, Script};

use super::common::fixtures::{dashboard_config, fast_config, two_step_script};

const ACK: &str = "Thanks! I will analyze those details and update the insights.";

fn type_text(app: &mut App, text: &str) {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    for c in text.chars() {
        app.handle_key_event(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
    }
}

#[tokio::test]
async fn test_submit_echoes_and_acknowledges() {
    let mut app = App::new(fast_config(), two_step_script());
    app.dispatch(Action::FocusComposer);
    type_text(&mut app, "  why is it slow?  ");
    app.dispatch(Action::Submit);
    app.settle().await;

    let bubbles: Vec<(Role, String)> = app
        .page()
        .bubbles()
        .map(|b| (b.role, b.text().to_string()))
        .collect();
    assert_eq!(
        bubbles,
        vec![
            (Role::User, "why is it slow?".to_string()),
            (Role::Assistant, ACK.to_string()),
        ]
    );
    assert!(app.controller().history().is_empty());
    assert_eq!(app.controller().cursor(), None);
    assert!(app.page().composer().is_empty());
}

#[tokio::test]
async fn test_whitespace_submit_advances_script() {
    let mut app = App::new(fast_config(), two_step_script());
    app.dispatch(Action::FocusComposer);
    type_text(&mut app, "   ");
    app.dispatch(Action::Submit);
    app.settle().await;

    assert_eq!(app.controller().cursor(), Some(0));
    assert_eq!(app.page().node_count(), 1);
    assert_eq!(app.focus(), Focus::Composer);
}

#[tokio::test(start_paused = true)]
async fn test_submit_ignored_while_echo_plays() {
    let mut app = App::new(dashboard_config(), Script::default());
    app.dispatch(Action::FocusComposer);
    type_text(&mut app, "first");
    app.dispatch(Action::Submit);

    tokio::time::sleep(Duration::from_millis(120)).await;
    type_text(&mut app, "second");
    app.dispatch(Action::Submit);
    assert_eq!(app.page().composer().text(), "second");

    app.settle().await;
    let users: Vec<String> = app
        .page()
        .bubbles()
        .filter(|b| b.role == Role::User)
        .map(|b| b.text().to_string())
        .collect();
    assert_eq!(users, vec!["first".to_string()]);
    assert_eq!(app.page().node_count(), 2);
}

#[tokio::test]
async fn test_echo_survives_retreat() {
    let mut app = App::new(fast_config(), two_step_script());
    app.dispatch(Action::Advance);
    app.settle().await;

    app.dispatch(Action::FocusComposer);
    type_text(&mut app, "hello");
    app.dispatch(Action::Submit);
    app.settle().await;
    assert_eq!(app.page().node_count(), 3);

    app.dispatch(Action::FocusTranscript);
    app.dispatch(Action::Retreat);
    let texts: Vec<String> = app.page().bubbles().map(|b| b.text().to_string()).collect();
    assert_eq!(texts, vec!["hello".to_string(), ACK.to_string()]);
}
