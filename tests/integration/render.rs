//! Full-screen rendering with Ratatui's TestBackend

use advisor::ui::Action;
use advisor::App;

use super::common::fixtures::{fast_config, two_step_script};
use super::common::terminal::{assert_buffer_contains, buffer_contains, create_test_terminal_sized};

#[tokio::test]
async fn test_wide_layout_shows_dashboard_and_chat() {
    let mut app = App::new(fast_config(), two_step_script());
    app.dispatch(Action::Advance);
    app.settle().await;

    let mut terminal = create_test_terminal_sized(140, 40);
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer();

    assert_buffer_contains(buffer, "Performance Advisor");
    assert_buffer_contains(buffer, "step 1/2");
    assert_buffer_contains(buffer, "• Hi");
    assert_buffer_contains(buffer, "Cluster Load");
    assert_buffer_contains(buffer, "Top Queries");
    assert_buffer_contains(buffer, "15,272");
    assert_buffer_contains(buffer, "next");
}

#[tokio::test]
async fn test_narrow_layout_hides_panel() {
    let mut app = App::new(fast_config(), two_step_script());
    app.dispatch(Action::Advance);
    app.settle().await;

    let mut terminal = create_test_terminal_sized(80, 24);
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer();

    assert_buffer_contains(buffer, "• Hi");
    assert!(!buffer_contains(buffer, "Top Queries"));
}

#[tokio::test]
async fn test_anomaly_drilldown_rendered() {
    let mut app = App::new(fast_config(), two_step_script());
    app.dispatch(Action::SelectAnomaly(2));

    let mut terminal = create_test_terminal_sized(160, 45);
    terminal.draw(|f| app.draw(f)).unwrap();
    assert_buffer_contains(terminal.backend().buffer(), "Anomaly 2: Top contributors");
}

#[tokio::test]
async fn test_report_callout_rendered() {
    let mut app = App::new(fast_config(), two_step_script());
    app.dispatch(Action::OpenReport);
    app.dispatch(Action::ScrollToTop);

    let mut terminal = create_test_terminal_sized(100, 40);
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer();
    assert_buffer_contains(buffer, "Opened example Query Analysis Report below.");
    assert_buffer_contains(buffer, "Query Analysis Report");
}

#[tokio::test]
async fn test_composer_placeholder_and_focus_hints() {
    let mut app = App::new(fast_config(), two_step_script());
    let mut terminal = create_test_terminal_sized(90, 20);

    terminal.draw(|f| app.draw(f)).unwrap();
    assert_buffer_contains(terminal.backend().buffer(), "Ask about your cluster");
    assert_buffer_contains(terminal.backend().buffer(), "restart");

    app.dispatch(Action::FocusComposer);
    terminal.draw(|f| app.draw(f)).unwrap();
    assert_buffer_contains(terminal.backend().buffer(), "send");
}
