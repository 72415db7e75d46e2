use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        EnableBracketedPaste, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{Config, KeyCombo, KeyContext};
use crate::playback::{Controller, PlayerMessage};
use crate::script::Script;
use crate::ui::action::Action;
use crate::ui::components::{
    ChatView, Composer, GlobalFooter, ASSISTANT_ACCENT, HEADER_BG, TEXT_FAINT, TEXT_MUTED,
};
use crate::ui::events::{AppEvent, Focus};
use crate::ui::page::Page;
use crate::ui::terminal_guard::TerminalGuard;

/// Below this width the illustration panel is hidden
const MIN_WIDTH_FOR_PANEL: u16 = 100;

/// Main application state
pub struct App {
    config: Config,
    controller: Controller<Page>,
    player_rx: mpsc::UnboundedReceiver<PlayerMessage>,
    focus: Focus,
    should_quit: bool,
    /// Transcript height at the last draw, for page scrolling
    chat_height: u16,
    chat_area: Rect,
    composer_area: Rect,
}

impl App {
    pub fn new(config: Config, script: Script) -> Self {
        let (player_tx, player_rx) = mpsc::unbounded_channel();
        let page = Page::from_config(&config);
        let controller = Controller::new(script, config.pacing, page, player_tx);

        Self {
            config,
            controller,
            player_rx,
            focus: Focus::Transcript,
            should_quit: false,
            chat_height: 0,
            chat_area: Rect::default(),
            composer_area: Rect::default(),
        }
    }

    pub fn controller(&self) -> &Controller<Page> {
        &self.controller
    }

    pub fn page(&self) -> &Page {
        self.controller.renderer()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Play the first step if autoplay is on. Must run inside a Tokio runtime.
    pub fn start(&mut self) {
        if self.config.autoplay {
            self.controller.advance();
        }
    }

    /// Apply queued player messages until nothing is animating
    pub async fn settle(&mut self) {
        self.controller.settle(&mut self.player_rx).await;
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard::new();
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        info!(steps = self.controller.script().len(), "Demo started");
        self.start();

        let result = self.event_loop(&mut terminal).await;

        guard.cleanup()?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(100));

        loop {
            terminal.draw(|f| self.draw(f))?;

            let event = tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => AppEvent::Input(event),
                    Some(Err(err)) => return Err(err.into()),
                    None => AppEvent::Quit,
                },
                Some(message) = self.player_rx.recv() => AppEvent::Player(message),
                _ = ticker.tick() => AppEvent::Tick,
            };
            self.handle_event(event);

            if self.should_quit {
                break;
            }
        }

        info!("Demo finished");
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) => self.handle_key_event(key),
            AppEvent::Input(Event::Mouse(mouse)) => self.handle_mouse_event(mouse),
            AppEvent::Input(Event::Paste(text)) => {
                if self.focus == Focus::Composer {
                    self.controller.renderer_mut().composer_mut().insert_str(&text);
                }
            }
            AppEvent::Input(_) => {}
            AppEvent::Player(message) => self.controller.apply(message),
            AppEvent::Tick => self.controller.renderer_mut().tick(),
            AppEvent::Quit => self.should_quit = true,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let combo = KeyCombo::from_key_event(&key);
        let context = KeyContext::from_focus(self.focus);
        if let Some(action) = self.config.keybindings.get_action(&combo, context).cloned() {
            self.dispatch(action);
            return;
        }

        if self.focus == Focus::Composer {
            if let KeyCode::Char(c) = key.code {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.controller.renderer_mut().composer_mut().insert_char(c);
                }
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "Dispatching action");
        let page_lines = self.chat_height.max(2) as usize / 2;

        match action {
            Action::Quit => self.should_quit = true,
            Action::Advance => {
                self.controller.advance();
            }
            Action::Retreat => {
                self.controller.retreat();
            }
            Action::Restart => self.controller.restart(),
            Action::OpenReport => self.controller.open_report(),
            Action::SelectAnomaly(n) => {
                let index = usize::from(n.saturating_sub(1));
                let page = self.controller.renderer_mut();
                if !page.panel_mut().dashboard_mut().select(index) {
                    debug!(anomaly = n, "No such anomaly");
                }
            }
            Action::FocusComposer => self.set_focus(Focus::Composer),
            Action::FocusTranscript => self.set_focus(Focus::Transcript),
            Action::ScrollUp(n) => self.chat_mut().scroll_up(n as usize),
            Action::ScrollDown(n) => self.chat_mut().scroll_down(n as usize),
            Action::ScrollPageUp => self.chat_mut().scroll_up(page_lines),
            Action::ScrollPageDown => self.chat_mut().scroll_down(page_lines),
            Action::ScrollToTop => self.chat_mut().scroll_to_top(),
            Action::ScrollToBottom => self.chat_mut().scroll_to_bottom(),
            Action::Submit => self.submit(),
            Action::Backspace => self.composer_mut().backspace(),
            Action::Delete => self.composer_mut().delete(),
            Action::DeleteWordBack => self.composer_mut().delete_word_back(),
            Action::DeleteToStart => self.composer_mut().delete_to_start(),
            Action::DeleteToEnd => self.composer_mut().delete_to_end(),
            Action::MoveCursorLeft => self.composer_mut().move_left(),
            Action::MoveCursorRight => self.composer_mut().move_right(),
            Action::MoveCursorStart => self.composer_mut().move_start(),
            Action::MoveCursorEnd => self.composer_mut().move_end(),
        }
    }

    /// Send the composer text; blank text advances the script instead
    fn submit(&mut self) {
        let text = self.page().composer().text().to_string();
        if self.controller.submit(&text) {
            self.composer_mut().take();
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.composer_mut().set_focused(focus == Focus::Composer);
    }

    fn chat_mut(&mut self) -> &mut ChatView {
        self.controller.renderer_mut().chat_mut()
    }

    fn composer_mut(&mut self) -> &mut Composer {
        self.controller.renderer_mut().composer_mut()
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp => self.chat_mut().scroll_up(3),
            MouseEventKind::ScrollDown => self.chat_mut().scroll_down(3),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.composer_area.contains(position) {
                    self.set_focus(Focus::Composer);
                } else if self.chat_area.contains(position) {
                    self.set_focus(Focus::Transcript);
                }
            }
            _ => {}
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let [main, footer_area] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(f.area());

        let chat_column = if main.width >= MIN_WIDTH_FOR_PANEL {
            let [panel, chat] =
                Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .areas(main);
            self.controller
                .renderer_mut()
                .render_panel(panel, f.buffer_mut());
            chat
        } else {
            main
        };

        let [header_area, chat_area, composer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .areas(chat_column);
        self.chat_height = chat_area.height;
        self.chat_area = chat_area;
        self.composer_area = composer_area;

        self.header_line().render(header_area, f.buffer_mut());

        let page = self.controller.renderer_mut();
        page.render_chat(chat_area, f.buffer_mut());
        page.composer().render(composer_area, f.buffer_mut());
        if let Some((x, y)) = page.composer().cursor_position(composer_area) {
            f.set_cursor_position((x, y));
        }

        GlobalFooter::from_state(self.focus, self.controller.controls())
            .render(footer_area, f.buffer_mut());
    }

    fn header_line(&self) -> Paragraph<'static> {
        let total = self.controller.script().len();
        let shown = self.controller.history().len();
        let mut spans = vec![
            Span::styled(
                " Performance Advisor",
                Style::default()
                    .fg(ASSISTANT_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  step {}/{}", shown, total),
                Style::default().fg(TEXT_MUTED),
            ),
        ];
        if self.controller.is_playing() {
            spans.push(Span::styled("  ▶ playing", Style::default().fg(TEXT_FAINT)));
        }
        Paragraph::new(Line::from(spans)).style(Style::default().bg(HEADER_BG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Message, Step};
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app_with(script: Script) -> App {
        App::new(Config::default().with_fast_forward(), script)
    }

    fn two_steps() -> Script {
        Script::new(vec![
            Step::new(vec![Message::assistant("Hi")]),
            Step::new(vec![Message::user("Q"), Message::assistant("A")]),
        ])
    }

    #[tokio::test]
    async fn test_enter_advances_in_transcript() {
        let mut app = app_with(two_steps());
        app.handle_key_event(key(KeyCode::Enter));
        app.settle().await;
        assert_eq!(app.page().node_count(), 1);

        app.handle_key_event(key(KeyCode::Enter));
        app.settle().await;
        assert_eq!(app.page().node_count(), 3);
        assert_eq!(app.controller().cursor(), Some(1));
    }

    #[tokio::test]
    async fn test_backspace_retreats() {
        let mut app = app_with(two_steps());
        app.dispatch(Action::Advance);
        app.settle().await;
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(app.page().node_count(), 0);
        assert_eq!(app.controller().cursor(), None);
    }

    #[tokio::test]
    async fn test_uppercase_r_restarts() {
        let mut app = app_with(two_steps());
        for modifiers in [KeyModifiers::SHIFT, KeyModifiers::NONE] {
            app.dispatch(Action::Advance);
            app.settle().await;
            assert_eq!(app.page().node_count(), 1);

            let mut shifted = key(KeyCode::Char('R'));
            shifted.modifiers = modifiers;
            app.handle_key_event(shifted);
            assert_eq!(app.controller().cursor(), None);
            assert_eq!(app.page().node_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_typing_goes_to_composer_when_focused() {
        let mut app = app_with(two_steps());
        app.handle_key_event(key(KeyCode::Char('i')));
        assert_eq!(app.focus(), Focus::Composer);

        for c in "hey q".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        assert_eq!(app.page().composer().text(), "hey q");
        assert!(!app.should_quit());

        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.page().composer().is_empty());
        app.settle().await;

        let texts: Vec<String> = app.page().bubbles().map(|b| b.text().to_string()).collect();
        assert_eq!(texts[0], "hey q");
        assert!(app.controller().history().is_empty());
    }

    #[tokio::test]
    async fn test_empty_composer_enter_advances() {
        let mut app = app_with(two_steps());
        app.dispatch(Action::FocusComposer);
        app.handle_key_event(key(KeyCode::Enter));
        app.settle().await;
        assert_eq!(app.controller().cursor(), Some(0));
    }

    #[test]
    fn test_quit_from_transcript() {
        let mut app = app_with(Script::default());
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_select_anomaly() {
        let mut app = app_with(Script::default());
        app.handle_key_event(key(KeyCode::Char('2')));
        let page = app.controller.renderer_mut();
        assert_eq!(page.panel_mut().dashboard().selected(), Some(1));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app_with(Script::default());
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        app.handle_key_event(release);
        assert!(!app.should_quit());
    }
}
