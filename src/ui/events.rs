use crate::playback::PlayerMessage;

/// Events consumed by the UI loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input event
    Input(crossterm::event::Event),

    /// Render op from a running animation
    Player(PlayerMessage),

    /// Tick event for the spinner and redraws
    Tick,

    /// Request to quit the application
    Quit,
}

/// Which pane receives unbound key presses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Focus {
    /// Navigation keys drive the playback
    #[default]
    Transcript,
    /// Typed characters go to the composer
    Composer,
}
