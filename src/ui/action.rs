//! Actions that can be triggered by keybindings
//!
//! Each action is a single operation on the demo: moving through the
//! script, editing the composer, or scrolling the transcript.

/// All mappable UI actions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    // ========== Global Actions ==========
    /// Quit the application
    Quit,

    // ========== Playback ==========
    /// Play the next scripted step
    Advance,
    /// Undo the most recent step
    Retreat,
    /// Clear the conversation and go back to the start
    Restart,
    /// Append the example Query Analysis Report
    OpenReport,
    /// Show the drilldown for an anomaly (1-based)
    SelectAnomaly(u8),

    // ========== Focus ==========
    /// Move keyboard focus into the composer
    FocusComposer,
    /// Move keyboard focus back to the transcript
    FocusTranscript,

    // ========== Transcript Scrolling ==========
    /// Scroll transcript up by N lines
    ScrollUp(u16),
    /// Scroll transcript down by N lines
    ScrollDown(u16),
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,

    // ========== Composer Editing ==========
    /// Submit the composer (empty text advances the script)
    Submit,
    Backspace,
    Delete,
    DeleteWordBack,
    DeleteToStart,
    DeleteToEnd,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorStart,
    MoveCursorEnd,
}

impl Action {
    /// Short label for the footer key hints
    pub fn description(&self) -> &'static str {
        match self {
            Action::Quit => "Quit",
            Action::Advance => "Next",
            Action::Retreat => "Back",
            Action::Restart => "Restart",
            Action::OpenReport => "Report",
            Action::SelectAnomaly(_) => "Anomaly",
            Action::FocusComposer => "Type",
            Action::FocusTranscript => "Done",
            Action::ScrollUp(_) => "Scroll up",
            Action::ScrollDown(_) => "Scroll down",
            Action::ScrollPageUp => "Page up",
            Action::ScrollPageDown => "Page down",
            Action::ScrollToTop => "Top",
            Action::ScrollToBottom => "Bottom",
            Action::Submit => "Send",
            Action::Backspace => "Backspace",
            Action::Delete => "Delete",
            Action::DeleteWordBack => "Delete word",
            Action::DeleteToStart => "Delete to start",
            Action::DeleteToEnd => "Delete to end",
            Action::MoveCursorLeft => "Left",
            Action::MoveCursorRight => "Right",
            Action::MoveCursorStart => "Home",
            Action::MoveCursorEnd => "End",
        }
    }
}
