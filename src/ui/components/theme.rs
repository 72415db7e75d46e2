//! Shared UI color constants.

use ratatui::style::Color;

pub const HEADER_BG: Color = Color::Rgb(20, 20, 20);
pub const FOOTER_BG: Color = Color::Rgb(25, 25, 25);
pub const PANEL_BORDER: Color = Color::Rgb(70, 70, 70);
pub const PANEL_BORDER_FOCUSED: Color = Color::Rgb(110, 150, 200);

pub const KEY_HINT_BG: Color = Color::Rgb(60, 60, 60);
pub const INPUT_BG: Color = Color::Rgb(30, 30, 30);
pub const MARKDOWN_CODE_BG: Color = Color::Rgb(35, 35, 35);

pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_MUTED: Color = Color::Gray;
pub const TEXT_FAINT: Color = Color::DarkGray;

pub const USER_ACCENT: Color = Color::Rgb(120, 200, 120);
pub const ASSISTANT_ACCENT: Color = Color::Rgb(110, 150, 200);

/// Background for report lines that flag a problem
pub const CALLOUT_RED_BG: Color = Color::Rgb(90, 25, 25);
/// Background for report lines that carry the fix
pub const CALLOUT_YELLOW_BG: Color = Color::Rgb(85, 75, 20);

pub const CHART_LINE: Color = Color::Rgb(90, 160, 230);
pub const CHART_ANOMALY: Color = Color::Rgb(230, 90, 80);
pub const CHART_ANOMALY_SELECTED: Color = Color::Rgb(255, 200, 60);
