mod chat_view;
mod composer;
mod dashboard;
mod global_footer;
mod illustration;
mod key_hints;
mod markdown;
mod scrollbar;
mod theme;
mod thinking_indicator;

pub use chat_view::ChatView;
pub use composer::Composer;
pub use dashboard::{
    bar_geometry, drilldown_lines, format_thousands, generate_samples, AnomalyWindow, Dashboard,
    QueryStat, ANOMALY_WINDOWS, EXAMPLE_QUERIES, SAMPLE_COUNT,
};
pub use global_footer::GlobalFooter;
pub use illustration::{IllustrationPanel, IllustrationSource};
pub use key_hints::{render_key_hints, KeyHint, KeyHintBarStyle};
pub use markdown::MarkdownRenderer;
pub use scrollbar::render_vertical_scrollbar;
pub use theme::*;
pub use thinking_indicator::ThinkingIndicator;
