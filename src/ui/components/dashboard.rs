//! Synthetic Performance Advisor widgets drawn when no screenshot is
//! available: cluster load chart, anomaly timeline, top queries table and
//! the anomaly drill-down.

use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Widget},
};

use super::theme::{
    CALLOUT_YELLOW_BG, CHART_ANOMALY, CHART_ANOMALY_SELECTED, CHART_LINE, MARKDOWN_CODE_BG,
    PANEL_BORDER, TEXT_FAINT, TEXT_MUTED,
};

/// Samples across the chart
pub const SAMPLE_COUNT: usize = 60;

/// Half-open sample range flagged as anomalous
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnomalyWindow {
    pub start: usize,
    pub end: usize,
}

pub const ANOMALY_WINDOWS: [AnomalyWindow; 2] = [
    AnomalyWindow { start: 12, end: 18 },
    AnomalyWindow { start: 36, end: 41 },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryStat {
    pub query: &'static str,
    pub calls: u64,
    pub avg_ms: f64,
    pub total_ms: f64,
}

pub const EXAMPLE_QUERIES: [QueryStat; 3] = [
    QueryStat {
        query: "SELECT * FROM pgbench_accounts WHERE aid BETWEEN $1 AND $2 + $3 ORDER BY abalance DESC LIMIT $4",
        calls: 15272,
        avg_ms: 6787.04,
        total_ms: 103651664.49,
    },
    QueryStat {
        query: "UPDATE orders SET status=$1 WHERE id=$2",
        calls: 8240,
        avg_ms: 214.2,
        total_ms: 1766208.0,
    },
    QueryStat {
        query: "INSERT INTO events(user_id, ts, payload) VALUES($1, $2, $3)",
        calls: 120340,
        avg_ms: 12.3,
        total_ms: 1480182.0,
    },
];

#[derive(Debug, Clone)]
pub struct Dashboard {
    samples: Vec<f64>,
    /// Index into [`ANOMALY_WINDOWS`]
    selected: Option<usize>,
}

impl Dashboard {
    /// Chart jitter from a fixed seed, or fresh randomness when `None`
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::with_rng(&mut StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: &mut impl Rng) -> Self {
        Self {
            samples: generate_samples(rng),
            selected: None,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Open the drill-down for a window; out of range indexes are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < ANOMALY_WINDOWS.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let drilldown_height = if self.selected.is_some() { 4 } else { 0 };
        let [chart_area, gantt_area, table_area, drilldown_area] = Layout::vertical([
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(EXAMPLE_QUERIES.len() as u16 + 3),
            Constraint::Length(drilldown_height),
        ])
        .areas(area);

        self.render_chart(chart_area, buf);
        self.render_gantt(gantt_area, buf);
        render_query_table(table_area, buf);
        if let Some(index) = self.selected {
            Paragraph::new(drilldown_lines(index)).render(drilldown_area, buf);
        }
    }

    fn render_chart(&self, area: Rect, buf: &mut Buffer) {
        let load: Vec<(f64, f64)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        let windows: Vec<Vec<(f64, f64)>> = ANOMALY_WINDOWS
            .iter()
            .map(|w| load[w.start..=w.end.min(SAMPLE_COUNT - 1)].to_vec())
            .collect();

        let mut datasets = vec![Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(CHART_LINE))
            .data(&load)];
        for (i, data) in windows.iter().enumerate() {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.window_color(i)))
                    .data(data),
            );
        }

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(PANEL_BORDER))
                    .title(Span::styled("Cluster Load", Style::default().add_modifier(Modifier::BOLD))),
            )
            .x_axis(Axis::default().bounds([0.0, (SAMPLE_COUNT - 1) as f64]))
            .y_axis(
                Axis::default()
                    .bounds([0.0, 100.0])
                    .style(Style::default().fg(TEXT_FAINT))
                    .labels(["0", "50", "100"]),
            );
        chart.render(area, buf);
    }

    fn render_gantt(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            "Anomalies (press 1/2 for details)",
            Style::default().fg(TEXT_MUTED),
        )))
        .render(Rect { height: 1, ..area }, buf);

        if area.height < 2 {
            return;
        }
        let bar_y = area.y + 1;
        for x in area.x..area.x + area.width {
            buf[(x, bar_y)].set_symbol("─").set_fg(TEXT_FAINT);
        }
        for (i, window) in ANOMALY_WINDOWS.iter().enumerate() {
            let (start, len) = bar_geometry(*window, area.width);
            let color = self.window_color(i);
            for offset in 0..len {
                buf[(area.x + start + offset, bar_y)]
                    .set_symbol("█")
                    .set_fg(color);
            }
            if len > 0 {
                buf[(area.x + start, bar_y)]
                    .set_symbol(if i == 0 { "1" } else { "2" })
                    .set_fg(Color::Black)
                    .set_bg(color);
            }
        }
    }

    fn window_color(&self, index: usize) -> Color {
        if self.selected == Some(index) {
            CHART_ANOMALY_SELECTED
        } else {
            CHART_ANOMALY
        }
    }
}

/// Load samples: a slow sine wave plus uniform jitter
pub fn generate_samples(rng: &mut impl Rng) -> Vec<f64> {
    (0..SAMPLE_COUNT)
        .map(|i| 45.0 + 30.0 * (i as f64 / 6.0).sin() + 15.0 * rng.random::<f64>())
        .collect()
}

/// Column offset and width of a window's bar in a row `width` cells wide
pub fn bar_geometry(window: AnomalyWindow, width: u16) -> (u16, u16) {
    let width = width as usize;
    let start = window.start * width / SAMPLE_COUNT;
    let end = window.end * width / SAMPLE_COUNT;
    let len = end.saturating_sub(start).max(usize::from(width > 0));
    let start = start.min(width.saturating_sub(len));
    (start as u16, len as u16)
}

/// `15272` -> `15,272`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn render_query_table(area: Rect, buf: &mut Buffer) {
    let header = Row::new(["Query", "Calls", "Avg (ms)", "Total (ms)"])
        .style(Style::default().fg(TEXT_MUTED).add_modifier(Modifier::BOLD));
    let rows = EXAMPLE_QUERIES.iter().map(|q| {
        Row::new([
            Cell::from(q.query),
            Cell::from(format_thousands(q.calls)),
            Cell::from(format!("{:.2}", q.avg_ms)),
            Cell::from(format!("{:.2}", q.total_ms)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(13),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(PANEL_BORDER))
            .title(Span::styled("Top Queries", Style::default().add_modifier(Modifier::BOLD))),
    );
    Widget::render(table, area, buf);
}

/// Drill-down text for the anomaly at `index`
pub fn drilldown_lines(index: usize) -> Vec<Line<'static>> {
    let code = Style::default().fg(Color::Yellow).bg(MARKDOWN_CODE_BG);
    vec![
        Line::from(vec![
            Span::styled(
                format!("Anomaly {}", index + 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(": Top contributors"),
        ]),
        Line::from(vec![
            Span::raw("  • Hot query: "),
            Span::styled("SELECT * FROM pgbench_accounts WHERE aid BETWEEN ...", code),
        ]),
        Line::from(vec![
            Span::raw("  • Suggested fix: "),
            Span::styled(
                "Create RANGE index on aid",
                Style::default().fg(Color::White).bg(CALLOUT_YELLOW_BG),
            ),
        ]),
    ]
}
