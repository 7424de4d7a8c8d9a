//! Analytics view: totals and top performers, read-only

use super::super::bus::KeyboardCommandBus;
use super::super::state::Route;
use super::super::store::{Ranked, Rollup};
use super::super::theme;
use super::{FeatureView, ViewContext};
use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BAR_WIDTH: usize = 20;

pub struct AnalyticsView {
    ctx: ViewContext,
    loaded_at: String,
}

impl AnalyticsView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            loaded_at: Local::now().format("%H:%M").to_string(),
        }
    }
}

impl FeatureView for AnalyticsView {
    fn route(&self) -> Route {
        Route::Analytics
    }

    // nothing to bind; every list shortcut stays a no-op here
    fn mount(&mut self, _bus: &mut KeyboardCommandBus) {}

    fn unmount(&mut self, _bus: &mut KeyboardCommandBus) {}

    fn hints(&self) -> &'static str {
        "g+key:jump  ::commands  ?:help"
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rollup = self.ctx.store.borrow().rollup();

        let block = Block::default()
            .title(format!(" [analytics] as of {} ", self.loaded_at))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(Paragraph::new(summary_lines(&rollup)), chunks[0]);

        if rollup.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "no clicks or views yet",
                    Style::default().fg(theme::MUTED),
                )),
                chunks[1],
            );
            return;
        }

        let mut lines = ranked_lines("top links", "clicks", &rollup.top_links);
        lines.push(Line::from(""));
        lines.extend(ranked_lines("top posts", "views", &rollup.top_blogs));
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }
}

fn summary_lines(rollup: &Rollup) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("link clicks ", Style::default().fg(theme::MUTED)),
            Span::styled(
                format_count(rollup.total_link_clicks),
                Style::default().fg(theme::COUNT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   blog views ", Style::default().fg(theme::MUTED)),
            Span::styled(
                format_count(rollup.total_blog_views),
                Style::default().fg(theme::COUNT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} links, {} posts", rollup.link_count, rollup.blog_count),
            Style::default().fg(theme::MUTED),
        )),
    ]
}

fn ranked_lines(title: &str, unit: &str, ranked: &[Ranked]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for entry in ranked {
        let filled = (entry.percentage as usize * BAR_WIDTH) / 100;
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<24}", entry.label)),
            Span::styled("█".repeat(filled), Style::default().fg(theme::ACCENT)),
            Span::styled(
                "░".repeat(BAR_WIDTH - filled),
                Style::default().fg(theme::BORDER),
            ),
            Span::styled(
                format!(" {} {unit} ({}%)", format_count(entry.count), entry.percentage),
                Style::default().fg(theme::MUTED),
            ),
        ]));
    }
    lines
}

/// 1234 → "1.2k", 2500000 → "2.5m"
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}m", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1.2k");
        assert_eq!(format_count(2_500_000), "2.5m");
    }

    #[test]
    fn test_ranked_bar_width_is_fixed() {
        let ranked = [
            Ranked { label: "a".into(), count: 10, percentage: 100 },
            Ranked { label: "b".into(), count: 0, percentage: 0 },
        ];
        let lines = ranked_lines("top", "clicks", &ranked);
        assert_eq!(lines.len(), 3);
        for line in &lines[1..] {
            let bar: usize = line.spans[1..3].iter().map(|s| s.content.chars().count()).sum();
            assert_eq!(bar, BAR_WIDTH);
        }
    }
}
