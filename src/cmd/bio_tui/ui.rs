use super::app::App;
use super::keybindings::{HELP_SECTIONS, PREFIX_ROUTES};
use super::palette::PaletteState;
use super::state::{MessageKind, Mode, Route, StatusMessage};
use super::theme;
use itertools::Itertools;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_popup::Popup;
use unicode_width::UnicodeWidthStr;

const PALETTE_FOOTER: &str = "↑↓ navigate  ↵ select  esc close";

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_route_bar(frame, app.view.route(), chunks[0]);
    app.view.render(frame, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // render overlays
    if app.bus.mode() == Mode::GPrefix {
        render_prefix_popup(frame, chunks[2]);
    }

    if app.bus.show_help() {
        render_help(frame);
    }

    if app.bus.show_command_palette() {
        render_palette(frame, &app.palette);
    }

    // toast last, above everything
    if let Some(ref msg) = app.status_message
        && !msg.is_expired()
    {
        render_toast(frame, msg);
    }
}

fn render_route_bar(frame: &mut Frame, current: Route, area: Rect) {
    let mut spans = vec![Span::styled(
        " bio ",
        Style::default()
            .fg(Color::Black)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )];

    for route in Route::ALL {
        let style = if route == current {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme::MUTED)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(route.title(), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = app.bus.mode();
    let badge_style = match mode {
        Mode::GPrefix => Style::default()
            .fg(Color::Black)
            .bg(theme::PREFIX_BADGE_BG)
            .add_modifier(Modifier::BOLD),
        Mode::Command => Style::default()
            .fg(Color::Black)
            .bg(theme::COUNT)
            .add_modifier(Modifier::BOLD),
        Mode::Normal => Style::default()
            .fg(Color::Black)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    };
    let badge = format!(" {} ", mode.label());

    let hints = if app.bus.show_command_palette() {
        PALETTE_FOOTER
    } else if app.bus.show_help() {
        "esc close  ? help"
    } else {
        app.view.hints()
    };
    let hints = format!(" {hints}");

    let path = format!("{} ", app.view.route().path());
    let used = badge.width() + hints.width() + path.width();
    let padding = " ".repeat((area.width as usize).saturating_sub(used));

    let line = Line::from(vec![
        Span::styled(badge, badge_style),
        Span::styled(hints, Style::default().fg(theme::MUTED)),
        Span::raw(padding),
        Span::styled(path, Style::default().fg(theme::ACCENT)),
    ]);

    let bar_style = Style::default().bg(theme::STATUS_BAR_BG).fg(Color::White);
    let bar = Paragraph::new(line).style(bar_style);
    frame.render_widget(bar, area);
}

/// Chord menu shown just above the status bar while `g` is pending
fn render_prefix_popup(frame: &mut Frame, status_area: Rect) {
    let entries = PREFIX_ROUTES
        .iter()
        .map(|(key, route)| format!("{key} {}", route.title()))
        .collect_vec();
    let width = entries.iter().map(|e| e.width()).max().unwrap_or(0) as u16 + 4;
    let height = entries.len() as u16 + 2;

    let area = Rect {
        x: status_area.x,
        y: status_area.y.saturating_sub(height),
        width: width.min(status_area.width),
        height: height.min(status_area.y),
    };

    frame.render_widget(Clear, area);
    let lines = entries
        .into_iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect_vec();
    let block = Block::default()
        .title(" g- ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(theme::POPUP_BG));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_help(frame: &mut Frame) {
    let mut lines = Vec::new();
    for (i, section) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let title = match section.prefix {
            Some(prefix) => format!("{} ({prefix})", section.title),
            None => section.title.to_string(),
        };
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));

        for binding in section.bindings {
            let keys = binding.keys.iter().join("/");
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<10}"), Style::default().fg(theme::ACCENT)),
                Span::raw(binding.label),
            ]));
        }
    }

    let popup_area = centered(frame.area(), 44, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keyboard shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .style(Style::default().bg(theme::POPUP_BG));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn render_palette(frame: &mut Frame, palette: &PaletteState) {
    let filtered = palette.filtered();
    let rows = filtered.len().max(1) as u16;
    // query, separator, rows, separator, footer, borders
    let popup_area = centered(frame.area(), 56, rows + 6);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Commands ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .style(Style::default().bg(theme::POPUP_BG));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let width = inner.width as usize;
    let separator = Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(theme::BORDER),
    ));

    let query = palette.query();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme::ACCENT)),
            Span::raw(query.text().to_string()),
        ]),
        separator.clone(),
    ];

    let cursor_x = inner.x + 2 + query.text()[..query.cursor()].width() as u16;
    frame.set_cursor_position(Position::new(
        cursor_x.min(inner.right().saturating_sub(1)),
        inner.y,
    ));

    if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No commands found",
            Style::default().fg(theme::MUTED),
        )));
    }

    for (i, command) in filtered.iter().enumerate() {
        let shortcut = command.shortcut.unwrap_or("");
        let label = format!("  {}", command.label);
        let padding = width.saturating_sub(label.width() + shortcut.width() + 1);
        let text = format!("{label}{}{shortcut} ", " ".repeat(padding));

        let style = if i == palette.selected_index() {
            Style::default()
                .fg(Color::Black)
                .bg(theme::PALETTE_SELECTED_BG)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(separator);
    lines.push(Line::from(Span::styled(
        format!("  {PALETTE_FOOTER}"),
        Style::default().fg(theme::MUTED),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_toast(frame: &mut Frame, msg: &StatusMessage) {
    let color = match msg.kind {
        MessageKind::Info => Color::Blue,
        MessageKind::Success => theme::SUCCESS,
        MessageKind::Warning => Color::Yellow,
        MessageKind::Error => Color::Red,
    };

    let popup = Popup::new(msg.text.clone()).style(Style::default().fg(color).bg(theme::TOAST_BG));

    frame.render_widget(popup, frame.area());
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
