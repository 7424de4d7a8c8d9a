//! Feature views
//!
//! A view is mounted when its route becomes current and unmounted before the
//! next one mounts. It registers its action handlers on mount and must release
//! every one of them on unmount, so no handler outlives the view's state.

mod analytics;
mod blogs;
mod home;
mod links;

use super::action::ActionKey;
use super::bus::KeyboardCommandBus;
use super::effect::EffectQueue;
use super::input::TextField;
use super::registry::ActionHandle;
use super::state::{FocusTarget, Route};
use super::store::SharedStore;
use super::theme;
use log::debug;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};
use tui_popup::Popup;
use unicode_width::UnicodeWidthStr;

pub trait FeatureView {
    fn route(&self) -> Route;

    fn mount(&mut self, bus: &mut KeyboardCommandBus);

    fn unmount(&mut self, bus: &mut KeyboardCommandBus);

    /// Whether one of the view's text fields currently has focus
    fn focus(&self) -> FocusTarget {
        FocusTarget::Shortcuts
    }

    /// Keys the bus passed through while `focus()` was `TextInput`
    fn handle_input(&mut self, _key: KeyEvent) {}

    /// Status bar hints
    fn hints(&self) -> &'static str;

    fn render(&self, frame: &mut Frame, area: Rect);
}

/// Handles to everything the view shares with the shell
#[derive(Clone)]
pub struct ViewContext {
    pub store: SharedStore,
    pub effects: EffectQueue,
}

pub fn build(route: Route, ctx: &ViewContext) -> Box<dyn FeatureView> {
    match route {
        Route::Home => Box::new(home::HomeView::new(ctx.clone())),
        Route::Links => Box::new(links::LinksView::new(ctx.clone())),
        Route::Blogs => Box::new(blogs::BlogsView::new(ctx.clone())),
        Route::Analytics => Box::new(analytics::AnalyticsView::new(ctx.clone())),
    }
}

/// The handles a view holds between mount and unmount
#[derive(Default)]
pub struct Registrations(Vec<ActionHandle>);

impl Registrations {
    /// Register `f` against a clone of `model`
    pub fn bind<M: Clone + 'static>(
        &mut self,
        bus: &mut KeyboardCommandBus,
        key: ActionKey,
        model: &M,
        f: fn(&M),
    ) {
        let model = model.clone();
        self.0.push(bus.register_action(key, move || f(&model)));
    }

    pub fn release(&mut self, bus: &mut KeyboardCommandBus) {
        debug!("releasing {} action registrations", self.len());
        for handle in self.0.drain(..) {
            bus.unregister_action(&handle);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Focus index into a list that can shrink underneath it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor(usize);

impl ListCursor {
    pub fn index(&self) -> usize {
        self.0
    }

    pub fn down(&mut self, len: usize) {
        self.0 = (self.0 + 1).min(len.saturating_sub(1));
    }

    pub fn up(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn clamp(&mut self, len: usize) {
        self.0 = self.0.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// A delete waiting for y/n. While one is pending the view owns the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: u64,
    pub label: String,
}

fn render_confirm(frame: &mut Frame, pending: &PendingDelete) {
    let body = Text::from(vec![
        Line::from(Span::styled(
            format!("Delete \"{}\"?", pending.label),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" delete  "),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" keep"),
        ]),
    ]);

    let popup = Popup::new(body)
        .title(" Confirm ")
        .style(Style::default().bg(theme::CONFIRM_BG))
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(popup, frame.area());
}

/// One labelled form field. Places the terminal cursor when `active`.
fn render_field(
    frame: &mut Frame,
    area: Rect,
    row: u16,
    label: &str,
    field: &TextField,
    active: bool,
) -> Line<'static> {
    let label_text = format!("{label:>6}: ");
    let label_style = if active {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::MUTED)
    };

    if active {
        let before_cursor = &field.text()[..field.cursor()];
        let x = area.x + (label_text.width() + before_cursor.width()) as u16;
        let x = x.min(area.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, area.y + row));
    }

    Line::from(vec![
        Span::styled(label_text, label_style),
        Span::raw(field.text().to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::super::store::Store;
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn test_list_cursor_clamps() {
        let mut cursor = ListCursor::default();
        cursor.up();
        assert_eq!(cursor.index(), 0);

        cursor.down(3);
        cursor.down(3);
        cursor.down(3);
        assert_eq!(cursor.index(), 2);

        cursor.clamp(1);
        assert_eq!(cursor.index(), 0);

        cursor.down(0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_registrations_release_everything() {
        let mut bus = KeyboardCommandBus::new(Duration::from_millis(1500));
        let mut regs = Registrations::default();
        let hits = Rc::new(Cell::new(0));

        regs.bind(&mut bus, ActionKey::Down, &hits, |h| h.set(h.get() + 1));
        regs.bind(&mut bus, ActionKey::Up, &hits, |h| h.set(h.get() + 1));
        assert_eq!(regs.len(), 2);

        regs.release(&mut bus);
        assert_eq!(regs.len(), 0);
        assert!(!bus.is_registered(ActionKey::Down));
        assert!(!bus.is_registered(ActionKey::Up));
    }

    #[test]
    fn test_every_route_builds_its_view() {
        let ctx = ViewContext {
            store: Store::new().shared(),
            effects: EffectQueue::new(),
        };
        for route in Route::ALL {
            assert_eq!(build(route, &ctx).route(), route);
        }
    }
}
