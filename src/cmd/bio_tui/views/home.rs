//! Home view: a short quick-nav menu

use super::super::action::ActionKey;
use super::super::bus::KeyboardCommandBus;
use super::super::effect::Effect;
use super::super::keybindings::PREFIX_ROUTES;
use super::super::state::Route;
use super::super::theme;
use super::{FeatureView, ListCursor, Registrations, ViewContext};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::cell::RefCell;
use std::rc::Rc;

const DESTINATIONS: [Route; 3] = [Route::Links, Route::Blogs, Route::Analytics];

#[derive(Clone)]
struct HomeModel {
    cursor: Rc<RefCell<ListCursor>>,
    ctx: ViewContext,
}

impl HomeModel {
    fn down(&self) {
        self.cursor.borrow_mut().down(DESTINATIONS.len());
    }

    fn up(&self) {
        self.cursor.borrow_mut().up();
    }

    fn select(&self) {
        let route = DESTINATIONS[self.cursor.borrow().index()];
        self.ctx.effects.push(Effect::Navigate(route));
    }
}

pub struct HomeView {
    model: HomeModel,
    registrations: Registrations,
}

impl HomeView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            model: HomeModel {
                cursor: Rc::new(RefCell::new(ListCursor::default())),
                ctx,
            },
            registrations: Registrations::default(),
        }
    }
}

impl FeatureView for HomeView {
    fn route(&self) -> Route {
        Route::Home
    }

    fn mount(&mut self, bus: &mut KeyboardCommandBus) {
        let regs = &mut self.registrations;
        regs.bind(bus, ActionKey::Down, &self.model, HomeModel::down);
        regs.bind(bus, ActionKey::Up, &self.model, HomeModel::up);
        regs.bind(bus, ActionKey::Select, &self.model, HomeModel::select);
    }

    fn unmount(&mut self, bus: &mut KeyboardCommandBus) {
        self.registrations.release(bus);
    }

    fn hints(&self) -> &'static str {
        "j/k:move  Enter:open  g+key:jump  ::commands  ?:help"
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let cursor = self.model.cursor.borrow().index();
        let store = self.model.ctx.store.borrow();

        let mut lines = vec![
            Line::from(Span::styled(
                "[bio]",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} links, {} posts",
                    store.links().len(),
                    store.blogs().len()
                ),
                Style::default().fg(theme::MUTED),
            )),
            Line::from(""),
        ];

        for (i, route) in DESTINATIONS.iter().enumerate() {
            let chord = PREFIX_ROUTES
                .iter()
                .find(|(_, r)| r == route)
                .map(|(k, _)| format!("g {k}"))
                .unwrap_or_default();
            let style = if i == cursor {
                Style::default().bg(theme::CURSOR_BG).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == cursor { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{:<12}", route.title()), style),
                Span::styled(chord, style.fg(theme::MUTED)),
            ]));
        }

        let block = Block::default()
            .title(" [home] ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::effect::EffectQueue;
    use super::super::super::state::FocusTarget;
    use super::super::super::store::Store;
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::{Duration, Instant};

    #[test]
    fn test_select_navigates_to_focused_destination() {
        let effects = EffectQueue::new();
        let mut bus = KeyboardCommandBus::new(Duration::from_millis(1500));
        let mut view = HomeView::new(ViewContext {
            store: Store::new().shared(),
            effects: effects.clone(),
        });
        view.mount(&mut bus);

        let now = Instant::now();
        for code in [KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Enter] {
            bus.handle_key(KeyEvent::new(code, KeyModifiers::NONE), FocusTarget::Shortcuts, now);
        }

        assert_eq!(effects.drain(), [Effect::Navigate(Route::Analytics)]);
    }
}
