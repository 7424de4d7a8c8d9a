//! Application shell
//!
//! Owns the bus, the palette and the mounted view, runs the terminal event
//! loop and executes effects. There is exactly one key listener: this loop.

use super::bus::KeyboardCommandBus;
use super::controller;
use super::effect::{Effect, EffectQueue};
use super::palette::{PaletteOutcome, PaletteState};
use super::state::{FocusTarget, Propagation, Route, StatusMessage};
use super::store::Store;
use super::ui;
use super::views::{self, FeatureView, ViewContext};
use eyre::Result;
use log::{debug, info};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Upper bound on how long the loop blocks waiting for input
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    pub bus: KeyboardCommandBus,
    pub palette: PaletteState,
    pub view: Box<dyn FeatureView>,
    pub status_message: Option<StatusMessage>,
    pub should_quit: bool,
    ctx: ViewContext,
}

impl App {
    pub fn new(store: Store, prefix_timeout: Duration, start_route: Route) -> Self {
        let ctx = ViewContext {
            store: store.shared(),
            effects: EffectQueue::new(),
        };
        let mut bus = KeyboardCommandBus::new(prefix_timeout);
        let mut view = views::build(start_route, &ctx);
        view.mount(&mut bus);

        Self {
            bus,
            palette: PaletteState::new(),
            view,
            status_message: None,
            should_quit: false,
            ctx,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.run_loop(&mut terminal);
        ratatui::restore();
        self.view.unmount(&mut self.bus);
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        info!("starting at {}", self.view.route());

        while !self.should_quit {
            let now = Instant::now();
            self.bus.tick(now);
            self.palette.sync_visibility(self.bus.show_command_palette());

            if self
                .status_message
                .as_ref()
                .is_some_and(StatusMessage::is_expired)
            {
                self.status_message = None;
            }

            terminal.draw(|frame| ui::render(frame, self))?;

            // wake up in time to drop an expired g-prefix
            let timeout = self
                .bus
                .prefix_remaining(now)
                .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));

            if event::poll(timeout)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key, Instant::now());
            }
        }

        info!("shutting down");
        Ok(())
    }

    /// Where a passed-through key would land
    pub fn focus(&self) -> FocusTarget {
        if self.bus.show_command_palette() {
            FocusTarget::TextInput
        } else {
            self.view.focus()
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.run_effects(vec![Effect::Quit]);
            return;
        }

        let focus = self.focus();
        let dispatch = self.bus.handle_key(key, focus, now);
        if self.palette.sync_visibility(self.bus.show_command_palette()) {
            debug!("palette opened");
        }

        if dispatch.propagation == Propagation::Continue && focus == FocusTarget::TextInput {
            if self.bus.show_command_palette() {
                self.handle_palette_key(key);
            } else {
                self.view.handle_input(key);
            }
        }

        let mut effects = dispatch.effects.into_vec();
        effects.extend(self.ctx.effects.drain());
        self.run_effects(effects);
    }

    fn handle_palette_key(&mut self, key: KeyEvent) {
        match self.palette.apply(controller::palette::handle(key)) {
            PaletteOutcome::Stay => {}
            PaletteOutcome::Close => self.bus.set_show_command_palette(false),
            PaletteOutcome::Run(command) => {
                debug!("palette runs {}", command.id);
                if let Some(effect) = command.effect() {
                    self.ctx.effects.push(effect);
                }
                self.bus.set_show_command_palette(false);
            }
        }
        self.palette.sync_visibility(self.bus.show_command_palette());
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate(route) => self.navigate(route),
                Effect::SetStatus { text, kind } => {
                    self.status_message = Some(StatusMessage::new(text, kind));
                }
                Effect::Quit => self.should_quit = true,
            }
        }
    }

    /// Unmount the current view before the next one mounts, so none of its
    /// handlers can be reached afterwards
    pub fn navigate(&mut self, route: Route) {
        if self.view.route() == route {
            return;
        }
        debug!("navigate {} -> {route}", self.view.route());

        self.view.unmount(&mut self.bus);
        self.view = views::build(route, &self.ctx);
        self.view.mount(&mut self.bus);
        debug!("{} actions registered", self.bus.registered_count());
    }
}

#[cfg(test)]
mod tests {
    use super::super::action::ActionKey;
    use super::super::state::{MessageKind, Mode};
    use super::*;

    struct TestApp {
        app: App,
        now: Instant,
    }

    impl TestApp {
        fn new(route: Route) -> Self {
            Self {
                app: App::new(Store::seeded(&[], &[]), Duration::from_millis(1500), route),
                now: Instant::now(),
            }
        }

        fn key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
            self.app.handle_key(KeyEvent::new(code, modifiers), self.now);
        }

        fn keys(&mut self, text: &str) {
            for c in text.chars() {
                self.key(KeyCode::Char(c), KeyModifiers::NONE);
            }
        }

        fn route(&self) -> Route {
            self.app.view.route()
        }
    }

    #[test]
    fn test_g_chords_navigate() {
        let mut t = TestApp::new(Route::Home);
        t.keys("gl");
        assert_eq!(t.route(), Route::Links);
        t.keys("gb");
        assert_eq!(t.route(), Route::Blogs);
        t.keys("ga");
        assert_eq!(t.route(), Route::Analytics);
        t.keys("gh");
        assert_eq!(t.route(), Route::Home);
        assert_eq!(t.app.bus.mode(), Mode::Normal);
    }

    #[test]
    fn test_navigation_swaps_registrations() {
        let mut t = TestApp::new(Route::Blogs);
        assert!(t.app.bus.is_registered(ActionKey::PageP));

        t.keys("gl");
        assert!(!t.app.bus.is_registered(ActionKey::PageP));
        assert!(t.app.bus.is_registered(ActionKey::Delete));

        t.keys("ga");
        assert!(!t.app.bus.is_registered(ActionKey::Delete));
        assert!(!t.app.bus.is_registered(ActionKey::Down));
    }

    #[test]
    fn test_palette_filters_and_runs() {
        let mut t = TestApp::new(Route::Home);
        t.keys(":");
        assert!(t.app.bus.show_command_palette());
        assert_eq!(t.app.bus.mode(), Mode::Command);
        assert_eq!(t.app.focus(), FocusTarget::TextInput);

        // j is text while the palette has focus
        t.keys("blog");
        assert_eq!(t.app.palette.query().text(), "blog");
        assert_eq!(t.app.palette.filtered().len(), 1);

        t.key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(t.route(), Route::Blogs);
        assert!(!t.app.bus.show_command_palette());
        assert_eq!(t.app.bus.mode(), Mode::Normal);
    }

    #[test]
    fn test_palette_navigation_keys() {
        let mut t = TestApp::new(Route::Home);
        t.keys("/");
        t.key(KeyCode::Down, KeyModifiers::NONE);
        t.key(KeyCode::Char('j'), KeyModifiers::CONTROL);
        t.key(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(t.app.palette.selected_index(), 1);
        assert!(t.app.palette.query().is_empty());

        t.key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(t.route(), Route::Links);
    }

    #[test]
    fn test_palette_reopens_empty() {
        let mut t = TestApp::new(Route::Home);
        t.keys(":zzz");
        t.key(KeyCode::Enter, KeyModifiers::NONE);
        // nothing matched, palette stays open
        assert!(t.app.bus.show_command_palette());

        t.key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!t.app.bus.show_command_palette());

        t.keys(":");
        assert!(t.app.palette.query().is_empty());
        assert_eq!(t.app.palette.selected_index(), 0);
    }

    #[test]
    fn test_help_entry_just_closes() {
        let mut t = TestApp::new(Route::Links);
        t.keys(":keyboard");
        t.key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!t.app.bus.show_command_palette());
        assert_eq!(t.route(), Route::Links);
    }

    #[test]
    fn test_view_status_reaches_shell() {
        let mut t = TestApp::new(Route::Links);
        t.keys("d");
        assert!(t.app.status_message.is_none());
        assert_eq!(t.app.focus(), FocusTarget::TextInput);

        t.keys("y");
        let status = t.app.status_message.as_ref().unwrap();
        assert_eq!(status.kind, MessageKind::Success);
        assert!(status.text.starts_with("Deleted"));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut t = TestApp::new(Route::Home);
        t.key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(t.app.should_quit);
    }

    #[test]
    fn test_home_select_navigates() {
        let mut t = TestApp::new(Route::Home);
        t.keys("j");
        t.key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(t.route(), Route::Blogs);
    }
}
