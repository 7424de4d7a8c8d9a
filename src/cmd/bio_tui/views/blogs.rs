//! Blogs view: post list with publish toggles and an inline post editor

use super::super::action::ActionKey;
use super::super::bus::KeyboardCommandBus;
use super::super::controller::confirm::{self, Answer};
use super::super::effect::Effect;
use super::super::input::{TextEdit, TextField};
use super::super::state::{FocusTarget, MessageKind, Route};
use super::super::store::{Blog, age, slugify};
use super::super::theme;
use super::{
    FeatureView, ListCursor, PendingDelete, Registrations, ViewContext, render_confirm,
    render_field,
};
use chrono::Utc;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PostField {
    Title,
    Body,
}

#[derive(Debug, Clone)]
struct PostForm {
    editing: Option<u64>,
    title: TextField,
    body: TextField,
    field: PostField,
}

impl PostForm {
    fn new() -> Self {
        Self {
            editing: None,
            title: TextField::new(),
            body: TextField::new(),
            field: PostField::Title,
        }
    }

    fn edit(blog: &Blog) -> Self {
        Self {
            editing: Some(blog.id),
            title: TextField::with_text(&blog.title),
            body: TextField::with_text(&blog.content),
            field: PostField::Title,
        }
    }

    fn active_mut(&mut self) -> &mut TextField {
        match self.field {
            PostField::Title => &mut self.title,
            PostField::Body => &mut self.body,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            PostField::Title => PostField::Body,
            PostField::Body => PostField::Title,
        };
    }

    /// Differs from what the store holds. A new post is dirty once anything is typed.
    fn is_dirty(&self, blogs: &[Blog]) -> bool {
        match self.editing {
            Some(id) => blogs.iter().find(|b| b.id == id).is_none_or(|blog| {
                blog.title != self.title.text() || blog.content != self.body.text()
            }),
            None => !self.title.is_empty() || !self.body.is_empty(),
        }
    }
}

#[derive(Debug, Default)]
struct BlogsState {
    cursor: ListCursor,
    form: Option<PostForm>,
    pending_delete: Option<PendingDelete>,
}

#[derive(Clone)]
struct BlogsModel {
    state: Rc<RefCell<BlogsState>>,
    ctx: ViewContext,
}

impl BlogsModel {
    fn form_open(&self) -> bool {
        self.state.borrow().form.is_some()
    }

    fn confirming(&self) -> bool {
        self.state.borrow().pending_delete.is_some()
    }

    fn busy(&self) -> bool {
        self.form_open() || self.confirming()
    }

    fn focused_id(&self) -> Option<u64> {
        let index = self.state.borrow().cursor.index();
        self.ctx.store.borrow().blogs().get(index).map(|b| b.id)
    }

    fn down(&self) {
        if self.busy() {
            return;
        }
        let len = self.ctx.store.borrow().blogs().len();
        self.state.borrow_mut().cursor.down(len);
    }

    fn up(&self) {
        if self.busy() {
            return;
        }
        self.state.borrow_mut().cursor.up();
    }

    fn new_post(&self) {
        if self.busy() {
            return;
        }
        self.state.borrow_mut().form = Some(PostForm::new());
    }

    fn edit(&self) {
        if self.busy() {
            return;
        }
        let mut state = self.state.borrow_mut();
        let store = self.ctx.store.borrow();
        if let Some(blog) = store.blogs().get(state.cursor.index()) {
            state.form = Some(PostForm::edit(blog));
        }
    }

    fn delete(&self) {
        if self.busy() {
            return;
        }
        let mut state = self.state.borrow_mut();
        let store = self.ctx.store.borrow();
        if let Some(blog) = store.blogs().get(state.cursor.index()) {
            state.pending_delete = Some(PendingDelete {
                id: blog.id,
                label: blog.title.clone(),
            });
        }
    }

    fn confirm_delete(&self) {
        let mut state = self.state.borrow_mut();
        let Some(pending) = state.pending_delete.take() else {
            return;
        };
        let mut store = self.ctx.store.borrow_mut();
        let status = match store.delete_blog(pending.id) {
            Some(blog) => {
                state.cursor.clamp(store.blogs().len());
                Effect::status(format!("Deleted \"{}\"", blog.title), MessageKind::Success)
            }
            None => Effect::status("Post no longer exists", MessageKind::Error),
        };
        self.ctx.effects.push(status);
    }

    fn publish(&self) {
        self.set_published(true);
    }

    fn unpublish(&self) {
        self.set_published(false);
    }

    fn set_published(&self, published: bool) {
        if self.busy() {
            return;
        }
        let Some(id) = self.focused_id() else {
            return;
        };
        let previous = self.ctx.store.borrow_mut().set_published(id, published);
        let text = match (previous, published) {
            (Some(true), true) => "Already published",
            (Some(false), false) => "Already a draft",
            (Some(_), true) => "Published",
            (Some(_), false) => "Moved back to drafts",
            (None, _) => return,
        };
        self.ctx.effects.push(Effect::status(text, MessageKind::Info));
    }

    fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        state.form = None;
        state.pending_delete = None;
    }

    fn save(&self) {
        let Some(form) = self.state.borrow().form.clone() else {
            return;
        };
        let title = form.title.text().trim();

        if slugify(title).is_empty() {
            let warning = "Title needs at least one letter or digit";
            self.ctx.effects.push(Effect::status(warning, MessageKind::Warning));
            return;
        }

        let mut state = self.state.borrow_mut();
        let mut store = self.ctx.store.borrow_mut();
        state.form = None;

        let status = match form.editing {
            Some(id) if store.update_blog(id, title, form.body.text()) => {
                Effect::status(format!("Saved \"{title}\""), MessageKind::Success)
            }
            Some(_) => Effect::status("Post no longer exists", MessageKind::Error),
            None => {
                store.add_blog(title, form.body.text());
                state.cursor.reset();
                Effect::status(format!("Drafted \"{title}\""), MessageKind::Success)
            }
        };
        self.ctx.effects.push(status);
    }
}

pub struct BlogsView {
    model: BlogsModel,
    registrations: Registrations,
}

impl BlogsView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            model: BlogsModel {
                state: Rc::new(RefCell::new(BlogsState::default())),
                ctx,
            },
            registrations: Registrations::default(),
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, form: &PostForm) {
        let dirty = form.is_dirty(self.model.ctx.store.borrow().blogs());
        let marker = if dirty {
            Span::styled("● unsaved changes ", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("saved ", Style::default().fg(theme::MUTED))
        };
        let title = if form.editing.is_some() { " edit post " } else { " new post " };

        let block = Block::default()
            .title(Line::from(vec![Span::raw(title), marker]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let slug = slugify(form.title.text());
        let lines = vec![
            render_field(frame, inner, 0, "title", &form.title, form.field == PostField::Title),
            render_field(frame, inner, 1, "body", &form.body, form.field == PostField::Body),
            Line::from(Span::styled(
                format!("{:>6}: /blog/{slug}", "slug"),
                Style::default().fg(theme::MUTED),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl FeatureView for BlogsView {
    fn route(&self) -> Route {
        Route::Blogs
    }

    fn mount(&mut self, bus: &mut KeyboardCommandBus) {
        let regs = &mut self.registrations;
        let model = &self.model;
        regs.bind(bus, ActionKey::Down, model, BlogsModel::down);
        regs.bind(bus, ActionKey::Up, model, BlogsModel::up);
        regs.bind(bus, ActionKey::New, model, BlogsModel::new_post);
        regs.bind(bus, ActionKey::Edit, model, BlogsModel::edit);
        regs.bind(bus, ActionKey::Select, model, BlogsModel::edit);
        regs.bind(bus, ActionKey::Delete, model, BlogsModel::delete);
        regs.bind(bus, ActionKey::PageP, model, BlogsModel::publish);
        regs.bind(bus, ActionKey::PageU, model, BlogsModel::unpublish);
        regs.bind(bus, ActionKey::Cancel, model, BlogsModel::cancel);
        regs.bind(bus, ActionKey::Save, model, BlogsModel::save);
    }

    fn unmount(&mut self, bus: &mut KeyboardCommandBus) {
        self.registrations.release(bus);
    }

    fn focus(&self) -> FocusTarget {
        if self.model.busy() {
            FocusTarget::TextInput
        } else {
            FocusTarget::Shortcuts
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if self.model.confirming() {
            match confirm::handle(key) {
                Answer::Yes => self.model.confirm_delete(),
                Answer::No => self.model.cancel(),
                Answer::Undecided => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => self.model.save(),
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some(form) = self.model.state.borrow_mut().form.as_mut() {
                    form.toggle_field();
                }
            }
            _ => {
                if let (Some(edit), Some(form)) =
                    (TextEdit::from_key(key), self.model.state.borrow_mut().form.as_mut())
                {
                    form.active_mut().apply(edit);
                }
            }
        }
    }

    fn hints(&self) -> &'static str {
        if self.model.confirming() {
            "y:delete  n/Esc:keep"
        } else if self.model.form_open() {
            "Tab:field  Enter/Ctrl+S:save  Esc:cancel"
        } else {
            "j/k:move  n:new  e:edit  p/u:publish/draft  d:delete"
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let state = self.model.state.borrow();

        let form_height = if state.form.is_some() { 5 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(form_height), Constraint::Min(0)])
            .split(area);

        if let Some(ref form) = state.form {
            self.render_form(frame, chunks[0], form);
        }

        let store = self.model.ctx.store.borrow();
        let published = store.blogs().iter().filter(|b| b.published).count();
        let block = Block::default()
            .title(format!(" [blogs] {published}/{} published ", store.blogs().len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        if store.blogs().is_empty() {
            let empty = "no posts yet. press n to draft one";
            let empty = Span::styled(empty, Style::default().fg(theme::MUTED));
            frame.render_widget(Paragraph::new(empty), inner);
            return;
        }

        let now = Utc::now();
        let lines: Vec<Line> = store
            .blogs()
            .iter()
            .enumerate()
            .map(|(i, blog)| {
                let focused = i == state.cursor.index() && state.form.is_none();
                let marker = if focused { "> " } else { "  " };
                let row_style = if focused {
                    Style::default().bg(theme::CURSOR_BG).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let (badge, badge_color) = if blog.published {
                    ("published", theme::SUCCESS)
                } else {
                    ("draft    ", theme::MUTED)
                };
                let views = format!(" {:>6} views", blog.views);
                let age = format!("  {}", age(blog.created_at, now));
                Line::from(vec![
                    Span::styled(marker, row_style),
                    Span::styled(badge, row_style.fg(badge_color)),
                    Span::styled(format!(" {:<32}", blog.title), row_style),
                    Span::styled(views, row_style.fg(theme::COUNT)),
                    Span::styled(age, row_style.fg(theme::MUTED)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(ref pending) = state.pending_delete {
            render_confirm(frame, pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::effect::EffectQueue;
    use super::super::super::state::Propagation;
    use super::super::super::store::Store;
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use std::time::{Duration, Instant};

    struct TestState {
        bus: KeyboardCommandBus,
        view: BlogsView,
        effects: EffectQueue,
    }

    impl TestState {
        fn new() -> Self {
            let mut store = Store::new();
            store.add_blog("Second", "");
            store.add_blog("First", "hello");

            let effects = EffectQueue::new();
            let mut bus = KeyboardCommandBus::new(Duration::from_millis(1500));
            let mut view = BlogsView::new(ViewContext {
                store: store.shared(),
                effects: effects.clone(),
            });
            view.mount(&mut bus);
            Self { bus, view, effects }
        }

        fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) {
            let key = KeyEvent::new(code, modifiers);
            let focus = self.view.focus();
            let dispatch = self.bus.handle_key(key, focus, Instant::now());
            if dispatch.propagation == Propagation::Continue && focus == FocusTarget::TextInput {
                self.view.handle_input(key);
            }
        }

        fn char(&mut self, c: char) {
            self.press(KeyCode::Char(c), KeyModifiers::NONE);
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.char(c);
            }
        }

        fn titles(&self) -> Vec<String> {
            let store = self.view.model.ctx.store.borrow();
            store.blogs().iter().map(|b| b.title.clone()).collect()
        }

        fn dirty(&self) -> bool {
            let state = self.view.model.state.borrow();
            let store = self.view.model.ctx.store.borrow();
            state.form.as_ref().is_some_and(|f| f.is_dirty(store.blogs()))
        }

        fn published(&self) -> Vec<bool> {
            self.view
                .model
                .ctx
                .store
                .borrow()
                .blogs()
                .iter()
                .map(|b| b.published)
                .collect()
        }
    }

    #[test]
    fn test_publish_and_unpublish_focused_post() {
        let mut t = TestState::new();
        t.char('j');
        t.char('p');
        assert_eq!(t.published(), [false, true]);

        t.char('p');
        t.char('u');
        assert_eq!(t.published(), [false, false]);

        let texts: Vec<_> = t
            .effects
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                Effect::SetStatus { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["Published", "Already published", "Moved back to drafts"]);
    }

    #[test]
    fn test_draft_new_post() {
        let mut t = TestState::new();
        t.char('n');
        t.type_text("Keys & Chords");
        t.press(KeyCode::Char('s'), KeyModifiers::CONTROL);

        let store = t.view.model.ctx.store.borrow();
        assert_eq!(store.blogs().len(), 3);
        assert_eq!(store.blogs()[0].slug, "keys-chords");
        assert!(!store.blogs()[0].published);
    }

    #[test]
    fn test_title_without_slug_is_refused() {
        let mut t = TestState::new();
        t.char('n');
        t.char('!');
        t.press(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(t.view.focus(), FocusTarget::TextInput);
        assert_eq!(t.view.model.ctx.store.borrow().blogs().len(), 2);
    }

    #[test]
    fn test_p_types_into_form_instead_of_publishing() {
        let mut t = TestState::new();
        t.char('e');
        t.char('p');
        t.press(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(t.published(), [false, false]);
        assert_eq!(t.view.model.ctx.store.borrow().blogs()[0].title, "First");
    }

    #[test]
    fn test_unmount_releases_page_actions() {
        let mut t = TestState::new();
        t.view.unmount(&mut t.bus);
        assert!(!t.bus.is_registered(ActionKey::PageP));
        assert!(!t.bus.is_registered(ActionKey::PageU));
        t.char('p');
        assert_eq!(t.published(), [false, false]);
    }

    #[test]
    fn test_ctrl_s_saves_title_and_body() {
        let mut t = TestState::new();
        t.char('e');
        assert!(!t.dirty());

        t.type_text(" Post");
        assert!(t.dirty());
        t.press(KeyCode::Tab, KeyModifiers::NONE);
        t.type_text(", world");
        t.press(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert_eq!(t.view.focus(), FocusTarget::Shortcuts);
        let store = t.view.model.ctx.store.borrow();
        assert_eq!(store.blogs()[0].title, "First Post");
        assert_eq!(store.blogs()[0].slug, "first-post");
        assert_eq!(store.blogs()[0].content, "hello, world");
    }

    #[test]
    fn test_unsaved_marker_follows_edits() {
        let mut t = TestState::new();
        t.char('n');
        assert!(!t.dirty());
        t.char('x');
        assert!(t.dirty());
        t.press(KeyCode::Backspace, KeyModifiers::NONE);
        assert!(!t.dirty());

        t.press(KeyCode::Esc, KeyModifiers::NONE);
        t.char('e');
        t.press(KeyCode::Tab, KeyModifiers::NONE);
        t.char('!');
        assert!(t.dirty());
        t.press(KeyCode::Backspace, KeyModifiers::NONE);
        assert!(!t.dirty());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut t = TestState::new();
        t.char('d');
        assert_eq!(t.view.focus(), FocusTarget::TextInput);
        // p is an answer key now, not publish
        t.char('p');
        assert_eq!(t.published(), [false, false]);

        t.char('n');
        assert_eq!(t.titles(), ["First", "Second"]);

        t.char('d');
        t.char('y');
        assert_eq!(t.titles(), ["Second"]);
        assert_eq!(t.view.focus(), FocusTarget::Shortcuts);
        assert!(matches!(
            t.effects.drain().as_slice(),
            [Effect::SetStatus { kind: MessageKind::Success, .. }]
        ));
    }

    #[test]
    fn test_escape_dismisses_delete_prompt() {
        let mut t = TestState::new();
        t.char('j');
        t.char('d');
        t.press(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!t.view.model.confirming());
        assert_eq!(t.titles(), ["First", "Second"]);
    }
}
