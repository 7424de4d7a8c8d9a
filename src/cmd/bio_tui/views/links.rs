//! Links view: a focusable list with an inline add/edit form

use super::super::action::ActionKey;
use super::super::bus::KeyboardCommandBus;
use super::super::controller::confirm::{self, Answer};
use super::super::effect::Effect;
use super::super::input::{TextEdit, TextField};
use super::super::state::{FocusTarget, MessageKind, Route};
use super::super::theme;
use super::{
    FeatureView, ListCursor, PendingDelete, Registrations, ViewContext, render_confirm,
    render_field,
};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Url,
}

#[derive(Debug, Clone)]
struct LinkForm {
    /// None while adding a new link
    editing: Option<u64>,
    name: TextField,
    url: TextField,
    field: FormField,
}

impl LinkForm {
    fn active_mut(&mut self) -> &mut TextField {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Url => &mut self.url,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Url,
            FormField::Url => FormField::Name,
        };
    }
}

#[derive(Debug, Default)]
struct LinksState {
    cursor: ListCursor,
    form: Option<LinkForm>,
    pending_delete: Option<PendingDelete>,
}

/// Everything the registered handlers need, cheap to clone
#[derive(Clone)]
struct LinksModel {
    state: Rc<RefCell<LinksState>>,
    ctx: ViewContext,
}

impl LinksModel {
    fn form_open(&self) -> bool {
        self.state.borrow().form.is_some()
    }

    /// A form or a delete prompt has the keyboard
    fn busy(&self) -> bool {
        let state = self.state.borrow();
        state.form.is_some() || state.pending_delete.is_some()
    }

    fn down(&self) {
        if self.busy() {
            return;
        }
        let len = self.ctx.store.borrow().links().len();
        self.state.borrow_mut().cursor.down(len);
    }

    fn up(&self) {
        if self.busy() {
            return;
        }
        self.state.borrow_mut().cursor.up();
    }

    fn new_link(&self) {
        if self.busy() {
            return;
        }
        self.state.borrow_mut().form = Some(LinkForm {
            editing: None,
            name: TextField::new(),
            url: TextField::new(),
            field: FormField::Name,
        });
    }

    fn edit(&self) {
        if self.busy() {
            return;
        }
        let mut state = self.state.borrow_mut();
        let store = self.ctx.store.borrow();
        if let Some(link) = store.links().get(state.cursor.index()) {
            state.form = Some(LinkForm {
                editing: Some(link.id),
                name: TextField::with_text(&link.name),
                url: TextField::with_text(&link.url),
                field: FormField::Name,
            });
        }
    }

    /// Ask before deleting the focused link
    fn delete(&self) {
        if self.busy() {
            return;
        }
        let mut state = self.state.borrow_mut();
        let store = self.ctx.store.borrow();
        if let Some(link) = store.links().get(state.cursor.index()) {
            state.pending_delete = Some(PendingDelete {
                id: link.id,
                label: link.name.clone(),
            });
        }
    }

    fn confirm_delete(&self) {
        let mut state = self.state.borrow_mut();
        let Some(pending) = state.pending_delete.take() else {
            return;
        };
        let mut store = self.ctx.store.borrow_mut();
        let status = match store.delete_link(pending.id) {
            Some(link) => {
                state.cursor.clamp(store.links().len());
                Effect::status(format!("Deleted \"{}\"", link.name), MessageKind::Success)
            }
            None => Effect::status("Link no longer exists", MessageKind::Error),
        };
        self.ctx.effects.push(status);
    }

    fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        state.form = None;
        state.pending_delete = None;
    }

    fn save(&self) {
        let Some((editing, name, url)) = self.state.borrow().form.as_ref().map(|form| {
            (
                form.editing,
                form.name.text().trim().to_string(),
                form.url.text().trim().to_string(),
            )
        }) else {
            return;
        };

        if name.is_empty() || url.is_empty() {
            self.ctx
                .effects
                .push(Effect::status("Name and url are required", MessageKind::Warning));
            return;
        }

        let mut state = self.state.borrow_mut();
        let mut store = self.ctx.store.borrow_mut();
        state.form = None;

        let status = match editing {
            Some(id) if store.update_link(id, &name, &url) => {
                Effect::status(format!("Updated \"{name}\""), MessageKind::Success)
            }
            Some(_) => Effect::status("Link no longer exists", MessageKind::Error),
            None => {
                store.add_link(&name, &url);
                state.cursor.reset();
                Effect::status(format!("Added \"{name}\""), MessageKind::Success)
            }
        };
        self.ctx.effects.push(status);
    }
}

pub struct LinksView {
    model: LinksModel,
    registrations: Registrations,
}

impl LinksView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            model: LinksModel {
                state: Rc::new(RefCell::new(LinksState::default())),
                ctx,
            },
            registrations: Registrations::default(),
        }
    }
}

impl FeatureView for LinksView {
    fn route(&self) -> Route {
        Route::Links
    }

    fn mount(&mut self, bus: &mut KeyboardCommandBus) {
        let regs = &mut self.registrations;
        let model = &self.model;
        regs.bind(bus, ActionKey::Down, model, LinksModel::down);
        regs.bind(bus, ActionKey::Up, model, LinksModel::up);
        regs.bind(bus, ActionKey::New, model, LinksModel::new_link);
        regs.bind(bus, ActionKey::Edit, model, LinksModel::edit);
        regs.bind(bus, ActionKey::Select, model, LinksModel::edit);
        regs.bind(bus, ActionKey::Delete, model, LinksModel::delete);
        regs.bind(bus, ActionKey::Cancel, model, LinksModel::cancel);
        regs.bind(bus, ActionKey::Save, model, LinksModel::save);
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
        if self.model.state.borrow().pending_delete.is_some() {
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
        if self.model.state.borrow().pending_delete.is_some() {
            "y:delete  n/Esc:keep"
        } else if self.model.form_open() {
            "Tab:field  Enter/Ctrl+S:save  Esc:cancel"
        } else {
            "j/k:move  n:new  e:edit  d:delete  ?:help"
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let state = self.model.state.borrow();
        let store = self.model.ctx.store.borrow();

        let form_height = if state.form.is_some() { 4 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(form_height), Constraint::Min(0)])
            .split(area);

        if let Some(ref form) = state.form {
            let title = if form.editing.is_some() { " edit link " } else { " new link " };
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT));
            let inner = block.inner(chunks[0]);
            frame.render_widget(block, chunks[0]);

            let lines = vec![
                render_field(frame, inner, 0, "name", &form.name, form.field == FormField::Name),
                render_field(frame, inner, 1, "url", &form.url, form.field == FormField::Url),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        }

        let block = Block::default()
            .title(format!(" [links] {} ", store.links().len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        if store.links().is_empty() {
            let empty = "no links yet. press n to add one";
            let empty = Span::styled(empty, Style::default().fg(theme::MUTED));
            frame.render_widget(Paragraph::new(empty), inner);
            return;
        }

        let lines: Vec<Line> = store
            .links()
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let focused = i == state.cursor.index() && state.form.is_none();
                let marker = if focused { "> " } else { "  " };
                let row_style = if focused {
                    Style::default().bg(theme::CURSOR_BG).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{marker}{:<16}", link.name), row_style),
                    Span::styled(format!(" {}", link.url), row_style.fg(theme::MUTED)),
                    Span::styled(format!("  {} clicks", link.clicks), row_style.fg(theme::COUNT)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(ref pending) = state.pending_delete {
            render_confirm(frame, pending);
        }
    }
}
