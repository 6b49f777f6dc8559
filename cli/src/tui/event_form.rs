// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use chrono::NaiveDateTime;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear};
use yotei_core::{EditTarget, Error};

use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::{Component, Message};
use crate::tui::component_form::{
    Access, Button, ButtonRow, DateTimeInput, Form, FormItem, Input,
};
use crate::tui::dispatcher::{Action, Dispatcher};

const DIALOG_WIDTH: u16 = 48;
const DIALOG_HEIGHT: u16 = 16;

/// The modal event form drawn over a dimmed backdrop.
pub struct EventForm {
    form: Form<CalendarStore, Box<dyn FormItem<CalendarStore>>>,
}

impl EventForm {
    pub fn new(store: &RefCell<CalendarStore>) -> Self {
        let store = store.borrow();
        let labels = store.labels();
        let picker = &store.picker;

        let buttons = ButtonRow::new(vec![
            Button {
                label: labels.cancel.to_owned(),
                action: Action::Cancel,
                enabled: always,
            },
            Button {
                label: labels.save.to_owned(),
                action: Action::Save,
                enabled: always,
            },
            Button {
                label: labels.delete.to_owned(),
                action: Action::Delete,
                enabled: edits_saved_event,
            },
        ])
        .with_selected(1);

        let items: Vec<Box<dyn FormItem<CalendarStore>>> = vec![
            Box::new(Input::<CalendarStore, TitleAccess>::new(labels.title)),
            Box::new(DateTimeInput::<CalendarStore, StartAccess>::new(
                labels.start,
                picker.clone(),
                labels.picker_today,
            )),
            Box::new(DateTimeInput::<CalendarStore, EndAccess>::new(
                labels.end,
                picker.clone(),
                labels.picker_today,
            )),
            Box::new(buttons),
        ];
        Self {
            form: Form::new(items),
        }
    }

    /// The dialog sits 40% from the left and 30% from the top, pulled back
    /// inside the screen when it would overflow.
    pub fn dialog_area(area: Rect) -> Rect {
        let width = DIALOG_WIDTH.min(area.width);
        let height = DIALOG_HEIGHT.min(area.height);
        let x = (area.x + (area.width as u32 * 2 / 5) as u16).min(area.right() - width);
        let y = (area.y + (area.height as u32 * 3 / 10) as u16).min(area.bottom() - height);
        Rect::new(x, y, width, height)
    }

    fn block(store: &CalendarStore) -> Block<'static> {
        let labels = store.labels();
        let title = Line::from(format!(" {} ", labels.form_heading).bold());
        let mut block = Block::bordered()
            .border_set(border::ROUNDED)
            .title(title.centered())
            .white();

        if let Some(e) = store.widget.error() {
            let message = match e {
                Error::InvalidRange { .. } => labels.invalid_range.to_owned(),
                e => e.to_string(),
            };
            block = block.title_bottom(Line::from(format!(" {message} ").red()).centered());
        } else {
            block = block.title_bottom(instructions(store).centered());
        }
        block
    }
}

impl Component<CalendarStore> for EventForm {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let block = {
            let s = store.borrow();
            if !s.widget.is_visible() {
                return;
            }
            Self::block(&s)
        };

        buf.set_style(area, Style::new().dark_gray().add_modifier(Modifier::DIM));

        let dialog = Self::dialog_area(area);
        Clear.render(dialog, buf);
        let inner = block.inner(dialog);
        block.render(dialog, buf);
        self.form.render(store, inner, buf);
    }

    fn get_cursor_position(
        &self,
        store: &RefCell<CalendarStore>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        if !store.borrow().widget.is_visible() {
            return None;
        }
        let inner = Block::bordered().inner(Self::dialog_area(area));
        self.form.get_cursor_position(store, inner)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !store.borrow().widget.is_visible() {
            return None;
        }

        let inner = Block::bordered().inner(Self::dialog_area(area));
        if let Some(msg) = self.form.on_key(dispatcher, store, inner, event) {
            return Some(msg);
        }

        if event.code == KeyCode::Esc {
            dispatcher.dispatch(&Action::Cancel);
        }
        Some(Message::Handled) // modal, nothing reaches the calendar
    }

    fn on_click(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        pos: Position,
    ) -> Option<Message> {
        if !store.borrow().widget.is_visible() {
            return None;
        }

        let dialog = Self::dialog_area(area);
        if !dialog.contains(pos) {
            dispatcher.dispatch(&Action::BackdropClick);
            return Some(Message::Handled);
        }

        let inner = Block::bordered().inner(dialog);
        self.form
            .on_click(dispatcher, store, inner, pos)
            .or(Some(Message::Handled))
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<CalendarStore>) {
        self.form.reset(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<CalendarStore>) {
        self.form.deactivate(dispatcher, store);
    }
}

fn always(_: &CalendarStore) -> bool {
    true
}

fn edits_saved_event(store: &CalendarStore) -> bool {
    matches!(store.widget.target(), EditTarget::Existing(_))
}

fn instructions(store: &CalendarStore) -> Line<'static> {
    let labels = store.labels();
    Line::from(vec![
        format!(" {} ", labels.save).into(),
        "<Enter>".blue().bold(),
        format!(" {} ", labels.cancel).into(),
        "<Esc> ".blue().bold(),
    ])
}

macro_rules! draft_access {
    ($acc: ident, $ty: ty, $field: ident, $action: ident) => {
        struct $acc;

        impl Access<CalendarStore, $ty> for $acc {
            fn get(store: &RefCell<CalendarStore>) -> $ty {
                store.borrow().widget.draft().$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: $ty) -> bool {
                dispatcher.dispatch(&Action::$action(value));
                true
            }
        }
    };
}

draft_access!(TitleAccess, String, title, UpdateTitle);
draft_access!(StartAccess, NaiveDateTime, start, UpdateStart);
draft_access!(EndAccess, NaiveDateTime, end, UpdateEnd);
