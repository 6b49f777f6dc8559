// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, marker::PhantomData};

use chrono::{Local, NaiveDateTime};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;
use yotei_core::DateTimePicker;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{
    byte_offset_of_grapheme, byte_range_of_grapheme_at, grapheme_count, unicode_width_of_slice,
};

/// A vertical list of fields; Up/Down/Tab move the focus and Enter saves.
pub struct Form<S, C: FormItem<S>> {
    items: Vec<C>,
    item_index: usize,
    _phantom: PhantomData<S>,
}

impl<S, C: FormItem<S>> Form<S, C> {
    pub fn new(items: Vec<C>) -> Self {
        Self {
            items,
            item_index: 0,
            _phantom: PhantomData,
        }
    }

    fn layout(&self) -> Layout {
        Layout::vertical(self.items.iter().map(|_| Constraint::Length(3))).margin(1)
    }

    fn focus(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, index: usize) {
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }
        self.item_index = index.min(self.items.len().saturating_sub(1));
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
    }

    /// Moves the focus back to the first field.
    pub fn reset(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.focus(dispatcher, store, 0);
    }
}

impl<S, C: FormItem<S>> Component<S> for Form<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout().split(area);
        let last = self.items.len().saturating_sub(1);
        for (i, (item, area)) in self.items.iter().zip(areas.iter()).enumerate() {
            item_render::<S, C>(i == last, item, *area, buf);
            item.render(store, item_inner(*area), buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let areas = self.layout().split(area);
        let item = self.items.get(self.item_index)?;
        item.get_cursor_position(store, *areas.get(self.item_index)?)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let areas = self.layout().split(area);
        if let (Some(item), Some(subarea)) =
            (self.items.get_mut(self.item_index), areas.get(self.item_index))
            && let Some(msg) = item.on_key(dispatcher, store, *subarea, event)
        {
            return Some(msg);
        }

        match event.code {
            KeyCode::Up | KeyCode::BackTab if self.item_index > 0 => {
                self.focus(dispatcher, store, self.item_index - 1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Down | KeyCode::Tab if self.item_index + 1 < self.items.len() => {
                self.focus(dispatcher, store, self.item_index + 1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Enter => {
                dispatcher.dispatch(&Action::Save);
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn on_click(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        pos: Position,
    ) -> Option<Message> {
        let areas = self.layout().split(area);
        let index = areas.iter().position(|a| a.contains(pos))?;
        if index != self.item_index {
            self.focus(dispatcher, store, index);
        }
        let item = self.items.get_mut(index)?;
        item.on_click(dispatcher, store, item_inner(areas[index]), pos)
            .or(Some(Message::CursorUpdated))
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self) -> &str;
    fn item_state(&self) -> FormItemState;
}

impl<S> Component<S> for Box<dyn FormItem<S>> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        (**self).render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        (**self).get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        (**self).on_key(dispatcher, store, area, event)
    }

    fn on_click(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        pos: Position,
    ) -> Option<Message> {
        (**self).on_click(dispatcher, store, area, pos)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        (**self).activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        (**self).deactivate(dispatcher, store);
    }
}

impl<S> FormItem<S> for Box<dyn FormItem<S>> {
    fn item_title(&self) -> &str {
        (**self).item_title()
    }

    fn item_state(&self) -> FormItemState {
        (**self).item_state()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItemState {
    Active,
    Inactive,
}

impl FormItemState {
    fn from_active(active: bool) -> Self {
        match active {
            true => FormItemState::Active,
            false => FormItemState::Inactive,
        }
    }
}

pub trait Access<S, T> {
    fn get(store: &RefCell<S>) -> T;
    fn set(dispatcher: &mut Dispatcher, value: T) -> bool;
}

/// A single line text field.
#[derive(Debug)]
pub struct Input<S, A: Access<S, String>> {
    title: String,
    active: bool,
    character_index: usize,
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
}

impl<S, A: Access<S, String>> Input<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            character_index: 0,
            _phantom_s: PhantomData,
            _phantom_a: PhantomData,
        }
    }
}

impl<S, A: Access<S, String>> Component<S> for Input<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        Paragraph::new(v.as_str()).render(area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let v = A::get(store);
        let width = unicode_width_of_slice(v.as_str(), self.character_index);
        let x = area.x + (width as u16) + 2; // sider 1 + padding 1
        let y = area.y + 1; // title line: 1
        Some((x, y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;
        if !self.active || !matches!(event.code, Left | Right | Home | End | Backspace | Char(_)) {
            return None;
        }

        let mut v = A::get(store);
        match event.code {
            Left if self.character_index > 0 => self.character_index -= 1,
            Right if self.character_index < grapheme_count(&v) => self.character_index += 1,
            Home => self.character_index = 0,
            End => self.character_index = grapheme_count(&v),
            Backspace if self.character_index > 0 => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index - 1) {
                    v.replace_range(range, "");
                    if A::set(dispatcher, v) {
                        self.character_index -= 1;
                    }
                }
            }
            Char(c) => {
                v.insert(byte_offset_of_grapheme(&v, self.character_index), c);
                if A::set(dispatcher, v) {
                    self.character_index += 1;
                }
            }
            _ => {}
        };

        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        self.character_index = grapheme_count(&A::get(store));
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
        self.character_index = 0;
    }
}

impl<S, A: Access<S, String>> FormItem<S> for Input<S, A> {
    fn item_title(&self) -> &str {
        &self.title
    }

    fn item_state(&self) -> FormItemState {
        FormItemState::from_active(self.active)
    }
}

/// A date and time field stepping on the picker grid.
///
/// Left/Right move by one time step, PageUp/PageDown by one day, `t` jumps to
/// today. Typing a digit switches to free text, committed with Enter.
#[derive(Debug)]
pub struct DateTimeInput<S, A: Access<S, NaiveDateTime>> {
    title: String,
    picker: DateTimePicker,
    today_label: String,
    active: bool,
    typing: Option<String>,
    invalid: bool,
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
}

impl<S, A: Access<S, NaiveDateTime>> DateTimeInput<S, A> {
    pub fn new(title: impl ToString, picker: DateTimePicker, today_label: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            picker,
            today_label: today_label.to_string(),
            active: false,
            typing: None,
            invalid: false,
            _phantom_s: PhantomData,
            _phantom_a: PhantomData,
        }
    }

    fn set(&mut self, dispatcher: &mut Dispatcher, value: NaiveDateTime) -> Option<Message> {
        A::set(dispatcher, value);
        Some(Message::Handled)
    }

    fn on_typing_key(&mut self, dispatcher: &mut Dispatcher, event: KeyEvent) -> Option<Message> {
        let text = self.typing.as_mut()?;
        match event.code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Enter => match self.picker.parse(text) {
                Ok(value) => {
                    self.typing = None;
                    self.invalid = false;
                    return self.set(dispatcher, value);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "unparsable date input");
                    self.invalid = true;
                }
            },
            KeyCode::Esc => {
                self.typing = None;
                self.invalid = false;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::PageUp | KeyCode::PageDown => {}
            _ => return None,
        }
        Some(Message::CursorUpdated)
    }
}

impl<S, A: Access<S, NaiveDateTime>> Component<S> for DateTimeInput<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let text = match &self.typing {
            Some(text) => text.clone(),
            None => self.picker.format(A::get(store)),
        };

        let style = match self.invalid {
            true => Style::new().red(),
            false => Style::new(),
        };
        let mut spans = vec![Span::styled(text, style)];
        if self.active && self.typing.is_none() {
            spans.push(Span::raw("  ‹ ›").dark_gray());
            if self.picker.has_today_button() {
                spans.push(Span::raw(format!("  t:{}", self.today_label)).dark_gray());
            }
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn get_cursor_position(&self, _store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let text = self.typing.as_ref().filter(|_| self.active)?;
        Some((area.x + text.width() as u16 + 2, area.y + 1))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }
        if self.typing.is_some() {
            return self.on_typing_key(dispatcher, event);
        }

        let value = A::get(store);
        match event.code {
            KeyCode::Left => self.set(dispatcher, self.picker.backward(value)),
            KeyCode::Right => self.set(dispatcher, self.picker.forward(value)),
            KeyCode::PageUp => self.set(dispatcher, self.picker.shift_days(value, -1)),
            KeyCode::PageDown => self.set(dispatcher, self.picker.shift_days(value, 1)),
            KeyCode::Char('t') if self.picker.has_today_button() => {
                let today = Local::now().date_naive();
                self.set(dispatcher, self.picker.jump_to_today(value, today))
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.typing = Some(c.to_string());
                Some(Message::CursorUpdated)
            }
            KeyCode::Backspace => {
                let mut text = self.picker.format(value);
                text.pop();
                self.typing = Some(text);
                Some(Message::CursorUpdated)
            }
            _ => None,
        }
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
        self.typing = None;
        self.invalid = false;
    }
}

impl<S, A: Access<S, NaiveDateTime>> FormItem<S> for DateTimeInput<S, A> {
    fn item_title(&self) -> &str {
        &self.title
    }

    fn item_state(&self) -> FormItemState {
        FormItemState::from_active(self.active)
    }
}

pub struct Button<S> {
    pub label: String,
    pub action: Action,
    pub enabled: fn(&S) -> bool,
}

/// A row of buttons; Left/Right pick one, Enter presses it.
pub struct ButtonRow<S> {
    buttons: Vec<Button<S>>,
    selected: usize,
    active: bool,
}

const BUTTON_GAP: u16 = 1;

impl<S> ButtonRow<S> {
    pub fn new(buttons: Vec<Button<S>>) -> Self {
        Self {
            buttons,
            selected: 0,
            active: false,
        }
    }

    /// Index of the button to select when the row gains focus.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    fn areas(&self, area: Rect) -> Vec<Rect> {
        let mut x = area.x;
        self.buttons
            .iter()
            .map(|b| {
                let width = b.label.width() as u16 + 4; // "[ " + label + " ]"
                let rect = Rect::new(x, area.y, width, 1).intersection(area);
                x = x.saturating_add(width + BUTTON_GAP);
                rect
            })
            .collect()
    }

    fn press(&self, dispatcher: &mut Dispatcher, store: &RefCell<S>, index: usize) -> Option<Message> {
        let button = self.buttons.get(index)?;
        let enabled = (button.enabled)(&*store.borrow());
        if enabled {
            dispatcher.dispatch(&button.action);
        }
        Some(Message::Handled)
    }
}

impl<S> Component<S> for ButtonRow<S> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let s = store.borrow();
        for (i, (button, rect)) in self.buttons.iter().zip(self.areas(area)).enumerate() {
            let mut style = Style::new();
            if !(button.enabled)(&*s) {
                style = style.dark_gray();
            } else if self.active && i == self.selected {
                style = style.reversed().bold();
            }
            Paragraph::new(format!("[ {} ]", button.label))
                .style(style)
                .render(rect, buf);
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || self.buttons.is_empty() {
            return None;
        }

        let len = self.buttons.len();
        match event.code {
            KeyCode::Left => {
                self.selected = (self.selected + len - 1) % len;
                Some(Message::Handled)
            }
            KeyCode::Right => {
                self.selected = (self.selected + 1) % len;
                Some(Message::Handled)
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.press(dispatcher, store, self.selected),
            _ => None,
        }
    }

    fn on_click(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        pos: Position,
    ) -> Option<Message> {
        let index = self.areas(area).iter().position(|a| a.contains(pos))?;
        self.selected = index;
        self.press(dispatcher, store, index)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S> FormItem<S> for ButtonRow<S> {
    fn item_title(&self) -> &str {
        ""
    }

    fn item_state(&self) -> FormItemState {
        FormItemState::from_active(self.active)
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";

const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn item_render<S, C: FormItem<S>>(is_last: bool, item: &C, area: Rect, buf: &mut Buffer) {
    let (color, symbol) = match item.item_state() {
        FormItemState::Active => (Color::Blue, S_STEP_ACTIVE),
        FormItemState::Inactive => (Color::Gray, S_STEP_INACTIVE),
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title())
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if let Some(c) = buf.cell_mut((area.x, area.y + area.height.saturating_sub(1))) {
        let symbol = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
