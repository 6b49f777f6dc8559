// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use chrono::{Datelike, NaiveDate};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;
use yotei_core::{CalendarEvent, Slot, TimeOfDay, ViewMode, day_slots};

use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::truncate_to_width;

const LABEL_WIDTH: u16 = 6;

const STYLE_OFF_HOURS: Style = Style::new().bg(Color::Indexed(236));
const STYLE_EVENT: Style = Style::new().fg(Color::White).bg(Color::Blue);
const STYLE_OUTSIDE_MONTH: Style = Style::new().fg(Color::DarkGray);
const STYLE_TODAY: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const STYLE_SEPARATOR: Style = Style::new().fg(Color::DarkGray);

/// The calendar grid with its toolbar.
///
/// Keys: arrows or hjkl move the cursor, Enter opens the event under the
/// cursor or the slot itself, `a` always opens a new event, Tab cycles
/// overlapping events, `p`/`n`/`t` navigate, `m`/`w` switch views, `q` quits.
#[derive(Debug)]
pub struct CalendarView {
    /// Index into the visible days.
    day: usize,

    /// Slot row of the week grid.
    slot: usize,

    /// Which of the events under the cursor Enter selects.
    event: usize,

    /// First slot row drawn in the week grid.
    scroll: usize,
}

struct Areas {
    toolbar: Rect,
    header: Rect,
    labels: Rect,
    grid: Rect,
}

impl CalendarView {
    pub fn new(store: &RefCell<CalendarStore>) -> Self {
        let s = store.borrow();
        let now = s.now;
        let day = s
            .widget
            .visible_days()
            .iter()
            .position(|d| *d == now.date())
            .unwrap_or(0);
        let slot = day_slots(now.date(), s.slot_duration)
            .iter()
            .position(|slot| slot.start <= now && now < slot.end)
            .unwrap_or(0);

        Self {
            day,
            slot,
            event: 0,
            scroll: slot.saturating_sub(2),
        }
    }

    fn split(area: Rect, view: ViewMode) -> Areas {
        let [toolbar, header, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let label_width = match view {
            ViewMode::TimeGridWeek => LABEL_WIDTH,
            ViewMode::DayGridMonth => 0,
        };
        let [_, header] =
            Layout::horizontal([Constraint::Length(label_width), Constraint::Fill(1)]).areas(header);
        let [labels, grid] =
            Layout::horizontal([Constraint::Length(label_width), Constraint::Fill(1)]).areas(body);

        Areas {
            toolbar,
            header,
            labels,
            grid,
        }
    }

    fn columns(area: Rect, n: usize) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }
        Layout::horizontal(vec![Constraint::Ratio(1, n as u32); n])
            .split(area)
            .to_vec()
    }

    fn rows(area: Rect, n: usize) -> Vec<Rect> {
        if n == 0 {
            return Vec::new();
        }
        Layout::vertical(vec![Constraint::Ratio(1, n as u32); n])
            .split(area)
            .to_vec()
    }

    /// Number of day columns of the month grid.
    fn month_columns(days: usize) -> usize {
        days / yotei_core::MONTH_GRID_WEEKS as usize
    }

    fn slot_count(s: &CalendarStore, days: &[NaiveDate]) -> usize {
        days.first()
            .map_or(0, |d| day_slots(*d, s.slot_duration).len())
    }

    /// First slot row to draw so that the cursor stays in view.
    fn visible_top(&self, height: usize, rows: usize) -> usize {
        let mut top = self.scroll.min(rows.saturating_sub(height));
        if self.slot < top {
            top = self.slot;
        } else if height > 0 && self.slot >= top + height {
            top = self.slot + 1 - height;
        }
        top
    }

    fn cursor_slot(&self, s: &CalendarStore, days: &[NaiveDate]) -> Option<Slot> {
        let date = *days.get(self.day)?;
        match s.widget.view() {
            ViewMode::TimeGridWeek => day_slots(date, s.slot_duration).get(self.slot).copied(),
            ViewMode::DayGridMonth => Some(Slot::whole_day(date)),
        }
    }

    /// Opens the event under the cursor, or the slot itself when it is empty.
    fn click(&self, dispatcher: &mut Dispatcher, store: &RefCell<CalendarStore>, new: bool) {
        let action = {
            let s = store.borrow();
            let days = s.widget.visible_days();
            let Some(slot) = self.cursor_slot(&s, &days) else {
                return;
            };
            let events = s.widget.events_between(slot.start, slot.end);
            match events.is_empty() || new {
                true => Action::SlotClick(slot),
                false => Action::EventSelect(events[self.event % events.len()].id),
            }
        };
        dispatcher.dispatch(&action);
    }

    fn toolbar_buttons(s: &CalendarStore, area: Rect) -> Vec<(Rect, String, Action)> {
        let labels = s.labels();
        let nav = [
            ("‹".to_owned(), Action::Prev),
            ("›".to_owned(), Action::Next),
            (labels.today.to_owned(), Action::Today),
        ];
        let views = [
            (labels.month.to_owned(), Action::ChangeView(ViewMode::DayGridMonth)),
            (labels.week.to_owned(), Action::ChangeView(ViewMode::TimeGridWeek)),
        ];

        let width_of = |items: &[(String, Action)]| -> u16 {
            items.iter().map(|(l, _)| l.width() as u16 + 3).sum()
        };
        let nav_x = area.x + area.width.saturating_sub(width_of(&nav)) / 2;
        let views_x = area.right().saturating_sub(width_of(&views));

        let mut buttons = Vec::new();
        for (mut x, items) in [(nav_x, Vec::from(nav)), (views_x, Vec::from(views))] {
            for (label, action) in items {
                let w = label.width() as u16 + 2;
                buttons.push((Rect::new(x, area.y, w, 1).intersection(area), label, action));
                x += w + 1;
            }
        }
        buttons
    }

    fn render_toolbar(&self, s: &CalendarStore, area: Rect, buf: &mut Buffer) {
        let title = s.locale.format_title(s.widget.current_range());
        Paragraph::new(title).bold().render(area, buf);

        for (rect, label, action) in Self::toolbar_buttons(s, area) {
            let current = matches!(action, Action::ChangeView(v) if v == s.widget.view());
            let style = match current {
                true => Style::new().reversed().bold(),
                false => Style::new().bold(),
            };
            Paragraph::new(format!(" {label} "))
                .style(style)
                .render(rect, buf);
        }
    }

    fn render_week(&self, s: &CalendarStore, areas: &Areas, buf: &mut Buffer) {
        let days = s.widget.visible_days();
        let columns = Self::columns(areas.grid, days.len());
        let header_columns = Self::columns(areas.header, days.len());

        for (date, rect) in days.iter().zip(&header_columns) {
            let style = match *date == s.today() {
                true => STYLE_TODAY,
                false => Style::new().bold(),
            };
            let text = s.locale.format_day_header(*date);
            Paragraph::new(truncate_to_width(&text, rect.width as usize).to_owned())
                .style(style)
                .centered()
                .render(*rect, buf);
        }

        let rows = Self::slot_count(s, &days);
        let height = areas.grid.height as usize;
        let top = self.visible_top(height, rows);

        for (r, i) in (top..rows.min(top + height)).enumerate() {
            let y = areas.grid.y + r as u16;
            if let Some(first) = days.first()
                && let Some(slot) = day_slots(*first, s.slot_duration).get(i).copied()
                && let Some(label) = s.locale.format_slot_label(TimeOfDay::of(slot.start))
            {
                let rect = Rect::new(areas.labels.x, y, areas.labels.width, 1);
                Paragraph::new(label).dark_gray().render(rect, buf);
            }

            for (d, (date, col)) in days.iter().zip(&columns).enumerate() {
                let Some(slot) = day_slots(*date, s.slot_duration).get(i).copied() else {
                    continue;
                };
                let rect = Rect::new(col.x, y, col.width, 1);
                let events = s.widget.events_between(slot.start, slot.end);
                let cursor = d == self.day && i == self.slot;
                self.render_cell(s, &slot, &events, r == 0, cursor, rect, buf);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_cell(
        &self,
        s: &CalendarStore,
        slot: &Slot,
        events: &[&CalendarEvent],
        first_row: bool,
        cursor: bool,
        rect: Rect,
        buf: &mut Buffer,
    ) {
        if rect.width == 0 {
            return;
        }

        let mut style = match (events.is_empty(), s.business_hours.includes(slot)) {
            (false, _) => STYLE_EVENT,
            (true, true) => Style::new(),
            (true, false) => STYLE_OFF_HOURS,
        };
        if cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let text = match events.first() {
            Some(event) if event.start >= slot.start || first_row => {
                let more = match events.len() {
                    1 => String::new(),
                    n => format!(" +{}", n - 1),
                };
                format!("{}{}", event.title, more)
            }
            _ => String::new(),
        };

        buf.set_style(rect, style);
        let inner = Rect::new(rect.x + 1, rect.y, rect.width - 1, 1);
        buf.set_stringn(
            inner.x,
            inner.y,
            truncate_to_width(&text, inner.width as usize),
            inner.width as usize,
            style,
        );
        if let Some(c) = buf.cell_mut((rect.x, rect.y)) {
            c.set_symbol("│");
            c.set_style(STYLE_SEPARATOR);
        }
    }

    fn render_month(&self, s: &CalendarStore, areas: &Areas, buf: &mut Buffer) {
        let days = s.widget.visible_days();
        let n = Self::month_columns(days.len());
        let header_columns = Self::columns(areas.header, n);
        for (date, rect) in days.iter().zip(&header_columns) {
            Paragraph::new(s.locale.weekday_short(date.weekday()))
                .bold()
                .centered()
                .render(*rect, buf);
        }

        let month = s.widget.current_range();
        let rows = Self::rows(areas.grid, yotei_core::MONTH_GRID_WEEKS as usize);
        for (r, row) in rows.iter().enumerate() {
            for (c, col) in Self::columns(*row, n).iter().enumerate() {
                let index = r * n + c;
                let Some(date) = days.get(index) else {
                    continue;
                };
                self.render_day_cell(s, *date, month.contains(*date), index == self.day, *col, buf);
            }
        }
    }

    fn render_day_cell(
        &self,
        s: &CalendarStore,
        date: NaiveDate,
        in_month: bool,
        cursor: bool,
        rect: Rect,
        buf: &mut Buffer,
    ) {
        if rect.width < 2 || rect.height == 0 {
            return;
        }

        if !s.business_hours.includes_day(date) {
            buf.set_style(rect, STYLE_OFF_HOURS);
        }
        for y in rect.top()..rect.bottom() {
            if let Some(c) = buf.cell_mut((rect.x, y)) {
                c.set_symbol("│");
                c.set_style(STYLE_SEPARATOR);
            }
        }

        let inner = Rect::new(rect.x + 1, rect.y, rect.width - 1, rect.height);
        let mut number_style = match (date == s.today(), in_month) {
            (true, _) => STYLE_TODAY,
            (false, true) => Style::new(),
            (false, false) => STYLE_OUTSIDE_MONTH,
        };
        if cursor {
            number_style = number_style.add_modifier(Modifier::REVERSED);
        }
        let number = match date.day() {
            1 => format!("{}/{}", date.month(), date.day()),
            d => d.to_string(),
        };
        buf.set_stringn(inner.x, inner.y, number, inner.width as usize, number_style);

        let slot = Slot::whole_day(date);
        let events = s.widget.events_between(slot.start, slot.end);
        let lines = inner.height.saturating_sub(1) as usize;
        for (i, event) in events.iter().enumerate().take(lines) {
            let y = inner.y + 1 + i as u16;
            let text = match i + 1 == lines && events.len() > lines {
                true => format!("+{}", events.len() - i),
                false => format!("{} {}", event.start.format("%H:%M"), event.title),
            };
            let text = truncate_to_width(&text, inner.width as usize);
            buf.set_stringn(inner.x, y, text, inner.width as usize, STYLE_EVENT);
        }
    }

    /// Keeps the cursor inside the grid after the view or the range changed.
    fn clamp(&mut self, store: &RefCell<CalendarStore>) {
        let s = store.borrow();
        let days = s.widget.visible_days();
        self.day = self.day.min(days.len().saturating_sub(1));
        self.slot = self.slot.min(Self::slot_count(&s, &days).saturating_sub(1));
    }

    /// Moves the cursor by `delta` days, turning the page at either edge.
    fn move_day(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        delta: isize,
    ) {
        let len = store.borrow().widget.visible_days().len() as isize;
        if len == 0 {
            return;
        }

        let target = self.day as isize + delta;
        if target < 0 {
            dispatcher.dispatch(&Action::Prev);
            self.day = (target + len).max(0) as usize;
        } else if target >= len {
            dispatcher.dispatch(&Action::Next);
            self.day = (target - len).min(len - 1) as usize;
        } else {
            self.day = target as usize;
        }
    }

    /// Switches the view, keeping the cursor on the same date when it stays visible.
    fn change_view(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        view: ViewMode,
    ) {
        let date = store.borrow().widget.visible_days().get(self.day).copied();
        dispatcher.dispatch(&Action::ChangeView(view));

        let days = store.borrow().widget.visible_days();
        if let Some(day) = date.and_then(|date| days.iter().position(|d| *d == date)) {
            self.day = day;
        }
    }

    fn jump_to_today(&mut self, store: &RefCell<CalendarStore>) {
        let s = store.borrow();
        let today = s.today();
        if let Some(day) = s.widget.visible_days().iter().position(|d| *d == today) {
            self.day = day;
        }
    }
}

impl Component<CalendarStore> for CalendarView {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        let s = store.borrow();
        let view = s.widget.view();
        let areas = Self::split(area, view);

        self.render_toolbar(&s, areas.toolbar, buf);
        match view {
            ViewMode::TimeGridWeek => self.render_week(&s, &areas, buf),
            ViewMode::DayGridMonth => self.render_month(&s, &areas, buf),
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let (view, columns) = {
            let s = store.borrow();
            let days = s.widget.visible_days().len();
            (s.widget.view(), Self::month_columns(days).max(1))
        };
        let (prev_day, prev_slot) = (self.day, self.slot);

        match (event.code, view) {
            (KeyCode::Left | KeyCode::Char('h'), _) => self.move_day(dispatcher, store, -1),
            (KeyCode::Right | KeyCode::Char('l'), _) => self.move_day(dispatcher, store, 1),
            (KeyCode::Up | KeyCode::Char('k'), ViewMode::TimeGridWeek) => {
                self.slot = self.slot.saturating_sub(1);
            }
            (KeyCode::Down | KeyCode::Char('j'), ViewMode::TimeGridWeek) => self.slot += 1,
            (KeyCode::Up | KeyCode::Char('k'), ViewMode::DayGridMonth) => {
                self.move_day(dispatcher, store, -(columns as isize));
            }
            (KeyCode::Down | KeyCode::Char('j'), ViewMode::DayGridMonth) => {
                self.move_day(dispatcher, store, columns as isize);
            }
            (KeyCode::Enter | KeyCode::Char(' '), _) => self.click(dispatcher, store, false),
            (KeyCode::Char('a'), _) => self.click(dispatcher, store, true),
            (KeyCode::Tab, _) => self.event = self.event.wrapping_add(1),
            (KeyCode::Char('p'), _) => dispatcher.dispatch(&Action::Prev),
            (KeyCode::Char('n'), _) => dispatcher.dispatch(&Action::Next),
            (KeyCode::Char('t'), _) => {
                dispatcher.dispatch(&Action::Today);
                self.jump_to_today(store);
            }
            (KeyCode::Char('m'), _) => self.change_view(dispatcher, store, ViewMode::DayGridMonth),
            (KeyCode::Char('w'), _) => self.change_view(dispatcher, store, ViewMode::TimeGridWeek),
            (KeyCode::Char('q'), _) => return Some(Message::Exit),
            _ => return None,
        }

        self.clamp(store);
        if (self.day, self.slot) != (prev_day, prev_slot) {
            self.event = 0;
        }

        let s = store.borrow();
        let areas = Self::split(area, s.widget.view());
        let rows = Self::slot_count(&s, &s.widget.visible_days());
        self.scroll = self.visible_top(areas.grid.height as usize, rows);
        Some(Message::Handled)
    }

    fn on_click(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        pos: Position,
    ) -> Option<Message> {
        let (areas, hit) = {
            let s = store.borrow();
            let areas = Self::split(area, s.widget.view());
            let hit = Self::toolbar_buttons(&s, areas.toolbar)
                .into_iter()
                .find(|(rect, _, _)| rect.contains(pos))
                .map(|(_, _, action)| action);
            (areas, hit)
        };

        if let Some(action) = hit {
            match action {
                Action::ChangeView(view) => self.change_view(dispatcher, store, view),
                Action::Today => {
                    dispatcher.dispatch(&action);
                    self.jump_to_today(store);
                }
                _ => dispatcher.dispatch(&action),
            }
            self.clamp(store);
            return Some(Message::Handled);
        }
        if !areas.grid.contains(pos) {
            return None;
        }

        let cell = {
            let s = store.borrow();
            let days = s.widget.visible_days();
            match s.widget.view() {
                ViewMode::TimeGridWeek => {
                    let rows = Self::slot_count(&s, &days);
                    let top = self.visible_top(areas.grid.height as usize, rows);
                    let day = Self::columns(areas.grid, days.len())
                        .iter()
                        .position(|c| c.contains(pos));
                    let slot = top + (pos.y - areas.grid.y) as usize;
                    day.filter(|_| slot < rows).map(|day| (day, slot))
                }
                ViewMode::DayGridMonth => {
                    let n = Self::month_columns(days.len());
                    let weeks = Self::rows(areas.grid, yotei_core::MONTH_GRID_WEEKS as usize);
                    let row = weeks.iter().position(|r| r.contains(pos));
                    let col = Self::columns(areas.grid, n)
                        .iter()
                        .position(|c| c.x <= pos.x && pos.x < c.right());
                    row.zip(col).map(|(r, c)| (r * n + c, self.slot))
                }
            }
        };

        let (day, slot) = cell?;
        if (day, slot) != (self.day, self.slot) {
            self.event = 0;
        }
        self.day = day;
        self.slot = slot;
        self.click(dispatcher, store, false);
        Some(Message::Handled)
    }
}
