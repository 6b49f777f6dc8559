// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Position;
use ratatui::prelude::*;
use yotei_core::APP_NAME;

use crate::tui::calendar_store::CalendarStore;
use crate::tui::calendar_view::CalendarView;
use crate::tui::component::{Component, Message};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::Dispatcher;
use crate::tui::event_form::EventForm;
use crate::tui::root::Root;

type CalendarPage = SinglePage<CalendarStore, CalendarView>;

/// The whole screen: the calendar page in the root column, with the event
/// form on top while it is visible.
pub struct CalendarEditor {
    root: Root<CalendarStore, CalendarPage>,
    form: EventForm,
    form_visible: bool,
}

impl CalendarEditor {
    pub fn new(store: &RefCell<CalendarStore>) -> Self {
        let page = SinglePage::new(APP_NAME, instructions(), CalendarView::new(store));
        Self {
            root: Root::new(page),
            form: EventForm::new(store),
            form_visible: store.borrow().widget.is_visible(),
        }
    }

    /// Focuses the form when it opens and releases it when it closes.
    fn sync_form(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<CalendarStore>) {
        let visible = store.borrow().widget.is_visible();
        if visible == self.form_visible {
            return;
        }

        self.form_visible = visible;
        match visible {
            true => self.form.activate(dispatcher, store),
            false => self.form.deactivate(dispatcher, store),
        }
    }
}

impl Component<CalendarStore> for CalendarEditor {
    fn render(&self, store: &RefCell<CalendarStore>, area: Rect, buf: &mut Buffer) {
        self.root.render(store, area, buf);
        self.form.render(store, area, buf);
    }

    fn get_cursor_position(
        &self,
        store: &RefCell<CalendarStore>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        match self.form_visible {
            true => self.form.get_cursor_position(store, area),
            false => self.root.get_cursor_position(store, area),
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Exit);
        }

        let msg = match self.form_visible {
            true => self.form.on_key(dispatcher, store, area, event),
            false => self.root.on_key(dispatcher, store, area, event),
        };
        self.sync_form(dispatcher, store);
        msg
    }

    fn on_click(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<CalendarStore>,
        area: Rect,
        pos: Position,
    ) -> Option<Message> {
        let msg = match self.form_visible {
            true => self.form.on_click(dispatcher, store, area, pos),
            false => self.root.on_click(dispatcher, store, area, pos),
        };
        self.sync_form(dispatcher, store);
        msg
    }
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Move ".into(),
        "<←↑↓→>".blue().bold(),
        " Open ".into(),
        "<Enter>".blue().bold(),
        " New ".into(),
        "<a>".blue().bold(),
        " Prev/Next ".into(),
        "<p/n>".blue().bold(),
        " Today ".into(),
        "<t>".blue().bold(),
        " View ".into(),
        "<m/w>".blue().bold(),
        " Quit ".into(),
        "<q> ".blue().bold(),
    ])
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{NaiveDateTime, NaiveTime};
    use unicode_width::UnicodeWidthStr;
    use yotei_core::{CalendarHandle, Config, EditTarget, ViewMode};

    use super::*;

    const AREA: Rect = Rect::new(0, 0, 160, 40);

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-10-15 10:23", "%Y-%m-%d %H:%M").unwrap()
    }

    struct Harness {
        store: Rc<RefCell<CalendarStore>>,
        dispatcher: Dispatcher,
        editor: CalendarEditor,
    }

    impl Harness {
        fn new(config: &Config) -> Self {
            let store = Rc::new(RefCell::new(CalendarStore::new(config, now())));
            let mut dispatcher = Dispatcher::new();
            CalendarStore::register_to(store.clone(), &mut dispatcher);
            let editor = CalendarEditor::new(&store);
            Self {
                store,
                dispatcher,
                editor,
            }
        }

        fn key(&mut self, code: KeyCode) -> Option<Message> {
            let event = KeyEvent::new(code, KeyModifiers::NONE);
            self.editor
                .on_key(&mut self.dispatcher, &self.store, AREA, event)
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.key(KeyCode::Char(c));
            }
        }

        fn click(&mut self, x: u16, y: u16) -> Option<Message> {
            self.editor
                .on_click(&mut self.dispatcher, &self.store, AREA, Position::new(x, y))
        }

        fn screen(&self) -> String {
            let mut buf = Buffer::empty(AREA);
            self.editor.render(&self.store, AREA, &mut buf);
            buffer_text(&buf)
        }

        fn visible(&self) -> bool {
            self.store.borrow().widget.is_visible()
        }
    }

    /// Buffer rows as text, skipping the filler cells behind wide characters.
    fn buffer_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            let mut skip = 0;
            for x in 0..buf.area.width {
                let symbol = buf[(x, y)].symbol();
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                skip = symbol.width().saturating_sub(1);
                out.push_str(symbol);
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_week_view_with_toolbar() {
        let harness = Harness::new(&Config::default());
        let screen = harness.screen();
        assert!(screen.contains("yotei"));
        assert!(screen.contains("2025年10月"));
        assert!(screen.contains("10/15(水)"));
        assert!(screen.contains("10/18(土)"));
        assert!(screen.contains("今日"));
        assert!(screen.contains("10時"));
        assert!(!screen.contains("予定を入力"));
    }

    #[test]
    fn enter_on_slot_opens_prefilled_form() {
        let mut harness = Harness::new(&Config::default());
        assert_eq!(harness.key(KeyCode::Enter), Some(Message::Handled));
        assert!(harness.visible());

        let store = harness.store.borrow();
        let draft = store.widget.draft();
        assert_eq!(draft.start, now().date().and_hms_opt(10, 0, 0).unwrap());
        assert_eq!(draft.end, now().date().and_hms_opt(10, 30, 0).unwrap());
        drop(store);

        let screen = harness.screen();
        assert!(screen.contains("予定を入力"));
        assert!(screen.contains("タイトル"));
        assert!(screen.contains("2025/10/15 10:00"));
        assert!(screen.contains("2025/10/15 10:30"));
    }

    #[test]
    fn typed_title_is_saved_and_drawn() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        harness.type_text("会議");
        harness.key(KeyCode::Enter);

        assert!(!harness.visible());
        let store = harness.store.borrow();
        let EditTarget::Existing(id) = store.widget.target() else {
            panic!("expected the draft to be saved");
        };
        assert_eq!(store.widget.handle().event(id).unwrap().title, "会議");
        drop(store);

        assert!(harness.screen().contains("会議"));
    }

    #[test]
    fn end_field_steps_by_picker_interval() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Right);
        harness.key(KeyCode::Right);

        let end = harness.store.borrow().widget.draft().end;
        assert_eq!(end.time(), NaiveTime::from_hms_opt(10, 50, 0).unwrap());
    }

    #[test]
    fn typed_datetime_is_parsed_on_enter() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        harness.key(KeyCode::Down);
        harness.type_text("2025/10/16 08:05");
        harness.key(KeyCode::Enter);

        assert!(harness.visible());
        let start = harness.store.borrow().widget.draft().start;
        assert_eq!(
            start,
            NaiveDateTime::parse_from_str("2025-10-16 08:00", "%Y-%m-%d %H:%M").unwrap()
        );
    }

    #[test]
    fn escape_cancels_and_keeps_draft() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        harness.type_text("Meeting");
        assert_eq!(harness.key(KeyCode::Esc), Some(Message::Handled));

        assert!(!harness.visible());
        assert_eq!(harness.store.borrow().widget.draft().title, "Meeting");
        assert!(harness.store.borrow().widget.handle().is_empty());
    }

    #[test]
    fn click_on_backdrop_closes_form() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        let dialog = EventForm::dialog_area(AREA);

        assert_eq!(harness.click(dialog.x + 2, dialog.y + 2), Some(Message::Handled));
        assert!(harness.visible());

        assert_eq!(harness.click(0, 0), Some(Message::Handled));
        assert!(!harness.visible());
    }

    #[test]
    fn invalid_range_keeps_form_open_with_message() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Down);
        for _ in 0..3 {
            harness.key(KeyCode::Left);
        }
        harness.key(KeyCode::Enter);

        assert!(harness.visible());
        assert!(harness.screen().contains("終了は開始より後にしてください"));
    }

    #[test]
    fn enter_on_saved_event_selects_it() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        harness.type_text("会議");
        harness.key(KeyCode::Enter);
        let saved = harness.store.borrow().widget.target();

        harness.key(KeyCode::Enter);
        assert!(harness.visible());
        assert_eq!(harness.store.borrow().widget.target(), saved);
        assert_eq!(harness.store.borrow().widget.draft().title, "会議");
    }

    #[test]
    fn switches_to_month_view() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Char('m'));
        assert_eq!(harness.store.borrow().widget.view(), ViewMode::DayGridMonth);

        let screen = harness.screen();
        assert!(screen.contains("2025年10月"));
        assert!(screen.contains("10/1"));
        assert!(screen.contains("11/1"));

        harness.key(KeyCode::Enter);
        let draft = harness.store.borrow().widget.draft().clone();
        assert_eq!(draft.start, now().date().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(draft.end, draft.start + chrono::Duration::days(1));
    }

    #[test]
    fn quit_exits_only_when_form_hidden() {
        let mut harness = Harness::new(&Config::default());
        harness.key(KeyCode::Enter);
        harness.key(KeyCode::Char('q'));
        assert!(harness.visible());
        assert_eq!(harness.store.borrow().widget.draft().title, "q");

        harness.key(KeyCode::Esc);
        assert_eq!(harness.key(KeyCode::Char('q')), Some(Message::Exit));
    }

    #[test]
    fn escape_on_calendar_does_not_quit() {
        let mut harness = Harness::new(&Config::default());
        assert_eq!(harness.key(KeyCode::Esc), None);
        assert!(!harness.visible());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let msg = harness
            .editor
            .on_key(&mut harness.dispatcher, &harness.store, AREA, ctrl_c);
        assert_eq!(msg, Some(Message::Exit));
    }
}
