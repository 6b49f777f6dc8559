// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use yotei_core::{
    BusinessHours, CalendarWidget, Config, DateTimePicker, EventCollection, Labels, Locale,
    WidgetOptions,
};

use crate::tui::dispatcher::{Action, Dispatcher};

/// State shared by every component of the calendar screen.
#[derive(Debug)]
pub struct CalendarStore {
    pub widget: CalendarWidget,
    pub locale: Locale,
    pub slot_duration: Duration,
    pub business_hours: BusinessHours,
    pub picker: DateTimePicker,
    pub now: NaiveDateTime,
}

impl CalendarStore {
    pub fn new(config: &Config, now: NaiveDateTime) -> Self {
        let options = WidgetOptions::from(config);
        Self {
            widget: CalendarWidget::new(EventCollection::new(), options, now),
            locale: config.calendar.locale,
            slot_duration: config.calendar.slot_duration(),
            business_hours: config.calendar.business_hours.clone(),
            picker: DateTimePicker::from(&config.picker),
            now,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        self.locale.labels()
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            let today = that.today();
            let widget = &mut that.widget;
            match action {
                Action::SlotClick(slot) => widget.on_slot_click(*slot),
                Action::EventSelect(id) => widget.on_event_select(*id),
                Action::UpdateTitle(v) => widget.on_title_change(v.as_str()),
                Action::UpdateStart(v) => widget.on_start_change(*v),
                Action::UpdateEnd(v) => widget.on_end_change(*v),
                Action::Cancel => widget.on_cancel(),
                Action::BackdropClick => widget.on_backdrop_click(),
                Action::Save => {
                    if let Err(e) = widget.on_save() {
                        tracing::info!(error = %e, "save rejected, keeping form open");
                    }
                }
                Action::Delete => match widget.on_delete() {
                    Ok(Some(event)) => tracing::debug!(id = %event.id, "event deleted"),
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, "failed to delete event"),
                },
                Action::Prev => widget.prev(),
                Action::Next => widget.next(),
                Action::Today => widget.today(today),
                Action::ChangeView(view) => widget.change_view(*view),
            }
        }));
        dispatcher.register(callback);
    }
}

#[cfg(test)]
mod tests {
    use yotei_core::{CalendarHandle, EditTarget, Error, Slot, ViewMode};

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-10-15 10:23", "%Y-%m-%d %H:%M").unwrap()
    }

    fn at(hour: u32) -> NaiveDateTime {
        now().date().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn setup() -> (Rc<RefCell<CalendarStore>>, Dispatcher) {
        let store = Rc::new(RefCell::new(CalendarStore::new(&Config::default(), now())));
        let mut dispatcher = Dispatcher::new();
        CalendarStore::register_to(store.clone(), &mut dispatcher);
        (store, dispatcher)
    }

    #[test]
    fn actions_drive_the_widget() {
        let (store, mut dispatcher) = setup();
        dispatcher.dispatch(&Action::SlotClick(Slot::new(at(9), at(10))));
        assert!(store.borrow().widget.is_visible());

        dispatcher.dispatch(&Action::UpdateTitle("会議".to_owned()));
        dispatcher.dispatch(&Action::UpdateEnd(at(11)));
        dispatcher.dispatch(&Action::Save);

        let store = store.borrow();
        assert!(!store.widget.is_visible());
        let EditTarget::Existing(id) = store.widget.target() else {
            panic!("expected a saved event");
        };
        let event = store.widget.handle().event(id).unwrap();
        assert_eq!(event.title, "会議");
        assert_eq!((event.start, event.end), (at(9), at(11)));
    }

    #[test]
    fn rejected_save_keeps_form_open() {
        let (store, mut dispatcher) = setup();
        dispatcher.dispatch(&Action::SlotClick(Slot::new(at(9), at(10))));
        dispatcher.dispatch(&Action::UpdateEnd(at(8)));
        dispatcher.dispatch(&Action::Save);

        let store = store.borrow();
        assert!(store.widget.is_visible());
        assert!(matches!(store.widget.error(), Some(Error::InvalidRange { .. })));
        assert!(store.widget.handle().is_empty());
    }

    #[test]
    fn backdrop_click_and_cancel_hide_the_form() {
        let (store, mut dispatcher) = setup();
        for close in [Action::Cancel, Action::BackdropClick] {
            dispatcher.dispatch(&Action::SlotClick(Slot::new(at(9), at(10))));
            dispatcher.dispatch(&close);
            assert!(!store.borrow().widget.is_visible());
        }
    }

    #[test]
    fn navigation_moves_the_anchor() {
        let (store, mut dispatcher) = setup();
        dispatcher.dispatch(&Action::Next);
        assert_eq!(store.borrow().widget.anchor(), now().date() + Duration::weeks(1));

        dispatcher.dispatch(&Action::ChangeView(ViewMode::DayGridMonth));
        dispatcher.dispatch(&Action::Today);
        let store = store.borrow();
        assert_eq!(store.widget.view(), ViewMode::DayGridMonth);
        assert_eq!(store.widget.anchor(), now().date());
    }
}
