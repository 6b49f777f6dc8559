// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, io, rc::Rc};

use chrono::Local;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::layout::{Position, Rect};
use yotei_core::{Config, EventCollection};

use crate::tui::calendar_editor::CalendarEditor;
use crate::tui::calendar_store::CalendarStore;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;

/// Runs the interactive calendar until the user quits, returning the events
/// committed during the session.
pub fn run_calendar(config: &Config) -> Result<EventCollection, Box<dyn Error>> {
    let store = CalendarStore::new(config, Local::now().naive_local());
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result = match execute!(io::stdout(), EnableMouseCapture) {
        Ok(()) => {
            let mut dispatcher = Dispatcher::new();
            CalendarStore::register_to(store.clone(), &mut dispatcher);
            let mut editor = CalendarEditor::new(&store);
            let result = event_loop(&mut terminal, &mut dispatcher, &store, &mut editor);
            if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
                tracing::warn!(error = %e, "failed to disable mouse capture");
            }
            result
        }
        Err(e) => Err(e.into()),
    }; // release dispatcher and editor here to avoid borrow conflicts
    ratatui::restore();
    result?;

    let store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(store.widget.into_handle())
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    dispatcher: &mut Dispatcher,
    store: &RefCell<CalendarStore>,
    editor: &mut CalendarEditor,
) -> Result<(), Box<dyn Error>> {
    loop {
        store.borrow_mut().now = Local::now().naive_local();

        let area: Rect = terminal
            .draw(|frame| {
                let area = frame.area();
                editor.render(store, area, frame.buffer_mut());
                if let Some(pos) = editor.get_cursor_position(store, area) {
                    frame.set_cursor_position(pos);
                }
            })?
            .area;

        let msg = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                editor.on_key(dispatcher, store, area, key)
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let pos = Position::new(mouse.column, mouse.row);
                editor.on_click(dispatcher, store, area, pos)
            }
            _ => None, // Resize and the rest only need a redraw
        };

        if msg == Some(Message::Exit) {
            tracing::debug!("exit requested");
            return Ok(());
        }
    }
}
