// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, marker::PhantomData};

use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::{Flex, Position};
use ratatui::prelude::*;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;

/// Share of the screen width taken by the content column.
const CONTENT_PERCENT: u32 = 60;

/// Narrowest content column, used on small terminals.
const MIN_CONTENT_WIDTH: u16 = 56;

/// The root container: one child in a column centered horizontally.
pub struct Root<S, C: Component<S>> {
    child: C,
    _phantom: PhantomData<S>,
}

impl<S, C: Component<S>> Root<S, C> {
    pub fn new(child: C) -> Self {
        Self {
            child,
            _phantom: PhantomData,
        }
    }

    pub fn content_area(area: Rect) -> Rect {
        let width = (area.width as u32 * CONTENT_PERCENT / 100) as u16;
        let width = width.max(MIN_CONTENT_WIDTH.min(area.width));
        let [content] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        content
    }
}

impl<S, C: Component<S>> Component<S> for Root<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.child.render(store, Self::content_area(area), buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.child.get_cursor_position(store, Self::content_area(area))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.child.on_key(dispatcher, store, Self::content_area(area), event)
    }

    fn on_click(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        pos: Position,
    ) -> Option<Message> {
        let content = Self::content_area(area);
        match content.contains(pos) {
            true => self.child.on_click(dispatcher, store, content, pos),
            false => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.child.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.child.deactivate(dispatcher, store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl Component<()> for Empty {
        fn render(&self, _store: &RefCell<()>, _area: Rect, _buf: &mut Buffer) {}
    }

    #[test]
    fn centers_sixty_percent_column() {
        let area = Rect::new(0, 0, 200, 50);
        let content = Root::<(), Empty>::content_area(area);
        assert_eq!(content, Rect::new(40, 0, 120, 50));
    }

    #[test]
    fn keeps_minimum_width_on_small_screens() {
        let content = Root::<(), Empty>::content_area(Rect::new(0, 0, 80, 24));
        assert_eq!(content.width, MIN_CONTENT_WIDTH);
        assert_eq!(content.x, 12);

        let content = Root::<(), Empty>::content_area(Rect::new(0, 0, 40, 24));
        assert_eq!(content, Rect::new(0, 0, 40, 24));
    }
}
