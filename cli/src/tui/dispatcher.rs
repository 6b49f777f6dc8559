// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDateTime;
use yotei_core::{EventId, Slot, ViewMode};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: &Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(action);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SlotClick(Slot),
    EventSelect(EventId),
    UpdateTitle(String),
    UpdateStart(NaiveDateTime),
    UpdateEnd(NaiveDateTime),
    Cancel,
    Save,
    Delete,
    BackdropClick,
    Prev,
    Next,
    Today,
    ChangeView(ViewMode),
}
