// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use chrono::NaiveDateTime;

use yotei_core::{CalendarHandle, CalendarWidget, FormState};

/// Asserts the draft fields of a widget.
///
/// # Panics
///
/// Panics if any field doesn't match the expected value.
pub fn assert_draft<H: CalendarHandle>(
    widget: &CalendarWidget<H>,
    title: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) {
    let draft = widget.draft();
    assert_eq!(draft.title, title, "Title mismatch");
    assert_eq!(draft.start, start, "Start mismatch");
    assert_eq!(draft.end, end, "End mismatch");
}

pub fn assert_visible<H: CalendarHandle>(widget: &CalendarWidget<H>) {
    assert_eq!(widget.form_state(), FormState::Visible, "Form should be visible");
}

pub fn assert_hidden<H: CalendarHandle>(widget: &CalendarWidget<H>) {
    assert_eq!(widget.form_state(), FormState::Hidden, "Form should be hidden");
}
