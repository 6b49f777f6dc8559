// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg};
use yotei_core::{Config, ViewMode};

use crate::event_formatter::EventFormatter;
use crate::tui;
use crate::util::ArgOutputFormat;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdCalendar {
    pub view: Option<ViewMode>,
    pub output_format: ArgOutputFormat,
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Open the calendar and print the events saved in the session")
            .arg(arg_view())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            view: matches.get_one::<ViewMode>("view").copied(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening calendar...");

        let mut config = config.clone();
        if let Some(view) = self.view {
            config.calendar.initial_view = view;
        }

        let events = tui::run_calendar(&config)?.into_events();
        tracing::info!(count = events.len(), "calendar closed");

        let formatter = EventFormatter::new().with_output_format(self.output_format);
        print!("{}", formatter.format(&events));
        Ok(())
    }
}

fn arg_view() -> Arg {
    arg!(--view <VIEW> "The view to open with, overriding the config")
        .long_help("The view to open with: `week` (timeGridWeek) or `month` (dayGridMonth).")
        .value_parser(parse_view)
}

fn parse_view(s: &str) -> Result<ViewMode, yotei_core::Error> {
    match s.to_lowercase().as_str() {
        "week" | "w" => Ok(ViewMode::TimeGridWeek),
        "month" | "m" => Ok(ViewMode::DayGridMonth),
        _ => s.parse(),
    }
}
