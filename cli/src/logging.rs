// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::{error::Error, io, sync::Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use yotei_core::APP_NAME;

const DEFAULT_FILTER: &str = "warn";

/// Installs the global tracing subscriber.
///
/// The terminal belongs to the calendar while it runs, so logs are appended to
/// `<state dir>/yotei/yotei.log`. Without a usable state directory logs are
/// discarded. The filter is read from `RUST_LOG`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let writer = match get_state_dir().and_then(|dir| log_writer(&dir)) {
        Ok(writer) => writer,
        Err(e) => {
            // Printed before the calendar takes over the terminal.
            eprintln!("Failed to open log file, logging is disabled: {e}");
            BoxMakeWriter::new(io::sink)
        }
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

/// A writer appending to `<state_dir>/yotei/yotei.log`, creating it when needed.
fn log_writer(state_dir: &Path) -> Result<BoxMakeWriter, Box<dyn Error>> {
    let dir = state_dir.join(APP_NAME);
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{APP_NAME}.log")))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}
