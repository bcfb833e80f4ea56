use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    sync::Mutex,
};

use log::warn;

use crate::trace::trace::TraceEvent;

/// Appends submission trace events to a JSON Lines file.
///
/// Failures never reach the caller: a trace that cannot be written is
/// dropped with a warning.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(Mutex::new(file)),
            },
            Err(e) => {
                warn!("could not open trace file '{}': {}", path, e);
                Self::disabled()
            }
        }
    }

    /// A logger that discards every event.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(e) = Self::append(sink, event) {
            warn!("dropped trace event for attempt {}: {}", event.attempt, e);
        }
    }

    fn append(sink: &Mutex<File>, event: &TraceEvent) -> io::Result<()> {
        let line = serde_json::to_string(event)?;
        // a panic mid-write leaves at worst a torn line; keep appending
        let mut file = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(file, "{}", line)
    }
}
