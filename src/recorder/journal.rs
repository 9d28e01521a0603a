//! Best-effort journal of completed transitions, one JSON line per
//! event in the row layout
//! `elevator_id, initial_floor, target_floor, status, timestamp`.
use std::io::Write;

use crossbeam_channel as cbc;
use serde;

use crate::event::transition::{EventKind, TransitionEvent};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flat row view of an event, with the timestamp already formatted.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct JournalRow {
    pub elevator_id: usize,
    pub initial_floor: u8,
    pub target_floor: u8,
    pub status: EventKind,
    pub timestamp: String,
}

impl JournalRow {
    pub fn from_event(event: &TransitionEvent) -> JournalRow {
        JournalRow {
            elevator_id: event.elevator_id,
            initial_floor: event.initial_floor,
            target_floor: event.target_floor,
            status: event.kind,
            timestamp: event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Appends one row per received event to `out` until every sending
/// handle hangs up. Journal trouble is reported and skipped; it never
/// reaches the cars.
pub fn run<W: Write>(rx: cbc::Receiver<TransitionEvent>, mut out: W) {
    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => break,
        };
        match write_row(&JournalRow::from_event(&event), &mut out) {
            Ok(_) => {}
            Err(e) => {
                eprintln!("Couldn't journal event: {}", e);
            }
        }
    }
}

fn write_row<W: Write>(row: &JournalRow, out: &mut W) -> std::io::Result<()> {
    let line = serde_json::to_string(row)?;
    writeln!(out, "{}", line)?;
    return out.flush();
}
