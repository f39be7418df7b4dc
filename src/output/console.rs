use super::OutputError;
use crate::events::model::EventRecord;
use std::io::Write;

/// One line per event. Returns how many lines were written.
pub fn print_events<W: Write>(out: &mut W, events: &[EventRecord]) -> Result<usize, OutputError> {
    for event in events {
        writeln!(out, "{}", event)?;
    }

    out.flush()?;

    Ok(events.len())
}
