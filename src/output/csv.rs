use super::OutputError;
use crate::events::model::{EventField, EventRecord};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const HEADER: [&str; 2] = ["Event Title", "Event Link"];

/// How many events made it into the file, and how many didn't
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CsvSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Writes a title/link row per event. Events whose title or link had to be
/// filled with a placeholder are left out and counted in `skipped`.
pub fn write_events<W: Write>(
    writer: W,
    events: &[EventRecord],
) -> Result<CsvSummary, ::csv::Error> {
    let mut writer = ::csv::Writer::from_writer(writer);
    let mut summary = CsvSummary::default();

    writer.write_record(HEADER)?;

    for event in events {
        match (&event.link, event.is_missing(EventField::Title)) {
            (Some(link), false) if !event.is_missing(EventField::Link) => {
                writer.write_record([event.title.as_str(), link.as_str()])?;
                summary.written += 1;
            }
            _ => {
                debug!(title = %event.title, "Skipping event without a title or link");
                summary.skipped += 1;
            }
        }
    }

    writer.flush()?;

    Ok(summary)
}

pub fn write_events_to_file(path: &Path, events: &[EventRecord]) -> Result<CsvSummary, OutputError> {
    let to_output_error = |source: ::csv::Error| OutputError::Csv {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(|err| to_output_error(err.into()))?;

    write_events(file, events).map_err(to_output_error)
}
