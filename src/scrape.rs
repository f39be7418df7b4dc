use crate::config::model::ScrapeConfig;
use crate::error::ScrapeError;
use crate::events::extractor::EventExtractor;
use crate::events::model::EventRecord;
use crate::page::api::PageAPI;
use tracing::{info, instrument, warn};

/// Fetches the configured page and extracts its events.
///
/// Selectors are compiled before the request goes out, and nothing is
/// extracted when the fetch fails.
#[instrument(skip(config), fields(url = %config.url))]
pub async fn scrape_events(config: &ScrapeConfig) -> Result<Vec<EventRecord>, ScrapeError> {
    let extractor = EventExtractor::new(&config.selectors)?;
    let page_html = PageAPI::fetch(&config.url).await?;

    let mut events = extractor.extract(&page_html, Some(&config.url));

    if events.is_empty() {
        warn!("No events matched the container selector");
    }

    if let Some(limit) = config.event_limit {
        if events.len() > limit {
            info!("Keeping the first {} of {} events", limit, events.len());
            events.truncate(limit);
        }
    }

    report_missing_fields(&events);

    info!("Extracted {} events", events.len());

    Ok(events)
}

fn report_missing_fields(events: &[EventRecord]) {
    for event in events.iter().filter(|event| !event.is_complete()) {
        let missing = event
            .missing_fields
            .iter()
            .map(|field| field.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        warn!(title = %event.title, "Event is missing: {}", missing);
    }
}
