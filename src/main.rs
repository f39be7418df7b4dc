use eventscrape::config::env_loader::load_config;
use eventscrape::config::model::OutputTarget;
use eventscrape::error::ScrapeError;
use eventscrape::output::console::print_events;
use eventscrape::output::csv::write_events_to_file;
use eventscrape::scrape::scrape_events;
use eventscrape::tracing::setup_loki;
use std::io;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let loki_controller = setup_loki().await;

    let exit_code = match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Scrape failed: {}", err);
            ExitCode::FAILURE
        }
    };

    if let Some((controller, handle)) = loki_controller {
        controller.shutdown().await;

        if let Err(err) = handle.await {
            eprintln!("Loki background task failed: {err}");
        }
    }

    exit_code
}

async fn run() -> Result<(), ScrapeError> {
    let config = load_config()?;
    let events = scrape_events(&config.scrape).await?;

    match &config.output {
        OutputTarget::Console => {
            print_events(&mut io::stdout().lock(), &events)?;
        }
        OutputTarget::Csv(path) => {
            let summary = write_events_to_file(path, &events)?;

            info!(
                "Wrote {} events to '{}'",
                summary.written,
                path.display()
            );

            if summary.skipped > 0 {
                warn!(
                    "Skipped {} events without a title or link",
                    summary.skipped
                );
            }
        }
    }

    Ok(())
}
