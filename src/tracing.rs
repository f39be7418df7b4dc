use lazy_static::lazy_static;
use std::{env, io};
use tokio::task::JoinHandle;
use tracing::{info, warn, Level};
use tracing_loki::url::Url;
use tracing_loki::{BackgroundTask, BackgroundTaskController};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

lazy_static! {
    static ref LOKI_URL: Option<String> = env::var("LOKI_URL").ok();
}

fn build_loki_layer(
    base_url: Url,
) -> Result<
    (
        tracing_loki::Layer,
        BackgroundTaskController,
        BackgroundTask,
    ),
    tracing_loki::Error,
> {
    tracing_loki::builder()
        .label("service", "eventscrape")?
        .build_controller_url(base_url)
}

/// Logs to stdout, and to Loki as well when `LOKI_URL` points to a reachable instance.
///
/// The returned controller must be shut down before exiting so buffered logs get shipped.
pub async fn setup_loki() -> Option<(BackgroundTaskController, JoinHandle<()>)> {
    let filter = filter::Targets::new()
        .with_target("eventscrape", Level::TRACE)
        .with_default(Level::WARN);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout));

    let Some(base_url) = LOKI_URL.as_ref() else {
        registry.init();
        warn!("Loki URL not provided. Continuing without it.");
        return None;
    };

    let base_url: Url = match base_url.parse() {
        Ok(url) => url,
        Err(err) => {
            registry.init();
            warn!("Invalid Loki URL '{}' ({}). Continuing without it.", base_url, err);
            return None;
        }
    };

    if reqwest::get(base_url.as_str()).await.is_err() {
        registry.init();
        warn!("Couldn't connect to Loki. Continuing without it.");
        return None;
    }

    match build_loki_layer(base_url) {
        Ok((layer, controller, task)) => {
            registry.with(layer).init();
            let handle = tokio::spawn(task);

            info!("Loki initialized");

            Some((controller, handle))
        }
        Err(err) => {
            registry.init();
            warn!("Failed building Loki layer ({}). Continuing without it.", err);
            None
        }
    }
}
