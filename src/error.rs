use crate::config::env_loader::ConfigError;
use crate::events::selector::ParseError;
use crate::output::OutputError;
use crate::page::api::FetchError;
use thiserror::Error;

/// Anything that ends a scrape run early.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
