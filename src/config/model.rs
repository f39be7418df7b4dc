use crate::events::selector::SelectorConfig;
use reqwest::Url;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub output: OutputTarget,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: Url,
    pub selectors: SelectorConfig,
    /// Only keep the first N events found on the page
    pub event_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Console,
    Csv(PathBuf),
}
