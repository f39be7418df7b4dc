pub mod config;
pub mod error;
pub mod events;
pub mod output;
pub mod page;
pub mod scrape;
pub mod tracing;
