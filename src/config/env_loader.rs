use crate::config::model::{Config, OutputTarget, ScrapeConfig};
use crate::events::selector::SelectorConfig;
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_URL: &str = "https://www.newyorkcares.org/home";

const URL_VAR: &str = "SCRAPE_URL";
const SELECTORS_FILE_VAR: &str = "SELECTORS_FILE";
const OUTPUT_CSV_VAR: &str = "OUTPUT_CSV";
const EVENT_LIMIT_VAR: &str = "EVENT_LIMIT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
    #[error("couldn't read selectors file '{}': {source}", path.display())]
    ReadSelectors {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid selectors file '{}': {source}", path.display())]
    InvalidSelectors {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_with(|name| env::var(name).ok())
}

/// Same as [`load_config`], reading variables through `lookup` instead of the environment
pub fn load_config_with<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = load_url_config(&lookup, URL_VAR, DEFAULT_URL)?;
    let event_limit = load_usize_config(&lookup, EVENT_LIMIT_VAR)?;

    let selectors = match load_path_config(&lookup, SELECTORS_FILE_VAR) {
        Some(path) => load_selector_config(&path)?,
        None => {
            debug!("No selectors file given, using the built-in selectors");
            SelectorConfig::default()
        }
    };

    let output = match load_path_config(&lookup, OUTPUT_CSV_VAR) {
        Some(path) => OutputTarget::Csv(path),
        None => OutputTarget::Console,
    };

    Ok(Config {
        scrape: ScrapeConfig {
            url,
            selectors,
            event_limit,
        },
        output,
    })
}

pub fn load_selector_config(path: &Path) -> Result<SelectorConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadSelectors {
        path: path.to_path_buf(),
        source,
    })?;

    let selectors = serde_json::from_str(&content).map_err(|source| {
        ConfigError::InvalidSelectors {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("Loaded selectors from '{}'", path.display());

    Ok(selectors)
}

fn load_url_config<F>(lookup: &F, name: &'static str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    let url: Url = value.parse().map_err(|err| ConfigError::InvalidValue {
        name,
        reason: format!("'{}' is not a valid URL ({})", value, err),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidValue {
            name,
            reason: format!("unsupported scheme '{}', expected http or https", scheme),
        }),
    }
}

fn load_usize_config<F>(lookup: &F, name: &'static str) -> Result<Option<usize>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name,
                reason: format!("expected a non-negative integer, got '{}'", value),
            }),
        None => Ok(None),
    }
}

fn load_path_config<F>(lookup: &F, name: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}
