use lazy_static::lazy_static;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{error, info};

const USER_AGENT: &str = concat!("eventscrape/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref REST_CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|err| {
            error!("Failed building HTTP client, falling back to defaults: {err}");
            Client::new()
        });
}

pub struct PageAPI;

impl PageAPI {
    /// Fetches the page body. Any non-2xx answer is an error, there are no retries.
    #[tracing::instrument(skip(url), fields(url = %url))]
    pub async fn fetch(url: &Url) -> Result<String, FetchError> {
        let response = REST_CLIENT
            .get(url.clone())
            .send()
            .await
            .map_err(|err| {
                error!("Error sending request: {err}");
                FetchError::Request(err)
            })?;

        let status = response.status();

        if !status.is_success() {
            error!("Request failed with status {}", status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let page_html = response.text().await.map_err(FetchError::Request)?;

        info!("Fetched {} bytes", page_html.len());

        Ok(page_html)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("'{url}' answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Request(err) => err.status(),
        }
    }
}
