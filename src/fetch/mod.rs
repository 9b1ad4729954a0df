use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use thiserror::Error;

use crate::country::CountryRecord;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no country found for code {code}")]
    NotFound { code: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

/// Anything that can turn a URL into a JSON document.
pub trait Fetch {
    fn fetch_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("countrycards/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| FetchError::HttpClientBuild { source })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        log::debug!("received {} bytes from {url}", body.len());

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[derive(Clone, Debug)]
enum Fixture {
    Json(Value),
    Status(u16),
}

/// Serves canned responses keyed by URL; unknown URLs answer 404.
#[derive(Clone, Debug, Default)]
pub struct StaticFetcher {
    fixtures: HashMap<String, Fixture>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.fixtures.insert(url.into(), Fixture::Json(body));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.fixtures.insert(url.into(), Fixture::Status(status));
        self
    }
}

impl Fetch for StaticFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        match self.fixtures.get(url) {
            Some(Fixture::Json(body)) => Ok(body.clone()),
            Some(Fixture::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Decodes an array of records one entry at a time; entries that are not
/// objects are logged and skipped.
fn decode_records(url: &str, body: Value) -> Result<Vec<CountryRecord>, FetchError> {
    let entries: Vec<Value> =
        serde_json::from_value(body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })?;
    let total = entries.len();
    let records: Vec<CountryRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("skipping country #{i} from {url}: {e}");
                None
            }
        })
        .collect();
    if records.len() < total {
        log::warn!("decoded {} of {total} countries from {url}", records.len());
    }
    Ok(records)
}

/// Typed access to the two REST Countries endpoints.
#[derive(Clone, Debug)]
pub struct CountryClient<F> {
    fetcher: F,
    base_url: String,
}

impl<F: Fetch> CountryClient<F> {
    pub fn new(fetcher: F, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn all_url(&self) -> String {
        format!("{}/v3.1/all", self.base_url)
    }

    pub fn alpha_url(&self, code: &str) -> String {
        format!("{}/v3.1/alpha/{}", self.base_url, code)
    }

    pub async fn all_countries(&self) -> Result<Vec<CountryRecord>, FetchError> {
        let url = self.all_url();
        log::info!("fetching all countries from {url}");
        let body = self.fetcher.fetch_json(&url).await?;
        let records = decode_records(&url, body)?;
        log::info!("fetched {} countries", records.len());
        Ok(records)
    }

    /// The endpoint answers with an array even for one code; the first entry wins.
    pub async fn country_by_code(&self, code: &str) -> Result<CountryRecord, FetchError> {
        let url = self.alpha_url(code);
        log::info!("fetching country details from {url}");
        let body = self.fetcher.fetch_json(&url).await?;
        let records = decode_records(&url, body)?;
        records.into_iter().next().ok_or_else(|| FetchError::NotFound {
            code: code.to_string(),
        })
    }

    /// Logs any failure and yields an empty list instead.
    pub async fn fetch_all_countries(&self) -> Vec<CountryRecord> {
        match self.all_countries().await {
            Ok(records) => records,
            Err(e) => {
                log::error!("fetch error: {e}");
                Vec::new()
            }
        }
    }

    /// Logs any failure and yields `None` instead.
    pub async fn fetch_country_details(&self, code: &str) -> Option<CountryRecord> {
        match self.country_by_code(code).await {
            Ok(record) => Some(record),
            Err(e) => {
                log::error!("fetch error: {e}");
                None
            }
        }
    }
}
