use async_trait::async_trait;

use mas_common::StatusSnapshot;

pub const STATUS_PATH: &str = "/api/status";

/// Everything that can go wrong between issuing the status request and holding
/// a decoded snapshot. The poller treats all variants the same way.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("status request failed: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("status endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed status body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(Box::new(err))
    }
}

#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError>;
}

/// Reads snapshots from `GET {server_url}/api/status`.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    url: String,
    http: reqwest::Client,
}

impl HttpStatusSource {
    /// Uses reqwest's transport defaults; no timeout is layered on top.
    pub fn new(server_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(server_url, http))
    }

    pub fn with_client(server_url: &str, http: reqwest::Client) -> Self {
        Self {
            url: status_url(server_url),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub fn status_url(server_url: &str) -> String {
    format!("{}{}", server_url.trim_end_matches('/'), STATUS_PATH)
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError> {
        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
