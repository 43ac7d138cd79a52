//! Reachability/compatibility probe for candidate server URLs.
//!
//! A compatible endpoint serves a JSON info document at `api/info` with a
//! non-empty `version` field. The probe never mutates anything; callers turn
//! a failure into a dialog or a silent `false`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("incompatible endpoint: {0}")]
    Incompatible(String),
}

#[async_trait]
pub trait ServerProbe: Send + Sync {
    async fn probe(&self, url: &Url) -> Result<(), ProbeError>;
}

#[derive(Deserialize)]
struct InfoResponse {
    #[serde(default)]
    version: String,
}

/// HTTP probe against the endpoint's info document.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ServerProbe for HttpProbe {
    async fn probe(&self, url: &Url) -> Result<(), ProbeError> {
        let endpoint = url
            .join("api/info")
            .map_err(|err| ProbeError::Incompatible(format!("unusable base URL: {err}")))?;

        let response = self
            .client
            .get(endpoint)
            .send()
            .await?
            .error_for_status()?;
        let info: InfoResponse = response.json().await?;

        if info.version.trim().is_empty() {
            return Err(ProbeError::Incompatible(
                "info document carries no version".to_string(),
            ));
        }
        Ok(())
    }
}
