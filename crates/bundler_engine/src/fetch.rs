use std::error::Error as StdError;
use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::config::{BundlerConfig, DEFAULT_USER_AGENT};
use crate::{EngineError, FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout: Duration,
    pub user_agent: String,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from(&BundlerConfig::default())
    }
}

impl From<&BundlerConfig> for FetchSettings {
    fn from(config: &BundlerConfig) -> Self {
        let user_agent = if config.user_agent.trim().is_empty() {
            DEFAULT_USER_AGENT.to_string()
        } else {
            config.user_agent.clone()
        };
        Self {
            request_timeout: config.timeout(),
            user_agent,
            redirect_limit: config.redirect_limit,
            max_bytes: config.max_bytes,
        }
    }
}

/// Performs a single GET for one URL. Implementations never retry.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()?;
        Ok(Self {
            client,
            max_bytes: settings.max_bytes,
        })
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(actual),
            },
            format!("response body of {actual} bytes exceeds limit of {} bytes", self.max_bytes),
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|err| {
            FetchError::new(FailureKind::InvalidUrl, format!("invalid url '{url}': {err}"))
        })?;

        engine_debug!("GET {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{status} for url: {final_url}"),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchOutput {
            bytes,
            metadata: FetchMetadata {
                url: url.to_string(),
                final_url,
                status: status.as_u16(),
                content_type,
            },
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let message = describe_error(&err);
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, message);
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, message);
    }
    FetchError::new(FailureKind::Network, message)
}

/// Flattens an error and its `source()` chain into one line.
///
/// reqwest's top-level message hides the resolver or socket cause, which is
/// the part a user actually needs to see.
pub(crate) fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
