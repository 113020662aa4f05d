use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_error, engine_warn};
use futures_util::FutureExt;

use crate::config::BundlerConfig;
use crate::decode::decode_html;
use crate::fetch::{describe_error, FetchSettings, Fetcher, ReqwestFetcher};
use crate::transform::Transformer;
use crate::{EngineError, FailureKind, FetchError, JobId, PageResult};

/// Fetch + transform for one URL. `process` always yields a `PageResult`;
/// failures of any kind, panics included, stay inside this boundary.
#[derive(Clone)]
pub struct PageWorker {
    fetcher: Arc<dyn Fetcher>,
    transformer: Transformer,
}

impl PageWorker {
    pub fn new(fetcher: Arc<dyn Fetcher>, transformer: Transformer) -> Self {
        Self {
            fetcher,
            transformer,
        }
    }

    pub fn from_config(config: &BundlerConfig) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(FetchSettings::from(config))?;
        Ok(Self::new(
            Arc::new(fetcher),
            Transformer::from_config(config),
        ))
    }

    pub async fn process(&self, job_id: JobId, url: &str) -> PageResult {
        match AssertUnwindSafe(self.run(job_id, url)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                engine_error!("job {} ({}) panicked: {}", job_id, url, reason);
                PageResult::failure(job_id, url, unexpected_fault(&reason))
            }
        }
    }

    async fn run(&self, job_id: JobId, url: &str) -> PageResult {
        let output = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                engine_warn!("job {} fetch failed ({}): {}", job_id, err.kind, err.message);
                return PageResult::failure(job_id, url, err);
            }
        };
        engine_debug!(
            "job {} fetched {} bytes from {}",
            job_id,
            output.bytes.len(),
            output.metadata.final_url
        );

        // Parsing is CPU-bound; keep it off the async workers.
        let transformer = self.transformer.clone();
        let source_url = url.to_string();
        let converted = tokio::task::spawn_blocking(move || {
            let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
            if decoded.lossy {
                engine_debug!(
                    "{} contained malformed {} sequences",
                    source_url,
                    decoded.encoding_label
                );
            }
            transformer.transform(&decoded.html, &source_url)
        })
        .await;

        match converted {
            Ok(content) => PageResult::success(job_id, url, content),
            Err(err) => {
                let reason = if err.is_panic() {
                    panic_message(err.into_panic().as_ref())
                } else {
                    describe_error(&err)
                };
                engine_error!("job {} conversion failed: {}", job_id, reason);
                PageResult::failure(job_id, url, unexpected_fault(&reason))
            }
        }
    }
}

fn unexpected_fault(reason: &str) -> FetchError {
    FetchError::new(
        FailureKind::ProcessingError,
        format!("unexpected error while processing page: {reason}"),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
