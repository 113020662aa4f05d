use std::sync::mpsc;

use engine_logging::engine_info;
use futures_util::stream::{self, StreamExt};

use crate::config::BundlerConfig;
use crate::worker::PageWorker;
use crate::{EngineError, EngineEvent, JobId, PageResult, PageStatus, ProgressEvent, ProgressState};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.tx.send(EngineEvent::Progress(event));
    }
}

/// Runs one `PageWorker` per URL with at most `concurrency_limit` in flight.
pub struct Dispatcher {
    worker: PageWorker,
    concurrency_limit: usize,
}

impl Dispatcher {
    pub fn new(worker: PageWorker, concurrency_limit: usize) -> Self {
        Self {
            worker,
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    pub fn from_config(config: &BundlerConfig) -> Result<Self, EngineError> {
        Ok(Self::new(
            PageWorker::from_config(config)?,
            config.effective_concurrency(),
        ))
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Emits a `Pending` event for every URL, then one terminal event per URL
    /// as workers finish. Returns only once every URL has a result; results
    /// are in completion order, not input order.
    pub async fn run_all(&self, urls: Vec<String>, sink: &dyn ProgressSink) -> Vec<PageResult> {
        let total = urls.len();
        engine_info!(
            "dispatching {} url(s) with concurrency limit {}",
            total,
            self.concurrency_limit
        );

        let jobs: Vec<(JobId, String)> = urls
            .into_iter()
            .enumerate()
            .map(|(index, url)| (index as JobId + 1, url))
            .collect();

        for (job_id, url) in &jobs {
            sink.emit(ProgressEvent {
                job_id: *job_id,
                url: url.clone(),
                state: ProgressState::Pending,
                completed: 0,
                total,
            });
        }

        // Completions are drained by this task alone, so the counter and the
        // result list need no further synchronisation.
        let mut completions = stream::iter(jobs)
            .map(|(job_id, url)| async move { self.worker.process(job_id, &url).await })
            .buffer_unordered(self.concurrency_limit);

        let mut results = Vec::with_capacity(total);
        let mut completed = 0;
        while let Some(result) = completions.next().await {
            completed += 1;
            sink.emit(ProgressEvent {
                job_id: result.job_id,
                url: result.url.clone(),
                state: result.progress_state(),
                completed,
                total,
            });
            results.push(result);
        }

        let successes = results
            .iter()
            .filter(|r| r.status() == PageStatus::Success)
            .count();
        engine_info!(
            "run finished: {} succeeded, {} failed",
            successes,
            total - successes
        );
        results
    }
}
