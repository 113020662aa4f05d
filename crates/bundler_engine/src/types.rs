use std::fmt;

/// 1-based position of a URL in the submitted list.
pub type JobId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressState {
    Pending,
    Success,
    Error(String),
}

/// One observable transition of a single URL.
///
/// Every dispatched URL produces exactly two of these: a `Pending` event before
/// any work starts and one terminal event when its worker finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub job_id: JobId,
    pub url: String,
    pub state: ProgressState,
    pub completed: usize,
    pub total: usize,
}

impl ProgressEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self.state, ProgressState::Pending)
    }

    pub fn detail(&self) -> Option<&str> {
        match &self.state {
            ProgressState::Error(detail) => Some(detail),
            _ => None,
        }
    }

    /// Fraction of the run that has reached a terminal state, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(ProgressEvent),
    Finished(Vec<PageResult>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Success { content: String },
    Error { kind: FailureKind, message: String },
}

/// Uniform per-URL record produced by the page worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub job_id: JobId,
    pub url: String,
    pub outcome: PageOutcome,
}

impl PageResult {
    pub fn success(job_id: JobId, url: impl Into<String>, content: String) -> Self {
        Self {
            job_id,
            url: url.into(),
            outcome: PageOutcome::Success { content },
        }
    }

    pub fn failure(job_id: JobId, url: impl Into<String>, error: FetchError) -> Self {
        Self {
            job_id,
            url: url.into(),
            outcome: PageOutcome::Error {
                kind: error.kind,
                message: error.message,
            },
        }
    }

    pub fn status(&self) -> PageStatus {
        match self.outcome {
            PageOutcome::Success { .. } => PageStatus::Success,
            PageOutcome::Error { .. } => PageStatus::Error,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Success { content } => Some(content),
            PageOutcome::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Success { .. } => None,
            PageOutcome::Error { message, .. } => Some(message),
        }
    }

    pub(crate) fn progress_state(&self) -> ProgressState {
        match &self.outcome {
            PageOutcome::Success { .. } => ProgressState::Success,
            PageOutcome::Error { message, .. } => ProgressState::Error(message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    /// A fault inside the worker that none of the other kinds anticipate.
    ProcessingError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::ProcessingError => write!(f, "processing error"),
        }
    }
}

/// Run-level setup failures. Per-URL problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
