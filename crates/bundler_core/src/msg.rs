#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Raw URL list as typed or pasted, one URL per line.
    InputSubmitted(String),
    /// Engine accepted a URL and has not finished it yet.
    UrlPending { job_id: crate::JobId, url: String },
    /// Engine reached a terminal state for a URL.
    UrlDone {
        job_id: crate::JobId,
        result: crate::JobResultKind,
    },
    /// Aggregation finished for the current run.
    RunFinished {
        success_count: usize,
        error_count: usize,
    },
}
