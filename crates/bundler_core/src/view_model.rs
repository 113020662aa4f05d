use crate::{JobId, Notice, RunPhase, UrlStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: RunPhase,
    /// Rows in job order, which is input order.
    pub jobs: Vec<JobRowView>,
    pub completed: usize,
    pub total: usize,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn progress_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub url: String,
    pub status: UrlStatus,
}
