use std::collections::BTreeMap;

use crate::view_model::{AppViewModel, JobRowView};

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlStatus {
    Pending,
    Done,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobResultKind {
    Success,
    Failed(String),
}

/// Run-level message for the user, distinct from per-URL status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing left to dispatch after dropping blank lines.
    EmptyInput,
    /// Every URL failed; there is no bundle to offer.
    NoContent,
    Bundled { pages: usize, failed: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct JobRow {
    url: String,
    status: UrlStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: RunPhase,
    jobs: BTreeMap<JobId, JobRow>,
    total: usize,
    completed: usize,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            jobs: self
                .jobs
                .iter()
                .map(|(job_id, row)| JobRowView {
                    job_id: *job_id,
                    url: row.url.clone(),
                    status: row.status.clone(),
                })
                .collect(),
            completed: self.completed,
            total: self.total,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_run(&mut self, total: usize) {
        self.phase = RunPhase::Running;
        self.jobs.clear();
        self.total = total;
        self.completed = 0;
        self.notice = None;
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    pub(crate) fn mark_pending(&mut self, job_id: JobId, url: String) {
        if self.phase != RunPhase::Running || self.jobs.contains_key(&job_id) {
            return;
        }
        self.jobs.insert(
            job_id,
            JobRow {
                url,
                status: UrlStatus::Pending,
            },
        );
        self.dirty = true;
    }

    /// Moves a pending row to its terminal status. A second completion for
    /// the same job is ignored so the completed count stays exact.
    pub(crate) fn apply_done(&mut self, job_id: JobId, result: JobResultKind) {
        let Some(row) = self.jobs.get_mut(&job_id) else {
            return;
        };
        if row.status != UrlStatus::Pending {
            return;
        }
        row.status = match result {
            JobResultKind::Success => UrlStatus::Done,
            JobResultKind::Failed(detail) => UrlStatus::Failed(detail),
        };
        self.completed += 1;
        self.dirty = true;
    }

    pub(crate) fn finish(&mut self, success_count: usize, error_count: usize) {
        if self.phase != RunPhase::Running {
            return;
        }
        self.phase = RunPhase::Finished;
        self.notice = Some(if success_count == 0 {
            Notice::NoContent
        } else {
            Notice::Bundled {
                pages: success_count,
                failed: error_count,
            }
        });
        self.dirty = true;
    }
}
