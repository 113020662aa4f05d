use serde::Serialize;

use crate::PageResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub success_count: usize,
    pub error_count: usize,
}

/// Concatenated Markdown of every successful page in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle(String);

impl Bundle {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutcome {
    Ready(Bundle),
    /// Not a single page succeeded; there is nothing to offer for download.
    NoContent,
}

impl BundleOutcome {
    pub fn bundle(&self) -> Option<&Bundle> {
        match self {
            BundleOutcome::Ready(bundle) => Some(bundle),
            BundleOutcome::NoContent => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub outcome: BundleOutcome,
    pub summary: RunSummary,
}

/// Joins successful page blocks in the order given, which for a dispatcher
/// run is completion order.
pub fn aggregate(results: &[PageResult]) -> Aggregation {
    let mut buffer = String::new();
    let mut summary = RunSummary {
        total: results.len(),
        ..RunSummary::default()
    };

    for result in results {
        match result.content() {
            Some(content) => {
                buffer.push_str(content);
                summary.success_count += 1;
            }
            None => summary.error_count += 1,
        }
    }

    let outcome = if summary.success_count == 0 {
        BundleOutcome::NoContent
    } else {
        BundleOutcome::Ready(Bundle(buffer))
    };
    Aggregation { outcome, summary }
}
