//! Summary of a restore run

use gspump_rest::PushOutcome;
use serde::{Deserialize, Serialize};

use crate::NodeKind;

/// One pushed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRecord {
    pub kind: NodeKind,
    /// Object path relative to the admin URL
    pub target: String,
    #[serde(flatten)]
    pub outcome: PushOutcome,
}

/// A subtree abandoned after a structural error (keep-going mode only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSubtree {
    pub path: String,
    pub error: String,
}

/// Everything a run did, in push order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpReport {
    pub pushed: Vec<PushRecord>,
    pub skipped: Vec<SkippedSubtree>,
}

impl PumpReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: NodeKind, target: String, outcome: PushOutcome) {
        self.pushed.push(PushRecord {
            kind,
            target,
            outcome,
        });
    }

    pub fn skip(&mut self, path: impl Into<String>, error: impl ToString) {
        self.skipped.push(SkippedSubtree {
            path: path.into(),
            error: error.to_string(),
        });
    }

    pub fn created(&self) -> usize {
        self.count(|outcome| matches!(outcome, PushOutcome::Created))
    }

    pub fn updated(&self) -> usize {
        self.count(|outcome| matches!(outcome, PushOutcome::Updated))
    }

    pub fn fallback_updated(&self) -> usize {
        self.count(|outcome| matches!(outcome, PushOutcome::FallbackUpdated))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| !outcome.is_success())
    }

    /// No push failed and no subtree was skipped.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0 && self.skipped.is_empty()
    }

    /// Records of failed pushes.
    pub fn failures(&self) -> impl Iterator<Item = &PushRecord> {
        self.pushed.iter().filter(|record| !record.outcome.is_success())
    }

    fn count(&self, predicate: impl Fn(&PushOutcome) -> bool) -> usize {
        self.pushed
            .iter()
            .filter(|record| predicate(&record.outcome))
            .count()
    }
}
