use serde::{Deserialize, Serialize};

use crate::model::ids::{ModuleId, RawId};
use crate::progress::Progress;

/// A percentage as it arrives from the overview source: number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPercent {
    Number(i64),
    Text(String),
}

impl RawPercent {
    /// Parses the raw value as an integer percent; anything unparseable is
    /// `None` and callers fall back to zero.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawPercent::Number(n) => Some(*n),
            RawPercent::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

/// One learner-touched module in the progress overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    #[serde(rename = "id")]
    module_id: RawId,
    progress: RawPercent,
}

impl ProgressEntry {
    #[must_use]
    pub fn new(module_id: RawId, progress: RawPercent) -> Self {
        Self {
            module_id,
            progress,
        }
    }

    #[must_use]
    pub fn module_id(&self) -> &RawId {
        &self.module_id
    }

    /// The entry's percentage, normalized into range; unparseable is zero.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
            .as_int()
            .map_or(Progress::ZERO, Progress::clamped)
    }
}

/// The learner's per-module progress collection, fetched once per page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressOverview {
    #[serde(default)]
    modules: Vec<ProgressEntry>,
}

impl ProgressOverview {
    #[must_use]
    pub fn new(modules: Vec<ProgressEntry>) -> Self {
        Self { modules }
    }

    #[must_use]
    pub fn entries(&self) -> &[ProgressEntry] {
        &self.modules
    }

    /// Resolves the stored progress for a module.
    ///
    /// Ids match under loose equality since the overview and module sources
    /// are independent backends. Absence of an entry is a valid default, not
    /// an error: untouched modules resolve to zero. First match wins.
    #[must_use]
    pub fn progress_for(&self, module_id: ModuleId) -> Progress {
        self.modules
            .iter()
            .find(|entry| entry.module_id.matches(module_id))
            .map_or(Progress::ZERO, ProgressEntry::progress)
    }
}
