use super::TaskId;
use crate::error::LoadError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Bill-of-quantities line carrying certified progress for one task.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostRecord {
    pub id: TaskId,
    /// Percent certified in previous valuations.
    #[serde(default)]
    pub prev_perc: f64,
    /// Percent certified in the current valuation.
    #[serde(default)]
    pub curr_perc: f64,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub rate: f64,
}

impl CostRecord {
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.prev_perc + self.curr_perc
    }

    /// Contract amount times certified progress.
    #[must_use]
    pub fn work_done(&self) -> f64 {
        self.qty * self.rate * (self.progress_percent() / 100.0)
    }
}

/// Read-only cost lookup by task id.
pub trait CostLookup {
    fn find_cost(&self, task_id: &TaskId) -> Option<CostRecord>;
}

/// In-memory BOQ loaded from the site data export.
#[derive(Debug, Clone, Default)]
pub struct BoqTable {
    records: HashMap<TaskId, CostRecord>,
}

impl BoqTable {
    /// Builds the table; the first record wins when ids repeat.
    #[must_use]
    pub fn new(records: Vec<CostRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            by_id.entry(record.id.clone()).or_insert(record);
        }
        Self { records: by_id }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<CostRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path_ref = path.as_ref();
        let content = std::fs::read_to_string(path_ref).map_err(|source| LoadError::FileRead {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| LoadError::Json {
            path: path_ref.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CostLookup for BoqTable {
    fn find_cost(&self, task_id: &TaskId) -> Option<CostRecord> {
        self.records.get(task_id).cloned()
    }
}
