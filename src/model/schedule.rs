use super::date::parse_date;
use crate::error::LoadError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Key shared between the schedule, the cost records and the geometry catalog.
///
/// Schedules written by hand use numbers, exported ones use strings; both
/// normalize to the same text key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u32> for TaskId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for TaskId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s.trim().to_string()),
            RawId::Int(n) => Self(n.to_string()),
        })
    }
}

/// One row of the external construction programme.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleTask {
    pub id: TaskId,
    #[serde(default)]
    pub name: String,
    /// `None` when missing or unparseable; such a task never leaves ghost.
    #[serde(default, deserialize_with = "lenient_date")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end: Option<NaiveDateTime>,
}

impl ScheduleTask {
    #[must_use]
    pub fn new(id: impl Into<TaskId>, name: &str, start: &str, end: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            start: parse_date(start),
            end: parse_date(end),
        }
    }

    /// Start and end, when both are known.
    #[must_use]
    pub fn window(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start?, self.end?))
    }
}

fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// The task list supplied by the scheduling collaborator.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    tasks: Vec<ScheduleTask>,
}

impl Schedule {
    #[must_use]
    pub fn new(tasks: Vec<ScheduleTask>) -> Self {
        Self { tasks }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a schedule JSON array from disk.
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
    pub fn tasks(&self) -> &[ScheduleTask] {
        &self.tasks
    }

    /// First task with this id, matching the programme's own lookup order.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&ScheduleTask> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Earliest start and latest end across all dated tasks; the date slider's range.
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.tasks.iter().filter_map(|t| t.start).min()?;
        let end = self.tasks.iter().filter_map(|t| t.end).max()?;
        Some((start, end.max(start)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"[
        {"id": 6, "name": "Shoring Works", "start": "2024-01-01", "end": "2024-01-10"},
        {"id": "20", "name": "Raft", "start": "2024-02-01", "end": "2024-02-20"},
        {"id": 99, "name": "Undated", "start": "", "end": null}
    ]"#;

    #[test]
    fn numeric_and_string_ids_normalize() {
        let schedule = Schedule::from_json(SAMPLE).unwrap();
        assert_eq!(schedule.find(&TaskId::from(6)).unwrap().name, "Shoring Works");
        assert_eq!(schedule.find(&TaskId::from("20")).unwrap().name, "Raft");
        assert!(schedule.find(&TaskId::from(7)).is_none());
    }

    #[test]
    fn undated_task_has_no_window() {
        let schedule = Schedule::from_json(SAMPLE).unwrap();
        let undated = schedule.find(&TaskId::from(99)).unwrap();
        assert_eq!(undated.window(), None);
    }

    #[test]
    fn span_covers_dated_tasks() {
        let schedule = Schedule::from_json(SAMPLE).unwrap();
        let (start, end) = schedule.span().unwrap();
        assert_eq!(Some(start), parse_date("2024-01-01"));
        assert_eq!(Some(end), parse_date("2024-02-20"));
        assert_eq!(Schedule::default().span(), None);
    }

    #[test]
    fn find_returns_first_duplicate() {
        let schedule = Schedule::new(vec![
            ScheduleTask::new(1, "First", "2024-01-01", "2024-01-02"),
            ScheduleTask::new(1, "Second", "2024-01-01", "2024-01-02"),
        ]);
        assert_eq!(schedule.find(&TaskId::from(1)).unwrap().name, "First");
    }
}
