use serde::Serialize;
use std::fmt;

/// Derived construction state of a task's parts at a given date.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ConstructionState {
    /// Not started, or the task is not in the schedule.
    #[default]
    Ghost,
    /// Under construction; `progress` is within `[0, 1]`.
    Active { progress: f64 },
    Done,
}

impl ConstructionState {
    #[must_use]
    pub const fn kind(self) -> StateKind {
        match self {
            Self::Ghost => StateKind::Ghost,
            Self::Active { .. } => StateKind::Active,
            Self::Done => StateKind::Done,
        }
    }

    /// Completion fraction: 0 for ghost, 1 for done.
    #[must_use]
    pub const fn progress(self) -> f64 {
        match self {
            Self::Ghost => 0.0,
            Self::Active { progress } => progress,
            Self::Done => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Ghost,
    Active,
    Done,
}

impl StateKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ghost => "ghost",
            Self::Active => "active",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
