//! Contextual readout for a picked element: name, progress and value of work done.

use crate::model::{CostLookup, Schedule, StateKind};
use crate::picking::PickResult;
use chrono::NaiveDateTime;

/// Where the shown percentage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    /// Certified in the bill of quantities.
    Certified,
    /// Derived from the task's programme dates.
    Scheduled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickInfo {
    pub task_name: String,
    pub state: StateKind,
    /// Percent complete; `None` when neither cost nor schedule know the task.
    pub progress: Option<(f64, ProgressSource)>,
    /// Value of work done; only from a cost record with a non-zero amount.
    pub work_done: Option<f64>,
}

impl PickInfo {
    #[must_use]
    pub fn progress_label(&self) -> String {
        match self.progress {
            Some((percent, _)) => format!("{percent:.0}%"),
            None => "no data".to_string(),
        }
    }

    #[must_use]
    pub fn work_done_label(&self) -> String {
        self.work_done.map_or_else(|| "N/A".to_string(), format_aed)
    }
}

/// Builds the info panel for a pick.
///
/// A cost record wins: its previous plus current certified percent, and
/// quantity × rate × percent as money. Otherwise the schedule window gives a
/// date-derived percent at `as_of`. Otherwise there is no data.
pub fn resolve(
    pick: &PickResult,
    schedule: Option<&Schedule>,
    costs: &dyn CostLookup,
    as_of: NaiveDateTime,
) -> PickInfo {
    let task = schedule.and_then(|s| s.find(&pick.task_id));
    let task_name = task.map_or_else(|| format!("Task ID: {}", pick.task_id), |t| t.name.clone());

    let (progress, work_done) = if let Some(record) = costs.find_cost(&pick.task_id) {
        let work_done = record.work_done();
        (
            Some((record.progress_percent(), ProgressSource::Certified)),
            (work_done > 0.0).then_some(work_done),
        )
    } else if let Some(task) = task {
        let percent = match task.window() {
            Some((_, end)) if as_of >= end => 100.0,
            Some((start, end)) if as_of > start => {
                let duration = (end - start).num_milliseconds() as f64;
                let elapsed = (as_of - start).num_milliseconds() as f64;
                (elapsed / duration * 100.0).round()
            }
            _ => 0.0,
        };
        (Some((percent, ProgressSource::Scheduled)), None)
    } else {
        (None, None)
    };

    PickInfo {
        task_name,
        state: pick.state.kind(),
        progress,
        work_done,
    }
}

/// `AED 12,500.00`
#[must_use]
pub fn format_aed(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}AED {grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoqTable, ConstructionState, CostRecord, ScheduleTask, TaskId, parse_date};
    use pretty_assertions::assert_eq;

    fn picked(task: i32) -> PickResult {
        PickResult {
            task_id: TaskId::from(task),
            element: 0,
            state: ConstructionState::Active { progress: 0.5 },
        }
    }

    fn schedule() -> Schedule {
        Schedule::new(vec![ScheduleTask::new(20, "Raft", "2024-01-01", "2024-01-11")])
    }

    #[test]
    fn cost_record_wins_over_schedule() {
        let costs = BoqTable::new(vec![CostRecord {
            id: TaskId::from(20),
            prev_perc: 40.0,
            curr_perc: 20.0,
            qty: 120.0,
            rate: 850.0,
        }]);
        let info = resolve(&picked(20), Some(&schedule()), &costs, parse_date("2024-01-02").unwrap());

        assert_eq!(info.task_name, "Raft");
        assert_eq!(info.state, StateKind::Active);
        assert_eq!(info.progress, Some((60.0, ProgressSource::Certified)));
        assert_eq!(info.work_done_label(), "AED 61,200.00");
    }

    #[test]
    fn falls_back_to_schedule_dates() {
        let info = resolve(
            &picked(20),
            Some(&schedule()),
            &BoqTable::default(),
            parse_date("2024-01-04").unwrap(),
        );
        assert_eq!(info.progress, Some((30.0, ProgressSource::Scheduled)));
        assert_eq!(info.progress_label(), "30%");
        assert_eq!(info.work_done_label(), "N/A");
    }

    #[test]
    fn schedule_fallback_saturates_at_end() {
        let info = resolve(
            &picked(20),
            Some(&schedule()),
            &BoqTable::default(),
            parse_date("2025-01-01").unwrap(),
        );
        assert_eq!(info.progress_label(), "100%");
    }

    #[test]
    fn unknown_task_has_no_data() {
        let info = resolve(&picked(77), None, &BoqTable::default(), parse_date("2024-01-04").unwrap());
        assert_eq!(info.task_name, "Task ID: 77");
        assert_eq!(info.progress_label(), "no data");
        assert_eq!(info.work_done, None);
    }

    #[test]
    fn zero_amount_shows_not_available() {
        let costs = BoqTable::new(vec![CostRecord {
            id: TaskId::from(20),
            prev_perc: 10.0,
            curr_perc: 0.0,
            qty: 0.0,
            rate: 500.0,
        }]);
        let info = resolve(&picked(20), None, &costs, parse_date("2024-01-04").unwrap());
        assert_eq!(info.progress_label(), "10%");
        assert_eq!(info.work_done_label(), "N/A");
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_aed(0.5), "AED 0.50");
        assert_eq!(format_aed(999.999), "AED 1,000.00");
        assert_eq!(format_aed(1_234_567.8), "AED 1,234,567.80");
    }
}
