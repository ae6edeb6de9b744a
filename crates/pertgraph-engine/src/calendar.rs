use chrono::{DateTime, Duration, Utc};
use pertgraph_core::{TaskId, TimeUnit};
use serde::Serialize;

use crate::ProjectSchedule;

/// One task anchored to wall-clock time.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub task_id: TaskId,
    pub name: String,
    pub earliest_start: DateTime<Utc>,
    pub earliest_finish: DateTime<Utc>,
    pub latest_start: DateTime<Utc>,
    pub latest_finish: DateTime<Utc>,
    pub critical: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarSchedule {
    pub project_start: DateTime<Utc>,
    pub project_finish: DateTime<Utc>,
    pub time_unit: TimeUnit,
    pub entries: Vec<CalendarEntry>,
}

/// Map a tick-based schedule onto the calendar: tick 0 becomes
/// `project_start` and each tick advances by one `unit`.
pub fn anchor(
    schedule: &ProjectSchedule,
    project_start: DateTime<Utc>,
    unit: TimeUnit,
) -> CalendarSchedule {
    let at = |ticks: i64| project_start + offset(unit, ticks);

    let entries = schedule
        .tasks()
        .iter()
        .map(|t| CalendarEntry {
            task_id: t.task_id,
            name: t.name.clone(),
            earliest_start: at(t.earliest_start),
            earliest_finish: at(t.earliest_finish),
            latest_start: at(t.latest_start),
            latest_finish: at(t.latest_finish),
            critical: t.critical,
        })
        .collect();

    CalendarSchedule {
        project_start,
        project_finish: at(schedule.horizon),
        time_unit: unit,
        entries,
    }
}

fn offset(unit: TimeUnit, ticks: i64) -> Duration {
    match unit {
        TimeUnit::Minutes => Duration::minutes(ticks),
        TimeUnit::Hours => Duration::hours(ticks),
        TimeUnit::Days => Duration::days(ticks),
    }
}
