//! Month-over-month task counts for workspace and project dashboards.

use super::{Task, TaskDomainError};
use crate::member::domain::MemberId;
use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};

/// Tasks counted this month and the change against last month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCount {
    /// Tasks counted for the current calendar month.
    pub count: usize,
    /// `count` minus the previous month's count.
    pub difference: i64,
}

impl MetricCount {
    fn new(current: usize, previous: usize) -> Self {
        let current_signed = i64::try_from(current).unwrap_or(i64::MAX);
        let previous_signed = i64::try_from(previous).unwrap_or(i64::MAX);
        Self {
            count: current,
            difference: current_signed.saturating_sub(previous_signed),
        }
    }
}

/// Dashboard counters over tasks created in the current calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnalytics {
    /// All tasks.
    pub task_count: MetricCount,
    /// Tasks assigned to the viewing member.
    pub assigned_task_count: MetricCount,
    /// Tasks not yet done.
    pub incomplete_task_count: MetricCount,
    /// Tasks done.
    pub completed_task_count: MetricCount,
    /// Tasks not done whose due date has passed.
    pub overdue_task_count: MetricCount,
}

impl TaskAnalytics {
    /// Computes the counters for `viewer` at instant `now`.
    ///
    /// Months are calendar months in UTC and are attributed by task creation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CalendarOutOfRange`] when `now` is too close
    /// to chrono's limits to derive the surrounding months.
    pub fn compute(
        tasks: &[Task],
        viewer: MemberId,
        now: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        let window = MonthWindow::around(now).ok_or(TaskDomainError::CalendarOutOfRange(now))?;
        let this_month: Vec<&Task> = tasks
            .iter()
            .filter(|task| window.is_current(task.created_at()))
            .collect();
        let last_month: Vec<&Task> = tasks
            .iter()
            .filter(|task| window.is_previous(task.created_at()))
            .collect();

        let metric = |predicate: &dyn Fn(&Task) -> bool| {
            MetricCount::new(
                this_month.iter().filter(|task| predicate(task)).count(),
                last_month.iter().filter(|task| predicate(task)).count(),
            )
        };

        Ok(Self {
            task_count: metric(&|_| true),
            assigned_task_count: metric(&|task| task.assignee_id() == viewer),
            incomplete_task_count: metric(&|task| !task.status().is_complete()),
            completed_task_count: metric(&|task| task.status().is_complete()),
            overdue_task_count: metric(&|task| {
                !task.status().is_complete() && task.due_date() < now
            }),
        })
    }
}

struct MonthWindow {
    previous_start: DateTime<Utc>,
    current_start: DateTime<Utc>,
    next_start: DateTime<Utc>,
}

impl MonthWindow {
    fn around(now: DateTime<Utc>) -> Option<Self> {
        let current_start = now
            .date_naive()
            .with_day(1)?
            .and_hms_opt(0, 0, 0)?
            .and_utc();
        Some(Self {
            previous_start: current_start.checked_sub_months(Months::new(1))?,
            current_start,
            next_start: current_start.checked_add_months(Months::new(1))?,
        })
    }

    fn is_current(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.current_start && instant < self.next_start
    }

    fn is_previous(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.previous_start && instant < self.current_start
    }
}
