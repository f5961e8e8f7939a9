use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{GtdError, Result};

/// Format used for due dates on disk and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub due: NaiveDate,
}

impl Task {
    /// A pending task due today.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            due: today(),
        }
    }

    pub fn with_due(description: impl Into<String>, due: NaiveDate) -> Self {
        Self {
            description: description.into(),
            done: false,
            due,
        }
    }

    pub fn tick(&mut self) {
        self.done = true;
    }

    pub fn untick(&mut self) {
        self.done = false;
    }
}

pub fn is_pending(task: &Task) -> bool {
    !task.done
}

pub fn is_due_today(task: &Task) -> bool {
    is_due_on(task, today())
}

pub fn is_due_on(task: &Task, date: NaiveDate) -> bool {
    task.due == date
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_due(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| GtdError::InvalidDate(raw.to_string()))
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' due {}",
            self.description,
            self.due.format("%-d %B %Y")
        )?;
        if self.done {
            write!(f, " (DONE)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_task_is_pending_and_due_today() {
        let task = Task::new("Hello");
        assert!(!task.done);
        assert_eq!(task.due, today());
        assert!(is_pending(&task));
        assert!(is_due_today(&task));
    }

    #[test]
    fn tick_is_idempotent_and_untick_restores() {
        let mut task = Task::new("Hello");
        task.tick();
        assert!(task.done);
        task.tick();
        assert!(task.done);
        task.untick();
        assert!(!task.done);
        task.untick();
        assert!(!task.done);
    }

    #[test]
    fn due_today_ignores_time_of_day() {
        let day = date(2024, 3, 9);
        let task = Task::with_due("x", day);

        let early = day.and_hms_opt(0, 0, 1).unwrap();
        let late = day.and_hms_opt(23, 59, 59).unwrap();
        assert!(is_due_on(&task, early.date()));
        assert!(is_due_on(&task, late.date()));
    }

    #[test]
    fn due_on_compares_every_date_component() {
        let task = Task::with_due("x", date(2024, 3, 9));
        assert!(!is_due_on(&task, date(2024, 3, 10)));
        assert!(!is_due_on(&task, date(2024, 4, 9)));
        assert!(!is_due_on(&task, date(2023, 3, 9)));
    }

    #[test]
    fn tomorrow_is_not_due_today() {
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        assert!(!is_due_today(&Task::with_due("later", tomorrow)));
    }

    #[test]
    fn display_marks_done_tasks() {
        let mut task = Task::with_due("Buy milk", date(2024, 1, 1));
        assert_eq!(task.to_string(), "'Buy milk' due 1 January 2024");
        task.tick();
        assert_eq!(task.to_string(), "'Buy milk' due 1 January 2024 (DONE)");
    }

    #[test]
    fn parse_due_accepts_iso_dates_only() {
        assert_eq!(parse_due("2024-01-01").unwrap(), date(2024, 1, 1));
        assert_eq!(parse_due(" 2024-12-31\n").unwrap(), date(2024, 12, 31));
        assert!(matches!(parse_due("01/01/2024"), Err(GtdError::InvalidDate(_))));
        assert!(matches!(parse_due("2024-02-30"), Err(GtdError::InvalidDate(_))));
        assert!(matches!(parse_due(""), Err(GtdError::InvalidDate(_))));
    }
}
