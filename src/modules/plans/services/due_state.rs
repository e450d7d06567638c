use chrono::NaiveDate;
use serde::Serialize;

use crate::core::dates::days_between;
use crate::modules::plans::models::PlanStatus;

/// Urgency tone for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Neutral,
    Warning,
    Error,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Neutral => "neutral",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified due-date state of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DueState {
    Completed,
    NoDueDate { flagged_overdue: bool },
    Overdue { days_late: i64 },
    DueToday,
    DueTomorrow,
    DueInDays { days: i64 },
}

impl DueState {
    /// Classify a plan's due situation as of `today`
    ///
    /// The status-overdue check runs before the numeric day diff: a plan
    /// explicitly flagged overdue reports overdue even when its stored
    /// due date lies in the future, so manual or background status
    /// correction wins over a stale date.
    pub fn classify(status: PlanStatus, due_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        if status == PlanStatus::Completed {
            return Self::Completed;
        }

        let Some(due) = due_date else {
            return Self::NoDueDate {
                flagged_overdue: status == PlanStatus::Overdue,
            };
        };

        let diff = days_between(today, due);
        if diff < 0 || status == PlanStatus::Overdue {
            return Self::Overdue {
                days_late: diff.abs(),
            };
        }

        match diff {
            0 => Self::DueToday,
            1 => Self::DueTomorrow,
            days => Self::DueInDays { days },
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Completed => "Completed".to_string(),
            Self::NoDueDate { .. } => "No due date".to_string(),
            Self::Overdue { days_late: 0 } => "Overdue".to_string(),
            Self::Overdue { days_late: 1 } => "Overdue by 1 day".to_string(),
            Self::Overdue { days_late } => format!("Overdue by {} days", days_late),
            Self::DueToday => "Due today".to_string(),
            Self::DueTomorrow => "Due tomorrow".to_string(),
            Self::DueInDays { days } => format!("Due in {} days", days),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Completed => Tone::Success,
            Self::NoDueDate { flagged_overdue } => {
                if *flagged_overdue {
                    Tone::Error
                } else {
                    Tone::Neutral
                }
            }
            Self::Overdue { .. } => Tone::Error,
            Self::DueToday | Self::DueTomorrow => Tone::Warning,
            Self::DueInDays { days } => {
                if *days <= 3 {
                    Tone::Warning
                } else {
                    Tone::Neutral
                }
            }
        }
    }
}
