// Due-state classification boundaries and the status-overdue override.

use chrono::NaiveDate;
use nvjmios::plans::models::PlanStatus;
use nvjmios::plans::services::due_state::{DueState, Tone};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn boundary_classification_around_today() {
    let today = ymd(2025, 6, 10);

    assert_eq!(
        DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 10)), today),
        DueState::DueToday
    );
    assert_eq!(
        DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 9)), today),
        DueState::Overdue { days_late: 1 }
    );
    assert_eq!(
        DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 11)), today),
        DueState::DueTomorrow
    );
    assert_eq!(
        DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 13)), today),
        DueState::DueInDays { days: 3 }
    );
    assert_eq!(
        DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 20)), today),
        DueState::DueInDays { days: 10 }
    );
}

#[test]
fn tones_follow_urgency() {
    let today = ymd(2025, 6, 10);

    let due_today = DueState::classify(PlanStatus::Active, Some(today), today);
    assert_eq!(due_today.tone(), Tone::Warning);

    let in_three = DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 13)), today);
    assert_eq!(in_three.tone(), Tone::Warning);

    let in_ten = DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 20)), today);
    assert_eq!(in_ten.tone(), Tone::Neutral);

    let late = DueState::classify(PlanStatus::Active, Some(ymd(2025, 6, 1)), today);
    assert_eq!(late.tone(), Tone::Error);
}

#[test]
fn deep_overdue_counts_days() {
    let today = ymd(2025, 6, 10);
    assert_eq!(
        DueState::classify(PlanStatus::Active, Some(ymd(2025, 5, 31)), today),
        DueState::Overdue { days_late: 10 }
    );
}

#[test]
fn completed_status_short_circuits() {
    let today = ymd(2025, 6, 10);

    // Even a long-past due date reports completed
    let state = DueState::classify(PlanStatus::Completed, Some(ymd(2024, 1, 1)), today);
    assert_eq!(state, DueState::Completed);
    assert_eq!(state.tone(), Tone::Success);

    let no_date = DueState::classify(PlanStatus::Completed, None, today);
    assert_eq!(no_date, DueState::Completed);
}

#[test]
fn missing_due_date_tone_depends_on_status() {
    let today = ymd(2025, 6, 10);

    let plain = DueState::classify(PlanStatus::Active, None, today);
    assert_eq!(plain, DueState::NoDueDate { flagged_overdue: false });
    assert_eq!(plain.tone(), Tone::Neutral);

    let flagged = DueState::classify(PlanStatus::Overdue, None, today);
    assert_eq!(flagged, DueState::NoDueDate { flagged_overdue: true });
    assert_eq!(flagged.tone(), Tone::Error);
}

#[test]
fn overdue_status_overrides_future_due_date() {
    let today = ymd(2025, 6, 10);

    // Numerically two days ahead, but the stored status wins
    let state = DueState::classify(PlanStatus::Overdue, Some(ymd(2025, 6, 12)), today);
    assert!(matches!(state, DueState::Overdue { .. }));
    assert_eq!(state.tone(), Tone::Error);

    // Due today with overdue status still reports overdue
    let state = DueState::classify(PlanStatus::Overdue, Some(today), today);
    assert_eq!(state, DueState::Overdue { days_late: 0 });
}

#[test]
fn labels_read_naturally() {
    assert_eq!(DueState::Completed.label(), "Completed");
    assert_eq!(DueState::DueToday.label(), "Due today");
    assert_eq!(DueState::DueTomorrow.label(), "Due tomorrow");
    assert_eq!(DueState::DueInDays { days: 5 }.label(), "Due in 5 days");
    assert_eq!(DueState::Overdue { days_late: 1 }.label(), "Overdue by 1 day");
    assert_eq!(DueState::Overdue { days_late: 3 }.label(), "Overdue by 3 days");
    assert_eq!(
        DueState::NoDueDate { flagged_overdue: false }.label(),
        "No due date"
    );
}
