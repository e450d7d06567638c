// Redistribution policy: clean sessions regenerate on shape changes,
// dirty sessions wait for an explicit redistribute, paid state carries
// over by position.

use nvjmios::plans::services::schedule::ScheduleDraft;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn amounts(draft: &ScheduleDraft) -> Vec<Decimal> {
    draft.installments().iter().map(|i| i.amount).collect()
}

#[test]
fn clean_session_regenerates_on_total_change() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(300.00), 3);
    assert_eq!(amounts(&draft), vec![dec!(100), dec!(100), dec!(100)]);

    assert!(draft.apply_shape_change(dec!(600.00), 3));
    assert_eq!(amounts(&draft), vec![dec!(200), dec!(200), dec!(200)]);
}

#[test]
fn dirty_session_ignores_shape_changes() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(300.00), 3);
    draft.edit_amount(1, dec!(150.00)).unwrap();

    // Total change alone must not alter hand-edited amounts
    assert!(!draft.apply_shape_change(dec!(900.00), 3));
    assert_eq!(amounts(&draft), vec![dec!(150), dec!(100), dec!(100)]);

    // Count change is ignored too
    assert!(!draft.apply_shape_change(dec!(900.00), 4));
    assert_eq!(draft.installments().len(), 3);
}

#[test]
fn explicit_redistribute_resets_even_split_and_clears_dirty() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(300.00), 3);
    draft.edit_amount(2, dec!(10.00)).unwrap();
    assert!(draft.is_dirty());

    draft.redistribute(dec!(900.00), 3);
    assert!(!draft.is_dirty());
    assert_eq!(amounts(&draft), vec![dec!(300), dec!(300), dec!(300)]);

    // Subsequent shape changes auto-apply again
    assert!(draft.apply_shape_change(dec!(90.00), 3));
    assert_eq!(amounts(&draft), vec![dec!(30), dec!(30), dec!(30)]);
}

#[test]
fn paid_state_and_due_dates_carry_over_by_position() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(300.00), 3);
    draft.set_paid(1, true).unwrap();

    draft.apply_shape_change(dec!(400.00), 4);

    let installments = draft.installments();
    assert_eq!(installments.len(), 4);
    assert!(installments[0].is_paid);
    assert!(installments[0].paid_at.is_some());
    assert!(!installments[1].is_paid);
    assert!(!installments[3].is_paid);

    // Amounts still reflect the new even split
    assert_eq!(amounts(&draft), vec![dec!(100), dec!(100), dec!(100), dec!(100)]);
}

#[test]
fn count_reduction_below_paid_positions_truncates() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(400.00), 4);
    draft.set_paid(3, true).unwrap();
    draft.set_paid(4, true).unwrap();

    draft.apply_shape_change(dec!(200.00), 2);

    // Positions 3 and 4 are gone, paid history dropped with them
    assert_eq!(draft.installments().len(), 2);
    assert!(draft.installments().iter().all(|i| !i.is_paid));
}

#[test]
fn redistribute_to_invalid_shape_clears_schedule() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(300.00), 3);

    draft.redistribute(dec!(0.00), 3);
    assert!(draft.installments().is_empty());
}

#[test]
fn drift_warning_only_after_manual_edits() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(100.00), 3);
    assert_eq!(draft.drift_from(dec!(100.00)), None);

    draft.edit_amount(3, dec!(30.00)).unwrap();
    // 33.34 + 33.33 + 30.00 = 96.67, drifting -3.33 from the total
    assert_eq!(draft.drift_from(dec!(100.00)), Some(dec!(-3.33)));

    // Sub-tolerance drift stays silent
    draft.edit_amount(3, dec!(33.29)).unwrap();
    assert_eq!(draft.drift_from(dec!(100.00)), None);
}

#[test]
fn set_paid_requires_existing_sequence() {
    let mut draft = ScheduleDraft::new("plan-1");
    draft.apply_shape_change(dec!(100.00), 2);

    assert!(draft.set_paid(5, true).is_err());
    assert!(draft.edit_amount(0, dec!(1.00)).is_err());
}
