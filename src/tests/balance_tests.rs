use crate::engine::aggregate_for_user;
use crate::models::{Expense, ParticipantShare};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn share(user_id: Uuid, lent: Decimal, owed: Decimal) -> ParticipantShare {
    ParticipantShare::new(user_id, lent, owed)
}

fn expense(group_id: Uuid, shares: Vec<ParticipantShare>) -> Expense {
    Expense {
        id: Uuid::new_v4(),
        group_id,
        description: "test expense".to_string(),
        category: None,
        shares,
        created_at: Utc::now(),
    }
}

#[test]
fn test_opposing_expenses_consolidate_into_one_signed_row() {
    let _ = env_logger::try_init();
    let u = Uuid::new_v4();
    let v = Uuid::new_v4();
    let group = Uuid::new_v4();

    // First expense: u owes v 40. Second: v owes u 15.
    let expenses = vec![
        expense(group, vec![share(u, dec!(0), dec!(40)), share(v, dec!(40), dec!(0))]),
        expense(group, vec![share(v, dec!(0), dec!(15)), share(u, dec!(15), dec!(0))]),
    ];

    let rows = aggregate_for_user(u, &expenses);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user, v);
    assert_eq!(rows[0].amount, dec!(-25));

    // The same pair seen from the other side flips the sign.
    let rows = aggregate_for_user(v, &expenses);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user, u);
    assert_eq!(rows[0].amount, dec!(25));
}

#[test]
fn test_fully_offsetting_expenses_drop_the_row() {
    let u = Uuid::new_v4();
    let v = Uuid::new_v4();
    let group = Uuid::new_v4();

    let expenses = vec![
        expense(group, vec![share(u, dec!(0), dec!(40)), share(v, dec!(40), dec!(0))]),
        expense(group, vec![share(v, dec!(0), dec!(40)), share(u, dec!(40), dec!(0))]),
    ];

    assert!(aggregate_for_user(u, &expenses).is_empty());
}

#[test]
fn test_expenses_not_touching_the_user_are_ignored() {
    let u = Uuid::new_v4();
    let v = Uuid::new_v4();
    let w = Uuid::new_v4();
    let group = Uuid::new_v4();

    let expenses = vec![expense(
        group,
        vec![share(v, dec!(30), dec!(0)), share(w, dec!(0), dec!(30))],
    )];

    assert!(aggregate_for_user(u, &expenses).is_empty());
}

#[test]
fn test_rows_are_ordered_by_counter_party_id() {
    let u = Uuid::new_v4();
    let group = Uuid::new_v4();
    let others: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

    let expenses: Vec<Expense> = others
        .iter()
        .map(|&other| {
            expense(
                group,
                vec![share(u, dec!(10), dec!(0)), share(other, dec!(0), dec!(10))],
            )
        })
        .collect();

    let rows = aggregate_for_user(u, &expenses);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.amount == dec!(10)));
    let ids: Vec<Uuid> = rows.iter().map(|row| row.user).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn test_fractional_totals_round_at_emission() {
    let u = Uuid::new_v4();
    let v = Uuid::new_v4();
    let group = Uuid::new_v4();

    let expenses = vec![expense(
        group,
        vec![share(u, dec!(33.333), dec!(0)), share(v, dec!(0), dec!(33.333))],
    )];

    let rows = aggregate_for_user(u, &expenses);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(33.33));
}

#[test]
fn test_no_expenses_yield_no_rows() {
    assert!(aggregate_for_user(Uuid::new_v4(), &[]).is_empty());
}
