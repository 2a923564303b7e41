//! Tests for the Roster model
//!
//! CRITICAL: All money values are i64

use split_ledger_core::ids::{SeededIdGenerator, SequentialIdGenerator};
use split_ledger_core::models::roster::MAX_ID_ATTEMPTS;
use split_ledger_core::{LedgerError, PersonId, PersonRecord, Roster, ValidationError};

fn roster_with(people: &[(&str, &str, i64)]) -> Roster {
    let mut roster = Roster::new();
    for (id, name, balance) in people {
        roster
            .insert_seed(PersonRecord::with_balance(
                PersonId::from(*id),
                *name,
                "img",
                *balance,
            ))
            .unwrap();
    }
    roster
}

#[test]
fn test_add_person_starts_settled() {
    let mut ids = SequentialIdGenerator::new("friend_");
    let mut roster = Roster::new();

    let person = roster.add_person("X", "img", &mut ids).unwrap();

    assert_eq!(person.balance(), 0);
    assert_eq!(person.id().as_str(), "friend_00000001");
    assert_eq!(roster.get(person.id()), Some(&person));
}

#[test]
fn test_insertion_order_preserved() {
    let mut ids = SequentialIdGenerator::new("p");
    let mut roster = Roster::new();

    for name in ["Clark", "Sarah", "Anthony"] {
        roster.add_person(name, "img", &mut ids).unwrap();
    }

    let names: Vec<&str> = roster.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Clark", "Sarah", "Anthony"]);
}

#[test]
fn test_balance_delta_keeps_position() {
    let mut roster = roster_with(&[("1", "Clark", -7), ("2", "Sarah", 20), ("3", "Anthony", 0)]);

    let updated = roster.apply_balance_delta(&PersonId::from("2"), -25).unwrap();

    assert_eq!(updated.balance(), -5);
    assert_eq!(roster.position(&PersonId::from("2")), Some(1));
    assert_eq!(roster.people()[1].balance(), -5);
    assert_eq!(roster.total_balance(), -12);
}

#[test]
fn test_balance_delta_unknown_id() {
    let mut roster = roster_with(&[("1", "Clark", -7)]);

    let err = roster
        .apply_balance_delta(&PersonId::from("404"), 10)
        .unwrap_err();

    assert_eq!(err, LedgerError::NotFound(PersonId::from("404")));
    assert_eq!(roster.total_balance(), -7);
}

#[test]
fn test_balance_overflow_rejected() {
    let mut roster = roster_with(&[("1", "Whale", i64::MAX - 1)]);
    let before = roster.clone();

    let err = roster
        .apply_balance_delta(&PersonId::from("1"), 2)
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::Validation(ValidationError::BalanceOverflow {
            id: PersonId::from("1")
        })
    );
    assert_eq!(roster, before);
}

#[test]
fn test_remove_person() {
    let mut roster = roster_with(&[("1", "Clark", -7), ("2", "Sarah", 20)]);

    let removed = roster.remove(&PersonId::from("1")).unwrap();

    assert_eq!(removed.name(), "Clark");
    assert_eq!(roster.len(), 1);
    assert!(!roster.contains(&PersonId::from("1")));
    assert_eq!(
        roster.remove(&PersonId::from("1")),
        Err(LedgerError::NotFound(PersonId::from("1")))
    );
}

#[test]
fn test_removed_id_never_reissued() {
    let mut roster = Roster::new();
    let mut ids = SeededIdGenerator::new(7);

    let first = roster.add_person("A", "img", &mut ids).unwrap();
    roster.remove(first.id()).unwrap();

    // A generator replaying the same seed offers the removed id first
    let mut replay = SeededIdGenerator::new(7);
    let second = roster.add_person("B", "img", &mut replay).unwrap();

    assert_ne!(first.id(), second.id());
    assert!(roster.was_issued(first.id()));
}

#[test]
fn test_clear_keeps_issued_ids() {
    let mut roster = roster_with(&[("1", "Clark", -7), ("2", "Sarah", 20)]);

    roster.clear();

    assert!(roster.is_empty());
    assert!(roster.was_issued(&PersonId::from("1")));
}

#[test]
fn test_roster_serde_restores_issued_ids() {
    let roster = roster_with(&[("1", "Clark", -7)]);

    let json = serde_json::to_string(&roster).unwrap();
    let restored: Roster = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, roster);
    assert!(restored.was_issued(&PersonId::from("1")));
}

#[test]
fn test_roster_serde_keeps_removed_ids_reserved() {
    let mut roster = Roster::new();
    let mut stuck = || PersonId::from("a");

    let first = roster.add_person("A", "img", &mut stuck).unwrap();
    roster.remove(first.id()).unwrap();
    assert!(roster.add_person("B", "img", &mut stuck).is_err());

    let json = serde_json::to_string(&roster).unwrap();
    let mut restored: Roster = serde_json::from_str(&json).unwrap();

    assert!(restored.is_empty());
    assert!(restored.was_issued(first.id()));
    assert_eq!(
        restored.add_person("B", "img", &mut stuck).unwrap_err(),
        LedgerError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS
        }
    );
}

#[test]
fn test_roster_without_issued_field_reserves_members() {
    let json = r#"{"people":[{"id":"1","name":"Clark","avatar_ref":"img","balance":-7}]}"#;

    let restored: Roster = serde_json::from_str(json).unwrap();

    assert_eq!(restored.len(), 1);
    assert!(restored.was_issued(&PersonId::from("1")));
}
