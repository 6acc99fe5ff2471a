// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::commands::statements::upsert_statement;
use billfold::models::{CreditCard, Profile};
use billfold::store::AppStore;

fn store_with_card() -> AppStore {
    let store = AppStore::in_memory();
    store
        .set_profiles(&[Profile {
            id: "p1".into(),
            name: "default".into(),
        }])
        .unwrap();
    store
        .set_cards(&[CreditCard {
            id: "c1".into(),
            profile_id: "p1".into(),
            bank_name: "Acme Bank".into(),
            card_name: "Acme Gold".into(),
            due_day: 15,
            cutoff_day: 28,
            color: "#4f6df5".into(),
        }])
        .unwrap();
    store
}

#[test]
fn setting_same_card_month_twice_updates_one_row() {
    let store = store_with_card();
    let first = upsert_statement(&store, "c1", "2024-05", "100".parse().unwrap(), None, None, None)
        .unwrap();
    let second = upsert_statement(&store, "c1", "2024-05", "250".parse().unwrap(), None, None, None)
        .unwrap();

    let statements = store.statements().unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(first.id, second.id);
    assert_eq!(statements[0].amount, "250".parse().unwrap());
}

#[test]
fn different_months_create_separate_rows() {
    let store = store_with_card();
    upsert_statement(&store, "c1", "2024-05", "100".parse().unwrap(), None, None, None).unwrap();
    upsert_statement(&store, "c1", "2024-06", "100".parse().unwrap(), None, None, None).unwrap();
    assert_eq!(store.statements().unwrap().len(), 2);
}

#[test]
fn update_keeps_optional_fields_unless_overridden() {
    let store = store_with_card();
    upsert_statement(
        &store,
        "c1",
        "2024-05",
        "100".parse().unwrap(),
        Some(true),
        Some("2024-06-05".into()),
        None,
    )
    .unwrap();
    // Amount-only update must not clear unbilled flag or due-date override.
    upsert_statement(&store, "c1", "2024-05", "120".parse().unwrap(), None, None, None).unwrap();

    let s = &store.statements().unwrap()[0];
    assert_eq!(s.amount, "120".parse().unwrap());
    assert_eq!(s.is_unbilled, Some(true));
    assert_eq!(s.custom_due_date.as_deref(), Some("2024-06-05"));
}

#[test]
fn mutations_bump_the_local_modified_cursor() {
    let store = store_with_card();
    assert!(store.local_modified_at().unwrap().is_none());
    upsert_statement(&store, "c1", "2024-05", "100".parse().unwrap(), None, None, None).unwrap();
    assert!(store.local_modified_at().unwrap().is_some());
}
