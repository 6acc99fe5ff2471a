// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::error::SyncError;
use billfold::models::{CreditCard, Profile, Statement};
use billfold::store::AppStore;
use billfold::sync::{export_encrypted, export_plain, import_from_string};

fn seeded_store() -> AppStore {
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
        .set_statements(&[Statement {
            id: "s1".into(),
            card_id: "c1".into(),
            month_str: "2024-05".into(),
            amount: "1200.50".parse().unwrap(),
            is_paid: false,
            is_unbilled: None,
            custom_due_date: None,
            adjusted_amount: None,
        }])
        .unwrap();
    store.set_active_profile_id(Some("p1")).unwrap();
    store.set_active_month(Some("2024-05")).unwrap();
    store
}

#[test]
fn plain_export_restores_into_empty_store() {
    let source = seeded_store();
    let json = export_plain(&source).unwrap();

    let target = AppStore::in_memory();
    let outcome = import_from_string(&target, &json, None).unwrap();
    assert!(!outcome.version_mismatch);
    assert!(!outcome.was_encrypted);

    assert_eq!(target.profiles().unwrap(), source.profiles().unwrap());
    assert_eq!(target.cards().unwrap(), source.cards().unwrap());
    assert_eq!(target.statements().unwrap(), source.statements().unwrap());
    assert_eq!(target.active_profile_id().unwrap(), Some("p1".to_string()));
    assert_eq!(target.active_month().unwrap(), Some("2024-05".to_string()));
}

#[test]
fn encrypted_export_roundtrips_with_password() {
    let source = seeded_store();
    let json = export_encrypted(&source, "hunter2").unwrap();
    assert!(json.contains("\"encrypted\": true"));
    // The profile name must not leak into the envelope.
    assert!(!json.contains("Acme Gold"));

    let target = AppStore::in_memory();
    let outcome = import_from_string(&target, &json, Some("hunter2")).unwrap();
    assert!(outcome.was_encrypted);
    assert_eq!(target.statements().unwrap(), source.statements().unwrap());
}

#[test]
fn encrypted_import_without_password_is_rejected() {
    let source = seeded_store();
    let json = export_encrypted(&source, "hunter2").unwrap();

    let target = AppStore::in_memory();
    let err = import_from_string(&target, &json, None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::PasswordRequired)
    ));
    assert!(target.profiles().unwrap().is_empty());
}

#[test]
fn wrong_password_surfaces_authentication_and_leaves_state_alone() {
    let source = seeded_store();
    let json = export_encrypted(&source, "hunter2").unwrap();

    let target = seeded_store();
    let before = target.statements().unwrap();
    let err = import_from_string(&target, &json, Some("not-it")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::Authentication)
    ));
    assert_eq!(target.statements().unwrap(), before);
}

#[test]
fn garbage_json_fails_without_partial_writes() {
    let target = seeded_store();
    let before_profiles = target.profiles().unwrap();
    let before_statements = target.statements().unwrap();

    let err = import_from_string(&target, "{not json", None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::ImportFailed(_))
    ));
    assert_eq!(target.profiles().unwrap(), before_profiles);
    assert_eq!(target.statements().unwrap(), before_statements);
}

#[test]
fn valid_json_wrong_shape_is_import_failed() {
    let target = AppStore::in_memory();
    let err = import_from_string(&target, r#"{"hello":"world"}"#, None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SyncError>(),
        Some(SyncError::ImportFailed(_))
    ));
}

#[test]
fn version_mismatch_is_a_warning_not_a_rejection() {
    let source = seeded_store();
    let mut json: serde_json::Value =
        serde_json::from_str(&export_plain(&source).unwrap()).unwrap();
    json["version"] = serde_json::Value::String("1.0".into());

    let target = AppStore::in_memory();
    let outcome = import_from_string(&target, &json.to_string(), None).unwrap();
    assert!(outcome.version_mismatch);
    assert_eq!(outcome.version, "1.0");
    assert_eq!(target.cards().unwrap(), source.cards().unwrap());
}
