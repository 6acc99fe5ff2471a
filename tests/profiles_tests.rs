// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::commands::profiles::{delete_profile, deletion_plan};
use billfold::models::{
    BankBalance, CashInstallment, CreditCard, Installment, OneTimeBill, Profile, Statement,
};
use billfold::store::AppStore;

fn seeded() -> AppStore {
    let store = AppStore::in_memory();
    store
        .set_profiles(&[
            Profile {
                id: "p1".into(),
                name: "home".into(),
            },
            Profile {
                id: "p2".into(),
                name: "work".into(),
            },
        ])
        .unwrap();
    store
        .set_cards(&[
            CreditCard {
                id: "c1".into(),
                profile_id: "p1".into(),
                bank_name: "Acme Bank".into(),
                card_name: "Acme Gold".into(),
                due_day: 15,
                cutoff_day: 28,
                color: "#4f6df5".into(),
            },
            CreditCard {
                id: "c2".into(),
                profile_id: "p2".into(),
                bank_name: "Zen Bank".into(),
                card_name: "Zen Visa".into(),
                due_day: 5,
                cutoff_day: 20,
                color: "#00aa55".into(),
            },
        ])
        .unwrap();
    store
        .set_statements(&[
            Statement {
                id: "s1".into(),
                card_id: "c1".into(),
                month_str: "2024-05".into(),
                amount: "100".parse().unwrap(),
                is_paid: false,
                is_unbilled: None,
                custom_due_date: None,
                adjusted_amount: None,
            },
            Statement {
                id: "s2".into(),
                card_id: "c2".into(),
                month_str: "2024-05".into(),
                amount: "200".parse().unwrap(),
                is_paid: false,
                is_unbilled: None,
                custom_due_date: None,
                adjusted_amount: None,
            },
        ])
        .unwrap();
    store
        .set_installments(&[Installment {
            id: "i1".into(),
            card_id: "c1".into(),
            name: "fridge".into(),
            total_principal: "1200".parse().unwrap(),
            terms: 12,
            monthly_amortization: "100".parse().unwrap(),
            start_date: "2024-01-15".into(),
        }])
        .unwrap();
    store
        .set_cash_installments(&[CashInstallment {
            id: "k1".into(),
            card_id: "c1".into(),
            name: "loan".into(),
            monthly_amount: "50".parse().unwrap(),
            terms: 6,
            start_date: "2024-02-01".into(),
            is_paid: false,
        }])
        .unwrap();
    store
        .set_one_time_bills(&[OneTimeBill {
            id: "b1".into(),
            card_id: "c1".into(),
            name: "annual fee".into(),
            amount: "30".parse().unwrap(),
            month_str: "2024-06".into(),
            is_paid: false,
        }])
        .unwrap();
    store
        .set_bank_balances(&[BankBalance {
            id: "bb1".into(),
            profile_id: "p1".into(),
            month_str: "2024-05".into(),
            balance: "5000".parse().unwrap(),
        }])
        .unwrap();
    store.set_active_profile_id(Some("p1")).unwrap();
    store
}

#[test]
fn deletion_plan_counts_everything_the_profile_owns() {
    let store = seeded();
    let plan = deletion_plan(&store, "home").unwrap();
    assert_eq!(plan.cards, 1);
    assert_eq!(plan.statements, 1);
    assert_eq!(plan.installments, 1);
    assert_eq!(plan.cash_installments, 1);
    assert_eq!(plan.one_time_bills, 1);
    assert_eq!(plan.bank_balances, 1);
}

#[test]
fn deletion_plan_does_not_modify_state() {
    let store = seeded();
    deletion_plan(&store, "home").unwrap();
    assert_eq!(store.profiles().unwrap().len(), 2);
    assert_eq!(store.cards().unwrap().len(), 2);
}

#[test]
fn delete_profile_cascades_without_leaving_orphans() {
    let store = seeded();
    delete_profile(&store, "home").unwrap();

    assert_eq!(store.profiles().unwrap().len(), 1);
    let cards = store.cards().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "c2");
    // Everything owned through c1 is gone; c2's statement survives.
    let statements = store.statements().unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].card_id, "c2");
    assert!(store.installments().unwrap().is_empty());
    assert!(store.cash_installments().unwrap().is_empty());
    assert!(store.one_time_bills().unwrap().is_empty());
    assert!(store.bank_balances().unwrap().is_empty());
    // The active cursor moves off the deleted profile.
    assert_eq!(store.active_profile_id().unwrap(), Some("p2".to_string()));
}

#[test]
fn seed_profile_created_on_first_run() {
    let store = AppStore::in_memory();
    let p = store.ensure_seed_profile().unwrap();
    assert_eq!(p.name, "default");
    assert_eq!(store.active_profile_id().unwrap(), Some(p.id));
    // Second call is a no-op.
    store.ensure_seed_profile().unwrap();
    assert_eq!(store.profiles().unwrap().len(), 1);
}
