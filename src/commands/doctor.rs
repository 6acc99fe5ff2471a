// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::AppStore;
use crate::utils::pretty_table;
use anyhow::Result;
use std::collections::{HashMap, HashSet};

pub fn handle(store: &AppStore) -> Result<()> {
    let mut rows = Vec::new();

    let profile_ids: HashSet<String> = store.profiles()?.into_iter().map(|p| p.id).collect();
    let card_ids: HashSet<String> = store.cards()?.into_iter().map(|c| c.id).collect();

    // 1) Dangling profile references
    for c in store.cards()? {
        if !profile_ids.contains(&c.profile_id) {
            rows.push(vec!["card_orphan_profile".into(), c.card_name]);
        }
    }
    for b in store.bank_balances()? {
        if !profile_ids.contains(&b.profile_id) {
            rows.push(vec!["balance_orphan_profile".into(), b.month_str]);
        }
    }

    // 2) Dangling card references
    for s in store.statements()? {
        if !card_ids.contains(&s.card_id) {
            rows.push(vec!["statement_orphan_card".into(), format!("{} {}", s.month_str, s.id)]);
        }
    }
    for i in store.installments()? {
        if !card_ids.contains(&i.card_id) {
            rows.push(vec!["installment_orphan_card".into(), i.name]);
        }
    }
    for c in store.cash_installments()? {
        if !card_ids.contains(&c.card_id) {
            rows.push(vec!["cash_orphan_card".into(), c.name]);
        }
    }
    for b in store.one_time_bills()? {
        if !card_ids.contains(&b.card_id) {
            rows.push(vec!["bill_orphan_card".into(), b.name]);
        }
    }

    // 3) Duplicate (card, month) statement slots
    let mut slots: HashMap<(String, String), usize> = HashMap::new();
    for s in store.statements()? {
        *slots.entry((s.card_id, s.month_str)).or_default() += 1;
    }
    for ((card, month), n) in slots {
        if n > 1 {
            rows.push(vec![
                "duplicate_statement_slot".into(),
                format!("{} {} ({} rows)", card, month, n),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
