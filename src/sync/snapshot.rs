// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use crate::models::{SNAPSHOT_VERSION, Snapshot};
use crate::store::AppStore;

/// Assemble every collection plus the two cursors into one versioned,
/// timestamped value. Reads only.
pub fn build_snapshot(store: &AppStore) -> Result<Snapshot> {
    Ok(Snapshot {
        version: SNAPSHOT_VERSION.to_string(),
        timestamp: Utc::now(),
        profiles: store.profiles()?,
        cards: store.cards()?,
        statements: store.statements()?,
        installments: store.installments()?,
        cash_installments: store.cash_installments()?,
        one_time_bills: store.one_time_bills()?,
        bank_balances: store.bank_balances()?,
        active_profile_id: store.active_profile_id()?,
        active_month: store.active_month()?,
    })
}

/// Unconditionally replace every local collection and cursor with the
/// snapshot's values. Used only by the non-merge restore path; referential
/// checks belong to the merge importer.
pub fn apply_snapshot(store: &AppStore, snap: &Snapshot) -> Result<()> {
    store.set_profiles(&snap.profiles)?;
    store.set_cards(&snap.cards)?;
    store.set_statements(&snap.statements)?;
    store.set_installments(&snap.installments)?;
    store.set_cash_installments(&snap.cash_installments)?;
    store.set_one_time_bills(&snap.one_time_bills)?;
    store.set_bank_balances(&snap.bank_balances)?;
    store.set_active_profile_id(snap.active_profile_id.as_deref())?;
    store.set_active_month(snap.active_month.as_deref())?;
    Ok(())
}
