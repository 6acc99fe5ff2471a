// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Additive reconciliation of an imported snapshot against local state,
//! plus the stricter replace-import path for single-profile backups.
//!
//! Merge never deletes or overwrites an existing entity. Collections are
//! processed in dependency order (profiles, cards, statements,
//! installments, then the satellite collections) and each collection is
//! written back as soon as its step finishes. The multi-collection
//! sequence is not one atomic transaction; a failure partway leaves
//! earlier collections merged and later ones untouched.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::error::SyncError;
use crate::models::{
    CreditCard, Installment, Profile, ProfileBackup, SNAPSHOT_VERSION, Snapshot, Statement, new_id,
};
use crate::store::AppStore;
use crate::sync::envelope::parse_snapshot;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    pub profiles_added: usize,
    pub cards_added: usize,
    pub statements_added: usize,
    /// Imported statements dropped because a local statement already
    /// occupies the same (card, month) slot under a different id.
    pub statements_skipped: usize,
    pub installments_added: usize,
    pub cash_installments_added: usize,
    pub one_time_bills_added: usize,
    pub bank_balances_added: usize,
}

impl MergeStats {
    pub fn total_added(&self) -> usize {
        self.profiles_added
            + self.cards_added
            + self.statements_added
            + self.installments_added
            + self.cash_installments_added
            + self.one_time_bills_added
            + self.bank_balances_added
    }
}

pub fn merge_from_string(
    store: &AppStore,
    json: &str,
    password: Option<&str>,
) -> Result<MergeStats> {
    let (snap, _) = parse_snapshot(json, password)?;
    merge_snapshot(store, &snap)
}

pub fn merge_snapshot(store: &AppStore, snap: &Snapshot) -> Result<MergeStats> {
    let mut stats = MergeStats::default();

    // Profiles keep their imported ids: the same profile is meant to carry
    // the same id across devices.
    let mut profiles = store.profiles()?;
    let known: HashSet<String> = profiles.iter().map(|p| p.id.clone()).collect();
    for p in &snap.profiles {
        if !known.contains(&p.id) {
            profiles.push(p.clone());
            stats.profiles_added += 1;
        }
    }
    store.set_profiles(&profiles)?;

    // Cards reference profile ids guaranteed present by the step above.
    let mut cards = store.cards()?;
    let known: HashSet<String> = cards.iter().map(|c| c.id.clone()).collect();
    for c in &snap.cards {
        if !known.contains(&c.id) {
            cards.push(c.clone());
            stats.cards_added += 1;
        }
    }
    store.set_cards(&cards)?;

    // Statements are deduped by id AND by the (card, month) slot, so a
    // merge can never produce two statements for the same card and month.
    let mut statements = store.statements()?;
    let known: HashSet<String> = statements.iter().map(|s| s.id.clone()).collect();
    let mut slots: HashSet<(String, String)> = statements
        .iter()
        .map(|s| (s.card_id.clone(), s.month_str.clone()))
        .collect();
    for s in &snap.statements {
        if known.contains(&s.id) {
            continue;
        }
        let slot = (s.card_id.clone(), s.month_str.clone());
        if slots.contains(&slot) {
            stats.statements_skipped += 1;
            continue;
        }
        slots.insert(slot);
        statements.push(s.clone());
        stats.statements_added += 1;
    }
    store.set_statements(&statements)?;

    let mut installments = store.installments()?;
    let known: HashSet<String> = installments.iter().map(|i| i.id.clone()).collect();
    for i in &snap.installments {
        if !known.contains(&i.id) {
            installments.push(i.clone());
            stats.installments_added += 1;
        }
    }
    store.set_installments(&installments)?;

    let mut cash = store.cash_installments()?;
    let known: HashSet<String> = cash.iter().map(|c| c.id.clone()).collect();
    for c in &snap.cash_installments {
        if !known.contains(&c.id) {
            cash.push(c.clone());
            stats.cash_installments_added += 1;
        }
    }
    store.set_cash_installments(&cash)?;

    let mut bills = store.one_time_bills()?;
    let known: HashSet<String> = bills.iter().map(|b| b.id.clone()).collect();
    for b in &snap.one_time_bills {
        if !known.contains(&b.id) {
            bills.push(b.clone());
            stats.one_time_bills_added += 1;
        }
    }
    store.set_one_time_bills(&bills)?;

    let mut balances = store.bank_balances()?;
    let known: HashSet<String> = balances.iter().map(|b| b.id.clone()).collect();
    for b in &snap.bank_balances {
        if !known.contains(&b.id) {
            balances.push(b.clone());
            stats.bank_balances_added += 1;
        }
    }
    store.set_bank_balances(&balances)?;

    if stats.total_added() > 0 {
        store.mark_modified()?;
    }
    Ok(stats)
}

/// What a replace-import brought in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredProfile {
    pub profile_name: String,
    pub cards: usize,
    pub statements: usize,
    pub installments: usize,
}

/// Produce a single-profile backup for the replace-import path.
pub fn export_profile_backup(store: &AppStore, profile_name: &str) -> Result<String> {
    let profile = store.profile_named(profile_name)?;
    let cards: Vec<CreditCard> = store
        .cards()?
        .into_iter()
        .filter(|c| c.profile_id == profile.id)
        .collect();
    let card_ids: HashSet<String> = cards.iter().map(|c| c.id.clone()).collect();
    let statements: Vec<Statement> = store
        .statements()?
        .into_iter()
        .filter(|s| card_ids.contains(&s.card_id))
        .collect();
    let installments: Vec<Installment> = store
        .installments()?
        .into_iter()
        .filter(|i| card_ids.contains(&i.card_id))
        .collect();
    let backup = ProfileBackup {
        version: SNAPSHOT_VERSION.to_string(),
        timestamp: Utc::now(),
        profile,
        cards,
        statements,
        installments,
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Replace-import: collision-avoidant counterpart to merge. Every imported
/// entity gets a fresh id; statement/installment card references are
/// rewritten through the translation map built while importing cards. A
/// same-named local profile rejects the import before anything is written.
pub fn replace_import_profile(store: &AppStore, json: &str) -> Result<RestoredProfile> {
    let backup: ProfileBackup = serde_json::from_str(json)
        .map_err(|e| SyncError::ImportFailed(format!("invalid profile backup: {}", e)))?;

    let mut profiles = store.profiles()?;
    if profiles.iter().any(|p| p.name == backup.profile.name) {
        return Err(SyncError::ProfileNameCollision(backup.profile.name).into());
    }

    let profile = Profile {
        id: new_id(),
        name: backup.profile.name,
    };

    let mut card_ids: HashMap<String, String> = HashMap::new();
    let mut cards = store.cards()?;
    for c in backup.cards {
        let fresh = new_id();
        card_ids.insert(c.id.clone(), fresh.clone());
        cards.push(CreditCard {
            id: fresh,
            profile_id: profile.id.clone(),
            ..c
        });
    }

    let mut statements = store.statements()?;
    let mut statements_added = 0;
    for s in backup.statements {
        let Some(card_id) = card_ids.get(&s.card_id) else {
            // Dangling reference in the backup itself; do not import it.
            continue;
        };
        statements.push(Statement {
            id: new_id(),
            card_id: card_id.clone(),
            ..s
        });
        statements_added += 1;
    }

    let mut installments = store.installments()?;
    let mut installments_added = 0;
    for i in backup.installments {
        let Some(card_id) = card_ids.get(&i.card_id) else {
            continue;
        };
        installments.push(Installment {
            id: new_id(),
            card_id: card_id.clone(),
            ..i
        });
        installments_added += 1;
    }

    profiles.push(profile.clone());

    let summary = RestoredProfile {
        profile_name: profile.name,
        cards: card_ids.len(),
        statements: statements_added,
        installments: installments_added,
    };

    store.set_profiles(&profiles)?;
    store.set_cards(&cards)?;
    store.set_statements(&statements)?;
    store.set_installments(&installments)?;
    store.mark_modified()?;
    Ok(summary)
}
