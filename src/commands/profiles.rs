// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Profile, new_id};
use crate::store::AppStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::collections::HashSet;

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("use", sub)) => use_profile(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let mut profiles = store.profiles()?;
    if profiles.iter().any(|p| p.name == name) {
        return Err(anyhow!("Profile '{}' already exists", name));
    }
    profiles.push(Profile {
        id: new_id(),
        name: name.to_string(),
    });
    store.set_profiles(&profiles)?;
    store.mark_modified()?;
    println!("Added profile '{}'", name);
    Ok(())
}

fn list(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let profiles = store.profiles()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &profiles)? {
        return Ok(());
    }
    let active = store.active_profile_id()?;
    let rows = profiles
        .iter()
        .map(|p| {
            let marker = if active.as_deref() == Some(&p.id) { "*" } else { "" };
            vec![p.name.clone(), marker.to_string()]
        })
        .collect();
    println!("{}", pretty_table(&["Name", "Active"], rows));
    Ok(())
}

fn use_profile(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let p = store.profile_named(name)?;
    store.set_active_profile_id(Some(&p.id))?;
    println!("Active profile is now '{}'", p.name);
    Ok(())
}

/// What a cascade deletion would remove. Returned to the caller instead of
/// a blocking confirmation prompt; the caller resolves it explicitly.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionPlan {
    pub profile_name: String,
    pub cards: usize,
    pub statements: usize,
    pub installments: usize,
    pub cash_installments: usize,
    pub one_time_bills: usize,
    pub bank_balances: usize,
}

pub fn deletion_plan(store: &AppStore, profile_name: &str) -> Result<DeletionPlan> {
    let profile = store.profile_named(profile_name)?;
    let card_ids: HashSet<String> = store
        .cards()?
        .iter()
        .filter(|c| c.profile_id == profile.id)
        .map(|c| c.id.clone())
        .collect();
    Ok(DeletionPlan {
        profile_name: profile.name,
        cards: card_ids.len(),
        statements: store
            .statements()?
            .iter()
            .filter(|s| card_ids.contains(&s.card_id))
            .count(),
        installments: store
            .installments()?
            .iter()
            .filter(|i| card_ids.contains(&i.card_id))
            .count(),
        cash_installments: store
            .cash_installments()?
            .iter()
            .filter(|c| card_ids.contains(&c.card_id))
            .count(),
        one_time_bills: store
            .one_time_bills()?
            .iter()
            .filter(|b| card_ids.contains(&b.card_id))
            .count(),
        bank_balances: store
            .bank_balances()?
            .iter()
            .filter(|b| b.profile_id == profile.id)
            .count(),
    })
}

/// Cascade: removing a profile removes its cards and everything that
/// references them, so no dangling ids survive.
pub fn delete_profile(store: &AppStore, profile_name: &str) -> Result<()> {
    let profile = store.profile_named(profile_name)?;

    let (keep, drop): (Vec<_>, Vec<_>) = store
        .cards()?
        .into_iter()
        .partition(|c| c.profile_id != profile.id);
    let dropped: HashSet<String> = drop.into_iter().map(|c| c.id).collect();
    store.set_cards(&keep)?;

    let statements: Vec<_> = store
        .statements()?
        .into_iter()
        .filter(|s| !dropped.contains(&s.card_id))
        .collect();
    store.set_statements(&statements)?;

    let installments: Vec<_> = store
        .installments()?
        .into_iter()
        .filter(|i| !dropped.contains(&i.card_id))
        .collect();
    store.set_installments(&installments)?;

    let cash: Vec<_> = store
        .cash_installments()?
        .into_iter()
        .filter(|c| !dropped.contains(&c.card_id))
        .collect();
    store.set_cash_installments(&cash)?;

    let bills: Vec<_> = store
        .one_time_bills()?
        .into_iter()
        .filter(|b| !dropped.contains(&b.card_id))
        .collect();
    store.set_one_time_bills(&bills)?;

    let balances: Vec<_> = store
        .bank_balances()?
        .into_iter()
        .filter(|b| b.profile_id != profile.id)
        .collect();
    store.set_bank_balances(&balances)?;

    let profiles: Vec<_> = store
        .profiles()?
        .into_iter()
        .filter(|p| p.id != profile.id)
        .collect();
    store.set_profiles(&profiles)?;

    if store.active_profile_id()? == Some(profile.id) {
        store.set_active_profile_id(profiles.first().map(|p| p.id.as_str()))?;
    }
    store.mark_modified()?;
    Ok(())
}

fn rm(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let plan = deletion_plan(store, name)?;
    if !sub.get_flag("yes") {
        println!(
            "Deleting profile '{}' would remove {} card(s), {} statement(s), {} installment(s), {} cash installment(s), {} bill(s), {} balance row(s).",
            plan.profile_name,
            plan.cards,
            plan.statements,
            plan.installments,
            plan.cash_installments,
            plan.one_time_bills,
            plan.bank_balances
        );
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    delete_profile(store, name)?;
    println!("Removed profile '{}'", name);
    Ok(())
}
