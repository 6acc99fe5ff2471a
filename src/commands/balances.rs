// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BankBalance, new_id};
use crate::store::AppStore;
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// One row per (profile, month); setting the same pair twice updates it.
pub fn upsert_balance(
    store: &AppStore,
    profile_id: &str,
    month: &str,
    balance: Decimal,
) -> Result<()> {
    let mut balances = store.bank_balances()?;
    match balances
        .iter_mut()
        .find(|b| b.profile_id == profile_id && b.month_str == month)
    {
        Some(b) => b.balance = balance,
        None => balances.push(BankBalance {
            id: new_id(),
            profile_id: profile_id.to_string(),
            month_str: month.to_string(),
            balance,
        }),
    }
    store.set_bank_balances(&balances)?;
    store.set_bank_balance_tracking(true)?;
    store.mark_modified()?;
    Ok(())
}

fn set(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let profile_id = match sub.get_one::<String>("profile") {
        Some(name) => store.profile_named(name)?.id,
        None => store
            .active_profile_id()?
            .ok_or_else(|| anyhow!("No active profile; run 'profile use' first"))?,
    };
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    upsert_balance(store, &profile_id, &month, amount)?;
    println!("Balance set for {} = {}", month, amount);
    Ok(())
}

fn list(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let profiles = store.profiles()?;
    let mut balances = store.bank_balances()?;
    balances.sort_by(|a, b| a.month_str.cmp(&b.month_str));
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &balances)? {
        return Ok(());
    }
    let rows = balances
        .iter()
        .map(|b| {
            let owner = profiles
                .iter()
                .find(|p| p.id == b.profile_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            vec![b.month_str.clone(), owner, b.balance.to_string()]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Profile", "Balance"], rows));
    Ok(())
}
