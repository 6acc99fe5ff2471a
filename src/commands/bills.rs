// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{OneTimeBill, new_id};
use crate::store::AppStore;
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("pay", sub)) => pay(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let card = store.card_named(sub.get_one::<String>("card").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;

    let mut bills = store.one_time_bills()?;
    bills.push(OneTimeBill {
        id: new_id(),
        card_id: card.id,
        name: name.to_string(),
        amount,
        month_str: month.clone(),
        is_paid: false,
    });
    store.set_one_time_bills(&bills)?;
    store.mark_modified()?;
    println!("Added bill '{}' ({}) on '{}'", name, month, card.card_name);
    Ok(())
}

fn pay(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let card = store.card_named(sub.get_one::<String>("card").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap();
    let mut bills = store.one_time_bills()?;
    let bill = bills
        .iter_mut()
        .find(|b| b.card_id == card.id && b.name == *name)
        .ok_or_else(|| anyhow!("Bill '{}' not found on '{}'", name, card.card_name))?;
    bill.is_paid = true;
    store.set_one_time_bills(&bills)?;
    store.mark_modified()?;
    println!("Marked bill '{}' paid", name);
    Ok(())
}

fn list(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.cards()?;
    let mut bills = store.one_time_bills()?;
    if let Some(month) = sub.get_one::<String>("month") {
        bills.retain(|b| b.month_str == *month);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bills)? {
        return Ok(());
    }
    let rows = bills
        .iter()
        .map(|b| {
            let card = cards
                .iter()
                .find(|c| c.id == b.card_id)
                .map(|c| c.card_name.clone())
                .unwrap_or_default();
            vec![
                b.month_str.clone(),
                b.name.clone(),
                card,
                b.amount.to_string(),
                if b.is_paid { "paid" } else { "due" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Name", "Card", "Amount", "Status"], rows)
    );
    Ok(())
}
