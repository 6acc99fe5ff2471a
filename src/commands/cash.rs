// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CashInstallment, new_id};
use crate::store::AppStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
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
    let monthly = parse_decimal(sub.get_one::<String>("monthly").unwrap())?;
    let terms: u32 = sub
        .get_one::<String>("terms")
        .unwrap()
        .parse()
        .map_err(|_| anyhow!("Invalid terms, expected a positive integer"))?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;

    let mut cash = store.cash_installments()?;
    cash.push(CashInstallment {
        id: new_id(),
        card_id: card.id,
        name: name.to_string(),
        monthly_amount: monthly,
        terms,
        start_date: start.to_string(),
        is_paid: false,
    });
    store.set_cash_installments(&cash)?;
    store.mark_modified()?;
    println!("Added cash installment '{}' on '{}'", name, card.card_name);
    Ok(())
}

fn pay(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let card = store.card_named(sub.get_one::<String>("card").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap();
    let mut cash = store.cash_installments()?;
    let item = cash
        .iter_mut()
        .find(|c| c.card_id == card.id && c.name == *name)
        .ok_or_else(|| anyhow!("Cash installment '{}' not found on '{}'", name, card.card_name))?;
    item.is_paid = true;
    store.set_cash_installments(&cash)?;
    store.mark_modified()?;
    println!("Marked cash installment '{}' paid", name);
    Ok(())
}

fn list(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.cards()?;
    let cash = store.cash_installments()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cash)? {
        return Ok(());
    }
    let rows = cash
        .iter()
        .map(|c| {
            let card = cards
                .iter()
                .find(|k| k.id == c.card_id)
                .map(|k| k.card_name.clone())
                .unwrap_or_default();
            vec![
                c.name.clone(),
                card,
                c.monthly_amount.to_string(),
                c.terms.to_string(),
                c.start_date.clone(),
                if c.is_paid { "paid" } else { "due" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Card", "Monthly", "Terms", "Start", "Status"], rows)
    );
    Ok(())
}
