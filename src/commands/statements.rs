// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Statement, new_id};
use crate::store::AppStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("pay", sub)) => pay(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Insert-or-update keyed on (card, month). The composite lookup happens
/// before deciding, so setting the same pair twice updates one row and
/// never creates a second.
pub fn upsert_statement(
    store: &AppStore,
    card_id: &str,
    month: &str,
    amount: Decimal,
    is_unbilled: Option<bool>,
    custom_due_date: Option<String>,
    adjusted_amount: Option<Decimal>,
) -> Result<Statement> {
    let mut statements = store.statements()?;
    let result = match statements
        .iter_mut()
        .find(|s| s.card_id == card_id && s.month_str == month)
    {
        Some(existing) => {
            existing.amount = amount;
            if is_unbilled.is_some() {
                existing.is_unbilled = is_unbilled;
            }
            if custom_due_date.is_some() {
                existing.custom_due_date = custom_due_date;
            }
            if adjusted_amount.is_some() {
                existing.adjusted_amount = adjusted_amount;
            }
            existing.clone()
        }
        None => {
            let s = Statement {
                id: new_id(),
                card_id: card_id.to_string(),
                month_str: month.to_string(),
                amount,
                is_paid: false,
                is_unbilled,
                custom_due_date,
                adjusted_amount,
            };
            statements.push(s.clone());
            s
        }
    };
    store.set_statements(&statements)?;
    store.mark_modified()?;
    Ok(result)
}

fn set(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let card = store.card_named(sub.get_one::<String>("card").unwrap())?;
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let unbilled = sub.get_flag("unbilled").then_some(true);
    let due_date = match sub.get_one::<String>("due-date") {
        Some(d) => Some(parse_date(d)?.to_string()),
        None => None,
    };
    let adjusted = match sub.get_one::<String>("adjusted") {
        Some(a) => Some(parse_decimal(a)?),
        None => None,
    };
    upsert_statement(store, &card.id, &month, amount, unbilled, due_date, adjusted)?;
    println!("Statement set for '{}' {} = {}", card.card_name, month, amount);
    Ok(())
}

fn pay(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let card = store.card_named(sub.get_one::<String>("card").unwrap())?;
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let mut statements = store.statements()?;
    let s = statements
        .iter_mut()
        .find(|s| s.card_id == card.id && s.month_str == month)
        .ok_or_else(|| anyhow!("No statement for '{}' in {}", card.card_name, month))?;
    s.is_paid = true;
    store.set_statements(&statements)?;
    store.mark_modified()?;
    println!("Marked '{}' {} paid", card.card_name, month);
    Ok(())
}

fn list(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.cards()?;
    let mut statements = store.statements()?;
    if let Some(month) = sub.get_one::<String>("month") {
        statements.retain(|s| s.month_str == *month);
    }
    if let Some(card_name) = sub.get_one::<String>("card") {
        let card = store.card_named(card_name)?;
        statements.retain(|s| s.card_id == card.id);
    }
    statements.sort_by(|a, b| (&a.month_str, &a.card_id).cmp(&(&b.month_str, &b.card_id)));

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &statements)? {
        return Ok(());
    }
    let rows = statements
        .iter()
        .map(|s| {
            let card = cards
                .iter()
                .find(|c| c.id == s.card_id)
                .map(|c| c.card_name.clone())
                .unwrap_or_default();
            vec![
                s.month_str.clone(),
                card,
                s.amount.to_string(),
                if s.is_paid { "paid" } else { "due" }.to_string(),
                if s.is_unbilled == Some(true) { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Card", "Amount", "Status", "Unbilled"], rows)
    );
    Ok(())
}
