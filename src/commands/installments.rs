// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Installment, new_id};
use crate::store::AppStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let card = store.card_named(sub.get_one::<String>("card").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap();
    let principal = parse_decimal(sub.get_one::<String>("principal").unwrap())?;
    let terms: u32 = sub
        .get_one::<String>("terms")
        .unwrap()
        .parse()
        .map_err(|_| anyhow!("Invalid terms, expected a positive integer"))?;
    if terms == 0 {
        return Err(anyhow!("Terms must be at least 1"));
    }
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;

    let monthly = (principal / Decimal::from(terms)).round_dp(2);
    let mut installments = store.installments()?;
    installments.push(Installment {
        id: new_id(),
        card_id: card.id,
        name: name.to_string(),
        total_principal: principal,
        terms,
        monthly_amortization: monthly,
        start_date: start.to_string(),
    });
    store.set_installments(&installments)?;
    store.mark_modified()?;
    println!(
        "Added installment '{}' on '{}': {} x {} from {}",
        name, card.card_name, terms, monthly, start
    );
    Ok(())
}

fn list(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.cards()?;
    let mut installments = store.installments()?;
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        // Presence in a month is derived from start_date and terms.
        installments.retain(|i| i.is_active_in(&month));
    }

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &installments)? {
        return Ok(());
    }
    let rows = installments
        .iter()
        .map(|i| {
            let card = cards
                .iter()
                .find(|c| c.id == i.card_id)
                .map(|c| c.card_name.clone())
                .unwrap_or_default();
            vec![
                i.name.clone(),
                card,
                i.total_principal.to_string(),
                i.terms.to_string(),
                i.monthly_amortization.to_string(),
                i.start_date.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Name", "Card", "Principal", "Terms", "Monthly", "Start"],
            rows
        )
    );
    Ok(())
}
