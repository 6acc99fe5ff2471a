// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CreditCard, new_id};
use crate::store::AppStore;
use crate::utils::{maybe_print_json, parse_day, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("transfer", sub)) => transfer(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let profile_id = match sub.get_one::<String>("profile") {
        Some(name) => store.profile_named(name)?.id,
        None => store
            .active_profile_id()?
            .ok_or_else(|| anyhow!("No active profile; run 'profile use' first"))?,
    };
    let name = sub.get_one::<String>("name").unwrap();
    let mut cards = store.cards()?;
    if cards.iter().any(|c| c.card_name == *name) {
        return Err(anyhow!("Card '{}' already exists", name));
    }
    let card = CreditCard {
        id: new_id(),
        profile_id,
        bank_name: sub.get_one::<String>("bank").unwrap().to_string(),
        card_name: name.to_string(),
        due_day: parse_day(sub.get_one::<String>("due-day").unwrap())?,
        cutoff_day: parse_day(sub.get_one::<String>("cutoff-day").unwrap())?,
        color: sub.get_one::<String>("color").unwrap().to_string(),
    };
    cards.push(card);
    store.set_cards(&cards)?;
    store.mark_modified()?;
    println!("Added card '{}'", name);
    Ok(())
}

fn list(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.cards()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cards)? {
        return Ok(());
    }
    let profiles = store.profiles()?;
    let rows = cards
        .iter()
        .map(|c| {
            let owner = profiles
                .iter()
                .find(|p| p.id == c.profile_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            vec![
                c.card_name.clone(),
                c.bank_name.clone(),
                owner,
                c.due_day.to_string(),
                c.cutoff_day.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Card", "Bank", "Profile", "Due", "Cutoff"], rows)
    );
    Ok(())
}

/// Rewrite profile_id in place. A transfer is a data-model operation, not
/// a delete-and-recreate; the card keeps its id and its statements.
fn transfer(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let to = store.profile_named(sub.get_one::<String>("to-profile").unwrap())?;
    let mut cards = store.cards()?;
    let card = cards
        .iter_mut()
        .find(|c| c.card_name == *name)
        .ok_or_else(|| anyhow!("Card '{}' not found", name))?;
    card.profile_id = to.id;
    store.set_cards(&cards)?;
    store.mark_modified()?;
    println!("Moved card '{}' to profile '{}'", name, to.name);
    Ok(())
}

fn rm(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let card = store.card_named(name)?;

    let cards: Vec<_> = store
        .cards()?
        .into_iter()
        .filter(|c| c.id != card.id)
        .collect();
    store.set_cards(&cards)?;
    let statements: Vec<_> = store
        .statements()?
        .into_iter()
        .filter(|s| s.card_id != card.id)
        .collect();
    store.set_statements(&statements)?;
    let installments: Vec<_> = store
        .installments()?
        .into_iter()
        .filter(|i| i.card_id != card.id)
        .collect();
    store.set_installments(&installments)?;
    let cash: Vec<_> = store
        .cash_installments()?
        .into_iter()
        .filter(|c| c.card_id != card.id)
        .collect();
    store.set_cash_installments(&cash)?;
    let bills: Vec<_> = store
        .one_time_bills()?
        .into_iter()
        .filter(|b| b.card_id != card.id)
        .collect();
    store.set_one_time_bills(&bills)?;
    store.mark_modified()?;
    println!("Removed card '{}'", name);
    Ok(())
}
