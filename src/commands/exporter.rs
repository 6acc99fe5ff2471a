// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::AppStore;
use anyhow::Result;
use serde_json::json;

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("statements", sub)) => export_statements(store, sub),
        _ => Ok(()),
    }
}

fn export_statements(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let cards = store.cards()?;
    let mut statements = store.statements()?;
    statements.sort_by(|a, b| (&a.month_str, &a.card_id).cmp(&(&b.month_str, &b.card_id)));
    let card_name = |id: &str| {
        cards
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.card_name.clone())
            .unwrap_or_default()
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["month", "card", "amount", "paid", "unbilled", "dueDate"])?;
            for s in &statements {
                wtr.write_record([
                    s.month_str.clone(),
                    card_name(&s.card_id),
                    s.amount.to_string(),
                    s.is_paid.to_string(),
                    s.is_unbilled.unwrap_or(false).to_string(),
                    s.custom_due_date.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for s in &statements {
                items.push(json!({
                    "month": s.month_str, "card": card_name(&s.card_id),
                    "amount": s.amount, "paid": s.is_paid,
                    "unbilled": s.is_unbilled, "dueDate": s.custom_due_date,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported statements to {}", out);
    Ok(())
}
