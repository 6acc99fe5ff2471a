// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SNAPSHOT_VERSION;
use crate::store::AppStore;
use crate::sync::{export_encrypted, export_plain, import_from_string, merge_from_string};
use crate::sync::merge::{export_profile_backup, replace_import_profile};
use anyhow::{Context, Result};
use std::fs;

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("export", sub)) => export(store, sub)?,
        Some(("import", sub)) => import(store, sub)?,
        Some(("merge", sub)) => merge(store, sub)?,
        Some(("export-profile", sub)) => export_profile(store, sub)?,
        Some(("import-profile", sub)) => import_profile(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn export(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let json = match sub.get_one::<String>("password") {
        Some(p) => export_encrypted(store, p)?,
        None => export_plain(store)?,
    };
    fs::write(out, json).with_context(|| format!("Write backup to {}", out))?;
    println!("Exported backup to {}", out);
    Ok(())
}

fn import(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let json = fs::read_to_string(path).with_context(|| format!("Read backup from {}", path))?;
    let outcome = import_from_string(store, &json, sub.get_one::<String>("password").map(|s| s.as_str()))?;
    if outcome.version_mismatch {
        eprintln!(
            "Warning: backup version {} differs from current {}; imported anyway",
            outcome.version, SNAPSHOT_VERSION
        );
    }
    println!("Restored backup from {}", path);
    Ok(())
}

fn merge(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let json = fs::read_to_string(path).with_context(|| format!("Read backup from {}", path))?;
    let stats = merge_from_string(store, &json, sub.get_one::<String>("password").map(|s| s.as_str()))?;
    println!(
        "Merged {} new entities from {} ({} statement(s) skipped for occupied card/month slots)",
        stats.total_added(),
        path,
        stats.statements_skipped
    );
    Ok(())
}

fn export_profile(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    let json = export_profile_backup(store, name)?;
    fs::write(out, json).with_context(|| format!("Write profile backup to {}", out))?;
    println!("Exported profile '{}' to {}", name, out);
    Ok(())
}

fn import_profile(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let json = fs::read_to_string(path).with_context(|| format!("Read backup from {}", path))?;
    let restored = replace_import_profile(store, &json)?;
    println!(
        "Imported profile '{}' with {} card(s), {} statement(s), {} installment(s)",
        restored.profile_name, restored.cards, restored.statements, restored.installments
    );
    Ok(())
}
