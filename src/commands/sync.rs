// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::AppStore;
use crate::sync::{HttpObjectStore, SyncOutcome, Syncer};
use anyhow::Result;

pub fn handle(store: &AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("now", sub)) => now(store, sub),
        _ => Ok(()),
    }
}

fn now(store: &AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let url = sub.get_one::<String>("url").unwrap();
    let token = sub.get_one::<String>("token").cloned();
    let password = sub.get_one::<String>("password").cloned();

    let remote = HttpObjectStore::new(url, token)?;
    let syncer = Syncer::new(store, &remote, password);
    match syncer.tick()? {
        SyncOutcome::Uploaded => println!("Uploaded local snapshot to {}", url),
        SyncOutcome::Downloaded => println!("Downloaded and applied remote snapshot from {}", url),
        SyncOutcome::Synced => println!("Already in sync"),
        SyncOutcome::Skipped => println!("A sync cycle is already running; skipped"),
    }
    Ok(())
}
