// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use billfold::{cli, commands, db, store::AppStore};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = AppStore::open_default()?;
    store.ensure_seed_profile()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("profile", sub)) => commands::profiles::handle(&store, sub)?,
        Some(("card", sub)) => commands::cards::handle(&store, sub)?,
        Some(("statement", sub)) => commands::statements::handle(&store, sub)?,
        Some(("installment", sub)) => commands::installments::handle(&store, sub)?,
        Some(("cash", sub)) => commands::cash::handle(&store, sub)?,
        Some(("bill", sub)) => commands::bills::handle(&store, sub)?,
        Some(("balance", sub)) => commands::balances::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("backup", sub)) => commands::backup::handle(&store, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
