// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use profitsplit::live::LiveView;
use profitsplit::store::SqliteStore;
use profitsplit::{cli, commands, db};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    if let Some(("suggest", sub)) = matches.subcommand() {
        return commands::suggest::handle(sub);
    }

    let store = SqliteStore::new(db::open_or_init()?);
    // repairs must work even when rows no longer parse
    match matches.subcommand() {
        Some(("doctor", _)) => return commands::doctor::handle(&store),
        Some(("tx", sub)) => {
            if commands::transactions::handle_deletes(&store, sub)? {
                return Ok(());
            }
        }
        _ => {}
    }
    let mut view = LiveView::open(store)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut view, sub)?,
        Some(("reset", _)) => commands::totals::reset(&mut view)?,
        Some(("totals", sub)) => commands::totals::handle(&view, sub)?,
        Some(("stats", sub)) => commands::reports::handle(&view, sub)?,
        Some(("badges", sub)) => commands::badges::handle(&view, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&view, sub)?,
        Some(("config", sub)) => commands::config::handle(view.store().conn(), sub)?,
        Some(("theme", sub)) => commands::config::handle_theme(view.store().conn(), sub)?,
        Some(("watch", sub)) => commands::watch::handle(&mut view, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
