// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::settings::{Settings, set_setting, toggle_theme};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = Settings::load(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let rows = vec![
                    vec!["party_a".into(), s.party_a],
                    vec!["party_b".into(), s.party_b],
                    vec!["theme".into(), s.theme.as_str().into()],
                ];
                println!("{}", pretty_table(&["Key", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?.trim();
            let value = required(sub, "value")?;
            set_setting(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_theme(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => println!("{}", Settings::load(conn)?.theme.as_str()),
        Some(("toggle", _)) => println!("Theme is now {}", toggle_theme(conn)?.as_str()),
        _ => {}
    }
    Ok(())
}
