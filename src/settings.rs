// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::models::Theme;

pub const KEY_PARTY_A: &str = "party_a";
pub const KEY_PARTY_B: &str = "party_b";
pub const KEY_THEME: &str = "theme";

pub const KNOWN_KEYS: &[&str] = &[KEY_PARTY_A, KEY_PARTY_B, KEY_THEME];

const DEFAULT_PARTY_A: &str = "Party A";
const DEFAULT_PARTY_B: &str = "Party B";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Recovers the original price and half the profit.
    pub party_a: String,
    /// Receives half the profit.
    pub party_b: String,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            party_a: DEFAULT_PARTY_A.to_string(),
            party_b: DEFAULT_PARTY_B.to_string(),
            theme: Theme::Light,
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Settings> {
        let defaults = Settings::default();
        let theme = match get_setting(conn, KEY_THEME)? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                log::warn!("ignoring unknown theme '{}'", raw);
                defaults.theme
            }),
            None => defaults.theme,
        };
        Ok(Settings {
            party_a: get_setting(conn, KEY_PARTY_A)?.unwrap_or(defaults.party_a),
            party_b: get_setting(conn, KEY_PARTY_B)?.unwrap_or(defaults.party_b),
            theme,
        })
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// Stores a known setting after checking its value.
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        KEY_PARTY_A | KEY_PARTY_B => {
            if value.is_empty() {
                return Err(anyhow!("Party name cannot be empty"));
            }
        }
        KEY_THEME => {
            if Theme::parse(value).is_none() {
                return Err(anyhow!("Invalid theme '{}', expected light|dark", value));
            }
        }
        _ => {
            return Err(anyhow!(
                "Unknown setting '{}' (known: {})",
                key,
                KNOWN_KEYS.join(", ")
            ));
        }
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Flips light/dark and returns the new theme.
pub fn toggle_theme(conn: &Connection) -> Result<Theme> {
    let next = Settings::load(conn)?.theme.toggled();
    set_setting(conn, KEY_THEME, next.as_str())?;
    Ok(next)
}
