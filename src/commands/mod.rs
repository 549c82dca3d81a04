// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod totals;
pub mod reports;
pub mod badges;
pub mod suggest;
pub mod exporter;
pub mod config;
pub mod watch;
pub mod doctor;

use anyhow::{Context, Result};

use crate::live::LiveView;
use crate::store::SqliteStore;

pub type View = LiveView<SqliteStore>;

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("Missing required argument '--{}'", name))
}
