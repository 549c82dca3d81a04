// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::amount::suggestions;
use crate::commands::required;
use crate::utils::{fmt_amount, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let value = required(m, "value")?;
    let options = suggestions(value);
    if options.is_empty() {
        return Err(anyhow!("'{}' is not a number", value));
    }
    let rows = options
        .iter()
        .enumerate()
        .map(|(i, d)| vec![(i + 1).to_string(), fmt_amount(d)])
        .collect();
    println!("{}", pretty_table(&["#", "Amount"], rows));
    Ok(())
}
