// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::achievements::{BadgeStatus, evaluate};
use crate::commands::View;
use crate::leveling::LevelProgress;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Local;
use serde::Serialize;

const PROGRESS_WIDTH: usize = 20;

#[derive(Debug, Serialize)]
pub struct BadgeReport {
    pub progress: LevelProgress,
    pub badges: Vec<BadgeStatus>,
}

pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

pub fn handle(view: &View, m: &clap::ArgMatches) -> Result<()> {
    let dash = view.dashboard(&Local::now());
    let report = BadgeReport {
        progress: dash.progress,
        badges: evaluate(&dash.stats),
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let p = &report.progress;
    let crown = if p.level >= 10 { "👑" } else { "⭐" };
    println!(
        "{} Level {}  {} / {} EXP into this level ({} to go)",
        crown,
        p.level,
        p.into_level,
        p.band,
        p.remaining()
    );
    println!("{}", progress_bar(p.percent));

    let rows = report
        .badges
        .iter()
        .map(|b| {
            vec![
                b.achievement.icon.to_string(),
                b.achievement.title.to_string(),
                b.achievement.rarity.as_str().to_string(),
                b.achievement.description.to_string(),
                if b.unlocked { "unlocked" } else { "locked" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["", "Badge", "Rarity", "Goal", "Status"], rows)
    );
    Ok(())
}
