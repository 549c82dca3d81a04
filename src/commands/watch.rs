// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::thread;
use std::time::Duration;

use crate::commands::View;
use crate::dashboard::Dashboard;
use crate::error::Result as SplitResult;
use crate::settings::Settings;
use crate::store::SqliteStore;
use crate::utils::{fmt_amount, pretty_table};
use anyhow::Result;
use chrono::{Local, NaiveDate};

/// Notices commits made through other connections, and the local day
/// rolling over.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last_version: Option<i64>,
    last_day: Option<NaiveDate>,
}

impl ChangeDetector {
    /// True on the first call and whenever the database changed since the
    /// previous one.
    pub fn changed(&mut self, store: &SqliteStore) -> SplitResult<bool> {
        let version = store.data_version()?;
        let changed = self.last_version != Some(version);
        self.last_version = Some(version);
        Ok(changed)
    }

    /// True on the first call and whenever `today` differs from the day seen
    /// last time. "Deals today" and the streak depend on it.
    pub fn day_changed(&mut self, today: NaiveDate) -> bool {
        let changed = self.last_day != Some(today);
        self.last_day = Some(today);
        changed
    }
}

pub fn render(dash: &Dashboard, settings: &Settings) -> String {
    let st = &dash.stats;
    let badges = if dash.unlocked.is_empty() {
        "-".to_string()
    } else {
        dash.unlocked
            .iter()
            .map(|a| format!("{} {}", a.icon, a.title))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let rows = vec![
        vec![settings.party_a.clone(), fmt_amount(&dash.totals.party_a)],
        vec![settings.party_b.clone(), fmt_amount(&dash.totals.party_b)],
        vec!["Deals".into(), st.total_transactions.to_string()],
        vec!["Deals today".into(), st.transactions_today.to_string()],
        vec!["Total profit".into(), fmt_amount(&st.total_profit)],
        vec!["Highest profit".into(), fmt_amount(&st.highest_profit)],
        vec!["Streak (days)".into(), st.consecutive_profit_days.to_string()],
        vec![
            "Level".into(),
            format!("{} ({:.0}%)", dash.progress.level, dash.progress.percent),
        ],
        vec!["Badges".into(), badges],
    ];
    pretty_table(&["", ""], rows).to_string()
}

fn refresh(view: &mut View, detector: &mut ChangeDetector) -> Result<bool> {
    // events from this process first, then anything committed elsewhere
    let applied = view.poll()?;
    if detector.changed(view.store())? {
        view.refetch()?;
        return Ok(true);
    }
    Ok(applied > 0)
}

pub fn handle(view: &mut View, m: &clap::ArgMatches) -> Result<()> {
    let interval = Duration::from_millis(*m.get_one::<u64>("interval-ms").unwrap_or(&1000));
    let mut detector = ChangeDetector::default();
    log::info!("watching for changes every {:?}", interval);
    loop {
        let new_day = detector.day_changed(Local::now().date_naive());
        match refresh(view, &mut detector).map(|changed| changed || new_day) {
            Ok(true) => {
                let settings = Settings::load(view.store().conn()).unwrap_or_else(|e| {
                    log::warn!("could not load settings: {:#}", e);
                    Settings::default()
                });
                let now = Local::now();
                let dash = view.dashboard(&now);
                println!("{}", now.format("%H:%M:%S"));
                println!("{}", render(&dash, &settings));
            }
            Ok(false) => {}
            Err(e) => log::warn!("refresh failed, will retry: {:#}", e),
        }
        thread::sleep(interval);
    }
}
