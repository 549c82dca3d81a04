// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Geometric experience curve.
//!
//! Each level has its own band width: `floor(BASE_XP * GROWTH^(level-1))`.
//! Reaching level `n + 1` takes the sum of the bands of levels `1..=n`.

use serde::Serialize;

pub const BASE_XP: u64 = 1000;
pub const GROWTH: f64 = 1.5;

/// Width of the band for `level`, i.e. the experience needed to leave it.
pub fn experience_for_level(level: u32) -> u64 {
    if level == 0 {
        return 0;
    }
    let width = (BASE_XP as f64) * GROWTH.powi(level as i32 - 1);
    if width >= u64::MAX as f64 {
        u64::MAX
    } else {
        width.floor() as u64
    }
}

/// Total experience needed to reach `level`.
pub fn cumulative_experience_before(level: u32) -> u64 {
    (1..level).fold(0u64, |acc, l| acc.saturating_add(experience_for_level(l)))
}

pub fn level_from_experience(total: u64) -> u32 {
    let mut level = 1;
    let mut threshold = experience_for_level(1);
    while total >= threshold && threshold < u64::MAX {
        level += 1;
        threshold = threshold.saturating_add(experience_for_level(level));
    }
    level
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub experience: u64,
    /// Experience earned inside the current band.
    pub into_level: u64,
    /// Width of the current band.
    pub band: u64,
    /// `into_level / band` as a percentage in `[0, 100]`.
    pub percent: f64,
}

impl LevelProgress {
    pub fn from_experience(experience: u64) -> Self {
        let level = level_from_experience(experience);
        let floor = cumulative_experience_before(level);
        let band = experience_for_level(level);
        let into_level = experience.saturating_sub(floor);
        let percent = if band == 0 {
            0.0
        } else {
            (into_level as f64 / band as f64 * 100.0).clamp(0.0, 100.0)
        };
        LevelProgress {
            level,
            experience,
            into_level,
            band,
            percent,
        }
    }

    /// Experience still missing before the next level.
    pub fn remaining(&self) -> u64 {
        self.band.saturating_sub(self.into_level)
    }
}
