// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod achievements;
pub mod amount;
pub mod calculator;
pub mod cli;
pub mod commands;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod feed;
pub mod leveling;
pub mod live;
pub mod models;
pub mod settings;
pub mod stats;
pub mod store;
pub mod utils;
