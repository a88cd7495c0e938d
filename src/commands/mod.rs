// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod exporter;
pub mod records;
pub mod reports;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::aggregate::Period;
use crate::config::Settings;
use crate::models::{Expense, Income};
use crate::store::{JsonFileSource, MemoryStore, RecordSource};
use crate::utils::{parse_date, today};

/// Records and reference date for one invocation, loaded wholesale up front.
#[derive(Debug, Clone)]
pub struct Session {
    pub income: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub today: NaiveDate,
    pub settings: Settings,
}

impl Session {
    pub fn open(m: &clap::ArgMatches) -> Result<Self> {
        let settings = match m.get_one::<String>("config") {
            Some(p) => Settings::load_from(&PathBuf::from(p))?,
            None => Settings::load()?,
        };
        let data = m
            .get_one::<String>("data")
            .map(PathBuf::from)
            .or_else(|| settings.data_file.clone());
        let (income, expenses) = match data {
            Some(path) => JsonFileSource::open(&path)?.load(),
            None => MemoryStore::seeded()?.load(),
        }
        .context("Load records")?;
        let today = match m.get_one::<String>("today") {
            Some(s) => parse_date(s)?,
            None => today(),
        };
        Ok(Self::new(income, expenses, today).with_settings(settings))
    }

    pub fn new(income: Vec<Income>, expenses: Vec<Expense>, today: NaiveDate) -> Self {
        Self {
            income,
            expenses,
            today,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

pub(crate) fn period_arg(sub: &clap::ArgMatches) -> Result<Period> {
    let raw = sub.get_one::<String>("period").map(String::as_str).unwrap_or("all");
    Ok(Period::parse(raw)?)
}
