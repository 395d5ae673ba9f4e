use chrono::{Datelike, NaiveDate};
use derive_more::Deref;
use std::collections::HashSet;

use crate::error::Result;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

#[derive(Clone, Debug, Deref, PartialEq, Eq)]
pub struct MonthStarts(HashSet<u32>);

impl MonthStarts {
    pub fn of_year(year: i32) -> Self {
        MonthStarts(
            (1..=12)
                .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
                .map(|first| first.ordinal())
                .collect(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearProgress {
    year: i32,
    day_of_year: u32,
    total_days: u32,
}

impl YearProgress {
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        YearProgress {
            year: date.year(),
            day_of_year: date.ordinal(),
            total_days: days_of_year(date.year()),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    pub fn is_leap(&self) -> bool {
        self.total_days == 366
    }

    pub fn percent(&self) -> f32 {
        self.day_of_year as f32 * 100.0 / self.total_days as f32
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent())
    }

    pub fn caption(&self) -> String {
        format!("{} Day started", self.day_of_year)
    }

    pub fn month_starts(&self) -> MonthStarts {
        MonthStarts::of_year(self.year)
    }
}
