//! Predicates deciding whether a value already is a canonical year, month or date.

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::Problem;
use crate::vocabulary::{MONTHS, SEASONS, lower_first};

/// How many years into the future a publication year may lie.
pub const FUTURE_YEARS: i32 = 2;

/// Sentinel for a source that carries no date.
pub const UNDATED: &str = "udatert";

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{4})$").unwrap());
static CIRCA_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ca?\. ([0-9]{4})$").unwrap());

static ISO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap());
static DATE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(ca\. )?([0-9]{4})$").unwrap());
static YEAR_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{4})–([0-9]{4})$").unwrap());
static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9][0-9]?)\.([0-9][0-9]?)\.([0-9]{4})$").unwrap());
static DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9][0-9]?)\. ([a-z]+) ([0-9]{4})$").unwrap());
static DAY_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9][0-9]?)\.–([0-9][0-9]?)\. ([a-z]+) ([0-9]{4})$").unwrap());
static CROSS_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9][0-9]?)\. ([a-z]+) – ([0-9][0-9]?)\. ([a-z]+) ([0-9]{4})$").unwrap()
});
static CROSS_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9][0-9]?)\. ([a-z]+) ([0-9]{4}) – ([0-9][0-9]?)\. ([a-z]+) ([0-9]{4})$").unwrap()
});
static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-zæøåÆØÅ]+) ([0-9]{4})$").unwrap());
static MONTH_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-zæøåÆØÅ]+)–([a-zæøå]+) ([0-9]{4})$").unwrap());
static MONTH_YEAR_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-zæøåÆØÅ]+) ([0-9]{4}) – ([a-zæøå]+) ([0-9]{4})$").unwrap()
});

/// The current calendar year according to the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Validates values against a fixed reference year, which bounds how far into the future a
/// publication year may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    current_year: i32,
}

impl Default for Validator {
    fn default() -> Self {
        Self::at_year(current_year())
    }
}

impl Validator {
    pub fn at_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Empty, `YYYY`, `ca. YYYY` or `c. YYYY`.
    pub fn year(&self, value: &str) -> Result<(), Problem> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }
        if let Some(c) = YEAR_RE
            .captures(value)
            .or_else(|| CIRCA_YEAR_RE.captures(value))
        {
            return self.not_future(&c[1]);
        }
        Err(Problem::Unrecognized)
    }

    /// A canonical month name, or a season name when `include_seasons` is set. Only the first
    /// character is compared case-insensitively.
    pub fn month(&self, value: &str, include_seasons: bool) -> Result<(), Problem> {
        let value = value.trim();
        if value.chars().count() < 2 {
            return Err(Problem::UnknownMonthName);
        }
        let value = lower_first(value);
        let value = value.as_str();
        if MONTHS.contains(&value) || (include_seasons && SEASONS.contains(&value)) {
            Ok(())
        } else {
            Err(Problem::UnknownMonthName)
        }
    }

    /// Any of the canonical date shapes. The first shape whose pattern matches decides the
    /// outcome; its parts are then checked individually.
    pub fn date(&self, value: &str) -> Result<(), Problem> {
        let v = value.trim();

        if v.is_empty() || v == UNDATED || v == "u.d." {
            return Ok(());
        }

        // 2014-01-01
        if let Some(c) = ISO_RE.captures(v) {
            self.year(&c[1])?;
            numeric_month(&c[2])?;
            return day(&c[3], true);
        }

        // 2014, ca. 2014
        if let Some(c) = DATE_YEAR_RE.captures(v) {
            return self.year(&c[2]);
        }

        // 2014–2015
        if let Some(c) = YEAR_RANGE_RE.captures(v) {
            self.year(&c[1])?;
            return self.year(&c[2]);
        }

        // 1.1.2001
        if let Some(c) = NUMERIC_RE.captures(v) {
            day(&c[1], true)?;
            numeric_month(&c[2])?;
            return self.year(&c[3]);
        }

        // 1. januar 2014
        if let Some(c) = DAY_RE.captures(v) {
            day(&c[1], false)?;
            self.month(&c[2], false)?;
            return self.year(&c[3]);
        }

        // 1.–2. januar 2014
        if let Some(c) = DAY_RANGE_RE.captures(v) {
            day(&c[1], false)?;
            day(&c[2], false)?;
            self.month(&c[3], false)?;
            return self.year(&c[4]);
        }

        // 1. januar – 2. februar 2014
        if let Some(c) = CROSS_MONTH_RE.captures(v) {
            self.day_month(&c, 1)?;
            self.day_month(&c, 3)?;
            return self.year(&c[5]);
        }

        // 1. januar 2014 – 1. februar 2015
        if let Some(c) = CROSS_YEAR_RE.captures(v) {
            self.day_month(&c, 1)?;
            self.year(&c[3])?;
            self.day_month(&c, 4)?;
            return self.year(&c[6]);
        }

        // januar 2014, våren 2014
        if let Some(c) = MONTH_RE.captures(v) {
            self.month(&c[1], true)?;
            return self.year(&c[2]);
        }

        // januar–februar 2014
        if let Some(c) = MONTH_RANGE_RE.captures(v) {
            self.month(&c[1], true)?;
            self.month(&c[2], true)?;
            return self.year(&c[3]);
        }

        // januar 2014 – februar 2015
        if let Some(c) = MONTH_YEAR_RANGE_RE.captures(v) {
            self.month(&c[1], true)?;
            self.year(&c[2])?;
            self.month(&c[3], true)?;
            return self.year(&c[4]);
        }

        Err(Problem::Unrecognized)
    }

    fn day_month(&self, c: &Captures<'_>, first: usize) -> Result<(), Problem> {
        day(&c[first], false)?;
        self.month(&c[first + 1], false)
    }

    fn not_future(&self, year: &str) -> Result<(), Problem> {
        let year: i32 = year.parse().map_err(|_| Problem::Unrecognized)?;
        let limit = self.current_year + FUTURE_YEARS;
        if year > limit {
            return Err(Problem::FutureYear { year, limit });
        }
        Ok(())
    }
}

fn numeric_month(value: &str) -> Result<(), Problem> {
    let n: u32 = value.parse().map_err(|_| Problem::UnknownMonthNumber)?;
    if !(1..=12).contains(&n) {
        return Err(Problem::MonthOutOfRange);
    }
    Ok(())
}

fn day(value: &str, allow_zero_prefix: bool) -> Result<(), Problem> {
    let n: u32 = value.parse().map_err(|_| Problem::UnparseableDay)?;
    if !(1..=31).contains(&n) {
        return Err(Problem::DayOutOfRange);
    }
    if !allow_zero_prefix && n.to_string() != value {
        return Err(Problem::DayZeroPrefixed);
    }
    Ok(())
}

/// Check `value` as a year against today's date.
pub fn validate_year(value: &str) -> Result<(), Problem> {
    Validator::default().year(value)
}

/// Check `value` as a month (or season) name.
pub fn validate_month(value: &str, include_seasons: bool) -> Result<(), Problem> {
    Validator::default().month(value, include_seasons)
}

/// Check `value` as a date against today's date.
pub fn validate_date(value: &str) -> Result<(), Problem> {
    Validator::default().date(value)
}
