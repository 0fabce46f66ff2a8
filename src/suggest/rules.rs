use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::suggest::Rule;
use crate::vocabulary::{month_name, resolve_month, resolve_month_or_season};

/// Two-digit years at or above this are read as 19xx, below it as 20xx.
pub(crate) const PIVOT: u32 = 20;

static EXACT_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{4})$").unwrap());
static YEAR_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})\s?[-–]\s?([0-9]{2,4})$").unwrap());
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\W{0,2}([0-9]{4})[-–]([0-9][0-9]?)[-–]([0-9][0-9]?)\W{0,2}$").unwrap());
static ISO_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\W{0,2}([0-9]{4})[-–]([0-9][0-9]?)\W{0,2}$").unwrap());
static SHORT_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9][0-9]?)\.([0-9][0-9]?)\.([0-9]{2})$").unwrap());
static SLASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9][0-9]?)/([0-9][0-9]?)[- /]+([0-9]{2,4})$").unwrap());
static CROSS_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9][0-9]?)[.,]?\s?([a-zA-Z]+) ([0-9]{4})\s?[-–]\s?([0-9][0-9]?)[.,]?\s?([a-zA-Z]+) ([0-9]{4})$",
    )
    .unwrap()
});
static CROSS_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9][0-9]?)[.,]?\s?([a-zA-Z]+)\s?[-–]\s?([0-9][0-9]?)[.,]?\s?([a-zA-Z]+) ([0-9]{4})$")
        .unwrap()
});
static DAY_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9][0-9]?)[.,]?\s?[-–]([0-9][0-9]?)[.,]?\s? ([a-zA-Z]+) ([0-9]{4})$").unwrap()
});
static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^a-zA-Z0-9]{0,2}([a-zA-ZæøåÆØÅ]+)[., ]{1,2}([0-9]{4})[^a-zA-Z0-9]{0,2}$").unwrap()
});
static MONTH_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-ZæøåÆØÅ]+)\s?[-–/]\s?([a-zA-ZæøåÆØÅ]+) ([0-9]{4})$").unwrap()
});

type RewriteFn = fn(&Captures<'_>) -> Option<String>;

struct Rewrite {
    rule: Rule,
    pattern: &'static Lazy<Regex>,
    rewrite: RewriteFn,
}

/// The ordered cascade.
///
/// NOTE: Ordering is important here, as it signifies priority. The first pattern that matches
/// decides the outcome, even when its rewrite then fails (an unknown month name, say). A later,
/// looser pattern never gets to reinterpret the value.
static CASCADE: &[Rewrite] = &[
    Rewrite {
        rule: Rule::ExactYear,
        pattern: &EXACT_YEAR_RE,
        rewrite: exact_year,
    },
    Rewrite {
        rule: Rule::YearRange,
        pattern: &YEAR_RANGE_RE,
        rewrite: year_range,
    },
    Rewrite {
        rule: Rule::IsoDate,
        pattern: &ISO_DATE_RE,
        rewrite: iso_date,
    },
    Rewrite {
        rule: Rule::IsoMonth,
        pattern: &ISO_MONTH_RE,
        rewrite: iso_month,
    },
    Rewrite {
        rule: Rule::ShortYear,
        pattern: &SHORT_YEAR_RE,
        rewrite: short_year,
    },
    Rewrite {
        rule: Rule::Slash,
        pattern: &SLASH_RE,
        rewrite: slash,
    },
    Rewrite {
        rule: Rule::CrossYearRange,
        pattern: &CROSS_YEAR_RE,
        rewrite: cross_year,
    },
    Rewrite {
        rule: Rule::CrossMonthRange,
        pattern: &CROSS_MONTH_RE,
        rewrite: cross_month,
    },
    Rewrite {
        rule: Rule::DayRange,
        pattern: &DAY_RANGE_RE,
        rewrite: day_range,
    },
    Rewrite {
        rule: Rule::MonthYear,
        pattern: &MONTH_YEAR_RE,
        rewrite: month_year,
    },
    Rewrite {
        rule: Rule::MonthRange,
        pattern: &MONTH_RANGE_RE,
        rewrite: month_range,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Match {
    /// No pattern matched.
    None,
    /// A pattern matched but its parts could not be interpreted.
    Failed(Rule),
    Rewritten(Rule, String),
}

/// Run `val` through the cascade, stopping at the first pattern that matches.
pub(crate) fn first_match(val: &str) -> Match {
    for step in CASCADE {
        if let Some(c) = step.pattern.captures(val) {
            return match (step.rewrite)(&c) {
                Some(v) => Match::Rewritten(step.rule, v),
                None => Match::Failed(step.rule),
            };
        }
    }
    Match::None
}

/// Expand a two- or four-digit year using the fixed [`PIVOT`].
pub(crate) fn expand_year(y: &str) -> Option<String> {
    match y.len() {
        4 => Some(y.to_string()),
        2 => {
            let n: u32 = y.parse().ok()?;
            let century = if n >= PIVOT { "19" } else { "20" };
            Some(format!("{century}{y}"))
        }
        _ => None,
    }
}

pub(crate) fn strip_zeros(day: &str) -> &str {
    day.trim_start_matches('0')
}

fn exact_year(c: &Captures<'_>) -> Option<String> {
    Some(c[1].to_string())
}

// 2004-2005, 2004 - 05 -> 2004–2005
fn year_range(c: &Captures<'_>) -> Option<String> {
    let start = &c[1];
    let end = &c[2];
    match end.len() {
        4 => Some(format!("{start}–{end}")),
        2 => {
            let (century, decade) = (start.get(..2)?, start.get(2..)?);
            let span = end.parse::<i32>().ok()? - decade.parse::<i32>().ok()?;
            (1..=9)
                .contains(&span)
                .then(|| format!("{start}–{century}{end}"))
        }
        _ => None,
    }
}

// 2014-1-5, 2014–01–05 -> 2014-01-05
fn iso_date(c: &Captures<'_>) -> Option<String> {
    let month: u32 = c[2].parse().ok()?;
    let day: u32 = c[3].parse().ok()?;
    Some(format!("{}-{month:02}-{day:02}", &c[1]))
}

// 2014-05 -> mai 2014
fn iso_month(c: &Captures<'_>) -> Option<String> {
    let name = month_name(c[2].parse().ok()?)?;
    Some(format!("{name} {}", &c[1]))
}

// 1.1.11 -> 1.1.2011, 05.5.15 -> 5.5.2015
fn short_year(c: &Captures<'_>) -> Option<String> {
    let year = expand_year(&c[3])?;
    let (day, month) = (&c[1], &c[2]);
    if day.starts_with('0') && month.len() == 1 {
        return Some(format!("{}.{month}.{year}", strip_zeros(day)));
    }
    if month.starts_with('0') && day.len() == 1 {
        return Some(format!("{day}.{}.{year}", strip_zeros(month)));
    }
    Some(format!("{day}.{month}.{year}"))
}

// 1/10-11 -> 2011-10-01; day/month order is the usual one in Norwegian sources.
fn slash(c: &Captures<'_>) -> Option<String> {
    let year = expand_year(&c[3])?;
    let day: u32 = c[1].parse().ok()?;
    let month: u32 = c[2].parse().ok()?;
    Some(format!("{year}-{month:02}-{day:02}"))
}

// 1. januar 2014 - 1. februar 2015
fn cross_year(c: &Captures<'_>) -> Option<String> {
    let m1 = resolve_month(&c[2])?;
    let m2 = resolve_month(&c[5])?;
    Some(format!(
        "{}. {m1} {} – {}. {m2} {}",
        strip_zeros(&c[1]),
        &c[3],
        strip_zeros(&c[4]),
        &c[6]
    ))
}

// 1. januar - 1. februar 2015
fn cross_month(c: &Captures<'_>) -> Option<String> {
    let m1 = resolve_month(&c[2])?;
    let m2 = resolve_month(&c[4])?;
    Some(format!(
        "{}. {m1} – {}. {m2} {}",
        strip_zeros(&c[1]),
        strip_zeros(&c[3]),
        &c[5]
    ))
}

// 1.-2. februar 2015
fn day_range(c: &Captures<'_>) -> Option<String> {
    let month = resolve_month(&c[3])?;
    Some(format!(
        "{}.–{}. {month} {}",
        strip_zeros(&c[1]),
        strip_zeros(&c[2]),
        &c[4]
    ))
}

// January 2014, januar, 2014, høst 2014 -> januar 2014
fn month_year(c: &Captures<'_>) -> Option<String> {
    let name = resolve_month_or_season(&c[1])?;
    Some(format!("{name} {}", &c[2]))
}

// februar-mars 2010, vår–sommer 2012, juni/juli 2012
fn month_range(c: &Captures<'_>) -> Option<String> {
    let m1 = resolve_month_or_season(&c[1])?;
    let m2 = resolve_month_or_season(&c[2])?;
    Some(format!("{m1}–{m2} {}", &c[3]))
}
