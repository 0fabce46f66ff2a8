//! Suggest a canonical replacement for a date or year value.
//!
//! A value goes through these stages, stopping at the first that produces something:
//!
//! 1. the value as given, if it is already canonical;
//! 2. the value after [`pre_clean`];
//! 3. the ordered rewrite rules;
//! 4. the fuzzy pass, only if no ordered rule matched at all;
//! 5. a caller-supplied fallback, typically a human.
//!
//! A bare year such as `c. 2012` is not a date; reading a value as a year is left to
//! [`Suggester::year`], which the reconciler tries next.
//!
//! Whatever comes out of stages 2-5 is re-validated and dropped (with a warning) if it is not
//! canonical, so an invalid suggestion is never returned.

pub mod fuzzy;
mod rules;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::clean::pre_clean;
use crate::validate::Validator;

pub(crate) use rules::expand_year;

static CIRCA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^ca?\.? ?([0-9]{4})$").unwrap());

/// Which stage produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Cleanup,
    ExactYear,
    YearRange,
    IsoDate,
    IsoMonth,
    ShortYear,
    Slash,
    CrossYearRange,
    CrossMonthRange,
    DayRange,
    MonthYear,
    MonthRange,
    Fuzzy,
    /// A year field rewritten as a year.
    Year,
    /// A date field reduced to a year.
    YearFallback,
    Review,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Cleanup => "cleanup",
            Rule::ExactYear => "exact-year",
            Rule::YearRange => "year-range",
            Rule::IsoDate => "iso-date",
            Rule::IsoMonth => "iso-month",
            Rule::ShortYear => "short-year",
            Rule::Slash => "slash",
            Rule::CrossYearRange => "cross-year-range",
            Rule::CrossMonthRange => "cross-month-range",
            Rule::DayRange => "day-range",
            Rule::MonthYear => "month-year",
            Rule::MonthRange => "month-range",
            Rule::Fuzzy => "fuzzy",
            Rule::Year => "year",
            Rule::YearFallback => "year-fallback",
            Rule::Review => "review",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// The value was canonical to begin with (modulo surrounding whitespace).
    Valid(String),
    Resolved { value: String, rule: Rule },
    /// The fuzzy pass found more than one reading, valid or not.
    Ambiguous(Vec<String>),
    Unresolved,
}

impl Suggestion {
    pub fn value(&self) -> Option<&str> {
        match self {
            Suggestion::Valid(v) | Suggestion::Resolved { value: v, .. } => Some(v),
            Suggestion::Ambiguous(_) | Suggestion::Unresolved => None,
        }
    }

    pub fn into_value(self) -> Option<String> {
        match self {
            Suggestion::Valid(v) | Suggestion::Resolved { value: v, .. } => Some(v),
            Suggestion::Ambiguous(_) | Suggestion::Unresolved => None,
        }
    }
}

/// Asked for a replacement when nothing automatic worked. An empty answer means "leave it".
pub type Fallback<'a> = &'a mut dyn FnMut(&str) -> String;

#[derive(Debug, Clone, Copy, Default)]
pub struct Suggester {
    validator: Validator,
}

impl Suggester {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Suggest a canonical year. `c. 2012`, `ca 2012` and friends are written as `ca. 2012`.
    pub fn year(&self, raw: &str) -> Option<String> {
        let cleaned = pre_clean(raw);
        let candidate = match CIRCA_RE.captures(&cleaned) {
            Some(c) => format!("ca. {}", &c[1]),
            None => cleaned,
        };
        match self.validator.year(&candidate) {
            Ok(()) => Some(candidate),
            Err(problem) => {
                debug!(%problem, "no year suggestion for {raw:?}");
                None
            }
        }
    }

    pub fn date(&self, raw: &str) -> Suggestion {
        self.date_with(raw, None)
    }

    /// Like [`Suggester::date`], but ask `fallback` when every automatic stage came up empty.
    /// Ambiguous values are returned as such and never handed to the fallback.
    pub fn date_with(&self, raw: &str, fallback: Option<Fallback<'_>>) -> Suggestion {
        if self.validator.date(raw).is_ok() {
            debug!("{raw:?} is already a valid date");
            return Suggestion::Valid(raw.trim().to_string());
        }

        let cleaned = pre_clean(raw);
        let found = self.automatic(&cleaned);
        if found != Suggestion::Unresolved {
            return found;
        }

        info!("found no date suggestion for {raw:?}");
        let Some(ask) = fallback else {
            return Suggestion::Unresolved;
        };
        let answer = ask(raw);
        self.reviewed(raw, &answer)
    }

    /// Accept a replacement for `raw` given by a person, if it is canonical. An empty answer
    /// leaves the value unresolved.
    pub fn reviewed(&self, raw: &str, answer: &str) -> Suggestion {
        let answer = answer.trim();
        if answer.is_empty() {
            return Suggestion::Unresolved;
        }
        self.verified(raw, answer.to_string(), Rule::Review)
    }

    fn automatic(&self, cleaned: &str) -> Suggestion {
        if self.validator.date(cleaned).is_ok() {
            return Suggestion::Resolved {
                value: cleaned.to_string(),
                rule: Rule::Cleanup,
            };
        }

        match rules::first_match(cleaned) {
            rules::Match::Rewritten(rule, value) => return self.verified(cleaned, value, rule),
            rules::Match::Failed(rule) => {
                debug!(%rule, "{cleaned:?} matched but could not be rewritten");
            }
            rules::Match::None => {
                let mut found = fuzzy::candidates(cleaned);
                match found.len() {
                    0 => {}
                    1 => return self.verified(cleaned, found.remove(0), Rule::Fuzzy),
                    _ => {
                        info!(candidates = ?found, "{cleaned:?} can be read several ways");
                        return Suggestion::Ambiguous(found);
                    }
                }
            }
        }
        Suggestion::Unresolved
    }

    fn verified(&self, from: &str, value: String, rule: Rule) -> Suggestion {
        match self.validator.date(&value) {
            Ok(()) => {
                info!(%rule, "suggests to change {from:?} to {value:?}");
                Suggestion::Resolved { value, rule }
            }
            Err(problem) => {
                warn!(%rule, %problem, "dropping invalid suggestion {value:?} for {from:?}");
                Suggestion::Unresolved
            }
        }
    }
}

/// [`Suggester::year`] against the current calendar year.
pub fn suggest_year(value: &str) -> Option<String> {
    Suggester::default().year(value)
}

/// [`Suggester::date_with`] against the current calendar year, reduced to the suggested value.
pub fn suggest_date(value: &str, fallback: Option<Fallback<'_>>) -> Option<String> {
    Suggester::default().date_with(value, fallback).into_value()
}
