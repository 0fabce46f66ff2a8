//! Last-chance extraction of a date from free text.
//!
//! Unlike the ordered rules, every pattern here is tried and all interpretations are collected.
//! The caller decides what to do when more than one survives validation.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::suggest::rules::{expand_year, strip_zeros};
use crate::validate::UNDATED;
use crate::vocabulary::resolve_month;

static UNDATED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z()]*\s?(undated|unknown|ukjent|udatert|u\.å\.?|n\.d\.?)\s?[a-z()]*")
        .unwrap()
});
static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9][0-9]?)[\s.-]+([0-9][0-9]?)[\s.-]+([0-9]{4})").unwrap());
static MONTH_DAY_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\W\d_]{3,})\.?\s?([0-9][0-9]?),\s?([0-9]{4})").unwrap());
static YEAR_MONTH_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4}),?\s?([^\W\d_]+)\s?([0-9][0-9]?)").unwrap());
static PROSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)([0-9][0-9]?)(?:th|st|rd|nd)?(?: of)?\W{0,3}([^\W\d_]{3,})(?: of)?\W{0,3}([0-9]{2}(?:[0-9]{2})?)",
    )
    .unwrap()
});

/// All dates that can be read out of `val`, in pattern order, without duplicates.
///
/// Candidates are not validated.
pub fn candidates(val: &str) -> Vec<String> {
    let mut out = Vec::new();

    if UNDATED_RE.is_match(val) {
        out.push(UNDATED.to_string());
    }

    // 09-04-2008, 9. 4. 2008
    for c in isolated(&NUMERIC_RE, val) {
        out.push(format!("{}.{}.{}", &c[1], &c[2], &c[3]));
    }

    // July 6, 2011
    for c in MONTH_DAY_YEAR_RE.captures_iter(val) {
        if let Some(month) = resolve_month(&c[1]) {
            out.push(format!("{}. {month} {}", strip_zeros(&c[2]), &c[3]));
        }
    }

    // 2011, July 6
    for c in YEAR_MONTH_DAY_RE.captures_iter(val) {
        if let Some(month) = resolve_month(&c[2]) {
            out.push(format!("{}. {month} {}", strip_zeros(&c[3]), &c[1]));
        }
    }

    // 6th of July 2011, 6. juli, 2011, 30,november 2010
    for c in isolated(&PROSE_RE, val) {
        let (Some(month), Some(year)) = (resolve_month(&c[2]), expand_year(&c[3])) else {
            continue;
        };
        out.push(format!("{}. {month} {year}", strip_zeros(&c[1])));
    }

    let mut unique = Vec::with_capacity(out.len());
    for candidate in out {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

/// Non-overlapping matches of `re` that are not directly preceded or followed by a digit.
///
/// A match that touches a digit is retried one character further on.
fn isolated<'h>(re: &Regex, hay: &'h str) -> Vec<Captures<'h>> {
    let touches_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());

    let mut out = Vec::new();
    let mut start = 0;
    while start < hay.len() {
        let Some(c) = re.captures_at(hay, start) else {
            break;
        };
        let Some(m) = c.get(0) else {
            break;
        };
        if touches_digit(hay[..m.start()].chars().next_back())
            || touches_digit(hay[m.end()..].chars().next())
        {
            start = m.start() + hay[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        start = m.end().max(m.start() + 1);
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undated_synonyms() {
        for v in ["udatert", "Undated", "ukjent dato", "n.d", "u.å", "(unknown)"] {
            assert_eq!(candidates(v), vec!["udatert"], "{v}");
        }
    }

    #[test]
    fn numeric_dates() {
        assert_eq!(candidates("09-04-2008"), vec!["09.04.2008"]);
        assert_eq!(candidates("9. 4. 2008"), vec!["9.4.2008"]);
        assert!(candidates("109-04-2008").is_empty());
        assert!(candidates("09-04-20081").is_empty());
    }

    #[test]
    fn english_word_orders() {
        assert_eq!(candidates("July 6, 2011"), vec!["6. juli 2011"]);
        assert_eq!(candidates("June 15, 2006"), vec!["15. juni 2006"]);
        assert_eq!(candidates("2011, July 06"), vec!["6. juli 2011"]);
        assert_eq!(candidates("6th of July 2011"), vec!["6. juli 2011"]);
    }

    #[test]
    fn prose_dates() {
        assert_eq!(candidates("1. januar, 2014"), vec!["1. januar 2014"]);
        assert_eq!(candidates("30,november 2010"), vec!["30. november 2010"]);
        assert_eq!(candidates("30.novembir 2010"), vec!["30. november 2010"]);
        assert_eq!(candidates("12 September 2012"), vec!["12. september 2012"]);
        assert_eq!(candidates("14. October 2010"), vec!["14. oktober 2010"]);
        assert_eq!(candidates("12. maj 2012"), vec!["12. mai 2012"]);
        assert_eq!(candidates("1 mai 11"), vec!["1. mai 2011"]);
    }

    #[test]
    fn several_dates_are_all_reported() {
        assert_eq!(
            candidates("1.1.2011 og 2.2.2012"),
            vec!["1.1.2011", "2.2.2012"]
        );
    }

    #[test]
    fn nothing_to_find() {
        assert!(candidates("Nr 6, 2012").is_empty());
        assert!(candidates("2007 - uke 25").is_empty());
        assert!(candidates("").is_empty());
    }
}
