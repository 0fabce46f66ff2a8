//! Month and season names accepted in canonical dates, plus the aliases we know how to map onto
//! them (abbreviations, English, Swedish and Russian spellings).

use tracing::debug;

use crate::correct::{Correction, correct};

pub const MONTHS: [&str; 12] = [
    "januar",
    "februar",
    "mars",
    "april",
    "mai",
    "juni",
    "juli",
    "august",
    "september",
    "oktober",
    "november",
    "desember",
];

/// Seasons carry the definite-article suffix in canonical form.
pub const SEASONS: [&str; 5] = ["våren", "sommeren", "høsten", "vinteren", "julen"];

const MONTHS_AND_SEASONS: [&str; 17] = [
    "januar",
    "februar",
    "mars",
    "april",
    "mai",
    "juni",
    "juli",
    "august",
    "september",
    "oktober",
    "november",
    "desember",
    "våren",
    "sommeren",
    "høsten",
    "vinteren",
    "julen",
];

const MONTH_ALIASES: &[(&str, &str)] = &[
    ("jan", "januar"),
    ("feb", "februar"),
    ("mar", "mars"),
    ("apr", "april"),
    ("jun", "juni"),
    ("jul", "juli"),
    ("aug", "august"),
    ("sep", "september"),
    ("sept", "september"),
    ("oct", "oktober"),
    ("okt", "oktober"),
    ("nov", "november"),
    ("dec", "desember"),
    ("des", "desember"),
    ("march", "mars"),
    ("января", "januar"),
    ("февраля", "februar"),
    ("марта", "mars"),
    ("апреля", "april"),
    ("мая", "mai"),
    ("июня", "juni"),
    ("июля", "juli"),
    ("августа", "august"),
    ("сентября", "september"),
    ("октября", "oktober"),
    ("ноября", "november"),
    ("декабря", "desember"),
];

const SEASON_ALIASES: &[(&str, &str)] = &[
    ("vår", "våren"),
    ("sommer", "sommeren"),
    ("høst", "høsten"),
    ("vinter", "vinteren"),
    ("spring", "våren"),
    ("summer", "sommeren"),
    ("autumn", "høsten"),
    ("fall", "høsten"),
    ("winter", "vinteren"),
    ("christmas", "julen"),
];

/// Which names a lookup may resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Months,
    MonthsAndSeasons,
}

impl Scope {
    /// The closed vocabulary the corrector is allowed to answer with.
    pub fn words(self) -> &'static [&'static str] {
        match self {
            Scope::Months => &MONTHS,
            Scope::MonthsAndSeasons => &MONTHS_AND_SEASONS,
        }
    }
}

pub fn is_month(name: &str) -> bool {
    MONTHS.contains(&name)
}

pub fn is_season(name: &str) -> bool {
    SEASONS.contains(&name)
}

/// Canonical name of month number `n` (1-based).
pub fn month_name(n: u32) -> Option<&'static str> {
    let idx = usize::try_from(n).ok()?.checked_sub(1)?;
    MONTHS.get(idx).copied()
}

/// Lower-case only the first character, leaving the rest untouched.
pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve a month token to its canonical name.
///
/// A numeric token 1-12 is accepted as-is. Otherwise the lower-cased token is looked up among the
/// canonical names, then the aliases, and finally handed to the corrector.
pub fn resolve_month(token: &str) -> Option<String> {
    let token = token.to_lowercase();
    if let Ok(n) = token.parse::<u32>() {
        return (1..=12).contains(&n).then_some(token);
    }
    resolve(&token, Scope::Months)
}

/// Like [`resolve_month`], but seasons are accepted too and numbers are not.
pub fn resolve_month_or_season(token: &str) -> Option<String> {
    resolve(&token.to_lowercase(), Scope::MonthsAndSeasons)
}

fn resolve(token: &str, scope: Scope) -> Option<String> {
    if scope.words().contains(&token) {
        return Some(token.to_string());
    }
    if let Some(name) = alias(token, scope) {
        return Some(name.to_string());
    }
    match correct(token, scope.words()) {
        Correction::Unchanged => {
            debug!("could not match {token:?} to a month or season name");
            None
        }
        Correction::Corrected(w) => Some(w.to_string()),
        tied @ Correction::Tied(_) => {
            let best = tied.best()?;
            debug!(?tied, "{token:?} is equally close to several names, using {best:?}");
            Some(best.to_string())
        }
    }
}

fn alias(token: &str, scope: Scope) -> Option<&'static str> {
    let seasons: &[(&str, &str)] = match scope {
        Scope::Months => &[],
        Scope::MonthsAndSeasons => SEASON_ALIASES,
    };
    MONTH_ALIASES
        .iter()
        .chain(seasons)
        .find(|(from, _)| *from == token)
        .map(|(_, to)| *to)
}

/// Whether `token` is a known alias (not a canonical name) in `scope`.
pub fn is_alias(token: &str, scope: Scope) -> bool {
    alias(token, scope).is_some()
}
