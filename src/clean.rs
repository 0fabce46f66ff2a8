//! Removal of markup artifacts from raw field values before they are interpreted as dates.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static DASH_ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[nm]dash;").unwrap());
static PIPED_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+?)\|([^\]]+?)\]\]").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^|\]]+?)\]\]").unwrap());
static TEMPLATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^|}]+)\|([^}]+)\}\}").unwrap());
static KL_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",? kl\.\s?[0-9][0-9]?[:.][0-9][0-9](?:[:.][0-9][0-9])?$").unwrap());
static BARE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",? [0-9][0-9]?[:.][0-9][0-9](?::[0-9][0-9])?(?: [A-Z]{1,4})?$").unwrap());
static BRACKETS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()\[\]]").unwrap());

/// Strip comments, entities, wiki links, simple templates, clock times and stray brackets.
///
/// The passes are repeated until nothing changes, so cleaning an already-cleaned value is a
/// no-op. Every pass that changes something makes the value shorter, so this terminates.
pub fn pre_clean(raw: &str) -> String {
    let mut val = raw.to_string();
    loop {
        let next = clean_once(&val);
        if next == val {
            break;
        }
        val = next;
    }
    if val != raw {
        debug!("pre-cleaned {raw:?} as {val:?}");
    }
    val
}

fn clean_once(val: &str) -> String {
    let val = trim(val);
    let val = COMMENT_RE.replace_all(val, "");
    let val = DASH_ENTITY_RE.replace_all(&val, "–");
    let val = val.replace("&nbsp;", " ");
    let val = PIPED_LINK_RE.replace_all(&val, "$2");
    let val = LINK_RE.replace_all(&val, "$1");
    let val = TEMPLATE_RE.replace_all(&val, "$2");
    let val = KL_TIME_RE.replace(&val, "");
    let val = BARE_TIME_RE.replace(&val, "");
    let val = BRACKETS_RE.replace_all(&val, "");
    trim(&val).to_string()
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c == '.' || c == ',' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_entities() {
        assert_eq!(pre_clean("June 15, 2006 <!--DASHBot-->"), "June 15, 2006");
        assert_eq!(pre_clean("1.&ndash;2. mai 2010"), "1.–2. mai 2010");
        assert_eq!(pre_clean("1.&mdash;2. mai 2010"), "1.–2. mai 2010");
        assert_eq!(pre_clean("1.&nbsp;mai 2010"), "1. mai 2010");
    }

    #[test]
    fn unwraps_links_and_templates() {
        assert_eq!(pre_clean("[[2006]]-[[1. oktober|10-01]]"), "2006-10-01");
        assert_eq!(pre_clean("[[1. januar]] [[2014]]"), "1. januar 2014");
        assert_eq!(pre_clean("{{dato|1. mai 2010}}"), "1. mai 2010");
        assert_eq!(pre_clean("[[09.04.2008]]"), "09.04.2008");
    }

    #[test]
    fn strips_clock_times() {
        assert_eq!(pre_clean("30. november 2010 kl. 14:12"), "30. november 2010");
        assert_eq!(pre_clean("30. november 2010, kl.14.12.05"), "30. november 2010");
        assert_eq!(pre_clean("30. november 2010 14:12"), "30. november 2010");
        assert_eq!(pre_clean("30. november 2010, 14:12 CET"), "30. november 2010");
    }

    #[test]
    fn trims_punctuation_and_brackets() {
        assert_eq!(pre_clean("  (mai 2010). "), "mai 2010");
        assert_eq!(pre_clean(",2010,"), "2010");
        assert_eq!(pre_clean(""), "");
    }

    #[test]
    fn leaves_dates_alone() {
        for d in ["1. januar 2014", "2014-01-30", "1.1.2001", "januar–februar 2014", "ca. 2012"] {
            assert_eq!(pre_clean(d), d);
        }
    }

    #[test]
    fn cleaning_is_idempotent() {
        proptest::proptest!(|(s in r"[\[\]{}|()<>!&;:.,a-z0-9 –-]{0,40}")| {
            let once = pre_clean(&s);
            proptest::prop_assert_eq!(pre_clean(&once), once);
        })
    }

    #[test]
    fn cleaning_markup_fragments_is_idempotent() {
        let parts = vec!["[[", "]]", "|", "{{", "}}", "<!--", "-->", "&ndash;", "&nbsp;", " kl. ", "12:30", " ", ".", ",", "mai", "2014", "(", ")"];
        proptest::proptest!(|(v in proptest::collection::vec(proptest::sample::select(parts.clone()), 0..12))| {
            let s = v.concat();
            let once = pre_clean(&s);
            proptest::prop_assert_eq!(pre_clean(&once), once);
        })
    }
}
