//! Spelling correction restricted to a closed vocabulary of month and season names.
//!
//! Candidates are generated by edit operations (deletion, adjacent transposition, substitution and
//! insertion over [`ALPHABET`]) and intersected with the vocabulary. Only tokens longer than five
//! characters are allowed a second round of edits; short tokens are too easily turned into
//! something else.

use std::collections::BTreeSet;

/// Letters used for substitutions and insertions.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzæøå";

/// Tokens up to this many characters only get single-edit corrections.
const SHORT_TOKEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// Nothing in the vocabulary is close enough.
    Unchanged,
    /// Exactly one vocabulary word matched (which may be the token itself).
    Corrected(&'static str),
    /// Several vocabulary words are equally close, sorted.
    Tied(Vec<&'static str>),
}

impl Correction {
    /// The word to use, if any. Ties resolve to the lexicographically smallest candidate so the
    /// result is stable between runs; callers that must not guess should match on
    /// [`Correction::Tied`] instead.
    pub fn best(&self) -> Option<&'static str> {
        match self {
            Correction::Unchanged => None,
            Correction::Corrected(w) => Some(*w),
            Correction::Tied(ws) => ws.first().copied(),
        }
    }
}

/// Correct `word` against `vocabulary`.
pub fn correct(word: &str, vocabulary: &[&'static str]) -> Correction {
    if let Some(w) = lookup(vocabulary, word) {
        return Correction::Corrected(w);
    }

    let mut candidates = known(edits1(word), vocabulary);
    if candidates.is_empty() && word.chars().count() > SHORT_TOKEN {
        candidates = known_edits2(word, vocabulary);
    }

    let mut candidates = candidates.into_iter();
    match (candidates.next(), candidates.len()) {
        (None, _) => Correction::Unchanged,
        (Some(w), 0) => Correction::Corrected(w),
        (Some(w), _) => Correction::Tied(std::iter::once(w).chain(candidates).collect()),
    }
}

/// Every string one edit away from `word`.
pub(crate) fn edits1(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::with_capacity(chars.len() * (2 * ALPHABET.len() + 2) + ALPHABET.len());

    for i in 0..=chars.len() {
        let (head, tail) = chars.split_at(i);
        if let Some((_, rest)) = tail.split_first() {
            out.push(head.iter().chain(rest).collect());
        }
        if tail.len() > 1 {
            out.push(
                head.iter()
                    .chain([&tail[1], &tail[0]])
                    .chain(&tail[2..])
                    .collect(),
            );
        }
        for c in ALPHABET.chars() {
            if let Some((_, rest)) = tail.split_first() {
                out.push(
                    head.iter()
                        .copied()
                        .chain(std::iter::once(c))
                        .chain(rest.iter().copied())
                        .collect(),
                );
            }
            out.push(
                head.iter()
                    .copied()
                    .chain(std::iter::once(c))
                    .chain(tail.iter().copied())
                    .collect(),
            );
        }
    }
    out
}

fn known_edits2(word: &str, vocabulary: &[&'static str]) -> BTreeSet<&'static str> {
    let first: BTreeSet<String> = edits1(word).into_iter().collect();
    first
        .iter()
        .flat_map(|e1| edits1(e1))
        .filter_map(|e2| lookup(vocabulary, &e2))
        .collect()
}

fn known(words: Vec<String>, vocabulary: &[&'static str]) -> BTreeSet<&'static str> {
    words
        .iter()
        .filter_map(|w| lookup(vocabulary, w))
        .collect()
}

fn lookup(vocabulary: &[&'static str], word: &str) -> Option<&'static str> {
    vocabulary.iter().copied().find(|v| *v == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &[&str] = &["januar", "juni", "juli", "mai", "mars", "høsten"];

    #[test]
    fn edits1_covers_each_operation() {
        let e = edits1("mai");
        assert!(e.contains(&"ma".to_string())); // deletion
        assert!(e.contains(&"ami".to_string())); // transposition
        assert!(e.contains(&"maj".to_string())); // substitution
        assert!(e.contains(&"maio".to_string())); // insertion
        assert!(e.contains(&"møi".to_string()));
    }

    #[test]
    fn single_edit_is_corrected() {
        assert_eq!(correct("mail", WORDS), Correction::Corrected("mai"));
        assert_eq!(correct("hosten", WORDS), Correction::Corrected("høsten"));
        assert_eq!(correct("januar", WORDS), Correction::Corrected("januar"));
    }

    #[test]
    fn long_tokens_get_two_edits() {
        assert_eq!(correct("jannuarr", WORDS), Correction::Corrected("januar"));
    }

    #[test]
    fn short_tokens_do_not_get_two_edits() {
        // "mrs" is one edit from "mars"; "mxxs" would need two.
        assert_eq!(correct("mrs", WORDS), Correction::Corrected("mars"));
        assert_eq!(correct("mxxs", WORDS), Correction::Unchanged);
    }

    #[test]
    fn equally_close_words_are_reported_as_a_tie() {
        let c = correct("jui", WORDS);
        assert_eq!(c, Correction::Tied(vec!["juli", "juni"]));
        assert_eq!(c.best(), Some("juli"));
    }

    #[test]
    fn unknown_words_are_left_alone() {
        assert_eq!(correct("nr", WORDS), Correction::Unchanged);
        assert_eq!(Correction::Unchanged.best(), None);
    }
}
