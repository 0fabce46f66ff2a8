use std::{
    fmt::Write as _,
    io::{IsTerminal, stderr},
};

use datofiks::Report;
use owo_colors::OwoColorize;

/// Whether stderr output should be styled. `NO_COLOR` always wins.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty()) && stderr().is_terminal()
}

/// `✓ <good> ✗ <bad>`, the last line printed by every command.
pub fn summary(good: usize, bad: usize, color: bool) -> String {
    let good = format!("✓ {good}");
    let bad = format!("✗ {bad}");
    if color {
        format!("{} {}", good.green(), bad.red())
    } else {
        format!("{good} {bad}")
    }
}

/// A report with the record it came from.
pub struct Entry<'a> {
    pub source: &'a str,
    pub report: &'a Report,
}

/// The unresolved fields of every record as a wikitable, preceded by the totals.
pub fn wikitable(entries: &[Entry<'_>]) -> String {
    let mut total = Report::default();
    for e in entries {
        total.absorb(e.report.clone());
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Checked {} fields: {} ok, {} modified, {} unresolved.\n",
        total.checked,
        total.ok(),
        total.modified.len(),
        total.unresolved.len()
    );
    out.push_str("{| class=\"wikitable sortable\"\n! Record !! Field !! Value !! Problem\n");
    for e in entries {
        for u in &e.report.unresolved {
            let _ = writeln!(
                out,
                "|-\n| {} || {} || <nowiki>{}</nowiki> || {}",
                e.source, u.key, u.value, u.problem
            );
        }
    }
    out.push_str("|}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use datofiks::{Problem, Unresolved};

    #[test]
    fn plain_summary() {
        assert_eq!(summary(3, 1, false), "✓ 3 ✗ 1");
    }

    #[test]
    fn colored_summary_strips_to_plain() {
        let s = summary(3, 1, true);
        let plain = String::from_utf8(strip_ansi_escapes::strip(s.as_bytes())).expect("utf8");
        assert_eq!(plain, "✓ 3 ✗ 1");
    }

    #[test]
    fn table_lists_unresolved_fields() {
        let report = Report {
            checked: 3,
            modified: vec![],
            unresolved: vec![Unresolved {
                key: "dato".into(),
                value: "Nr 6, 2012".into(),
                problem: Problem::Unrecognized,
            }],
        };
        let table = wikitable(&[Entry {
            source: "refs.bib:nilsen1951",
            report: &report,
        }]);
        assert!(table.starts_with("Checked 3 fields: 2 ok, 0 modified, 1 unresolved."));
        assert!(table.contains(
            "| refs.bib:nilsen1951 || dato || <nowiki>Nr 6, 2012</nowiki> || not an accepted date or year format"
        ));
        assert!(table.ends_with("|}\n"));
    }
}
