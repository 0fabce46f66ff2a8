use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use datofiks::{
    MemoFile, Problem, ReconcileOptions, Report, Reviewer, Suggestion, reconcile,
    validate::current_year,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::cli::{Cli, Command, Source};

mod cli;
mod logging;
mod report;
mod source;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logging::init_logging(args.verbose);

    let opts = ReconcileOptions {
        current_year: args.current_year.unwrap_or_else(current_year),
    };
    let color = report::use_color();

    match args.command {
        Command::Check { from } => check(&from, &opts, color),
        Command::Suggest { values, year } => suggest(&values, year, &opts, color),
        Command::Fix {
            files,
            interactive,
            memo,
            write,
            report: report_path,
        } => {
            let memo = interactive.then_some(memo);
            fix(&files, memo.as_deref(), write, report_path.as_deref(), &opts, color)
        }
    }
}

fn check(from: &[Source], opts: &ReconcileOptions, color: bool) -> anyhow::Result<()> {
    let suggester = opts.suggester();
    let (mut good, mut bad) = (0, 0);
    for src in from {
        let values = match src.values() {
            Ok(v) => v,
            Err(e) => {
                error!("{e:#}");
                bad += 1;
                continue;
            }
        };
        for v in values {
            match suggester.validator().date(&v) {
                Ok(()) => {
                    good += 1;
                    println!("{v}\tok");
                }
                Err(problem) => {
                    bad += 1;
                    println!("{v}\t{problem}");
                }
            }
        }
    }
    eprintln!("{}", report::summary(good, bad, color));
    Ok(())
}

fn suggest(values: &[String], year: bool, opts: &ReconcileOptions, color: bool) -> anyhow::Result<()> {
    let suggester = opts.suggester();
    let (mut good, mut bad) = (0, 0);
    for v in values {
        let (found, note) = if year {
            match suggester.year(v) {
                Some(y) => (Some(y), "year".to_string()),
                None => (None, "unresolved".to_string()),
            }
        } else {
            match suggester.date(v) {
                Suggestion::Valid(d) => (Some(d), "valid".to_string()),
                Suggestion::Resolved { value, rule } => (Some(value), rule.to_string()),
                Suggestion::Ambiguous(candidates) => {
                    (None, Problem::Ambiguous { candidates }.to_string())
                }
                Suggestion::Unresolved => (None, "unresolved".to_string()),
            }
        };
        if found.is_some() {
            good += 1;
        } else {
            bad += 1;
        }
        println!("{v}\t{}\t{note}", found.unwrap_or_default());
    }
    eprintln!("{}", report::summary(good, bad, color));
    Ok(())
}

fn fix(
    files: &[PathBuf],
    memo: Option<&Path>,
    write: bool,
    report_path: Option<&Path>,
    opts: &ReconcileOptions,
    color: bool,
) -> anyhow::Result<()> {
    let mut reviewer = match memo {
        Some(path) => Some(Reviewer::new(MemoFile::open(path)?, prompt)),
        None => None,
    };

    let mut reports: Vec<(String, Report)> = Vec::new();
    let mut failed = 0;

    for path in files {
        let mut doc = match source::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                error!("{e:#}");
                failed += 1;
                continue;
            }
        };

        let bar = ProgressBar::new(doc.record_count() as u64);
        if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message(path.display().to_string());

        doc.for_each_record(&mut |name, store| {
            let report = match reviewer.as_mut() {
                Some(r) => {
                    let mut ask = |v: &str| bar.suspend(|| r.review(v));
                    reconcile(store, opts, Some(&mut ask))
                }
                None => reconcile(store, opts, None),
            };
            reports.push((format!("{}:{name}", path.display()), report));
            bar.inc(1);
        });
        bar.finish_and_clear();

        let rendered = doc.render()?;
        if write {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        } else {
            print!("{rendered}");
        }
    }

    let modified: usize = reports.iter().map(|(_, r)| r.modified.len()).sum();
    let unresolved: usize = reports.iter().map(|(_, r)| r.unresolved.len()).sum();

    if let Some(path) = report_path {
        let entries: Vec<report::Entry<'_>> = reports
            .iter()
            .map(|(name, r)| report::Entry {
                source: name,
                report: r,
            })
            .collect();
        fs::write(path, report::wikitable(&entries))
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    eprintln!("{}", report::summary(modified, unresolved + failed, color));
    Ok(())
}

/// Ask on the terminal for a replacement date. Anything that goes wrong counts as no answer.
fn prompt(original: &str) -> String {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "No suggestion for {original:?}. Correct date (empty to skip): ");
    let _ = stderr.flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(_) => line.trim().to_string(),
        Err(e) => {
            error!("could not read answer: {e}");
            String::new()
        }
    }
}
