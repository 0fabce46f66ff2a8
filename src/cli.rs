use std::{fs, path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log more; repeat for even more. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reference year for the bound on future publication years [default: this year]
    #[arg(long, value_name = "YEAR", global = true)]
    pub current_year: Option<i32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether values are canonical dates
    Check {
        #[arg(value_name = "SRC", required = true)]
        from: Vec<Source>,
    },
    /// Suggest canonical replacements for values
    Suggest {
        #[arg(value_name = "VALUE", required = true)]
        values: Vec<String>,
        /// Read the values as years rather than dates
        #[arg(long)]
        year: bool,
    },
    /// Fix the date fields of every record in BibLaTeX or JSON files
    Fix {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Ask for a replacement when nothing automatic works
        #[arg(short, long)]
        interactive: bool,
        /// Where answers given with `--interactive` are remembered
        #[arg(long, value_name = "PATH", default_value = "checked_manually.txt")]
        memo: PathBuf,
        /// Write the fixed files back instead of printing them
        #[arg(short, long)]
        write: bool,
        /// Write a wikitable of the fields that could not be fixed
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
}

#[derive(Clone, Debug)]
/// Defines where values to check come from, which can either be
///
/// - a single value given on the command line, or
/// - a text file with one value per line.
pub enum Source {
    Value(String),
    File(PathBuf),
}

impl FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // NOTE: A value that happens to name an existing file is read as that file. Dates rarely
        // look like paths, so we don't offer a way around this.

        // Is this a path?
        if let Ok(path) = fs::canonicalize(s)
            && path.is_file()
        {
            Ok(Source::File(path))
        }
        // No? Must be a value then!
        else {
            Ok(Source::Value(s.to_string()))
        }
    }
}

impl Source {
    /// The values this source stands for. Blank lines of a file are skipped.
    pub fn values(&self) -> anyhow::Result<Vec<String>> {
        match self {
            Source::Value(v) => Ok(vec![v.clone()]),
            Source::File(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Ok(text
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(str::to_string)
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_str_identifies_existing_file() {
        let tmp = NamedTempFile::new().expect("tmp file");
        let path = tmp.path().to_path_buf();
        let src = Source::from_str(path.to_str().unwrap()).expect("parse");
        match src {
            Source::File(p) => {
                let can = std::fs::canonicalize(&path).unwrap();
                assert_eq!(p, can);
            }
            _ => panic!("expected file source"),
        }
    }

    #[test]
    fn from_str_falls_back_to_value() {
        proptest::proptest!(|(s in "[A-Za-z0-9. –-]{1,32}")| {
            let path = PathBuf::from(&s);
            proptest::prop_assume!(!path.exists());
            let src = Source::from_str(&s).expect("parse");
            match src {
                Source::Value(v) => proptest::prop_assert_eq!(v, s),
                Source::File(_) => proptest::prop_assert!(false, "should not be a file"),
            }
        })
    }

    #[test]
    fn directories_are_values() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let s = dir.path().to_str().unwrap();
        assert!(matches!(Source::from_str(s), Ok(Source::Value(_))));
    }

    #[test]
    fn file_values_skip_blank_lines() {
        let mut tmp = NamedTempFile::new().expect("tmp file");
        writeln!(tmp, "1. mai 2014\n\n  \nMay 2012").expect("write");
        let src = Source::File(tmp.path().to_path_buf());
        assert_eq!(src.values().expect("values"), ["1. mai 2014", "May 2012"]);
    }

    #[test]
    fn cli_parses_fix_options() {
        let cli = Cli::try_parse_from([
            "datofiks", "-vv", "fix", "a.bib", "b.json", "--write", "--report", "r.txt",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Fix {
                files,
                interactive,
                memo,
                write,
                report,
            } => {
                assert_eq!(files, [PathBuf::from("a.bib"), PathBuf::from("b.json")]);
                assert!(!interactive);
                assert_eq!(memo, PathBuf::from("checked_manually.txt"));
                assert!(write);
                assert_eq!(report, Some(PathBuf::from("r.txt")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
