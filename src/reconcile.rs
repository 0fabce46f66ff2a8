//! Fix up the date-like fields of one record, moving values between a separate year field and
//! the date field where that is what the author evidently meant.

use tracing::info;

use crate::error::Problem;
use crate::record::{Field, FieldStore, Role, date_key_for, fields_with_role, is_publication_date};
use crate::suggest::{Fallback, Rule, Suggester, Suggestion};
use crate::validate::{Validator, current_year};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Reference year for the bound on future publication years.
    pub current_year: i32,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            current_year: current_year(),
        }
    }
}

impl ReconcileOptions {
    pub fn suggester(&self) -> Suggester {
        Suggester::new(Validator::at_year(self.current_year))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modified {
    pub key: String,
    pub old: String,
    pub new: String,
    /// Set when the change touched two fields: one written, one removed.
    pub complex: bool,
    /// `None` when an already valid value was moved to another field unchanged.
    pub rule: Option<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub key: String,
    pub value: String,
    pub problem: Problem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub checked: usize,
    pub modified: Vec<Modified>,
    pub unresolved: Vec<Unresolved>,
}

impl Report {
    pub fn is_unchanged(&self) -> bool {
        self.modified.is_empty()
    }

    /// Fields that were checked and needed nothing.
    pub fn ok(&self) -> usize {
        self.checked
            .saturating_sub(self.modified.len() + self.unresolved.len())
    }

    pub fn absorb(&mut self, other: Report) {
        self.checked += other.checked;
        self.modified.extend(other.modified);
        self.unresolved.extend(other.unresolved);
    }
}

/// Check and repair every year and date field of `store`.
///
/// Year fields are handled first. An invalid year is rewritten as a year if possible; failing
/// that, if the record has no non-empty publication date, a value that reads as a full date is moved
/// into one. Date fields are then run through the suggestion cascade, a year-only reading, and
/// finally, for publication dates next to exactly one year field, the combination
/// `"<date> <year>"`. `fallback` is asked only for date fields nothing else could fix.
pub fn reconcile(
    store: &mut dyn FieldStore,
    opts: &ReconcileOptions,
    mut fallback: Option<Fallback<'_>>,
) -> Report {
    let suggester = opts.suggester();
    let validator = suggester.validator();
    let mut report = Report::default();
    let mut written = Vec::new();

    for field in fields_with_role(store, Role::Year) {
        report.checked += 1;
        let Err(problem) = validator.year(&field.value) else {
            continue;
        };

        if let Some(new) = suggester.year(&field.value) {
            store.set(&field.key, &new);
            report.modified.push(simple(field, new, Rule::Year));
            continue;
        }

        match year_to_date(store, &suggester, &field) {
            Some(m) => {
                written.push(m.key.clone());
                report.modified.push(m);
            }
            None => report.unresolved.push(Unresolved {
                key: field.key,
                value: field.value,
                problem,
            }),
        }
    }

    for field in fields_with_role(store, Role::Date) {
        if written.contains(&field.key) {
            continue;
        }
        report.checked += 1;
        let Err(mut problem) = validator.date(&field.value) else {
            continue;
        };

        match suggester.date(&field.value) {
            Suggestion::Resolved { value, rule } => {
                store.set(&field.key, &value);
                report.modified.push(simple(field, value, rule));
                continue;
            }
            Suggestion::Ambiguous(candidates) => problem = Problem::Ambiguous { candidates },
            Suggestion::Valid(_) | Suggestion::Unresolved => {}
        }

        if let Some(new) = suggester.year(&field.value) {
            store.set(&field.key, &new);
            report.modified.push(simple(field, new, Rule::YearFallback));
            continue;
        }

        if let Some((m, removed)) = combine_with_year(store, &suggester, &field) {
            report.unresolved.retain(|u| u.key != removed);
            report.modified.push(m);
            continue;
        }

        if !matches!(problem, Problem::Ambiguous { .. })
            && let Some(ask) = fallback.as_mut()
        {
            let answer = ask(&field.value);
            if let Suggestion::Resolved { value, rule } = suggester.reviewed(&field.value, &answer) {
                store.set(&field.key, &value);
                report.modified.push(simple(field, value, rule));
                continue;
            }
        }

        report.unresolved.push(Unresolved {
            key: field.key,
            value: field.value,
            problem,
        });
    }

    report
}

fn simple(field: Field, new: String, rule: Rule) -> Modified {
    Modified {
        key: field.key,
        old: field.value,
        new,
        complex: false,
        rule: Some(rule),
    }
}

/// Access and archive dates do not count.
fn has_publication_date(store: &dyn FieldStore) -> bool {
    fields_with_role(store, Role::Date)
        .iter()
        .any(|f| is_publication_date(&f.key) && !f.value.trim().is_empty())
}

/// Move a year field's value to the date field when it is really a date, e.g. `1951-53`.
fn year_to_date(
    store: &mut dyn FieldStore,
    suggester: &Suggester,
    year: &Field,
) -> Option<Modified> {
    if has_publication_date(store) {
        return None;
    }
    let (new, rule) = match suggester.date(&year.value) {
        Suggestion::Valid(v) => (v, None),
        Suggestion::Resolved { value, rule } => (value, Some(rule)),
        Suggestion::Ambiguous(_) | Suggestion::Unresolved => return None,
    };

    let target = date_key_for(&year.key);
    info!("moving {}={:?} to {target}={new:?}", year.key, year.value);
    store.set(target, &new);
    store.remove(&year.key);

    Some(Modified {
        key: target.to_string(),
        old: year.value.clone(),
        new,
        complex: true,
        rule,
    })
}

/// Join a partial date with the record's only year field, e.g. `1. mai` and `2014`. Returns
/// the change and the key of the removed year field.
fn combine_with_year(
    store: &mut dyn FieldStore,
    suggester: &Suggester,
    date: &Field,
) -> Option<(Modified, String)> {
    if !is_publication_date(&date.key) {
        return None;
    }
    let [year]: [Field; 1] = fields_with_role(store, Role::Year).try_into().ok()?;

    let combined = format!("{} {}", date.value, year.value);
    let (new, rule) = match suggester.date(&combined) {
        Suggestion::Valid(v) => (v, None),
        Suggestion::Resolved { value, rule } => (value, Some(rule)),
        Suggestion::Ambiguous(_) | Suggestion::Unresolved => return None,
    };

    info!(
        "{}={:?} can be changed to {new:?} and {} removed",
        date.key, date.value, year.key
    );
    store.set(&date.key, &new);
    store.remove(&year.key);

    let modified = Modified {
        key: date.key.clone(),
        old: date.value.clone(),
        new,
        complex: true,
        rule,
    };
    Some((modified, year.key))
}
