//! Normalise the date fields of Norwegian citations.
//!
//! [`validate`] decides whether a value already has one of the accepted shapes, [`suggest`]
//! proposes a canonical replacement when it has not, and [`reconcile`] applies both to a whole
//! record, moving values between year and date fields where needed.

pub mod clean;
pub mod correct;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod review;
pub mod suggest;
pub mod validate;
pub mod vocabulary;

pub use error::Problem;
pub use reconcile::{Modified, ReconcileOptions, Report, Unresolved, reconcile};
pub use record::{Field, FieldStore, Record, Role};
pub use review::{MemoFile, ReviewStore, Reviewer};
pub use suggest::{Rule, Suggester, Suggestion, suggest_date, suggest_year};
pub use validate::{Validator, validate_date, validate_month, validate_year};
