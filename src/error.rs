use thiserror::Error;

/// Why a field value was not accepted as-is.
///
/// Validators never fail hard: every rejection carries one of these reasons so the caller can
/// report it next to the offending value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    #[error("publication year {year} is more than two years into the future (limit {limit})")]
    FutureYear { year: i32, limit: i32 },

    #[error("not a recognized month or season name")]
    UnknownMonthName,

    #[error("month number outside 1-12")]
    MonthOutOfRange,

    #[error("unknown month number")]
    UnknownMonthNumber,

    #[error("day outside 1-31")]
    DayOutOfRange,

    #[error("day has a leading zero")]
    DayZeroPrefixed,

    #[error("could not interpret the day value")]
    UnparseableDay,

    #[error("not an accepted date or year format")]
    Unrecognized,

    #[error("more than one possible date: {}", candidates.join(", "))]
    Ambiguous { candidates: Vec<String> },
}
