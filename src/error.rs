use chrono::NaiveDate;

/// Errors raised by the streak engine.
///
/// Everything else the engine accepts is a total function: empty record
/// lists, all-false records and zero totals produce zero, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid habit policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid timezone offset: {0} minutes")]
    InvalidTimezone(i32),
}

pub type EngineResult<T> = Result<T, EngineError>;
