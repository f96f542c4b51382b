use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Year {year} not found in the return series of '{instrument}'")]
    YearNotFound { instrument: String, year: i32 },

    #[error("Invalid range: start year {start} is after end year {end}")]
    InvalidRange { start: i32, end: i32 },

    #[error("Error in calculation: {0}")]
    Calculation(String),
}

/// A rejected user request. The message is what the user gets to see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a start and end year")]
    MissingYears,

    #[error("Start year must precede end year")]
    StartNotBeforeEnd,

    #[error("Instrument data not found: {0}")]
    InstrumentNotFound(String),

    #[error("Data available from {min} to {max}")]
    OutOfRange { min: i32, max: i32 },

    #[error("Year {0} is not available in the data")]
    YearNotAvailable(i32),
}
