use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Return series '{0}' has no data points.")]
    EmptySeries(String),

    #[error("Return series '{id}' has {years} years but {returns} returns.")]
    LengthMismatch {
        id: String,
        years: usize,
        returns: usize,
    },

    #[error("Return series '{id}' is not strictly increasing at year {year}.")]
    UnorderedYears { id: String, year: i32 },
}
