use crate::error::ValidationError;
use core_types::{Dataset, ReturnSeries};

/// Raw user input for a calculation. Years are optional because the user may
/// leave them blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    pub instrument: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// A request that passed every check and can be computed without failure
/// paths for missing years.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    pub series: &'a ReturnSeries,
    pub start_year: i32,
    pub end_year: i32,
}

impl CalculationRequest {
    pub fn new(instrument: impl Into<String>, start_year: Option<i32>, end_year: Option<i32>) -> Self {
        Self {
            instrument: instrument.into(),
            start_year,
            end_year,
        }
    }

    /// Fills a blank end year with `current_year` when the instrument has data
    /// for it. Otherwise the request is left as it is.
    pub fn with_default_end(mut self, dataset: &Dataset, current_year: i32) -> Self {
        if self.end_year.is_none() {
            self.end_year = dataset
                .get(&self.instrument)
                .filter(|series| series.contains_year(current_year))
                .map(|_| current_year);
        }
        self
    }

    /// Checks the request against the dataset.
    ///
    /// The checks run in a fixed order and the first failure wins: blank
    /// years, reversed range, unknown instrument, years outside the data,
    /// years missing from the data.
    pub fn validate<'a>(&self, dataset: &'a Dataset) -> Result<ValidatedRequest<'a>, ValidationError> {
        let (start_year, end_year) = match (self.start_year, self.end_year) {
            (Some(start), Some(end)) if start > 0 && end > 0 => (start, end),
            _ => return Err(ValidationError::MissingYears),
        };

        if start_year >= end_year {
            return Err(ValidationError::StartNotBeforeEnd);
        }

        let series = dataset
            .get(&self.instrument)
            .ok_or_else(|| ValidationError::InstrumentNotFound(self.instrument.clone()))?;

        let (min, max) = (series.first_year(), series.last_year());
        if start_year < min || end_year > max {
            return Err(ValidationError::OutOfRange { min, max });
        }

        for year in [start_year, end_year] {
            if !series.contains_year(year) {
                return Err(ValidationError::YearNotAvailable(year));
            }
        }

        Ok(ValidatedRequest {
            series,
            start_year,
            end_year,
        })
    }
}
