use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// The yearly returns of a single instrument.
///
/// `years[i]` pairs with `returns[i]`. Years are strictly increasing but may
/// contain gaps; every lookup goes through the year value, never the raw index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    id: String,
    name: String,
    years: Vec<i32>,
    /// Annual returns in percent, e.g. `12.5` for +12.5%.
    returns: Vec<Decimal>,
}

impl ReturnSeries {
    /// Builds a series, rejecting empty, misaligned or unordered data.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        years: Vec<i32>,
        returns: Vec<Decimal>,
    ) -> Result<Self, CoreError> {
        let id = id.into();

        if years.is_empty() {
            return Err(CoreError::EmptySeries(id));
        }
        if years.len() != returns.len() {
            return Err(CoreError::LengthMismatch {
                id,
                years: years.len(),
                returns: returns.len(),
            });
        }
        if let Some(w) = years.windows(2).find(|w| w[1] <= w[0]) {
            return Err(CoreError::UnorderedYears { id, year: w[1] });
        }

        Ok(Self {
            id,
            name: name.into(),
            years,
            returns,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn returns(&self) -> &[Decimal] {
        &self.returns
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn first_year(&self) -> i32 {
        self.years[0]
    }

    pub fn last_year(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    /// Position of `year` on the axis, if it is an exact member.
    pub fn index_of(&self, year: i32) -> Option<usize> {
        self.years.binary_search(&year).ok()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.index_of(year).is_some()
    }

    /// The return recorded for `year`, if present.
    pub fn return_for(&self, year: i32) -> Option<Decimal> {
        self.index_of(year).map(|i| self.returns[i])
    }
}

/// All instruments known to the calculator, keyed by identifier.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    instruments: BTreeMap<String, ReturnSeries>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series under its own identifier, replacing any previous entry.
    pub fn insert(&mut self, series: ReturnSeries) {
        self.instruments.insert(series.id().to_string(), series);
    }

    pub fn get(&self, id: &str) -> Option<&ReturnSeries> {
        self.instruments.get(id)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Iterates over the instruments in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ReturnSeries> {
        self.instruments.values()
    }
}

impl FromIterator<ReturnSeries> for Dataset {
    fn from_iter<T: IntoIterator<Item = ReturnSeries>>(iter: T) -> Self {
        let mut dataset = Dataset::new();
        for series in iter {
            dataset.insert(series);
        }
        dataset
    }
}
