use core_types::{Dataset, Locale, ReturnSeries};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// The root structure of a dataset file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFile {
    /// Optional `[calculator]` table; every key has a default.
    #[serde(default)]
    pub calculator: AppSettings,
    /// One `[instruments.<id>]` table per instrument.
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentEntry>,
}

/// The raw yearly returns of one instrument as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentEntry {
    pub name: String,
    pub years: Vec<i32>,
    pub returns: Vec<Decimal>,
}

/// Calculator-wide settings that shape the summary output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// The notional amount that is compounded into the final value.
    pub initial_investment: Decimal,
    /// Suffix printed after money amounts.
    pub currency: String,
    pub locale: Locale,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            initial_investment: Decimal::from(10_000),
            currency: "€".to_string(),
            locale: Locale::German,
        }
    }
}

/// Everything the calculator needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: AppSettings,
    pub dataset: Dataset,
}

impl TryFrom<DatasetFile> for Config {
    type Error = ConfigError;

    fn try_from(file: DatasetFile) -> Result<Self, Self::Error> {
        if file.calculator.initial_investment <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "initial_investment must be positive, got {}",
                file.calculator.initial_investment
            )));
        }
        if file.instruments.is_empty() {
            return Err(ConfigError::ValidationError(
                "the dataset does not define any instruments".to_string(),
            ));
        }

        let dataset = file
            .instruments
            .into_iter()
            .map(|(id, entry)| {
                ReturnSeries::new(id, entry.name, entry.years, entry.returns)
                    .map_err(|e| ConfigError::ValidationError(e.to_string()))
            })
            .collect::<Result<Dataset, _>>()?;

        Ok(Self {
            settings: file.calculator,
            dataset,
        })
    }
}
