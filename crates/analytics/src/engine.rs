use crate::error::AnalyticsError;
use crate::report::CalculationResult;
use core_types::ReturnSeries;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The notional amount invested at the start of every calculation.
pub const DEFAULT_INITIAL_INVESTMENT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// A stateless calculator for compounded returns over a yearly series.
#[derive(Debug, Clone)]
pub struct ReturnEngine {
    initial_investment: Decimal,
}

impl Default for ReturnEngine {
    fn default() -> Self {
        Self {
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
        }
    }
}

impl ReturnEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_investment(initial_investment: Decimal) -> Self {
        Self { initial_investment }
    }

    /// The main entry point for calculating the return over a year range.
    ///
    /// # Arguments
    ///
    /// * `series` - The yearly returns of the selected instrument.
    /// * `start_year` - First year whose return is included (the buy year).
    /// * `end_year` - Last year whose return is included (the sell year).
    ///
    /// Both years must be exact members of `series`. The range is inclusive, so
    /// the average is taken over `end_year - start_year + 1` years. A range of a
    /// single year yields that year's return unchanged as its average.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `CalculationResult` or an `AnalyticsError`.
    pub fn compute_return(
        &self,
        series: &ReturnSeries,
        start_year: i32,
        end_year: i32,
    ) -> Result<CalculationResult, AnalyticsError> {
        let start_idx = locate(series, start_year)?;
        let end_idx = locate(series, end_year)?;

        if start_idx > end_idx {
            return Err(AnalyticsError::InvalidRange {
                start: start_year,
                end: end_year,
            });
        }

        let growth_factor = growth_factor(&series.returns()[start_idx..=end_idx])?;
        let years_count = (end_year - start_year + 1) as u32;

        let average_annual_return_pct = if start_idx == end_idx {
            series.returns()[start_idx]
        } else {
            annualize(growth_factor, years_count)?
        };

        let total_return_pct = (growth_factor - Decimal::ONE) * HUNDRED;
        let final_value = self
            .initial_investment
            .checked_mul(growth_factor)
            .ok_or_else(|| AnalyticsError::Calculation("final value overflowed".to_string()))?;

        tracing::debug!(
            instrument = series.id(),
            start_year,
            end_year,
            %growth_factor,
            %average_annual_return_pct,
            "Computed period return"
        );

        Ok(CalculationResult {
            instrument: series.id().to_string(),
            start_year,
            end_year,
            years_count,
            growth_factor,
            average_annual_return_pct,
            total_return_pct,
            final_value,
        })
    }

    /// Shorthand for the average annual return of a buy/sell pair.
    pub fn average_annual_return(
        &self,
        series: &ReturnSeries,
        buy_year: i32,
        sell_year: i32,
    ) -> Result<Decimal, AnalyticsError> {
        self.compute_return(series, buy_year, sell_year)
            .map(|r| r.average_annual_return_pct)
    }
}

/// Finds the index of `year`, failing when it is not an exact member.
pub(crate) fn locate(series: &ReturnSeries, year: i32) -> Result<usize, AnalyticsError> {
    series
        .index_of(year)
        .ok_or_else(|| AnalyticsError::YearNotFound {
            instrument: series.id().to_string(),
            year,
        })
}

/// Compounds a run of percentage returns into a single multiplier.
fn growth_factor(returns: &[Decimal]) -> Result<Decimal, AnalyticsError> {
    returns
        .iter()
        .try_fold(Decimal::ONE, |acc, r| acc.checked_mul(Decimal::ONE + *r / HUNDRED))
        .ok_or_else(|| AnalyticsError::Calculation("growth factor overflowed".to_string()))
}

/// The constant yearly rate (in percent) that reproduces `growth` over `years`.
fn annualize(growth: Decimal, years: u32) -> Result<Decimal, AnalyticsError> {
    let growth = growth
        .to_f64()
        .ok_or_else(|| AnalyticsError::Calculation("growth factor is not representable".to_string()))?;

    let rate = (growth.powf(1.0 / f64::from(years)) - 1.0) * 100.0;
    if !rate.is_finite() {
        return Err(AnalyticsError::Calculation(format!(
            "no real {years}-year root of growth factor {growth}"
        )));
    }

    Decimal::from_f64(rate)
        .ok_or_else(|| AnalyticsError::Calculation(format!("annualized rate {rate} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scenario() -> ReturnSeries {
        ReturnSeries::new(
            "scenario",
            "Scenario",
            vec![2018, 2019, 2020],
            vec![dec!(10), dec!(-5), dec!(20)],
        )
        .unwrap()
    }

    fn close(a: Decimal, b: f64, tolerance: f64) -> bool {
        (a.to_f64().unwrap() - b).abs() < tolerance
    }

    #[test]
    fn three_year_scenario() {
        let engine = ReturnEngine::new();
        let result = engine.compute_return(&scenario(), 2018, 2020).unwrap();

        assert_eq!(result.growth_factor, dec!(1.254));
        assert_eq!(result.total_return_pct, dec!(25.4));
        assert_eq!(result.final_value, dec!(12540));
        assert_eq!(result.years_count, 3);

        let expected = (1.254f64.powf(1.0 / 3.0) - 1.0) * 100.0;
        assert!(close(result.average_annual_return_pct, expected, 1e-9));
        assert!(close(result.average_annual_return_pct, 7.8365, 1e-3));
    }

    #[test]
    fn two_year_sub_range_uses_inclusive_count() {
        let engine = ReturnEngine::new();
        let result = engine.compute_return(&scenario(), 2019, 2020).unwrap();

        // 0.95 * 1.20
        assert_eq!(result.growth_factor, dec!(1.14));
        assert_eq!(result.years_count, 2);
        let expected = (1.14f64.sqrt() - 1.0) * 100.0;
        assert!(close(result.average_annual_return_pct, expected, 1e-9));
    }

    #[test]
    fn single_year_returns_the_sample_itself() {
        let engine = ReturnEngine::new();
        let series = scenario();
        for (year, expected) in [(2018, dec!(10)), (2019, dec!(-5)), (2020, dec!(20))] {
            let result = engine.compute_return(&series, year, year).unwrap();
            assert_eq!(result.average_annual_return_pct, expected);
            assert_eq!(result.total_return_pct, expected);
            assert_eq!(result.years_count, 1);
        }
    }

    #[test]
    fn final_value_follows_initial_investment() {
        let engine = ReturnEngine::with_initial_investment(dec!(2500));
        let result = engine.compute_return(&scenario(), 2018, 2020).unwrap();
        assert_eq!(result.final_value, dec!(3135));
    }

    #[test]
    fn missing_year_is_reported() {
        let engine = ReturnEngine::new();
        let err = engine.compute_return(&scenario(), 2015, 2020).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::YearNotFound {
                instrument: "scenario".to_string(),
                year: 2015
            }
        );
    }

    #[test]
    fn reversed_range_is_rejected() {
        let engine = ReturnEngine::new();
        let err = engine.compute_return(&scenario(), 2020, 2018).unwrap_err();
        assert_eq!(err, AnalyticsError::InvalidRange { start: 2020, end: 2018 });
    }

    #[test]
    fn total_loss_annualizes_to_minus_hundred() {
        let series =
            ReturnSeries::new("wipe", "Wipeout", vec![2000, 2001], vec![dec!(-100), dec!(50)])
                .unwrap();
        let result = ReturnEngine::new().compute_return(&series, 2000, 2001).unwrap();
        assert_eq!(result.final_value, Decimal::ZERO);
        assert_eq!(result.total_return_pct, dec!(-100));
        assert_eq!(result.average_annual_return_pct, dec!(-100));
    }

    #[test]
    fn negative_growth_has_no_real_root() {
        let series =
            ReturnSeries::new("bad", "Bad", vec![2000, 2001], vec![dec!(-150), dec!(10)]).unwrap();
        let err = ReturnEngine::new().compute_return(&series, 2000, 2001).unwrap_err();
        assert!(matches!(err, AnalyticsError::Calculation(_)));
    }

    #[test]
    fn average_annual_return_matches_full_result() {
        let engine = ReturnEngine::new();
        let series = scenario();
        let full = engine.compute_return(&series, 2018, 2019).unwrap();
        let avg = engine.average_annual_return(&series, 2018, 2019).unwrap();
        assert_eq!(full.average_annual_return_pct, avg);
    }
}
