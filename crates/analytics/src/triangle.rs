use crate::engine::{ReturnEngine, locate};
use crate::error::AnalyticsError;
use core_types::ReturnSeries;
use rust_decimal::Decimal;
use serde::Serialize;

/// The average annual return of buying at the start of `buy_year` and
/// selling at the end of `sell_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriangleCell {
    pub buy_year: i32,
    pub sell_year: i32,
    pub average_annual_return_pct: Decimal,
}

/// An N×N grid of pairwise returns. Rows are buy years, columns sell years,
/// both ascending. Cells below the diagonal are always `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Triangle {
    years: Vec<i32>,
    rows: Vec<Vec<Option<TriangleCell>>>,
}

impl Triangle {
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn rows(&self) -> &[Vec<Option<TriangleCell>>] {
        &self.rows
    }

    /// Number of years on each axis.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// The populated cell for a buy/sell pair, or `None` when either year is
    /// outside the grid or the pair lies below the diagonal.
    pub fn cell(&self, buy_year: i32, sell_year: i32) -> Option<&TriangleCell> {
        let row = self.years.binary_search(&buy_year).ok()?;
        let col = self.years.binary_search(&sell_year).ok()?;
        self.rows[row][col].as_ref()
    }

    /// All populated cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &TriangleCell> {
        self.rows.iter().flatten().flatten()
    }
}

/// Builds return triangles by asking the engine for every buy/sell pair.
#[derive(Debug, Clone, Copy)]
pub struct TriangleBuilder<'a> {
    engine: &'a ReturnEngine,
}

impl<'a> TriangleBuilder<'a> {
    pub fn new(engine: &'a ReturnEngine) -> Self {
        Self { engine }
    }

    /// Builds the triangle for the contiguous slice of `series` between the
    /// two requested years, inclusive.
    #[tracing::instrument(level = "debug", skip(self, series), fields(instrument = series.id()))]
    pub fn build(
        &self,
        series: &ReturnSeries,
        requested_start: i32,
        requested_end: i32,
    ) -> Result<Triangle, AnalyticsError> {
        let start_idx = locate(series, requested_start)?;
        let end_idx = locate(series, requested_end)?;
        if start_idx > end_idx {
            return Err(AnalyticsError::InvalidRange {
                start: requested_start,
                end: requested_end,
            });
        }

        let years = series.years()[start_idx..=end_idx].to_vec();
        let mut rows = Vec::with_capacity(years.len());

        for (buy_idx, &buy_year) in years.iter().enumerate() {
            let mut row = Vec::with_capacity(years.len());
            for (sell_idx, &sell_year) in years.iter().enumerate() {
                if sell_idx < buy_idx {
                    row.push(None);
                    continue;
                }
                let average_annual_return_pct =
                    self.engine.average_annual_return(series, buy_year, sell_year)?;
                row.push(Some(TriangleCell {
                    buy_year,
                    sell_year,
                    average_annual_return_pct,
                }));
            }
            rows.push(row);
        }

        tracing::debug!(size = years.len(), "Built return triangle");
        Ok(Triangle { years, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scenario() -> ReturnSeries {
        ReturnSeries::new(
            "scenario",
            "Scenario",
            vec![2016, 2017, 2018, 2019, 2020],
            vec![dec!(7.5), dec!(-2.25), dec!(10), dec!(-5), dec!(20)],
        )
        .unwrap()
    }

    #[test]
    fn grid_covers_only_the_requested_range() {
        let engine = ReturnEngine::new();
        let triangle = TriangleBuilder::new(&engine)
            .build(&scenario(), 2018, 2020)
            .unwrap();

        assert_eq!(triangle.years(), &[2018, 2019, 2020]);
        assert_eq!(triangle.len(), 3);
        assert!(triangle.rows().iter().all(|row| row.len() == 3));
        assert!(triangle.cell(2017, 2019).is_none());
    }

    #[test]
    fn lower_triangle_is_empty() {
        let engine = ReturnEngine::new();
        let triangle = TriangleBuilder::new(&engine)
            .build(&scenario(), 2016, 2020)
            .unwrap();

        for (row, buy) in triangle.rows().iter().zip(triangle.years()) {
            for (cell, sell) in row.iter().zip(triangle.years()) {
                assert_eq!(cell.is_none(), sell < buy, "cell {buy}/{sell}");
            }
        }
        // 5 + 4 + 3 + 2 + 1
        assert_eq!(triangle.cells().count(), 15);
    }

    #[test]
    fn diagonal_is_the_single_year_return_for_any_range() {
        let engine = ReturnEngine::new();
        let series = scenario();
        let builder = TriangleBuilder::new(&engine);

        for (start, end) in [(2016, 2020), (2017, 2019), (2019, 2020)] {
            let triangle = builder.build(&series, start, end).unwrap();
            for &year in triangle.years() {
                let cell = triangle.cell(year, year).unwrap();
                assert_eq!(Some(cell.average_annual_return_pct), series.return_for(year));
            }
        }
    }

    #[test]
    fn corner_cell_matches_summary_exactly() {
        let engine = ReturnEngine::new();
        let series = scenario();
        let triangle = TriangleBuilder::new(&engine)
            .build(&series, 2018, 2020)
            .unwrap();
        let summary = engine.compute_return(&series, 2018, 2020).unwrap();

        let corner = triangle.cell(2018, 2020).unwrap();
        assert_eq!(corner.average_annual_return_pct, summary.average_annual_return_pct);
    }

    #[test]
    fn upper_cells_match_pairwise_engine_calls() {
        let engine = ReturnEngine::new();
        let series = scenario();
        let triangle = TriangleBuilder::new(&engine)
            .build(&series, 2016, 2020)
            .unwrap();

        for cell in triangle.cells() {
            let expected = engine
                .average_annual_return(&series, cell.buy_year, cell.sell_year)
                .unwrap();
            assert_eq!(cell.average_annual_return_pct, expected);
        }
    }

    #[test]
    fn single_year_range_is_a_one_by_one_grid() {
        let engine = ReturnEngine::new();
        let triangle = TriangleBuilder::new(&engine)
            .build(&scenario(), 2019, 2019)
            .unwrap();
        assert_eq!(triangle.len(), 1);
        assert_eq!(triangle.cell(2019, 2019).unwrap().average_annual_return_pct, dec!(-5));
    }

    #[test]
    fn unknown_years_are_rejected() {
        let engine = ReturnEngine::new();
        let err = TriangleBuilder::new(&engine)
            .build(&scenario(), 2010, 2020)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::YearNotFound { year: 2010, .. }));
    }
}
