use crate::band::ReturnBand;
use crate::format::{NumberFormat, format_percent};
use crate::palette::Palette;
use analytics::{CalculationResult, Triangle, TriangleCell};
use core_types::Theme;
use rust_decimal::Decimal;
use serde::Serialize;

/// The summary block, with every field already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub instrument: String,
    /// `"2018 - 2020"`.
    pub period: String,
    pub average_return: String,
    pub total_return: String,
    pub final_value: String,
}

impl SummaryView {
    pub fn new(instrument_name: &str, result: &CalculationResult, format: &NumberFormat) -> Self {
        Self {
            instrument: instrument_name.to_string(),
            period: format!("{} - {}", result.start_year, result.end_year),
            average_return: format_percent(result.average_annual_return_pct, 2),
            total_return: format_percent(result.total_return_pct, 2),
            final_value: format.money(result.final_value),
        }
    }
}

/// One populated triangle cell, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriangleCellView {
    pub buy_year: i32,
    pub sell_year: i32,
    /// The unrounded average annual return.
    pub value_pct: Decimal,
    /// `"7.8%"`.
    pub text: String,
    pub band: ReturnBand,
    /// Hex colour of the band in the active theme.
    pub color: String,
    /// `"2018 → 2020: 7.8%"`.
    pub tooltip: String,
}

impl TriangleCellView {
    fn new(cell: &TriangleCell, palette: &Palette) -> Self {
        let text = format_percent(cell.average_annual_return_pct, 1);
        let band = ReturnBand::from_return(cell.average_annual_return_pct);
        Self {
            buy_year: cell.buy_year,
            sell_year: cell.sell_year,
            value_pct: cell.average_annual_return_pct,
            tooltip: format!("{} → {}: {}", cell.buy_year, cell.sell_year, text),
            text,
            band,
            color: palette.color(band).hex(),
        }
    }
}

/// The return triangle in display form. Empty cells stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriangleView {
    pub theme: Theme,
    pub years: Vec<i32>,
    pub rows: Vec<Vec<Option<TriangleCellView>>>,
}

impl TriangleView {
    pub fn new(triangle: &Triangle, palette: &Palette) -> Self {
        let rows = triangle
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map(|c| TriangleCellView::new(c, palette)))
                    .collect()
            })
            .collect();

        Self {
            theme: palette.theme(),
            years: triangle.years().to_vec(),
            rows,
        }
    }

    pub fn cell(&self, buy_year: i32, sell_year: i32) -> Option<&TriangleCellView> {
        let row = self.years.iter().position(|&y| y == buy_year)?;
        let col = self.years.iter().position(|&y| y == sell_year)?;
        self.rows[row][col].as_ref()
    }
}

/// Everything produced by one calculation, as emitted in JSON mode.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationReport {
    pub summary: SummaryView,
    pub result: CalculationResult,
    pub triangle: TriangleView,
}
