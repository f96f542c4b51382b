use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of compounding one instrument over an inclusive year range.
///
/// Created fresh for every request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub instrument: String,
    pub start_year: i32,
    pub end_year: i32,
    /// Inclusive calendar year count, `end_year - start_year + 1`.
    pub years_count: u32,
    /// Product of `1 + r / 100` over every sample in the range.
    pub growth_factor: Decimal,
    pub average_annual_return_pct: Decimal,
    pub total_return_pct: Decimal,
    /// What the initial investment is worth at the end of `end_year`.
    pub final_value: Decimal,
}
