use rust_decimal::Decimal;
use serde::Serialize;

/// The five ordered colour bands a return can fall into.
///
/// Boundaries are closed-open: `[0, 5)` is `Low`, `[5, 10)` is `Medium` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnBand {
    Negative,
    Low,
    Medium,
    High,
    VeryHigh,
}

const FIVE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);
const TEN: Decimal = Decimal::TEN;
const FIFTEEN: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

impl ReturnBand {
    pub const ALL: [ReturnBand; 5] = [
        ReturnBand::Negative,
        ReturnBand::Low,
        ReturnBand::Medium,
        ReturnBand::High,
        ReturnBand::VeryHigh,
    ];

    pub fn from_return(pct: Decimal) -> Self {
        if pct < Decimal::ZERO {
            ReturnBand::Negative
        } else if pct < FIVE {
            ReturnBand::Low
        } else if pct < TEN {
            ReturnBand::Medium
        } else if pct < FIFTEEN {
            ReturnBand::High
        } else {
            ReturnBand::VeryHigh
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReturnBand::Negative => "negative",
            ReturnBand::Low => "low",
            ReturnBand::Medium => "medium",
            ReturnBand::High => "high",
            ReturnBand::VeryHigh => "very-high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn boundaries_are_closed_open() {
        let cases = [
            (dec!(-0.01), ReturnBand::Negative),
            (dec!(0), ReturnBand::Low),
            (dec!(4.99), ReturnBand::Low),
            (dec!(5), ReturnBand::Medium),
            (dec!(9.99), ReturnBand::Medium),
            (dec!(10), ReturnBand::High),
            (dec!(14.99), ReturnBand::High),
            (dec!(15), ReturnBand::VeryHigh),
        ];
        for (pct, band) in cases {
            assert_eq!(ReturnBand::from_return(pct), band, "return {pct}");
        }
    }

    #[test]
    fn extremes() {
        assert_eq!(ReturnBand::from_return(dec!(-100)), ReturnBand::Negative);
        assert_eq!(ReturnBand::from_return(dec!(250)), ReturnBand::VeryHigh);
    }

    #[test]
    fn names_match_serde() {
        for band in ReturnBand::ALL {
            let json = serde_json::to_string(&band).unwrap();
            assert_eq!(json, format!("\"{}\"", band.name()));
        }
    }
}
