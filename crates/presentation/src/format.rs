use core_types::Locale;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero, like the usual pocket calculator.
fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// A percentage with a fixed number of decimals, e.g. `7.84%`.
pub fn format_percent(value: Decimal, dp: u32) -> String {
    format!("{:.*}%", dp as usize, round(value, dp))
}

/// A whole number with the locale's thousands grouping, e.g. `12.540`.
pub fn format_grouped(value: Decimal, locale: Locale) -> String {
    let rounded = round(value, 0);
    let digits = rounded.abs().trunc().to_string();
    let separator = locale.grouping_separator();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// How numbers are shown on the output surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub locale: Locale,
    pub currency: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            locale: Locale::German,
            currency: "€".to_string(),
        }
    }
}

impl NumberFormat {
    pub fn new(locale: Locale, currency: impl Into<String>) -> Self {
        Self {
            locale,
            currency: currency.into(),
        }
    }

    /// A grouped amount followed by the currency, e.g. `12.540 €`.
    pub fn money(&self, value: Decimal) -> String {
        format!("{} {}", format_grouped(value, self.locale), self.currency)
    }
}
