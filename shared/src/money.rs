//! Money helpers using rust_decimal for precision
//!
//! All currency arithmetic is done on `Decimal`. Rounding to two places
//! happens exactly once, when a value leaves the aggregation layer.

use rust_decimal::prelude::*;
use serde_json::Value;

/// Rounding precision for monetary output (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value for output
///
/// The result always carries a scale of exactly two, so it renders as
/// `"110.00"` rather than `"110"`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

fn overflowed(op: &'static str, lhs: Decimal, rhs: Decimal, saturated: Decimal) -> Decimal {
    tracing::warn!(op, %lhs, %rhs, %saturated, "Money arithmetic overflowed, saturating");
    saturated
}

/// `lhs + rhs`, saturating at the `Decimal` bounds
pub fn add_money(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs)
        .unwrap_or_else(|| overflowed("add", lhs, rhs, lhs.saturating_add(rhs)))
}

/// `lhs - rhs`, saturating at the `Decimal` bounds
pub fn sub_money(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_sub(rhs)
        .unwrap_or_else(|| overflowed("sub", lhs, rhs, lhs.saturating_sub(rhs)))
}

/// `lhs * rhs`, saturating at the `Decimal` bounds
pub fn mul_money(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_mul(rhs)
        .unwrap_or_else(|| overflowed("mul", lhs, rhs, lhs.saturating_mul(rhs)))
}

/// Saturating sum of `values`
pub fn sum_money<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, add_money)
}

/// Parse a decimal from text, accepting plain and scientific notation
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coalesce a JSON value to a decimal
///
/// Numbers and numeric strings convert; anything else (null, booleans,
/// objects, garbage text) is zero.
pub fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        // Number's Display is the shortest round-trip form, so 0.1 stays 0.1
        Value::Number(n) => parse_decimal(&n.to_string()).unwrap_or(Decimal::ZERO),
        Value::String(s) => parse_decimal(s).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_round_money_pads_scale() {
        assert_eq!(round_money(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(round_money(d("110")).to_string(), "110.00");
        assert_eq!(round_money(d("-5.5")).to_string(), "-5.50");
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(d("2.345")).to_string(), "2.35");
        assert_eq!(round_money(d("2.344")).to_string(), "2.34");
        assert_eq!(round_money(d("-2.345")).to_string(), "-2.35");
    }

    #[test]
    fn test_accumulation_is_exact() {
        // 0.1 + 0.2 drifts in f64, not here
        let total = decimal_from_value(&json!(0.1)) + decimal_from_value(&json!(0.2));
        assert_eq!(total, d("0.3"));

        let mut sum = Decimal::ZERO;
        for _ in 0..1000 {
            sum += decimal_from_value(&json!(0.01));
        }
        assert_eq!(round_money(sum).to_string(), "10.00");
    }

    #[test]
    fn test_decimal_from_value_coalesces() {
        assert_eq!(decimal_from_value(&json!(42)), d("42"));
        assert_eq!(decimal_from_value(&json!("12.5")), d("12.5"));
        assert_eq!(decimal_from_value(&json!(" 7 ")), d("7"));
        assert_eq!(decimal_from_value(&json!(1e3)), d("1000"));
        assert_eq!(decimal_from_value(&json!(null)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!(true)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!("abc")), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!({"a": 1})), Decimal::ZERO);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(add_money(Decimal::MAX, Decimal::ONE), Decimal::MAX);
        assert_eq!(sub_money(Decimal::MIN, Decimal::ONE), Decimal::MIN);
        let big = parse_decimal("5e28").unwrap();
        let price = parse_decimal("1e20").unwrap();
        let quantity = parse_decimal("-1e10").unwrap();
        assert_eq!(mul_money(price, quantity), Decimal::MIN);
        assert_eq!(sum_money([big, big, d("-1")]), Decimal::MAX - Decimal::ONE);
        assert_eq!(add_money(d("1.5"), d("2.25")), d("3.75"));
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal("1e-2"), Some(d("0.01")));
        assert_eq!(parse_decimal(""), None);
    }
}
