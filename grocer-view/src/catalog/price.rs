//! Price conversion to pence using rust_decimal
//!
//! Catalog prices are major-unit numbers. Each price is parsed into a
//! `Decimal` from its shortest decimal text and rounded half away from zero,
//! so `1.005` is 101 pence.

use rust_decimal::prelude::*;
use serde_json::Value;
use std::str::FromStr;

use super::classify::is_truthy;

/// Convert an optional major-unit price to pence.
///
/// Absent, zero, or otherwise falsy prices yield 0. Numeric strings are
/// accepted; any other type yields 0.
pub fn to_pence(price: Option<&Value>) -> i64 {
    let Some(value) = price.filter(|v| is_truthy(v)) else {
        return 0;
    };

    let Some(major) = to_decimal(value) else {
        tracing::debug!(price = %value, "Unusable price, treating as zero");
        return 0;
    };

    major
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|pence| pence.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pence| pence.to_i64())
        .unwrap_or_else(|| {
            tracing::debug!(price = %value, "Price out of range, treating as zero");
            0
        })
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
