//! JSON rendering of prices and totals.
//!
//! Whole amounts are written without a fractional part (`450`, not
//! `450.0`). Use with `#[serde(serialize_with = ...)]`.

use serde::Serializer;

/// Largest magnitude at which every integer is exactly representable.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

pub fn serialize_amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn serialize_optional_amount<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(amount) => serialize_amount(amount, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Line {
        #[serde(serialize_with = "serialize_amount")]
        total: f64,
        #[serde(serialize_with = "serialize_optional_amount")]
        price: Option<f64>,
    }

    fn render(total: f64, price: Option<f64>) -> String {
        serde_json::to_string(&Line { total, price }).unwrap()
    }

    #[test]
    fn whole_amounts_have_no_fraction() {
        assert_eq!(render(450.0, Some(100.0)), r#"{"total":450,"price":100}"#);
        assert_eq!(render(0.0, Some(-0.0)), r#"{"total":0,"price":0}"#);
    }

    #[test]
    fn fractional_amounts_are_kept() {
        assert_eq!(render(12.5, Some(0.1)), r#"{"total":12.5,"price":0.1}"#);
    }

    #[test]
    fn missing_price_is_null() {
        assert_eq!(render(1.0, None), r#"{"total":1,"price":null}"#);
    }
}
