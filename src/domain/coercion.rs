use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use crate::error::AppError;

/// Exchange form of a persisted monetary amount. Lossless for currency
/// magnitudes: cents fit comfortably inside the f64 mantissa.
pub fn to_exchange(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Storage form of a boundary numeric value. JSON numbers and numeric
/// strings are accepted; anything else is not a price. Range checks (the
/// non-negativity policy) belong to the validator, not here.
pub fn to_storage(value: &Value) -> Result<Decimal, AppError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(AppError::InvalidNumericValue),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| AppError::InvalidNumericValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn cents_survive_the_round_trip() {
        let stored = to_storage(&json!(1299.99)).unwrap();
        assert_eq!(stored, dec!(1299.99));
        assert_eq!(to_exchange(stored), 1299.99);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(to_storage(&json!("12.50")).unwrap(), dec!(12.50));
        assert_eq!(to_storage(&json!(" 7 ")).unwrap(), dec!(7));
    }

    #[test]
    fn integers_are_accepted() {
        assert_eq!(to_storage(&json!(100)).unwrap(), dec!(100));
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        for raw in [json!("abc"), json!(true), json!(null), json!([1]), json!({})] {
            assert!(matches!(
                to_storage(&raw),
                Err(AppError::InvalidNumericValue)
            ));
        }
    }

    #[test]
    fn textual_nan_and_infinity_are_rejected() {
        for raw in [json!("NaN"), json!("inf"), json!("-inf")] {
            assert!(matches!(
                to_storage(&raw),
                Err(AppError::InvalidNumericValue)
            ));
        }
    }
}
