//! Lenient decoders for fields the remote API is loose about.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a textual price the way the storefront always has: surrounding
/// whitespace is ignored, an empty string is zero, anything unparseable is zero.
pub fn coerce_price(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Prices arrive as numbers, numeric strings, `null`, or garbage.
pub fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => coerce_price(&s),
        _ => 0.0,
    })
}

/// Identifiers issued by the booking API may be strings or integers.
pub fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or numeric identifier, got {}",
            other
        ))),
    }
}

pub fn optional_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(default, deserialize_with = "lenient_price")]
        price: f64,
    }

    fn price_of(json: &str) -> f64 {
        serde_json::from_str::<Priced>(json).unwrap().price
    }

    #[test]
    fn test_price_accepts_numbers_and_numeric_strings() {
        assert_eq!(price_of(r#"{"price": 1499}"#), 1499.0);
        assert_eq!(price_of(r#"{"price": 999.5}"#), 999.5);
        assert_eq!(price_of(r#"{"price": " 2500 "}"#), 2500.0);
    }

    #[test]
    fn test_price_defaults_to_zero() {
        assert_eq!(price_of(r#"{"price": "free"}"#), 0.0);
        assert_eq!(price_of(r#"{"price": null}"#), 0.0);
        assert_eq!(price_of(r#"{"price": ""}"#), 0.0);
        assert_eq!(price_of(r#"{}"#), 0.0);
    }

    #[test]
    fn test_identifier_accepts_numbers() {
        #[derive(Deserialize)]
        struct Id {
            #[serde(deserialize_with = "identifier")]
            id: String,
        }
        let parsed: Id = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(parsed.id, "42");
        assert!(serde_json::from_str::<Id>(r#"{"id": ""}"#).is_err());
    }
}
