//! Serde helpers for the loosely typed wallet backends.
//!
//! LND proxies tend to send 64-bit amounts as JSON strings while LNbits sends
//! plain numbers, so amounts and timestamps accept either.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserializes an `f64` from a JSON number or a numeric string.
pub mod f64_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Int(n) => Ok(n as f64),
            NumberOrString::Float(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("Invalid number: {}", s))),
        }
    }
}

/// Deserializes an `i64` from a JSON integer or a numeric string.
///
/// Fractional values are truncated toward zero.
pub mod i64_lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Int(n) => Ok(n),
            NumberOrString::Float(n) => Ok(n.trunc() as i64),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| serde::de::Error::custom(format!("Invalid integer: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(with = "super::f64_lenient")]
        amount: f64,
        #[serde(with = "super::i64_lenient")]
        at: i64,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let a: Sample = serde_json::from_str(r#"{"amount": 12.5, "at": 1700000000}"#).unwrap();
        assert_eq!(a.amount, 12.5);
        assert_eq!(a.at, 1_700_000_000);

        let b: Sample = serde_json::from_str(r#"{"amount": "42", "at": "1700000001"}"#).unwrap();
        assert_eq!(b.amount, 42.0);
        assert_eq!(b.at, 1_700_000_001);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"amount": "abc", "at": 1}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"amount": 1, "at": "soon"}"#).is_err());
    }
}
