//! Typed answers to engine queries.
//!
//! Each query decodes the coerced result string into an [`Answer`]. Callers
//! pick their own fallback with [`Answer::or`]; the variants only record why a
//! fallback was needed.

use crate::error::EngineError;

/// Outcome of a single query round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer<T> {
    /// The engine produced a usable value.
    Value(T),
    /// The engine produced nothing (empty coerced string).
    Missing,
    /// The engine produced a string the decoder could not parse.
    Malformed(String),
    /// Evaluation failed in the engine.
    Transport(EngineError),
}

impl<T> Answer<T> {
    /// Return the value, or `fallback` for any failure variant.
    pub fn or(self, fallback: T) -> T {
        match self {
            Answer::Value(v) => v,
            _ => fallback,
        }
    }

    /// Return the value, or compute a fallback for any failure variant.
    pub fn or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Answer::Value(v) => v,
            _ => fallback(),
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Answer::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Keep the value only if it satisfies `pred`, otherwise report it missing.
    pub fn filter(self, pred: impl FnOnce(&T) -> bool) -> Answer<T> {
        match self {
            Answer::Value(v) if pred(&v) => Answer::Value(v),
            Answer::Value(_) => Answer::Missing,
            other => other,
        }
    }
}

/// Decoding from the coerced result string.
pub trait Decode: Sized {
    fn decode(raw: String) -> Answer<Self>;
}

impl Decode for String {
    fn decode(raw: String) -> Answer<Self> {
        Answer::Value(raw)
    }
}

impl Decode for bool {
    fn decode(raw: String) -> Answer<Self> {
        match raw.trim() {
            "" => Answer::Missing,
            "true" => Answer::Value(true),
            "false" => Answer::Value(false),
            _ => Answer::Malformed(raw),
        }
    }
}

impl Decode for i64 {
    fn decode(raw: String) -> Answer<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Answer::Missing;
        }
        match trimmed.parse() {
            Ok(n) => Answer::Value(n),
            Err(_) => Answer::Malformed(raw),
        }
    }
}

impl Decode for f64 {
    fn decode(raw: String) -> Answer<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Answer::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Answer::Value(n),
            _ => Answer::Malformed(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bool() {
        assert_eq!(bool::decode("true".into()), Answer::Value(true));
        assert_eq!(bool::decode("false".into()), Answer::Value(false));
        assert_eq!(bool::decode(String::new()), Answer::Missing);
        assert_eq!(bool::decode("yes".into()), Answer::Malformed("yes".into()));
    }

    #[test]
    fn test_decode_numbers() {
        assert_eq!(i64::decode("21".into()), Answer::Value(21));
        assert_eq!(i64::decode("-10".into()), Answer::Value(-10));
        assert_eq!(i64::decode("".into()), Answer::Missing);
        assert_eq!(i64::decode("21px".into()), Answer::Malformed("21px".into()));
        assert_eq!(f64::decode("12.5".into()), Answer::Value(12.5));
        assert_eq!(f64::decode("NaN".into()), Answer::Malformed("NaN".into()));
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(i64::decode("abc".into()).or(0), 0);
        assert_eq!(Answer::<i64>::Transport("boom".into()).or(21), 21);
        assert_eq!(Answer::Value(0i64).filter(|h| *h > 0), Answer::Missing);
        assert_eq!(Answer::Value(5i64).filter(|h| *h > 0).or(1), 5);
    }
}
