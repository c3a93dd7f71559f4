//! Lenient deserializers for form-sourced numbers.
//!
//! Admin forms submit numbers as text, so `"5"` and `5` must both decode.

use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Int(i64),
    Float(f64),
    Text(String),
}

/// What to do with a number that has a fractional part
#[derive(Clone, Copy)]
enum Fraction {
    /// Identifiers: `1.9` would name a different row
    Reject,
    Truncate,
}

fn whole<E: de::Error>(f: f64, fraction: Fraction, unexpected: Unexpected<'_>) -> Result<i64, E> {
    if !f.is_finite() {
        return Err(E::invalid_value(unexpected, &"a finite number"));
    }
    match fraction {
        Fraction::Reject if f.fract() != 0.0 => Err(E::invalid_value(unexpected, &"a whole number")),
        _ => Ok(f.trunc() as i64),
    }
}

fn number_from_text<E: de::Error>(text: &str, fraction: Fraction) -> Result<Option<i64>, E> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(Some(n));
    }
    match trimmed.parse::<f64>() {
        Ok(f) => whole(f, fraction, Unexpected::Str(text)).map(Some),
        Err(_) => Err(E::invalid_value(Unexpected::Str(text), &"a number")),
    }
}

fn number_like<E: de::Error>(raw: Option<NumberLike>, fraction: Fraction) -> Result<Option<i64>, E> {
    match raw {
        None => Ok(None),
        Some(NumberLike::Int(n)) => Ok(Some(n)),
        Some(NumberLike::Float(f)) => whole(f, fraction, Unexpected::Float(f)).map(Some),
        Some(NumberLike::Text(text)) => number_from_text(&text, fraction),
    }
}

/// Optional identifier: `null`, `""` and absent all mean `None`.
/// Fractional values are rejected.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    number_like(Option::<NumberLike>::deserialize(deserializer)?, Fraction::Reject)
}

/// Required count where blank input counts as zero and fractions truncate.
pub fn i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_like(Option::<NumberLike>::deserialize(deserializer)?, Fraction::Truncate)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_i64")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "i64_lenient")]
        years: i64,
    }

    fn sample(value: serde_json::Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn accepts_numbers_and_numeric_text() {
        let p = sample(json!({"id": "17", "years": "5"})).unwrap();
        assert_eq!(p.id, Some(17));
        assert_eq!(p.years, 5);

        let p = sample(json!({"id": 1700000000000i64, "years": 3.9})).unwrap();
        assert_eq!(p.id, Some(1_700_000_000_000));
        assert_eq!(p.years, 3);
    }

    #[test]
    fn blank_values() {
        let p = sample(json!({"id": "", "years": ""})).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.years, 0);

        let p = sample(json!({"id": null, "years": null})).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.years, 0);

        let p = sample(json!({})).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.years, 0);
    }

    #[test]
    fn fractional_ids_are_rejected() {
        assert!(sample(json!({"id": 1.9})).is_err());
        assert!(sample(json!({"id": "1.9"})).is_err());
        assert_eq!(sample(json!({"id": 2.0})).unwrap().id, Some(2));
        assert_eq!(sample(json!({"years": "4.5"})).unwrap().years, 4);
    }

    #[test]
    fn rejects_garbage() {
        assert!(sample(json!({"years": "five"})).is_err());
        assert!(sample(json!({"id": true})).is_err());
    }
}
