//! Serde adapter for `f64` fields that may be non-finite.
//!
//! JSON has no NaN/infinity; serde_json writes them as `null` and refuses to
//! read `null` back into an `f64`. Finite values stay plain numbers, non-finite
//! ones are written as the strings `"NaN"`, `"inf"` and `"-inf"`.
//!
//! Use with `#[serde(with = "non_finite")]` on `f64` and
//! `#[serde(with = "non_finite::vec")]` on `Vec<f64>`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

impl Repr {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => s
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, \"NaN\", \"inf\" or \"-inf\", found \"{s}\""))),
        }
    }
}

struct Value(f64);

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(&self.0, serializer)
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if *value > 0.0 {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Repr::deserialize(deserializer)?.into_f64()
}

pub mod vec {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|&v| Value(v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Repr>::deserialize(deserializer)?
            .into_iter()
            .map(|r| r.into_f64::<D::Error>())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super")]
        one: f64,
        #[serde(with = "super::vec")]
        many: Vec<f64>,
    }

    #[test]
    fn non_finite_values_survive_json() {
        let sample = Sample {
            one: f64::NAN,
            many: vec![1.5, f64::INFINITY, f64::NEG_INFINITY, -0.0],
        };
        let text = serde_json::to_string(&sample).unwrap();
        assert_eq!(text, r#"{"one":"NaN","many":[1.5,"inf","-inf",-0.0]}"#);

        let back: Sample = serde_json::from_str(&text).unwrap();
        assert!(back.one.is_nan());
        assert_eq!(back.many[..3], [1.5, f64::INFINITY, f64::NEG_INFINITY]);
        assert!(back.many[3].is_sign_negative());
    }

    #[test]
    fn rejects_unknown_text() {
        let err = serde_json::from_str::<Sample>(r#"{"one":"big","many":[]}"#).unwrap_err();
        assert!(err.to_string().contains("found \"big\""));
    }
}
