//! Serde codec for ratio and permissible-stress floats.
//!
//! Finite values are plain JSON numbers. Non-finite values are written as
//! the strings `"inf"`, `"-inf"` and `"NaN"`; `null` is not accepted.
//!
//! Use with `#[serde(with = "non_finite")]`.

use serde::{Deserialize, Deserializer, Serializer};

const POS_INF: &str = "inf";
const NEG_INF: &str = "-inf";
const NAN: &str = "NaN";

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_nan() {
        serializer.serialize_str(NAN)
    } else if *value == f64::INFINITY {
        serializer.serialize_str(POS_INF)
    } else if *value == f64::NEG_INFINITY {
        serializer.serialize_str(NEG_INF)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrMarker {
        Number(f64),
        Marker(String),
    }

    match NumberOrMarker::deserialize(deserializer)? {
        NumberOrMarker::Number(v) => Ok(v),
        NumberOrMarker::Marker(s) => match s.as_str() {
            POS_INF => Ok(f64::INFINITY),
            NEG_INF => Ok(f64::NEG_INFINITY),
            NAN => Ok(f64::NAN),
            other => Err(serde::de::Error::custom(format!(
                "expected a number, 'inf', '-inf' or 'NaN', got '{other}'"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        value: f64,
    }

    fn roundtrip(value: f64) -> (String, f64) {
        let json = serde_json::to_string(&Wrapper { value }).unwrap();
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        (json, back.value)
    }

    #[test]
    fn test_finite_stays_number() {
        let (json, back) = roundtrip(0.8844);
        assert_eq!(json, r#"{"value":0.8844}"#);
        assert_eq!(back, 0.8844);
    }

    #[test]
    fn test_infinities_keep_their_sign() {
        let (json, back) = roundtrip(f64::INFINITY);
        assert_eq!(json, r#"{"value":"inf"}"#);
        assert_eq!(back, f64::INFINITY);

        let (json, back) = roundtrip(f64::NEG_INFINITY);
        assert_eq!(json, r#"{"value":"-inf"}"#);
        assert_eq!(back, f64::NEG_INFINITY);
    }

    #[test]
    fn test_nan_is_distinct_from_infinity() {
        let (json, back) = roundtrip(f64::NAN);
        assert_eq!(json, r#"{"value":"NaN"}"#);
        assert!(back.is_nan());
    }

    #[test]
    fn test_rejects_null_and_unknown_markers() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":null}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"infinity"}"#).is_err());
    }
}
