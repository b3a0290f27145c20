use std::str::FromStr;

use serde::{
    de::{self, Unexpected},
    Deserialize, Deserializer,
};
use serde_derive::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(u64),
    Text(String),
}

/// Accepts `12` as well as `"12"`; `null` and a missing field become `None`.
pub fn int_from_number_or_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(n)) => T::try_from(n).map(Some).map_err(|_| {
            de::Error::invalid_value(Unexpected::Unsigned(n), &"an integer in range")
        }),
        Some(IntOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IntOrString::Text(s)) => s
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"an integer")),
    }
}

/// Empty strings count as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an optional id query parameter; an empty value counts as absent.
pub fn parse_id_param(name: &str, value: Option<&str>) -> Result<Option<u64>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid {}: '{}'", name, v))),
    }
}

#[cfg(test)]
mod tests {
    use serde_derive::Deserialize;

    use super::{int_from_number_or_string, non_empty, parse_id_param};

    #[derive(Deserialize, Debug)]
    struct Body {
        #[serde(default, deserialize_with = "int_from_number_or_string")]
        capacity: Option<u32>,
    }

    fn capacity(json: &str) -> Option<u32> {
        serde_json::from_str::<Body>(json).unwrap().capacity
    }

    #[test]
    fn int_from_number_or_string_accepts_both_forms() {
        assert_eq!(capacity(r#"{"capacity": 12}"#), Some(12));
        assert_eq!(capacity(r#"{"capacity": "12"}"#), Some(12));
        assert_eq!(capacity(r#"{"capacity": null}"#), None);
        assert_eq!(capacity(r#"{}"#), None);
    }

    #[test]
    fn int_from_number_or_string_rejects_junk() {
        assert!(serde_json::from_str::<Body>(r#"{"capacity": "many"}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"capacity": 5000000000}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"capacity": -1}"#).is_err());
    }

    #[test]
    fn non_empty_drops_blank_strings() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    }

    #[test]
    fn parse_id_param_handles_blank_and_bad_values() {
        assert_eq!(parse_id_param("id", None).unwrap(), None);
        assert_eq!(parse_id_param("id", Some("")).unwrap(), None);
        assert_eq!(parse_id_param("id", Some("101")).unwrap(), Some(101));
        assert!(parse_id_param("id", Some("abc")).is_err());
    }
}
