//! Tolerant field deserializers for curated graph properties.
//!
//! Source exports were loaded with inconsistent scalar types (integers
//! written as floats, flags written as strings, single values where lists
//! are documented). These helpers accept the shapes seen in practice and
//! reject anything else so the record is flagged instead of misread.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

use crate::literal;

/// Optional text: strings as-is, numbers and booleans rendered, null/empty as `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => literal::scalar_text(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected text, found {}", v))),
    }
}

/// Optional integer: accepts integral floats and numeric strings.
pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
                    Some(f) if f.is_nan() => Ok(None),
                    _ => Err(D::Error::custom(format!("expected integer, found {}", n))),
                }
            }
        }
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0)
            .map(|f| Some(f as i64))
            .ok_or_else(|| D::Error::custom(format!("expected integer, found '{}'", s))),
        Some(v) => Err(D::Error::custom(format!("expected integer, found {}", v))),
    }
}

/// Optional flag: accepts booleans, 0/1 and "true"/"false" in any case.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f == 0.0 => Ok(Some(false)),
            Some(f) if f == 1.0 => Ok(Some(true)),
            _ => Err(D::Error::custom(format!("expected flag, found {}", n))),
        },
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("expected flag, found '{}'", s))),
        },
        Some(v) => Err(D::Error::custom(format!("expected flag, found {}", v))),
    }
}

/// List of text: arrays of scalars, stringified lists, or a lone scalar.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let value = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(v) => literal::decode_stringified(&v).unwrap_or(v),
    };
    match value {
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => literal::scalar_text(other).or_else(|| Some(other.to_string())),
            })
            .collect()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        other => literal::scalar_text(&other)
            .map(|s| vec![s])
            .ok_or_else(|| D::Error::custom(format!("expected list, found {}", other))),
    }
}

/// List of arbitrary values: arrays or stringified lists.
pub fn value_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let value = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(v) => literal::decode_stringified(&v).unwrap_or(v),
    };
    match value {
        Value::Array(items) => Ok(items),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        other => Ok(vec![other]),
    }
}

/// Required identifier: non-empty text or a number rendered as text.
pub fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    opt_text(deserializer)?.ok_or_else(|| D::Error::custom("missing identifier"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "opt_int")]
        int: Option<i64>,
        #[serde(default, deserialize_with = "opt_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "text_list")]
        list: Vec<String>,
    }

    fn probe(value: Value) -> Result<Probe, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_missing_fields_default() {
        let p = probe(json!({})).unwrap();
        assert!(p.text.is_none() && p.int.is_none() && p.flag.is_none());
        assert!(p.list.is_empty());
    }

    #[test]
    fn test_coercions() {
        let p = probe(json!({
            "text": 12,
            "int": 7.0,
            "flag": "TRUE",
            "list": "['Female', 'Male']"
        }))
        .unwrap();
        assert_eq!(p.text.as_deref(), Some("12"));
        assert_eq!(p.int, Some(7));
        assert_eq!(p.flag, Some(true));
        assert_eq!(p.list, vec!["Female", "Male"]);
    }

    #[test]
    fn test_lone_scalar_becomes_list() {
        let p = probe(json!({ "list": "All" })).unwrap();
        assert_eq!(p.list, vec!["All"]);
    }

    #[test]
    fn test_rejects_fractional_integer() {
        assert!(probe(json!({ "int": 2.5 })).is_err());
        assert!(probe(json!({ "flag": "maybe" })).is_err());
    }
}
