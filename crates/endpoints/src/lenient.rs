//! Serde helpers for provider fields that arrive as numbers, numeric strings,
//! or not at all.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Accepts `12.5`, `"12.5"`, `"12.5%"` or `null`. Unparseable values become `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

/// Accepts booleans as well as the `"true"`/`"false"` and `1`/`0` spellings.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_f64")]
        x: Option<f64>,
        #[serde(default, deserialize_with = "opt_bool")]
        ok: Option<bool>,
    }

    #[test]
    fn numeric_strings_and_percent_suffixes_parse() {
        let p: Probe = serde_json::from_str(r#"{"x": "42.5%", "ok": "true"}"#).unwrap();
        assert_eq!(p.x, Some(42.5));
        assert_eq!(p.ok, Some(true));
    }

    #[test]
    fn garbage_becomes_none_instead_of_error() {
        let p: Probe = serde_json::from_str(r#"{"x": "n/a", "ok": [1]}"#).unwrap();
        assert_eq!(p.x, None);
        assert_eq!(p.ok, None);
    }

    #[test]
    fn absent_fields_default_to_none() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.x, None);
        assert_eq!(p.ok, None);
    }
}
