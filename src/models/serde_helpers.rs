//! Serde helpers for tolerant decoding of persisted documents

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a line count out of an arbitrary JSON value.
///
/// Numbers are truncated toward zero; anything else (missing, null, strings,
/// booleans) counts as 0.
pub fn line_count_from_value(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .or_else(|| n.as_f64().map(|v| v as i32))
            .unwrap_or(0),
        _ => 0,
    }
}

/// `deserialize_with` adapter for [`line_count_from_value`]
pub fn deserialize_line_count<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(line_count_from_value(value.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_count_from_value() {
        assert_eq!(line_count_from_value(Some(&json!(7))), 7);
        assert_eq!(line_count_from_value(Some(&json!(7.9))), 7);
        assert_eq!(line_count_from_value(Some(&json!("7"))), 0);
        assert_eq!(line_count_from_value(Some(&Value::Null)), 0);
        assert_eq!(line_count_from_value(None), 0);
    }
}
