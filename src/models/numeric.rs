//! Lenient number readers.
//!
//! Records arrive from three writers: the seed files, documents created by
//! the old Node service (numbers stored as doubles) and LLM output (numbers
//! sometimes quoted). These helpers accept all of them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                Some(i.min(u32::MAX as u64) as u32)
            } else {
                n.as_f64().map(|f| f.ceil() as u32)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u32>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.ceil() as u32))
        }
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(['$', ','], "").parse::<f64>().ok(),
        _ => None,
    }
}

// Doubles round up, anything unreadable becomes 0
pub fn deserialize_rounded_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_u32(&value).unwrap_or(0))
}

pub fn deserialize_optional_rounded_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u32))
}

pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value).unwrap_or(0.0))
}

pub fn deserialize_optional_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}
