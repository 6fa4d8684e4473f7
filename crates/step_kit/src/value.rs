use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Coerces an arbitrary value into the text carried by a command or file channel.
///
/// `null` (including `None`) becomes the empty string, strings pass through
/// untouched, and everything else is rendered as compact JSON.
pub fn to_command_value<T>(input: &T) -> String
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(input) {
        Ok(Value::Null) => String::new(),
        Ok(Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(error) => {
            warn!(%error, "value could not be serialized; coercing to empty string");
            String::new()
        }
    }
}

/// JavaScript-style truthiness used when filtering command properties and
/// HTML attributes: `null`, `false`, `0`, and `""` are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
