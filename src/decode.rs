//! Bytes → JSON object.

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::error::DecodeError;
use crate::options::NumberPolicy;

/// Turns raw input into the object the type tree is built from.
pub trait Decoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Map<String, Value>, DecodeError>;
}

impl<F> Decoder for F
where
    F: Fn(&[u8]) -> Result<Map<String, Value>, DecodeError> + Send + Sync,
{
    fn decode(&self, bytes: &[u8]) -> Result<Map<String, Value>, DecodeError> {
        self(bytes)
    }
}

/// serde_json decoder. Object keys keep document order.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    numbers: NumberPolicy,
    pointer: Option<String>,
}

impl JsonDecoder {
    pub fn new(numbers: NumberPolicy) -> Self {
        Self { numbers, pointer: None }
    }

    /// Infer from the sub-document at this JSON Pointer (e.g. `/data/0`) instead of the root.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }
}

impl Decoder for JsonDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Map<String, Value>, DecodeError> {
        let mut value: Value = from_slice_with_path(bytes)?;
        if let Some(pointer) = &self.pointer {
            value = match value.pointer_mut(pointer) {
                Some(selected) => selected.take(),
                None => {
                    return Err(DecodeError::new(format!("JSON pointer `{pointer}` matched nothing")));
                }
            };
        }
        if self.numbers == NumberPolicy::Float {
            coerce_floats(&mut value, &mut String::new())?;
        }
        match value {
            Value::Object(map) => Ok(map),
            other => Err(DecodeError::new(format!(
                "expected a JSON object at the top level, found {}",
                kind_name(&other)
            ))),
        }
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize::<_, T>(&mut *de).map_err(|err| {
        let path = err.path().to_string();
        let message = err.into_inner().to_string();
        // an empty path renders as "."
        if path == "." { DecodeError::new(message) } else { DecodeError::at(path, message) }
    })?;
    de.end().map_err(|err| DecodeError::new(err.to_string()))?;
    Ok(value)
}

/// Rewrites every number as an `f64`. `path` tracks the position for errors.
fn coerce_floats(value: &mut Value, path: &mut String) -> Result<(), DecodeError> {
    match value {
        Value::Number(n) => match n.as_f64().and_then(Number::from_f64) {
            Some(f) => *n = f,
            None => {
                let message = format!("number {n} is out of range for f64");
                return Err(if path.is_empty() {
                    DecodeError::new(message)
                } else {
                    DecodeError::at(path.clone(), message)
                });
            }
        },
        Value::Array(xs) => {
            for (i, x) in xs.iter_mut().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{i}]"));
                coerce_floats(x, path)?;
                path.truncate(len);
            }
        }
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                let len = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
                coerce_floats(v, path)?;
                path.truncate(len);
            }
        }
        _ => {}
    }
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
