//! The patch operation type and its wire decoding.

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::PatchError;
use crate::validation::get_field;

/// One step of a patch document.
///
/// Serialises to the usual `{"op": "...", "path": "...", ...}` form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
            Self::Move { .. } => "move",
            Self::Copy { .. } => "copy",
            Self::Test { .. } => "test",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Move { path, .. }
            | Self::Copy { path, .. }
            | Self::Test { path, .. } => path,
        }
    }

    /// Decode one operation object. Member names and the op name are
    /// matched case-insensitively.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, PatchError> {
        let malformed = |message: String| PatchError::MalformedOperation { index, message };

        let obj = value
            .as_object()
            .ok_or_else(|| malformed("must be an object".to_string()))?;
        let op = string_member(obj, "op").map_err(malformed)?;
        let path = || string_member(obj, "path").map_err(malformed);
        let from = || string_member(obj, "from").map_err(malformed);
        let value = || {
            get_field(obj, "value")
                .cloned()
                .ok_or_else(|| malformed("missing 'value'".to_string()))
        };

        match op.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add {
                path: path()?,
                value: value()?,
            }),
            "remove" => Ok(Self::Remove { path: path()? }),
            "replace" => Ok(Self::Replace {
                path: path()?,
                value: value()?,
            }),
            "move" => Ok(Self::Move {
                from: from()?,
                path: path()?,
            }),
            "copy" => Ok(Self::Copy {
                from: from()?,
                path: path()?,
            }),
            "test" => Ok(Self::Test {
                path: path()?,
                value: value()?,
            }),
            other => Err(malformed(format!("unknown op '{}'", other))),
        }
    }
}

fn string_member(obj: &Map<String, Value>, key: &str) -> Result<String, String> {
    match get_field(obj, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(format!("'{}' must be a string", key)),
        None => Err(format!("missing '{}'", key)),
    }
}

/// Decode a whole patch document (a JSON array of operations).
pub fn parse_document(value: &Value) -> Result<Vec<PatchOperation>, PatchError> {
    let items = value
        .as_array()
        .ok_or_else(|| PatchError::InvalidDocument("expected an array of operations".to_string()))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| PatchOperation::from_value(index, item))
        .collect()
}
