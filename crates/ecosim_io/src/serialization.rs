//! JSON helpers with validation and file context.

use crate::error::{IoError, Result};
use serde::Deserialize;
use std::path::Path;

/// Deserializes data from a JSON string. Blank input is a validation error.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }
    Ok(serde_json::from_str(json)?)
}

/// Reads and deserializes a JSON file, tagging errors with the path.
pub fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("reading JSON from {path:?}")))?;
    from_json(&json).map_err(|e| e.with_context(format!("parsing {path:?}")))
}
