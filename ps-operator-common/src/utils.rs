// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use serde::Serialize;
use blake3::hash as blake3_hash;
use serde_json::Value;

/// Compute a hash for any serializable object
///
/// Object keys are sorted before hashing, so two values that only differ in
/// map ordering produce the same hash.
pub fn compute_object_hash<T>(object: &T) -> Result<String, serde_json::Error>
where
    T: Serialize,
{
    let value = serde_json::to_value(object)?;
    let hash = blake3_hash(serde_json::to_string(&sort_json(value))?.as_bytes());

    Ok(hash.to_hex().to_string())
}

/// Recursively sort JSON objects
pub fn sort_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().map(|(k, v)| (k, sort_json(v))).collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        },
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_json).collect()),
        _ => value,
    }
}
