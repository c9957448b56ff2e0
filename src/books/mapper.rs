//! Response shaping: the `results` array, untouched.

use serde_json::Value;

/// Pull `results` out of the upstream body.
///
/// Missing or `null` results (including non-object and non-JSON bodies)
/// become an empty array. Records are never inspected.
pub fn map_results(body: Value) -> Value {
    let results = match body {
        Value::Object(mut map) => map.remove("results"),
        _ => None,
    };
    match results {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(results) => results,
    }
}
