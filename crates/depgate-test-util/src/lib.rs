//! Shared test utilities for the depgate workspace.
//!
//! `xtask` needs `normalize_nondeterministic` at runtime, so this lives in its own crate
//! rather than behind `#[cfg(test)]`.

use serde_json::Value;

const TIMESTAMP_KEYS: [&str; 2] = ["started_at", "finished_at"];

/// Replace the fields of a report that change between runs with fixed placeholders.
///
/// `tool.version` is rewritten only when the root object is a report envelope (it carries
/// `schema`, `tool`, `verdict` and `violations`). Timestamp keys are rewritten at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "violations"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for v in map.values_mut() {
                normalize_timestamps_recursive(v);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_timestamps_recursive),
        _ => {}
    }
}
