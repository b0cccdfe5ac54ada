//! Deep merge of configuration trees
//!
//! - Objects: merged key by key (recursive)
//! - Arrays: replaced wholesale, never concatenated
//! - Scalars and `null`: override wins

use log::debug;
use serde_json::{Map, Value};

/// Overlay `overlay` onto a copy of `base`.
///
/// Neither input is modified. Keys only in `base` keep their position, keys
/// only in `overlay` are appended in `overlay`'s order. If `overlay` is not an
/// object the result is a plain copy of `base`.
///
/// # Example
///
/// ```
/// use nfd_config::merge_config;
/// use serde_json::json;
///
/// let base = json!({ "server": { "port": 6400, "contextPath": "/" } });
/// let user = json!({ "server": { "port": 8080 } });
///
/// let merged = merge_config(&base, &user);
/// assert_eq!(merged, json!({ "server": { "port": 8080, "contextPath": "/" } }));
/// ```
#[must_use]
pub fn merge_config(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();

    let Value::Object(source) = overlay else {
        return merged;
    };

    if !merged.is_object() {
        merged = Value::Object(Map::new());
    }
    if let Value::Object(target) = &mut merged {
        merge_objects(target, source);
    }

    debug!("Merged {} top-level override key(s)", source.len());
    merged
}

/// Merge several layers in order; the last layer has the highest precedence.
#[must_use]
pub fn merge_layers(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Object(Map::new()), |acc, layer| merge_config(&acc, layer))
}

fn merge_objects(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match value {
            Value::Object(section) => {
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(inner) = slot {
                    merge_objects(inner, section);
                }
            }
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
}
