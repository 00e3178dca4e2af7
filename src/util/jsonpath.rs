//! Dotted-path access into generic JSON trees.
//!
//! Manifest trees are untyped `serde_json::Value`s; the field-mapping table
//! addresses into them with dotted property paths like `publish.include`.

use serde_json::{Map, Value};

/// Read the value at a dotted property path, if present.
pub fn get_path<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Write a value at a dotted property path, creating intermediate objects
/// as needed. A non-object intermediate is replaced by an object.
pub fn set_path(tree: &mut Value, path: &str, value: Value) {
    let mut current = tree;
    let segments: Vec<&str> = path.split('.').collect();

    for (i, segment) in segments.iter().enumerate() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let map = current.as_object_mut().expect("just ensured object");

        if i == segments.len() - 1 {
            map.insert((*segment).to_string(), value);
            return;
        }

        current = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
