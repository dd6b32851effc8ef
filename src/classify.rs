use serde_json::Value;

/// Layout plan for one JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Array { columns: Vec<String> },
    Object { keys: Vec<String> },
    Leaf,
}

pub fn classify(value: &Value) -> NodeKind {
    match value {
        Value::Array(items) => NodeKind::Array { columns: column_union(items) },
        Value::Object(map) => NodeKind::Object { keys: map.keys().cloned().collect() },
        _ => NodeKind::Leaf,
    }
}

// Ordered union of keys across object elements, first-seen order across
// elements in index order. Array and primitive elements contribute no keys.
pub fn column_union(items: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.iter().any(|existing| existing == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}
