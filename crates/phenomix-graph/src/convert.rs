//! Conversion of Neo4j nodes and rows into loosely-typed JSON properties.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use neo4rs::{Node, Row};
use phenomix_core::Properties;
use serde_json::{Map, Value};
use tracing::warn;

/// Read every property of a node.
///
/// Temporal values are rendered as ISO-8601 text; properties that cannot be
/// read at all are skipped with a warning.
pub fn node_properties(node: &Node) -> Properties {
    let mut properties = Properties::new();
    for key in node.keys() {
        match property_value(node, key) {
            Some(value) => {
                properties.insert(key.to_string(), value);
            }
            None => warn!(property = key, "Skipping unreadable node property"),
        }
    }
    properties
}

fn property_value(node: &Node, key: &str) -> Option<Value> {
    if let Ok(value) = node.get::<Value>(key) {
        return Some(value);
    }
    if let Ok(date) = node.get::<NaiveDate>(key) {
        return Some(Value::String(date.to_string()));
    }
    if let Ok(datetime) = node.get::<NaiveDateTime>(key) {
        return Some(Value::String(datetime.to_string()));
    }
    if let Ok(datetime) = node.get::<DateTime<FixedOffset>>(key) {
        return Some(Value::String(datetime.to_rfc3339()));
    }
    None
}

/// Read a node column from a row and convert its properties.
pub fn row_node_properties(row: &Row, column: &str) -> Option<Properties> {
    row.get::<Node>(column).ok().map(|node| node_properties(&node))
}

/// Convert a result row of an arbitrary query into a JSON object.
///
/// Rows the JSON deserializer cannot represent fall back to their debug
/// rendering so the content still reaches the answer prompt.
pub fn row_to_json(row: &Row) -> Value {
    match row.to::<Map<String, Value>>() {
        Ok(map) => Value::Object(map),
        Err(e) => {
            warn!(error = %e, "Row not representable as JSON, using debug form");
            serde_json::json!({ "row": format!("{:?}", row) })
        }
    }
}

/// Read an optional text column, accepting either a string or a list of
/// strings (rendered back into the stringified-list form).
pub fn optional_text(row: &Row, column: &str) -> Option<String> {
    if let Ok(Some(text)) = row.get::<Option<String>>(column) {
        return Some(text);
    }
    if let Ok(items) = row.get::<Vec<String>>(column) {
        let quoted: Vec<String> = items.iter().map(|s| format!("'{}'", s.replace('\'', "\\'"))).collect();
        return Some(format!("[{}]", quoted.join(", ")));
    }
    None
}
