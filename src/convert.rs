//! JSON -> Table conversion for tool results.
//!
//! Tool output is arbitrary JSON, so the converter guesses a tabular shape:
//!
//! - an array of objects becomes one row per element, with the union of keys
//!   (first-seen order) as columns
//! - an array of primitives becomes a single `value` column
//! - an object wrapping a list (`{"items": [...], "total": 3}`) is unwrapped to
//!   its first non-empty array-of-objects property
//! - any other object becomes a single row
//! - a primitive becomes a single `value` cell

use indexmap::IndexSet;
use serde_json::{Map, Value as Json};

use crate::table::Table;

const VALUE_COLUMN: &str = "value";

/// Converts raw JSON text into a [`Table`]. Never fails: malformed JSON
/// produces a table with `success == false` and the parse error in `error`.
///
/// # Examples
///
/// ```
/// use mcpql::json_to_table;
///
/// let table = json_to_table(r#"[{"a":1,"b":2},{"a":3}]"#, 0);
/// assert_eq!(table.columns, vec!["a", "b"]);
/// assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", ""]]);
/// ```
pub fn json_to_table(json: &str, execution_time_ms: i64) -> Table {
    let table = match serde_json::from_str::<Json>(json) {
        Ok(value) => value_to_table(&value),
        Err(e) => {
            log::debug!("tool result is not valid JSON: {}", e);
            Table::failed(format!("Invalid JSON: {}", e))
        }
    };
    table.with_execution_time(execution_time_ms)
}

/// Converts an already-parsed JSON value into a [`Table`].
pub fn value_to_table(value: &Json) -> Table {
    match value {
        Json::Null => Table::empty(),
        Json::Array(items) => array_to_table(items),
        Json::Object(map) => match wrapped_records(map) {
            Some(items) => array_to_table(items),
            None => object_to_table(map),
        },
        primitive => Table::new(
            vec![VALUE_COLUMN.to_string()],
            vec![vec![cell_text(primitive)]],
        ),
    }
}

fn is_record_array(items: &[Json]) -> bool {
    items.first().is_some_and(Json::is_object)
}

/// First property, in declaration order, holding a non-empty array of objects.
fn wrapped_records(map: &Map<String, Json>) -> Option<&Vec<Json>> {
    map.values().find_map(|value| match value {
        Json::Array(items) if is_record_array(items) => Some(items),
        _ => None,
    })
}

fn array_to_table(items: &[Json]) -> Table {
    if items.is_empty() {
        return Table::empty();
    }

    if !is_record_array(items) {
        let rows = items.iter().map(|item| vec![cell_text(item)]).collect();
        return Table::new(vec![VALUE_COLUMN.to_string()], rows);
    }

    let mut columns: IndexSet<&str> = IndexSet::new();
    for item in items {
        if let Json::Object(map) = item {
            columns.extend(map.keys().map(String::as_str));
        }
    }

    let rows = items
        .iter()
        .map(|item| match item {
            Json::Object(map) => columns
                .iter()
                .map(|column| map.get(*column).map(cell_text).unwrap_or_default())
                .collect(),
            _ => vec![String::new(); columns.len()],
        })
        .collect();

    Table::new(columns.into_iter().map(str::to_string).collect(), rows)
}

fn object_to_table(map: &Map<String, Json>) -> Table {
    let columns = map.keys().cloned().collect();
    let row = map.values().map(cell_text).collect();
    Table::new(columns, vec![row])
}

/// Text of a single cell. Nested objects and arrays keep their raw JSON.
fn cell_text(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => n.to_string(),
        Json::String(s) => s.clone(),
        nested => nested.to_string(),
    }
}

#[test]
fn test_wrapped_list_is_unwrapped() {
    let table = json_to_table(r#"{"total": 2, "items": [{"id": 1}, {"id": 2}]}"#, 7);
    assert_eq!(table.columns, vec!["id"]);
    assert_eq!(table.row_count, 2);
    assert_eq!(table.execution_time_ms, 7);
}

#[test]
fn test_nested_values_stay_json() {
    let table = json_to_table(r#"[{"tags": ["a", "b"], "meta": {"x": null}}]"#, 0);
    assert_eq!(table.rows[0], vec![r#"["a","b"]"#, r#"{"x":null}"#]);
}
