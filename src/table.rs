use serde::Serialize;

/// String-typed tabular result consumed and produced by every operator.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub execution_time_ms: i64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Table {
    /// Builds a successful table; `row_count` follows `rows`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table {
            row_count: rows.len(),
            columns,
            rows,
            execution_time_ms: 0,
            success: true,
            error: None,
        }
    }

    pub fn empty() -> Self {
        Table::new(vec![], vec![])
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Table {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_execution_time(mut self, ms: i64) -> Self {
        self.execution_time_ms = ms;
        self
    }

    /// Same metadata, new shape.
    pub fn reshape(&self, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table {
            row_count: rows.len(),
            columns,
            rows,
            execution_time_ms: self.execution_time_ms,
            success: self.success,
            error: self.error.clone(),
        }
    }

    /// Index of a column, preferring an exact match over a case-insensitive one.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name).or_else(|| {
            let lower = name.to_lowercase();
            self.columns.iter().position(|c| c.to_lowercase() == lower)
        })
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
