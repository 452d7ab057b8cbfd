use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::{Operator, Value};

/// Complete parsed query.
///
/// Represents a tool call on a provider followed by its post-processing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// Provider the tool belongs to
    pub provider: String,

    /// Tool to invoke
    pub tool: String,

    /// Call parameters in source order; a repeated name keeps its first
    /// position and its last value
    pub parameters: IndexMap<String, Value>,

    /// Pipeline operators, applied in order
    pub operators: Vec<Operator>,
}

impl Query {
    pub fn new(provider: impl Into<String>, tool: impl Into<String>) -> Self {
        Query {
            provider: provider.into(),
            tool: tool.into(),
            parameters: IndexMap::new(),
            operators: Vec::new(),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }
}
