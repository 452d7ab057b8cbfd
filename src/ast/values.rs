use serde::Serialize;

/// A typed tool-call parameter value.
///
/// # Examples
///
/// ```
/// use mcpql::Value;
///
/// let repo = Value::String("org/repo".to_string());
/// let limit = Value::Number(10.0);
/// let open = Value::Bool(true);
///
/// assert_eq!(limit.to_string(), "10");
/// assert_eq!(Value::Number(2.5).to_string(), "2.5");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// UTF-8 string, also used for bare identifiers and reserved words
    String(String),

    /// Number; whole values print without a fractional part
    Number(f64),

    /// Boolean (true/false)
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// True if the number has no fractional part and fits in an i64.
    pub fn is_integer(&self) -> bool {
        match self {
            Value::Number(n) => n.fract() == 0.0 && n.abs() < i64::MAX as f64,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
