use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::parser::parse;

/// Structured outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_column: Option<usize>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        ValidationResult {
            is_valid: true,
            ..Default::default()
        }
    }
}

/// Checks whether the text parses, without ever failing.
///
/// # Examples
///
/// ```
/// use mcpql::validate;
///
/// assert!(validate("github | list_issues").is_valid);
///
/// let result = validate("github | list_issues | take");
/// assert!(!result.is_valid);
/// assert_eq!(result.error_line, Some(1));
/// ```
pub fn validate(input: &str) -> ValidationResult {
    match parse(input) {
        Ok(_) => ValidationResult::valid(),
        Err(e) => ValidationResult {
            is_valid: false,
            error_message: Some(e.message),
            error_line: Some(e.line),
            error_column: Some(e.column),
        },
    }
}

static PIPE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[A-Za-z_][\w-]*\s*\|\s*[A-Za-z_][\w-]*\s*\(").expect("valid pattern")
});

static DOT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[A-Za-z_][\w-]*\.[A-Za-z_][\w-]*\s*\(").expect("valid pattern")
});

/// Cheap check for whether text is probably MCPQL, for routing input.
///
/// Matches `provider | tool(` and `provider.tool(` at the start of the text.
/// A `true` result does not mean the text parses.
///
/// # Examples
///
/// ```
/// use mcpql::looks_like_mcpql;
///
/// assert!(looks_like_mcpql("github | list_issues(repo='a/b')"));
/// assert!(looks_like_mcpql("fs.read_file(path='x')"));
/// assert!(!looks_like_mcpql("SELECT * FROM issues"));
/// ```
pub fn looks_like_mcpql(text: &str) -> bool {
    PIPE_CALL.is_match(text) || DOT_CALL.is_match(text)
}
