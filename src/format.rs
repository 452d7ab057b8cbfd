//! Canonical text form of a parsed query.
//!
//! ```text
//! github | list_issues(repo='org/repo', limit=10)
//! | where state == 'open' and comments > 5
//! | sort by created desc
//! ```

use std::fmt;

use crate::{
    ast::{Condition, Operator, Query, TokenKind, Value},
    lexer::tokenize,
    parser::parse,
};

/// Quotes text with single quotes, escaping quotes and backslashes.
fn quote(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('\'');
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            result.push('\\');
        }
        result.push(ch);
    }
    result.push('\'');
    result
}

/// `-?digits(.digits)?`, the shape the lexer reads as one number token.
fn is_number_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.is_none_or(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

/// Condition values are untyped text; numbers and booleans read back the
/// same bare, everything else is quoted.
fn condition_literal(text: &str) -> String {
    let bare = is_number_literal(text)
        || text.eq_ignore_ascii_case("true")
        || text.eq_ignore_ascii_case("false");
    if bare { text.to_string() } else { quote(text) }
}

/// Extend expressions are stored as their tokens joined by spaces, so they
/// only print bare when the lexer reads them back the same way.
fn extend_literal(expression: &str) -> String {
    let bare = tokenize(expression).is_ok_and(|tokens| {
        tokens.iter().all(|t| t.kind != TokenKind::Pipe)
            && tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ") == expression
    });
    if bare { expression.to_string() } else { quote(expression) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", quote(s)),
            Value::Number(n) if self.is_integer() => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column,
            self.operator.as_str(),
            condition_literal(&self.value)
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Where { conditions } => {
                let conditions: Vec<String> = conditions.iter().map(|c| c.to_string()).collect();
                write!(f, "where {}", conditions.join(" and "))
            }
            Operator::Project { columns } => write!(f, "project {}", columns.join(", ")),
            Operator::Take { count } => write!(f, "take {}", count),
            Operator::Sort { column, ascending } => {
                let direction = if *ascending { "asc" } else { "desc" };
                write!(f, "sort by {} {}", column, direction)
            }
            Operator::Count => write!(f, "count"),
            Operator::Extend {
                column_name,
                expression,
            } => write!(f, "extend {} = {}", column_name, extend_literal(expression)),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.provider, self.tool)?;

        if !self.parameters.is_empty() {
            let params: Vec<String> = self
                .parameters
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            write!(f, "({})", params.join(", "))?;
        }

        for op in &self.operators {
            write!(f, "\n| {}", op)?;
        }
        Ok(())
    }
}

/// Re-serializes a query in canonical form.
///
/// Input that does not parse is returned unchanged.
///
/// # Examples
///
/// ```
/// use mcpql::format;
///
/// assert_eq!(
///     format("github.list_issues( repo = \"org/repo\" )|take 3"),
///     "github | list_issues(repo='org/repo')\n| take 3"
/// );
/// assert_eq!(format("not { valid"), "not { valid");
/// ```
pub fn format(input: &str) -> String {
    match parse(input) {
        Ok(query) => query.to_string(),
        Err(e) => {
            log::debug!("format left input unchanged: {}", e);
            input.to_string()
        }
    }
}

#[test]
fn test_condition_literals() {
    assert_eq!(condition_literal("42"), "42");
    assert_eq!(condition_literal("-1.5"), "-1.5");
    assert_eq!(condition_literal("true"), "true");
    assert_eq!(condition_literal("open"), "'open'");
    assert_eq!(condition_literal("it's"), "'it\\'s'");
}
