use std::{cmp::Ordering, str::FromStr};

use regex::RegexBuilder;
use rust_decimal::Decimal;

use crate::{
    ast::{Comparator, Condition, Operator, Query},
    convert::json_to_table,
    table::Table,
};

/// Applies the operator pipeline to a table, one operator at a time.
///
/// A failed table or an empty pipeline is returned as is. Each operator sees
/// the table produced by the one before it.
///
/// # Examples
///
/// ```
/// use mcpql::{apply, parse, json_to_table};
///
/// let table = json_to_table(r#"[{"n":"1"},{"n":"10"},{"n":"2"}]"#, 0);
/// let query = parse("t | rows | sort by n desc | take 2").unwrap();
///
/// let result = apply(table, &query.operators);
/// assert_eq!(result.rows, vec![vec!["10"], vec!["2"]]);
/// ```
pub fn apply(table: Table, operators: &[Operator]) -> Table {
    if !table.success || operators.is_empty() {
        return table;
    }

    operators.iter().fold(table, |current, op| {
        let before = current.row_count;
        let next = apply_operator(&current, op);
        log::debug!(
            "applied {}: {} -> {} row(s), {} column(s)",
            op.name(),
            before,
            next.row_count,
            next.columns.len()
        );
        next
    })
}

/// Converts a tool's JSON result and runs the query's pipeline over it.
pub fn execute(query: &Query, json: &str, execution_time_ms: i64) -> Table {
    apply(json_to_table(json, execution_time_ms), &query.operators)
}

fn apply_operator(table: &Table, op: &Operator) -> Table {
    match op {
        Operator::Where { conditions } => apply_where(table, conditions),
        Operator::Project { columns } => apply_project(table, columns),
        Operator::Take { count } => apply_take(table, *count),
        Operator::Sort { column, ascending } => apply_sort(table, column, *ascending),
        Operator::Count => apply_count(table),
        Operator::Extend {
            column_name,
            expression,
        } => apply_extend(table, column_name, expression),
    }
}

// ========================================
// Operators
// ========================================

/// Conditions are always combined with `and`, whichever connective was written.
fn apply_where(table: &Table, conditions: &[Condition]) -> Table {
    let rows = table
        .rows
        .iter()
        .filter(|row| conditions.iter().all(|c| row_matches(table, row, c)))
        .cloned()
        .collect();
    table.reshape(table.columns.clone(), rows)
}

fn apply_project(table: &Table, requested: &[String]) -> Table {
    let mut indices: Vec<usize> = Vec::with_capacity(requested.len());
    for name in requested {
        if let Some(index) = table.column_index(name)
            && !indices.contains(&index)
        {
            indices.push(index);
        }
    }

    let columns = indices.iter().map(|&i| table.columns[i].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    table.reshape(columns, rows)
}

fn apply_take(table: &Table, count: usize) -> Table {
    let rows = table.rows.iter().take(count).cloned().collect();
    table.reshape(table.columns.clone(), rows)
}

fn apply_sort(table: &Table, column: &str, ascending: bool) -> Table {
    let Some(index) = table.column_index(column) else {
        return table.clone();
    };

    let mut keyed: Vec<(SortKey, &Vec<String>)> = table
        .rows
        .iter()
        .map(|row| (SortKey::of(row.get(index).map_or("", String::as_str)), row))
        .collect();

    // sort_by is stable; reversing the comparison keeps ties in input order
    if ascending {
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    } else {
        keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    }

    let rows = keyed.into_iter().map(|(_, row)| row.clone()).collect();
    table.reshape(table.columns.clone(), rows)
}

fn apply_count(table: &Table) -> Table {
    table.reshape(
        vec!["Count".to_string()],
        vec![vec![table.rows.len().to_string()]],
    )
}

fn apply_extend(table: &Table, column_name: &str, expression: &str) -> Table {
    let source = table.column_index(expression);

    let values: Vec<String> = table
        .rows
        .iter()
        .map(|row| match source {
            Some(i) => row.get(i).cloned().unwrap_or_default(),
            None => expression.to_string(),
        })
        .collect();

    let mut columns = table.columns.clone();
    let mut rows = table.rows.clone();

    match columns.iter().position(|c| c == column_name) {
        Some(existing) => {
            for (row, value) in rows.iter_mut().zip(values) {
                if let Some(cell) = row.get_mut(existing) {
                    *cell = value;
                }
            }
        }
        None => {
            columns.push(column_name.to_string());
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }
    }

    table.reshape(columns, rows)
}

// ========================================
// Condition evaluation
// ========================================

fn row_matches(table: &Table, row: &[String], condition: &Condition) -> bool {
    let Some(index) = table.column_index(&condition.column) else {
        return false;
    };
    let cell = row.get(index).map_or("", String::as_str);
    evaluate_condition(cell, condition.operator, &condition.value)
}

/// Evaluates `cell <op> value`.
///
/// Ordering operators compare numerically when both sides are numbers;
/// everything else is case-insensitive text.
///
/// # Examples
///
/// ```
/// use mcpql::{Comparator, evaluator::evaluate_condition};
///
/// assert!(evaluate_condition("10", Comparator::GreaterThan, "9"));
/// assert!(!evaluate_condition("b10", Comparator::GreaterThan, "b9"));
/// assert!(evaluate_condition("Open", Comparator::Equal, "open"));
/// assert!(evaluate_condition("v1.2.3", Comparator::Matches, r"^V\d+"));
/// ```
pub fn evaluate_condition(cell: &str, operator: Comparator, value: &str) -> bool {
    if operator.is_ordering()
        && let (Some(a), Some(b)) = (Number::parse(cell), Number::parse(value))
    {
        return ordering_holds(operator, a.compare(&b));
    }

    let text = cell.to_lowercase();
    let target = value.to_lowercase();

    match operator {
        Comparator::Contains | Comparator::Has => text.contains(&target),
        Comparator::StartsWith => text.starts_with(&target),
        Comparator::EndsWith => text.ends_with(&target),
        Comparator::Matches => match RegexBuilder::new(value).case_insensitive(true).build() {
            Ok(re) => re.is_match(cell),
            Err(e) => {
                log::warn!("invalid pattern '{}' in matches condition: {}", value, e);
                false
            }
        },
        ordering => ordering_holds(ordering, text.cmp(&target)),
    }
}

fn ordering_holds(operator: Comparator, ordering: Ordering) -> bool {
    match operator {
        Comparator::Equal => ordering == Ordering::Equal,
        Comparator::NotEqual => ordering != Ordering::Equal,
        Comparator::GreaterThan => ordering == Ordering::Greater,
        Comparator::GreaterEqual => ordering != Ordering::Less,
        Comparator::LessThan => ordering == Ordering::Less,
        Comparator::LessEqual => ordering != Ordering::Greater,
        _ => false,
    }
}

// ========================================
// Numbers and sort keys
// ========================================

/// A cell read as a number: exact decimal when it fits, float otherwise.
#[derive(Debug, Clone, Copy)]
enum Number {
    Exact(Decimal),
    Approx(f64),
}

impl Number {
    fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if !has_number_shape(text) {
            return None;
        }
        if let Ok(d) = Decimal::from_str(text) {
            return Some(Number::Exact(d));
        }
        if let Ok(d) = Decimal::from_scientific(text) {
            return Some(Number::Exact(d));
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Number::Approx(f)),
            _ => None,
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Number::Exact(d) => rust_decimal::prelude::ToPrimitive::to_f64(d).unwrap_or(0.0),
            Number::Approx(f) => *f,
        }
    }

    fn compare(&self, other: &Number) -> Ordering {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => a.cmp(b),
            (a, b) => a.as_f64().total_cmp(&b.as_f64()),
        }
    }
}

/// `[+-]digits[.digits][e[+-]digits]`. Digit separators, `inf` and `nan`
/// are text.
fn has_number_shape(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (body, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    (!whole.is_empty() || !fraction.is_empty())
        && all_digits(whole)
        && all_digits(fraction)
        && exponent.is_none_or(|e| {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && all_digits(e)
        })
}

/// Per-row sort key: numbers sort numerically and before text.
#[derive(Debug)]
enum SortKey<'a> {
    Number(Number),
    Text(&'a str),
}

impl<'a> SortKey<'a> {
    fn of(cell: &'a str) -> Self {
        match Number::parse(cell) {
            Some(n) => SortKey::Number(n),
            None => SortKey::Text(cell),
        }
    }

    fn cmp(&self, other: &SortKey<'_>) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.compare(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

#[test]
fn test_numeric_sort_is_not_lexicographic() {
    let table = Table::new(
        vec!["n".to_string()],
        vec![vec!["1".into()], vec!["10".into()], vec!["2".into()]],
    );
    let sorted = apply_sort(&table, "n", false);
    assert_eq!(sorted.rows, vec![vec!["10"], vec!["2"], vec!["1"]]);
}

#[test]
fn test_decimal_equality_is_exact() {
    assert!(evaluate_condition("0.10", Comparator::Equal, "0.1"));
    assert!(evaluate_condition("19.99", Comparator::LessThan, "20"));
    assert!(evaluate_condition("1e3", Comparator::Equal, "1000"));
}
