// tests/evaluator_tests.rs

use mcpql::evaluator::evaluate_condition;
use mcpql::{Comparator, Condition, Operator, Table, apply, parse};
use pretty_assertions::assert_eq;

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

fn issues() -> Table {
    table(
        &["id", "title", "state", "comments"],
        &[
            &["1", "Crash on start", "open", "12"],
            &["2", "Typo in docs", "closed", "3"],
            &["3", "Slow search", "Open", "40"],
            &["4", "Crash on exit", "open", "7"],
        ],
    )
}

fn run(input: Table, query: &str) -> Table {
    let query = parse(&format!("github | list_issues | {}", query)).unwrap();
    apply(input, &query.operators)
}

fn column<'a>(t: &'a Table, name: &str) -> Vec<&'a str> {
    let i = t.column_index(name).unwrap();
    t.rows.iter().map(|r| r[i].as_str()).collect()
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_empty_pipeline_returns_input() {
    let input = issues();
    assert_eq!(apply(input.clone(), &[]), input);
}

#[test]
fn test_failed_table_is_untouched() {
    let failed = Table::failed("Invalid JSON: boom");
    let result = apply(failed.clone(), &[Operator::Count]);
    assert_eq!(result, failed);
}

#[test]
fn test_metadata_is_carried_through() {
    let input = issues().with_execution_time(42);
    let result = run(input, "where state == 'open' | take 1");
    assert_eq!(result.execution_time_ms, 42);
    assert!(result.success);
    assert_eq!(result.row_count, 1);
}

#[test]
fn test_operators_run_in_order() {
    // take then sort differs from sort then take
    let a = run(issues(), "take 2 | sort by comments desc");
    let b = run(issues(), "sort by comments desc | take 2");
    assert_eq!(column(&a, "id"), vec!["1", "2"]);
    assert_eq!(column(&b, "id"), vec!["3", "1"]);
}

// ============================================================================
// Where
// ============================================================================

#[test]
fn test_where_equality_is_case_insensitive() {
    let result = run(issues(), "where state == 'OPEN'");
    assert_eq!(column(&result, "id"), vec!["1", "3", "4"]);
}

#[test]
fn test_where_numeric_comparison() {
    let result = run(issues(), "where comments > 9");
    assert_eq!(column(&result, "id"), vec!["1", "3"]);

    let result = run(issues(), "where comments <= 7");
    assert_eq!(column(&result, "id"), vec!["2", "4"]);
}

#[test]
fn test_where_text_operators() {
    assert_eq!(column(&run(issues(), "where title contains 'crash'"), "id"), vec!["1", "4"]);
    assert_eq!(column(&run(issues(), "where title has 'SEARCH'"), "id"), vec!["3"]);
    assert_eq!(column(&run(issues(), "where title startswith 'typo'"), "id"), vec!["2"]);
    assert_eq!(column(&run(issues(), "where title endswith 'EXIT'"), "id"), vec!["4"]);
}

#[test]
fn test_where_matches_is_case_insensitive_regex() {
    let result = run(issues(), r"where title matches '^crash on (start|exit)$'");
    assert_eq!(column(&result, "id"), vec!["1", "4"]);
}

#[test]
fn test_where_invalid_regex_matches_nothing() {
    let result = run(issues(), "where title matches '(unclosed'");
    assert!(result.rows.is_empty());
    assert_eq!(result.columns.len(), 4);
}

#[test]
fn test_where_and_or_both_conjoin() {
    let with_and = run(issues(), "where state == open and comments > 10");
    let with_or = run(issues(), "where state == open or comments > 10");
    assert_eq!(column(&with_and, "id"), vec!["1", "3"]);
    assert_eq!(with_or, with_and);
}

#[test]
fn test_where_unknown_column_excludes_rows() {
    let result = run(issues(), "where assignee == 'bob'");
    assert!(result.rows.is_empty());
    assert_eq!(result.row_count, 0);
}

#[test]
fn test_where_column_lookup_is_case_insensitive() {
    let result = run(issues(), "where STATE != open");
    assert_eq!(column(&result, "id"), vec!["2"]);
}

#[test]
fn test_where_exact_column_wins_over_case_insensitive() {
    let t = table(&["Name", "name"], &[&["a", "b"], &["b", "a"]]);
    let result = run(t, "where name == a");
    assert_eq!(result.rows, vec![vec!["b", "a"]]);
}

#[test]
fn test_where_rows_satisfy_all_conditions() {
    let conditions = vec![
        Condition::new("state", Comparator::NotEqual, "closed"),
        Condition::new("comments", Comparator::GreaterEqual, "7"),
        Condition::new("title", Comparator::Contains, "s"),
    ];
    let input = issues();
    let result = apply(input.clone(), &[Operator::Where { conditions: conditions.clone() }]);

    for row in &result.rows {
        for c in &conditions {
            let i = input.column_index(&c.column).unwrap();
            assert!(evaluate_condition(&row[i], c.operator, &c.value));
        }
    }
    assert_eq!(result.row_count, 3);
}

#[test]
fn test_text_ordering_when_not_numeric() {
    assert!(evaluate_condition("banana", Comparator::GreaterThan, "Apple"));
    assert!(evaluate_condition("abc", Comparator::LessEqual, "ABC"));
    // One side numeric only: text comparison
    assert!(evaluate_condition("10", Comparator::LessThan, "9a"));
}

#[test]
fn test_numeric_equality_ignores_formatting() {
    assert!(evaluate_condition("5.0", Comparator::Equal, "5"));
    assert!(evaluate_condition("-2", Comparator::LessThan, "1"));
    assert!(!evaluate_condition("5.0", Comparator::Contains, "5.00"));
}

#[test]
fn test_digit_separators_are_text() {
    assert!(!evaluate_condition("10", Comparator::Equal, "1_0"));
    assert!(!evaluate_condition("1_000", Comparator::GreaterThan, "999"));
    assert!(evaluate_condition("1e3", Comparator::Equal, "1000"));
    assert!(evaluate_condition("+5", Comparator::LessThan, "5.5"));

    let t = table(&["n"], &[&["10"], &["1_0"], &["7"]]);
    let result = run(t, "where n == '1_0'");
    assert_eq!(column(&result, "n"), vec!["1_0"]);
}

#[test]
fn test_non_numeric_shapes_are_text() {
    let t = table(
        &["v"],
        &[&["inf"], &["NaN"], &["1.2.3"], &["."], &["-"], &["1e"], &["0x10"], &["2"]],
    );
    let result = run(t, "sort by v");
    assert_eq!(
        column(&result, "v"),
        vec!["2", "-", ".", "0x10", "1.2.3", "1e", "NaN", "inf"]
    );
}

// ============================================================================
// Project
// ============================================================================

#[test]
fn test_project_in_requested_order() {
    let result = run(issues(), "project state, id");
    assert_eq!(result.columns, vec!["state", "id"]);
    assert_eq!(result.rows[0], vec!["open", "1"]);
}

#[test]
fn test_project_drops_unknown_and_resolves_case() {
    let result = run(issues(), "project missing, TITLE");
    assert_eq!(result.columns, vec!["title"]);
    assert_eq!(result.rows.len(), 4);
    assert!(result.rows.iter().all(|r| r.len() == 1));
}

#[test]
fn test_project_repeated_column_once() {
    let result = run(issues(), "project id, ID, id");
    assert_eq!(result.columns, vec!["id"]);
}

// ============================================================================
// Take
// ============================================================================

#[test]
fn test_take_prefix() {
    let input = issues();
    for n in [0, 1, 3, 4, 100] {
        let result = apply(input.clone(), &[Operator::Take { count: n }]);
        let expected = &input.rows[..n.min(input.rows.len())];
        assert_eq!(result.rows, expected.to_vec(), "Failed for take {}", n);
        assert_eq!(result.row_count, expected.len());
    }
}

// ============================================================================
// Sort
// ============================================================================

#[test]
fn test_sort_numeric_desc() {
    let t = table(&["n"], &[&["1"], &["10"], &["2"]]);
    let result = run(t, "sort by n desc");
    assert_eq!(column(&result, "n"), vec!["10", "2", "1"]);
}

#[test]
fn test_sort_text_ascending() {
    let result = run(issues(), "sort by title");
    assert_eq!(
        column(&result, "title"),
        vec!["Crash on exit", "Crash on start", "Slow search", "Typo in docs"]
    );
}

#[test]
fn test_sort_is_stable() {
    let t = table(
        &["k", "tag"],
        &[&["2", "a"], &["1", "b"], &["2", "c"], &["1", "d"], &["2", "e"]],
    );
    let asc = run(t.clone(), "sort by k");
    assert_eq!(column(&asc, "tag"), vec!["b", "d", "a", "c", "e"]);

    let desc = run(t, "sort by k desc");
    assert_eq!(column(&desc, "tag"), vec!["a", "c", "e", "b", "d"]);
}

#[test]
fn test_sort_numbers_before_text() {
    let t = table(&["v"], &[&["b"], &["3"], &["a"], &["-1"], &[""]]);
    let result = run(t, "sort by v");
    assert_eq!(column(&result, "v"), vec!["-1", "3", "", "a", "b"]);
}

#[test]
fn test_sort_digit_separators_as_text() {
    let t = table(&["n"], &[&["1_000"], &["999"], &["5"]]);
    let result = run(t, "sort by n");
    assert_eq!(column(&result, "n"), vec!["5", "999", "1_000"]);
}

#[test]
fn test_sort_unknown_column_is_noop() {
    let input = issues();
    let result = run(input.clone(), "sort by priority desc");
    assert_eq!(result, input);
}

// ============================================================================
// Count
// ============================================================================

#[test]
fn test_count_replaces_table() {
    let result = run(issues(), "count");
    assert_eq!(result.columns, vec!["Count"]);
    assert_eq!(result.rows, vec![vec!["4"]]);
    assert_eq!(result.row_count, 1);
}

#[test]
fn test_count_of_empty_table() {
    let result = apply(Table::empty(), &[Operator::Count]);
    assert_eq!(result.rows, vec![vec!["0"]]);
}

#[test]
fn test_count_after_where() {
    let result = run(issues(), "where state == closed | count");
    assert_eq!(result.rows, vec![vec!["1"]]);
}

// ============================================================================
// Extend
// ============================================================================

#[test]
fn test_extend_copies_column_case_insensitively() {
    let result = run(issues(), "extend status = STATE");
    assert_eq!(result.columns.last().unwrap(), "status");
    assert_eq!(column(&result, "status"), column(&issues(), "state"));
}

#[test]
fn test_extend_literal() {
    let result = run(issues(), "extend source = github");
    assert_eq!(column(&result, "source"), vec!["github"; 4]);
    assert!(result.rows.iter().all(|r| r.len() == 5));
}

#[test]
fn test_extend_does_not_evaluate() {
    let result = run(issues(), "extend double = comments x2");
    assert_eq!(column(&result, "double"), vec!["comments x2"; 4]);
}

#[test]
fn test_extend_existing_column_overwrites() {
    let result = run(issues(), "extend state = title");
    assert_eq!(result.columns.len(), 4);
    assert_eq!(column(&result, "state"), column(&issues(), "title"));
}

#[test]
fn test_extend_exact_source_column_wins() {
    let t = table(&["Name", "name"], &[&["Upper", "lower"]]);
    let result = run(t, "extend copy = name");
    assert_eq!(column(&result, "copy"), vec!["lower"]);
}

#[test]
fn test_extend_short_rows_do_not_panic() {
    let t = table(&["a", "b"], &[&["1", "2"], &["3"]]);
    let result = run(t, "extend b = a");
    assert_eq!(result.rows, vec![vec!["1", "1"], vec!["3"]]);
}

#[test]
fn test_extend_then_project() {
    let result = run(issues(), "extend owner = 'team-a' | project owner, id | take 2");
    assert_eq!(result.columns, vec!["owner", "id"]);
    assert_eq!(result.rows, vec![vec!["team-a", "1"], vec!["team-a", "2"]]);
}
