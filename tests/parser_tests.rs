// tests/parser_tests.rs

use mcpql::ast::{Comparator, Condition, Operator, Value};
use mcpql::lexer::tokenize;
use mcpql::parser::{Parser, parse};
use pretty_assertions::assert_eq;

fn operators(input: &str) -> Vec<Operator> {
    parse(input).unwrap().operators
}

fn cond(column: &str, operator: Comparator, value: &str) -> Condition {
    Condition::new(column, operator, value)
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn test_full_pipeline() {
    let query = parse(
        "github | list_issues(repo='org/repo') | where state == 'open' | project title, author | take 10",
    )
    .unwrap();

    assert_eq!(query.provider, "github");
    assert_eq!(query.tool, "list_issues");
    assert_eq!(query.parameters.len(), 1);
    assert_eq!(query.parameters["repo"], Value::String("org/repo".into()));
    assert_eq!(
        query.operators,
        vec![
            Operator::Where {
                conditions: vec![cond("state", Comparator::Equal, "open")]
            },
            Operator::Project {
                columns: vec!["title".into(), "author".into()]
            },
            Operator::Take { count: 10 },
        ]
    );
}

#[test]
fn test_dot_form() {
    let query = parse("filesystem.read_file(path='/tmp/data.csv')").unwrap();
    assert_eq!(query.provider, "filesystem");
    assert_eq!(query.tool, "read_file");
    assert_eq!(query.parameters["path"], Value::String("/tmp/data.csv".into()));
    assert!(query.operators.is_empty());
}

#[test]
fn test_dot_form_with_operators() {
    let query = parse("fs.list_dir(path='.') | count").unwrap();
    assert_eq!(query.operators, vec![Operator::Count]);
}

#[test]
fn test_call_without_parameters() {
    let query = parse("github | list_repos").unwrap();
    assert!(query.parameters.is_empty());

    let query = parse("github | list_repos()").unwrap();
    assert!(query.parameters.is_empty());
}

#[test]
fn test_parser_over_tokens() {
    let tokens = tokenize("a.b | take 1").unwrap();
    let query = Parser::new(tokens).parse_query().unwrap();
    assert_eq!(query.operators, vec![Operator::Take { count: 1 }]);
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn test_parameter_value_types() {
    let query =
        parse(r#"db | query(sql="select 1", limit=25, ratio=0.5, neg=-3, dry=true, mode=fast)"#)
            .unwrap();

    assert_eq!(query.parameters["sql"], Value::String("select 1".into()));
    assert_eq!(query.parameters["limit"], Value::Number(25.0));
    assert_eq!(query.parameters["ratio"], Value::Number(0.5));
    assert_eq!(query.parameters["neg"], Value::Number(-3.0));
    assert_eq!(query.parameters["dry"], Value::Bool(true));
    assert_eq!(query.parameters["mode"], Value::String("fast".into()));
}

#[test]
fn test_parameter_order_is_preserved() {
    let query = parse("t | x(z=1, a=2, m=3)").unwrap();
    let names: Vec<&str> = query.parameters.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
}

#[test]
fn test_duplicate_parameter_last_write_wins() {
    let query = parse("t | x(a=1, b=2, a=3)").unwrap();
    let entries: Vec<(&str, &Value)> = query
        .parameters
        .iter()
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    assert_eq!(
        entries,
        vec![("a", &Value::Number(3.0)), ("b", &Value::Number(2.0))]
    );
}

#[test]
fn test_reserved_words_as_parameter_names_and_values() {
    let query = parse("db | query(sort=desc, count=5, by=owner, where=true, contains=and)").unwrap();
    assert_eq!(query.parameters["sort"], Value::String("desc".into()));
    assert_eq!(query.parameters["count"], Value::Number(5.0));
    assert_eq!(query.parameters["by"], Value::String("owner".into()));
    assert_eq!(query.parameters["where"], Value::Bool(true));
    assert_eq!(query.parameters["contains"], Value::String("and".into()));
}

#[test]
fn test_boolean_parameter_any_case() {
    let query = parse("t | x(flag=FALSE)").unwrap();
    assert_eq!(query.parameters["flag"], Value::Bool(false));
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_where_with_and_or() {
    let ops = operators("t | x | where a > 5 and b contains 'x' or c == true");
    assert_eq!(
        ops,
        vec![Operator::Where {
            conditions: vec![
                cond("a", Comparator::GreaterThan, "5"),
                cond("b", Comparator::Contains, "x"),
                cond("c", Comparator::Equal, "true"),
            ]
        }]
    );
}

#[test]
fn test_where_all_comparators() {
    let cases = vec![
        ("==", Comparator::Equal),
        ("!=", Comparator::NotEqual),
        (">", Comparator::GreaterThan),
        (">=", Comparator::GreaterEqual),
        ("<", Comparator::LessThan),
        ("<=", Comparator::LessEqual),
        ("contains", Comparator::Contains),
        ("startswith", Comparator::StartsWith),
        ("endswith", Comparator::EndsWith),
        ("has", Comparator::Has),
        ("MATCHES", Comparator::Matches),
    ];

    for (text, expected) in cases {
        let ops = operators(&format!("t | x | where col {} v", text));
        match &ops[0] {
            Operator::Where { conditions } => {
                assert_eq!(conditions[0].operator, expected, "Failed for: {}", text)
            }
            other => panic!("Expected where, got {:?}", other),
        }
    }
}

#[test]
fn test_where_identifier_value() {
    let ops = operators("t | x | where state != closed");
    assert_eq!(
        ops,
        vec![Operator::Where {
            conditions: vec![cond("state", Comparator::NotEqual, "closed")]
        }]
    );
}

#[test]
fn test_sort_forms() {
    assert_eq!(
        operators("t | x | sort by a"),
        vec![Operator::Sort { column: "a".into(), ascending: true }]
    );
    assert_eq!(
        operators("t | x | sort a desc"),
        vec![Operator::Sort { column: "a".into(), ascending: false }]
    );
    assert_eq!(
        operators("t | x | sort by a ASC"),
        vec![Operator::Sort { column: "a".into(), ascending: true }]
    );
}

#[test]
fn test_extend_copies_raw_tokens() {
    assert_eq!(
        operators("t | x | extend owner = author | take 1"),
        vec![
            Operator::Extend {
                column_name: "owner".into(),
                expression: "author".into()
            },
            Operator::Take { count: 1 },
        ]
    );

    assert_eq!(
        operators("t | x | extend flag = price > 2"),
        vec![Operator::Extend {
            column_name: "flag".into(),
            expression: "price > 2".into()
        }]
    );
}

#[test]
fn test_extend_joins_tokens_with_spaces() {
    assert_eq!(
        operators("t | x | extend label = 'hello world' , 3"),
        vec![Operator::Extend {
            column_name: "label".into(),
            expression: "hello world , 3".into()
        }]
    );
}

#[test]
fn test_extend_without_expression() {
    assert_eq!(
        operators("t | x | extend empty ="),
        vec![Operator::Extend {
            column_name: "empty".into(),
            expression: String::new()
        }]
    );
}

#[test]
fn test_operators_keep_order() {
    let ops = operators("t | x | take 5 | sort by a | extend b = a | count");
    let names: Vec<&str> = ops.iter().map(|op| op.name()).collect();
    assert_eq!(names, vec!["take", "sort", "extend", "count"]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_tool() {
    let err = parse("github |").unwrap_err();
    assert!(err.message.contains("tool name"), "message: {}", err.message);
    assert!(err.message.contains("end of input"));
    assert_eq!((err.line, err.column), (1, 8));
}

#[test]
fn test_empty_input() {
    let err = parse("").unwrap_err();
    assert!(err.message.contains("provider name"));
    assert_eq!((err.line, err.column), (1, 1));
}

#[test]
fn test_missing_separator() {
    let err = parse("github list").unwrap_err();
    assert_eq!(err.message, "Expected '|' or '.' after provider name but found 'list'");
    assert_eq!(err.column, 8);
}

#[test]
fn test_keyword_as_tool_is_rejected() {
    let err = parse("github | where a == 1").unwrap_err();
    assert!(err.message.contains("tool name"));
    assert_eq!(err.column, 10);
}

#[test]
fn test_unknown_operator() {
    let err = parse("t | x | filter a == 1").unwrap_err();
    assert!(err.message.starts_with("Expected operator"));
    assert!(err.message.contains("'filter'"));
    assert_eq!(err.column, 9);
}

#[test]
fn test_unclosed_parameters() {
    let err = parse("t | x(a=1").unwrap_err();
    assert!(err.message.contains("')'"));
    assert!(err.message.contains("end of input"));
    assert_eq!(err.column, 9);
}

#[test]
fn test_missing_parameter_value() {
    let err = parse("t | x(a=)").unwrap_err();
    assert!(err.message.contains("parameter value"));
    assert_eq!(err.column, 9);
}

#[test]
fn test_missing_equals_in_parameter() {
    let err = parse("t | x(a 1)").unwrap_err();
    assert!(err.message.contains("'='"));
}

#[test]
fn test_take_requires_non_negative_integer() {
    for input in ["t | x | take -1", "t | x | take 1.5", "t | x | take 'ten'"] {
        assert!(parse(input).is_err(), "Should fail: {}", input);
    }
}

#[test]
fn test_where_needs_comparator() {
    let err = parse("t | x | where a b").unwrap_err();
    assert!(err.message.contains("comparison operator"));
    assert_eq!(err.column, 17);
}

#[test]
fn test_dangling_and() {
    let err = parse("t | x | where a == 1 and").unwrap_err();
    assert!(err.message.contains("column name"));
    assert_eq!(err.column, 22);
}

#[test]
fn test_trailing_garbage() {
    let err = parse("t | x | count extra").unwrap_err();
    assert_eq!(err.message, "Expected '|' or end of query but found 'extra'");
}

#[test]
fn test_error_on_second_line() {
    let err = parse("github | list_issues\n| take many").unwrap_err();
    assert_eq!((err.line, err.column), (2, 8));
}

#[test]
fn test_lex_error_surfaces_through_parse() {
    let err = parse("t | x | where a == 'open").unwrap_err();
    assert_eq!(err.message, "Unterminated string literal");
    assert_eq!(err.column, 20);
}
