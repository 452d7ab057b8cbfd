//! Run MCPQL queries against a JSON tool result

use super::CliError;
use crate::{Table, apply, json_to_table, output, parse};

/// How a result table is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The table's JSON shape
    #[default]
    Json,
    /// Aligned text grid
    Table,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The MCPQL query to execute
    pub query: String,
    /// JSON tool result the pipeline runs over
    pub input: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    pub format: OutputFormat,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Pipeline ran and produced a table
    Success(Table),
}

/// Execute a check: parse the query, then (unless syntax-only) convert the
/// input to a table and apply the query's operators to it.
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = parse(&options.query)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let table = json_to_table(json, 0);
    if !table.success {
        return Err(CliError::Table(table.error.unwrap_or_default()));
    }

    log::info!(
        "running {} operator(s) for {}.{} over {} row(s)",
        query.operators.len(),
        query.provider,
        query.tool,
        table.row_count
    );

    Ok(CheckResult::Success(apply(table, &query.operators)))
}

/// Render a result table per the check options.
pub fn render(table: &Table, options: &CheckOptions) -> Result<String, CliError> {
    let rendered = match (options.format, options.pretty) {
        (OutputFormat::Table, _) => output::to_text(table),
        (OutputFormat::Json, true) => output::to_json_pretty(table)?,
        (OutputFormat::Json, false) => output::to_json(table)?,
    };
    Ok(rendered)
}
