//! # MCPQL - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree of MCPQL, a pipe-based language
//! for calling a tool on a provider and post-processing the tool's tabular result.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer, with source positions
//! - **[values]** - Typed parameter values (`String | Number | Bool`)
//! - **[operators]** - Pipeline operators and `where` conditions
//! - **[query]** - The complete query: provider, tool, parameters, operators
//!
//! ## Quick Start
//!
//! ```text
//! github | list_issues(repo='org/repo') | where state == 'open' | take 10
//! ```
//!
//! This query calls `list_issues` on the `github` provider, keeps the open
//! issues and returns the first ten rows.
//!
//! ## Core Concepts
//!
//! ### Call Structure
//!
//! Every query starts with a provider and a tool, separated by `|` or `.`:
//!
//! ```text
//! provider | tool(key=value, ...) | operator | operator ...
//! provider.tool(key=value, ...) | operator ...
//! ```
//!
//! ### The Six Operators
//!
//! - **where** - keep rows matching every condition
//! - **project** - keep and reorder columns
//! - **take** - keep the first N rows
//! - **sort** - stable sort by one column
//! - **count** - replace the table with its row count
//! - **extend** - append a column copied from another column or a literal
//!
//! ### Reserved Words as Names
//!
//! Reserved words (`count`, `sort`, `by`, ...) are still accepted as parameter
//! names and values inside a tool call:
//!
//! ```text
//! db | query(sort=desc, count=5)
//! ```
pub mod operators;
pub mod query;
pub mod tokens;
pub mod values;

pub use operators::{Comparator, Condition, Operator};
pub use query::Query;
pub use tokens::{Position, Token, TokenKind};
pub use values::Value;
