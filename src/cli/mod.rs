//! CLI support for mcpql
//!
//! Provides programmatic access to the `mcpql` command functionality so hosts
//! can embed the same check/format/validate behaviour.

mod check;
mod docs;
mod onboard;

pub use check::{CheckOptions, CheckResult, OutputFormat, execute_check, render};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use onboard::get_onboarding_content;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Query text failed to parse
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Result rendering failed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Tool result was not usable as a table
    #[error("Invalid tool result: {0}")]
    Table(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'mcpql docs' to see available categories.")]
    UnknownCategory(String),
}
