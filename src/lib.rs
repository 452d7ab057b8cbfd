pub mod ast;
pub mod cli;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod table;
pub mod validator;

pub use ast::{Comparator, Condition, Operator, Position, Query, Token, TokenKind, Value};
pub use convert::{json_to_table, value_to_table};
pub use error::ParseError;
pub use evaluator::{apply, execute};
pub use format::format;
pub use lexer::{Lexer, tokenize};
pub use output::{to_json, to_json_pretty, to_text};
pub use parser::{Parser, parse};
pub use table::Table;
pub use validator::{ValidationResult, looks_like_mcpql, validate};
