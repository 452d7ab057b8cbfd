//! Documentation content for the mcpql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Parameters,
    Operators,
    Conditions,
    Tables,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "call" => Some(Self::Syntax),
            "parameters" | "params" => Some(Self::Parameters),
            "operators" | "ops" | "pipeline" => Some(Self::Operators),
            "conditions" | "where" | "comparisons" => Some(Self::Conditions),
            "tables" | "table" | "json" => Some(Self::Tables),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"MCPQL DOCUMENTATION

MCPQL calls a tool on a provider and post-processes the result as a table.
A query names the provider and tool, passes typed parameters, then pipes the
result through operators.

DOCUMENTATION CATEGORIES

  syntax            Provider/tool call forms and tokens
  parameters        Parameter names, values and reserved words
  operators         where, project, take, sort, count, extend
  conditions        Comparison operators and how values are compared
  tables            How JSON tool results become tables

QUICK REFERENCE

  provider | tool(k='v')         Call a tool
  provider.tool(k='v')           Same call, dot form
  | where col == 'x'             Filter rows
  | project a, b                 Keep columns
  | take 10                      First rows
  | sort by col desc             Stable sort
  | count                        Row count
  | extend new = col             Add a column

Run 'mcpql doc <category>' for detailed documentation.
Run 'mcpql onboard' for a short tutorial.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Parameters) => Ok(PARAMETERS_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Conditions) => Ok(CONDITIONS_DOC),
        Some(DocCategory::Tables) => Ok(TABLES_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

CALL FORMS
  provider | tool
  provider | tool(name=value, ...)
  provider.tool(name=value, ...)

  The separator after the provider may be '|' or '.'; both mean the same.
  Operators follow the call, each introduced by '|':

    github | list_issues(repo='org/repo') | where state == 'open' | take 10

TOKENS
  Identifiers      letters, digits, '_' and '-'; may start with '_' or '-'
  Strings          'single' or "double" quoted; '\' keeps the next character
  Numbers          42, -7, 3.5
  Booleans         true, false
  Whitespace       spaces, tabs and newlines are ignored

  Reserved words are matched case-insensitively:
    where project take sort by count extend asc desc and or not

ERRORS
  Errors report what was expected, what was found, and the 1-based line and
  column of the offending token (or of the last token at end of input):

    $ mcpql validate "github |"
    Expected tool name but found end of input at line 1, column 8
"#;

const PARAMETERS_DOC: &str = r#"PARAMETERS

  tool(name=value, name=value)

VALUES
  'text' / "text"   String
  42, -1.5          Number
  true, false       Boolean
  bare_word         String (the word itself)

  Reserved words are allowed as names and as bare values inside a call:

    db | query(sort=desc, count=5, by=owner)

DUPLICATES
  A repeated name keeps its first position and its last value:

    tool(a=1, b=2, a=3)   =>   a=3, b=2
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

Operators run left to right; each sees the table produced by the previous one.

WHERE
  | where col == 'x'
  | where col > 5 and other contains 'abc'
    Keep rows where every condition holds. 'or' is accepted but conditions are
    always combined with 'and'. A condition on an unknown column is false.

PROJECT
  | project title, author
    Keep the named columns in the given order. Unknown names are skipped.

TAKE
  | take 10
    Keep the first N rows.

SORT
  | sort by created
  | sort priority desc
    Stable sort on one column. Cells that are numbers sort numerically and
    before text. Sorting on an unknown column leaves the table unchanged.

COUNT
  | count
    Replace the table with one 'Count' column holding the row count.

EXTEND
  | extend owner = author
  | extend source = github
    Append a column. If the right-hand side names an existing column, each row
    copies that column's value; otherwise every row gets the text as written.
"#;

const CONDITIONS_DOC: &str = r#"CONDITIONS

  column operator value

COMPARISONS
  ==  !=  >  >=  <  <=
    Numeric when both the cell and the value are numbers, otherwise
    case-insensitive text comparison.

TEXT OPERATORS (case-insensitive)
  contains      Substring
  has           Substring (same as contains)
  startswith    Prefix
  endswith      Suffix
  matches       Regular expression

EXAMPLES
  | where comments >= 10
  | where title contains 'bug'
  | where version matches '^v2\.'
  | where state != closed
"#;

const TABLES_DOC: &str = r#"TABLES

Tool results are JSON; they are turned into tables before operators run.
Every cell is text.

  [ {...}, {...} ]         One row per object; columns are all keys in
                           first-seen order, missing keys are empty
  [ 1, 2, 3 ]              One 'value' column
  { "items": [...], ... }  The first property holding a non-empty list of
                           objects is used as the rows
  { "a": 1, "b": 2 }       A single row
  42 / "text"              A single 'value' cell

  Nested objects and arrays inside a cell keep their JSON text.
"#;
