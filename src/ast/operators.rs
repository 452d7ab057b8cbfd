use serde::Serialize;

/// Comparison used by a `where` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparator {
    /// Equal (`==`)
    #[serde(rename = "==")]
    Equal,
    /// Not equal (`!=`)
    #[serde(rename = "!=")]
    NotEqual,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    GreaterThan,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GreaterEqual,
    /// Less than (`<`)
    #[serde(rename = "<")]
    LessThan,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LessEqual,
    /// Case-insensitive substring (`contains`)
    #[serde(rename = "contains")]
    Contains,
    /// Case-insensitive prefix (`startswith`)
    #[serde(rename = "startswith")]
    StartsWith,
    /// Case-insensitive suffix (`endswith`)
    #[serde(rename = "endswith")]
    EndsWith,
    /// Case-insensitive substring, alias of `contains` (`has`)
    #[serde(rename = "has")]
    Has,
    /// Case-insensitive regular expression (`matches`)
    #[serde(rename = "matches")]
    Matches,
}

impl Comparator {
    /// Looks up an operator token's text. Word operators are case-insensitive.
    pub fn from_token(text: &str) -> Option<Comparator> {
        let op = match text.to_lowercase().as_str() {
            "==" => Comparator::Equal,
            "!=" => Comparator::NotEqual,
            ">" => Comparator::GreaterThan,
            ">=" => Comparator::GreaterEqual,
            "<" => Comparator::LessThan,
            "<=" => Comparator::LessEqual,
            "contains" => Comparator::Contains,
            "startswith" => Comparator::StartsWith,
            "endswith" => Comparator::EndsWith,
            "has" => Comparator::Has,
            "matches" => Comparator::Matches,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterEqual => ">=",
            Comparator::LessThan => "<",
            Comparator::LessEqual => "<=",
            Comparator::Contains => "contains",
            Comparator::StartsWith => "startswith",
            Comparator::EndsWith => "endswith",
            Comparator::Has => "has",
            Comparator::Matches => "matches",
        }
    }

    /// True for the operators that compare numerically when both sides are numbers.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Comparator::Equal
                | Comparator::NotEqual
                | Comparator::GreaterThan
                | Comparator::GreaterEqual
                | Comparator::LessThan
                | Comparator::LessEqual
        )
    }
}

/// A single `column comparator value` test inside `where`.
///
/// The value is always kept as text; numeric interpretation happens when the
/// condition is evaluated against a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub column: String,
    pub operator: Comparator,
    pub value: String,
}

impl Condition {
    pub fn new(column: impl Into<String>, operator: Comparator, value: impl Into<String>) -> Self {
        Condition {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }
}

/// One stage of the post-processing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operator {
    /// Keep rows where every condition holds
    ///
    /// # Examples
    /// ```text
    /// where state == 'open' and comments > 5
    /// ```
    Where { conditions: Vec<Condition> },

    /// Keep the listed columns, in the listed order
    ///
    /// # Examples
    /// ```text
    /// project title, author
    /// ```
    Project { columns: Vec<String> },

    /// Keep the first `count` rows
    ///
    /// # Examples
    /// ```text
    /// take 10
    /// ```
    Take { count: usize },

    /// Stable sort by one column
    ///
    /// # Examples
    /// ```text
    /// sort by created desc
    /// sort title
    /// ```
    Sort { column: String, ascending: bool },

    /// Replace the table with a single `Count` cell
    Count,

    /// Append a column holding a copy of another column or a literal
    ///
    /// # Examples
    /// ```text
    /// extend owner = author
    /// extend source = github
    /// ```
    Extend {
        #[serde(rename = "columnName")]
        column_name: String,
        expression: String,
    },
}

impl Operator {
    /// The keyword that introduces this operator.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Where { .. } => "where",
            Operator::Project { .. } => "project",
            Operator::Take { .. } => "take",
            Operator::Sort { .. } => "sort",
            Operator::Count => "count",
            Operator::Extend { .. } => "extend",
        }
    }
}
