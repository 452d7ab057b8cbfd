use std::fmt;

/// A 1-based line/column location in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// The first character of the input.
    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Name of a provider, tool, parameter or column
    ///
    /// Starts with a letter, `_` or `-`, followed by letters, digits, `_` or `-`.
    ///
    /// # Examples
    /// ```text
    /// github
    /// list_issues
    /// created-at
    /// ```
    Identifier,

    /// Single- or double-quoted string; the token text is the unescaped content
    ///
    /// # Examples
    /// ```text
    /// 'org/repo'
    /// "it\'s"
    /// ```
    String,

    /// Number literal, text kept verbatim
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -3.5
    /// ```
    Number,

    /// `true` or `false` (any casing)
    Boolean,

    // Punctuation
    /// Pipeline separator `|`
    Pipe,
    /// Provider/tool separator `.`
    Dot,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `,`
    Comma,
    /// Parameter and extend assignment `=`
    Equals,

    /// Comparison operator
    ///
    /// # Examples
    /// ```text
    /// ==  !=  >  >=  <  <=
    /// contains  startswith  endswith  has  matches
    /// ```
    Operator,

    // Reserved words
    Where,
    Project,
    Take,
    Sort,
    By,
    Count,
    Extend,
    Asc,
    Desc,
    And,
    Or,
    Not,
}

impl TokenKind {
    /// Classifies a word as a reserved word, a keyword operator, a boolean,
    /// or a plain identifier. Lookup is case-insensitive.
    pub fn for_word(word: &str) -> TokenKind {
        match word.to_lowercase().as_str() {
            "where" => TokenKind::Where,
            "project" => TokenKind::Project,
            "take" => TokenKind::Take,
            "sort" => TokenKind::Sort,
            "by" => TokenKind::By,
            "count" => TokenKind::Count,
            "extend" => TokenKind::Extend,
            "asc" => TokenKind::Asc,
            "desc" => TokenKind::Desc,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "true" | "false" => TokenKind::Boolean,
            "contains" | "startswith" | "endswith" | "has" | "matches" => TokenKind::Operator,
            _ => TokenKind::Identifier,
        }
    }

    /// True for the reserved words that only have meaning after a `|`.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Where
                | TokenKind::Project
                | TokenKind::Take
                | TokenKind::Sort
                | TokenKind::By
                | TokenKind::Count
                | TokenKind::Extend
                | TokenKind::Asc
                | TokenKind::Desc
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
        )
    }

    /// Human-readable name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Pipe => "'|'",
            TokenKind::Dot => "'.'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Equals => "'='",
            TokenKind::Operator => "comparison operator",
            TokenKind::Where => "'where'",
            TokenKind::Project => "'project'",
            TokenKind::Take => "'take'",
            TokenKind::Sort => "'sort'",
            TokenKind::By => "'by'",
            TokenKind::Count => "'count'",
            TokenKind::Extend => "'extend'",
            TokenKind::Asc => "'asc'",
            TokenKind::Desc => "'desc'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
        }
    }
}

/// A lexical token together with where it started in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text; unescaped content for strings, verbatim otherwise
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// True if the token can stand in for a name inside a tool call:
    /// identifiers plus every reserved word, including `true`/`false`
    /// and the word operators.
    pub fn is_word(&self) -> bool {
        match self.kind {
            TokenKind::Identifier | TokenKind::Boolean => true,
            TokenKind::Operator => self.text.chars().all(|c| c.is_alphabetic()),
            kind => kind.is_keyword(),
        }
    }
}
